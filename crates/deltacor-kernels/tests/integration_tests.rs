//! Integration tests for deltacor-kernels
//!
//! These tests drive the public entry points the way a transition-probability
//! pipeline does: genes × cells matrices in, cells × cells correlations out.

use deltacor_kernels::{
    delta_correlation, delta_correlation_log10, delta_correlation_partial,
    delta_correlation_sqrt_partial, CorrelationConfig, CorrelationEngine, CorrelationError,
    TransformVariant,
};
use scirs2_core::ndarray_ext::{array, Array2};

/// Synthetic expression and velocity with a smooth gene/cell structure
fn synthetic(genes: usize, cells: usize) -> (Array2<f64>, Array2<f64>) {
    let e = Array2::from_shape_fn((genes, cells), |(j, c)| {
        let t = c as f64 / cells as f64;
        (j as f64 * 0.3 + 4.0 * t).sin() + 0.1 * j as f64
    });
    let d = Array2::from_shape_fn((genes, cells), |(j, c)| {
        let t = c as f64 / cells as f64;
        (j as f64 * 0.3 + 4.0 * t).cos() * (1.0 + 0.05 * (j % 7) as f64)
    });
    (e, d)
}

/// Each cell's `k` forward neighbors, wrapping around
fn ring_neighbors(cells: usize, k: usize) -> Array2<i64> {
    Array2::from_shape_fn((cells, k), |(c, s)| ((c + s + 1) % cells) as i64)
}

#[test]
fn test_two_cell_scenario() {
    let e = array![[0.0, 1.0], [0.0, 3.0]];
    let d = array![[1.0, 2.0], [2.0, 4.0]];

    let out = delta_correlation(&e.view(), &d.view(), None).unwrap();
    assert_eq!(out.shape(), &[2, 2]);
    assert_eq!(out[[0, 0]], 0.0);
    assert_eq!(out[[1, 1]], 0.0);
    assert!((out[[0, 1]] - 1.0).abs() < 1e-10);
    assert!((out[[1, 0]] + 1.0).abs() < 1e-10);
}

#[test]
fn test_shape_mismatch_both_kernels() {
    let e = Array2::<f64>::zeros((50, 10));
    let d = Array2::<f64>::zeros((40, 10));
    let ixs = ring_neighbors(10, 3);

    let dense = delta_correlation(&e.view(), &d.view(), None).unwrap_err();
    let sparse = delta_correlation_partial(&e.view(), &d.view(), &ixs.view(), None).unwrap_err();

    let expected = CorrelationError::ShapeMismatch {
        expected: vec![50, 10],
        actual: vec![40, 10],
    };
    assert_eq!(dense, expected);
    assert_eq!(sparse, expected);
}

#[test]
fn test_neighbor_rows_must_match_cells() {
    let (e, d) = synthetic(50, 10);
    let ixs = ring_neighbors(5, 3);

    let err = delta_correlation_partial(&e.view(), &d.view(), &ixs.view(), None).unwrap_err();
    assert_eq!(
        err,
        CorrelationError::NeighborShapeMismatch {
            expected_rows: 10,
            actual_rows: 5,
            neighbors: vec![5, 3],
        }
    );
}

#[test]
fn test_tiny_magnitudes_stay_finite() {
    let (e, d) = synthetic(40, 12);
    let e = e.mapv(|x| x * 1e-10);
    let d = d.mapv(|x| x * 1e-10);

    let out = delta_correlation(&e.view(), &d.view(), None).unwrap();
    assert!(out.iter().all(|x| x.is_finite()));
    assert!(out.iter().all(|&x| (-1.0..=1.0).contains(&x)));
}

#[test]
fn test_large_magnitudes_match_unit_scale() {
    let (e, d) = synthetic(40, 12);
    let big_e = e.mapv(|x| x * 1e6);
    let big_d = d.mapv(|x| x * 1e6);

    let unit = delta_correlation(&e.view(), &d.view(), None).unwrap();
    let big = delta_correlation(&big_e.view(), &big_d.view(), None).unwrap();
    for (a, b) in unit.iter().zip(big.iter()) {
        assert!(b.is_finite());
        assert!((a - b).abs() < 1e-8, "{} vs {}", a, b);
    }
}

#[test]
fn test_huge_magnitudes_do_not_overflow() {
    let e = array![[0.0, 1e200], [0.0, 3e200]];
    let d = array![[1e200, 2e200], [2e200, 4e200]];
    let ixs = array![[1_usize], [0]];

    let dense = delta_correlation(&e.view(), &d.view(), None).unwrap();
    let sparse = delta_correlation_partial(&e.view(), &d.view(), &ixs.view(), None).unwrap();
    for out in [&dense, &sparse] {
        assert!(out.iter().all(|x| x.is_finite()));
        assert_eq!(out[[0, 0]], 0.0);
        assert!((out[[0, 1]] - 1.0).abs() < 1e-10);
        assert!((out[[1, 0]] + 1.0).abs() < 1e-10);
    }

    let (e, d) = synthetic(40, 12);
    let unit = delta_correlation(&e.view(), &d.view(), None).unwrap();
    let big_e = e.mapv(|x| x * 1e250);
    let big_d = d.mapv(|x| x * 1e250);
    let big = delta_correlation(&big_e.view(), &big_d.view(), None).unwrap();
    for (a, b) in unit.iter().zip(big.iter()) {
        assert!((a - b).abs() < 1e-8, "{} vs {}", a, b);
    }
}

#[test]
fn test_mixed_gene_scales() {
    let (e, d) = synthetic(30, 10);
    let e = Array2::from_shape_fn(e.raw_dim(), |(j, c)| {
        if j % 2 == 0 {
            e[[j, c]] * 1e-6
        } else {
            e[[j, c]] * 1e4
        }
    });

    let out = delta_correlation(&e.view(), &d.view(), None).unwrap();
    assert!(out.iter().all(|x| x.is_finite()));
    assert!(out.iter().all(|&x| (-1.0..=1.0).contains(&x)));
}

#[test]
fn test_identical_expression_never_nan() {
    let (_, d) = synthetic(25, 9);
    let e = Array2::from_shape_fn((25, 9), |(j, _)| j as f64 * 0.5);

    let dense = delta_correlation(&e.view(), &d.view(), None).unwrap();
    let ixs = ring_neighbors(9, 4);
    let sparse = delta_correlation_partial(&e.view(), &d.view(), &ixs.view(), None).unwrap();

    assert!(dense.iter().all(|&x| x == 0.0));
    assert!(sparse.iter().all(|&x| x == 0.0));
}

#[test]
fn test_thread_count_independence() {
    let (e, d) = synthetic(60, 80);
    let ixs = ring_neighbors(80, 6);

    let baseline = delta_correlation(&e.view(), &d.view(), Some(1)).unwrap();
    let baseline_sparse =
        delta_correlation_partial(&e.view(), &d.view(), &ixs.view(), Some(1)).unwrap();

    for threads in [None, Some(2), Some(4), Some(7)] {
        let dense = delta_correlation(&e.view(), &d.view(), threads).unwrap();
        let sparse = delta_correlation_partial(&e.view(), &d.view(), &ixs.view(), threads).unwrap();
        assert_eq!(dense, baseline, "dense differs with {:?} threads", threads);
        assert_eq!(sparse, baseline_sparse, "sparse differs with {:?} threads", threads);
    }
}

#[test]
fn test_repeated_calls_are_deterministic() {
    let (e, d) = synthetic(35, 20);
    let engine = CorrelationEngine::new(CorrelationConfig::new().min_cells_for_parallel(0)).unwrap();

    let first = engine.dense(&e.view(), &d.view()).unwrap();
    for _ in 0..3 {
        assert_eq!(engine.dense(&e.view(), &d.view()).unwrap(), first);
    }
}

#[test]
fn test_f32_input_matches_f64() {
    let e32 = array![[0.0_f32, 1.0, 0.5], [0.0, 3.0, 2.0], [1.0, 0.0, 0.25]];
    let d32 = array![[1.0_f32, 2.0, 0.0], [2.0, 4.0, 1.0], [0.5, 1.0, 3.0]];
    let e64 = e32.mapv(f64::from);
    let d64 = d32.mapv(f64::from);

    let a = delta_correlation(&e32.view(), &d32.view(), None).unwrap();
    let b = delta_correlation(&e64.view(), &d64.view(), None).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_sparse_neighbors_subset_of_dense() {
    let (e, d) = synthetic(45, 30);
    let ixs = ring_neighbors(30, 5);

    let dense = delta_correlation(&e.view(), &d.view(), None).unwrap();
    let sparse = delta_correlation_partial(&e.view(), &d.view(), &ixs.view(), None).unwrap();

    let mut visited = Array2::<bool>::from_elem((30, 30), false);
    for ((c, _), &i) in ixs.indexed_iter() {
        visited[[c, i as usize]] = true;
    }
    for ((c, i), &v) in sparse.indexed_iter() {
        if visited[[c, i]] {
            assert_eq!(v, dense[[c, i]]);
        } else {
            assert_eq!(v, 0.0);
        }
    }
}

#[test]
fn test_negative_neighbor_index() {
    let (e, d) = synthetic(10, 4);
    let mut ixs = ring_neighbors(4, 2);
    ixs[[2, 0]] = -3;

    let err = delta_correlation_partial(&e.view(), &d.view(), &ixs.view(), None).unwrap_err();
    assert_eq!(
        err,
        CorrelationError::NeighborIndexOutOfRange {
            cell: 2,
            slot: 0,
            index: -3,
            n_cells: 4,
        }
    );
}

#[test]
fn test_transformed_variants_fail() {
    let (e, d) = synthetic(10, 4);
    let ixs = ring_neighbors(4, 2);

    let log = delta_correlation_log10(&e.view(), &d.view(), None, 1.0).unwrap_err();
    let sqrt = delta_correlation_sqrt_partial(&e.view(), &d.view(), &ixs.view(), Some(2), 0.0)
        .unwrap_err();

    assert_eq!(
        log,
        CorrelationError::UnsupportedOperation {
            variant: TransformVariant::Log10
        }
    );
    assert_eq!(
        sqrt,
        CorrelationError::UnsupportedOperation {
            variant: TransformVariant::SqrtPartial
        }
    );
}
