//! Velocity / expression-difference correlation on a synthetic trajectory
//!
//! Cells are sampled along a one-dimensional trajectory through expression
//! space. Each cell's velocity points forward along the trajectory, so its
//! correlation with cells further ahead should be strongly positive and
//! with cells behind strongly negative.
//!
//! This example shows how to:
//! 1. Build noisy genes × cells expression and velocity matrices
//! 2. Compute the dense (all pairs) correlation
//! 3. Build a k-nearest-neighbor index and compute the sparse correlation
//! 4. Compare timings and check that visited entries agree
//!
//! # Usage
//!
//! ```bash
//! cargo run --example velocity_correlation --release
//! RUST_LOG=deltacor_kernels=debug cargo run --example velocity_correlation --features tracing
//! ```

use anyhow::Result;
use deltacor_kernels::tracing_support::{init_tracing, TracingConfig};
use deltacor_kernels::{
    delta_correlation, delta_correlation_partial, CorrelationConfig, CorrelationEngine,
};
use scirs2_core::ndarray_ext::Array2;
use scirs2_core::random::{rngs::StdRng, Rng, SeedableRng};
use std::f64::consts::TAU;
use std::time::Instant;

const GENES: usize = 300;
const CELLS: usize = 600;
const NEIGHBORS: usize = 30;

/// Expression along a smooth trajectory plus noise, and forward velocities
fn create_trajectory(seed: u64) -> (Array2<f64>, Array2<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let phases: Vec<f64> = (0..GENES).map(|_| rng.random_range(0.0..TAU)).collect();

    let mut expression = Array2::<f64>::zeros((GENES, CELLS));
    let mut velocity = Array2::<f64>::zeros((GENES, CELLS));
    for c in 0..CELLS {
        let t = c as f64 / CELLS as f64 * 3.0;
        for j in 0..GENES {
            let noise: f64 = rng.random_range(-0.05..0.05);
            let jitter: f64 = rng.random_range(-0.1..0.1);
            expression[[j, c]] = 2.0 + (t + phases[j]).sin() + noise;
            velocity[[j, c]] = (t + phases[j]).cos() + jitter;
        }
    }
    (expression, velocity)
}

/// Brute-force k nearest neighbors in expression space, excluding self
fn knn(expression: &Array2<f64>, k: usize) -> Array2<usize> {
    let cells = expression.ncols();
    let mut ixs = Array2::<usize>::zeros((cells, k));

    for c in 0..cells {
        let mut dists: Vec<(f64, usize)> = (0..cells)
            .filter(|&i| i != c)
            .map(|i| {
                let d2 = expression
                    .column(c)
                    .iter()
                    .zip(expression.column(i).iter())
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum::<f64>();
                (d2, i)
            })
            .collect();
        dists.sort_by(|a, b| a.0.total_cmp(&b.0));
        for (slot, &(_, i)) in dists.iter().take(k).enumerate() {
            ixs[[c, slot]] = i;
        }
    }
    ixs
}

fn main() -> Result<()> {
    init_tracing(TracingConfig::default())?;

    println!("=== Velocity / Expression-Difference Correlation ===\n");
    println!("Genes: {}, cells: {}, neighbors: {}", GENES, CELLS, NEIGHBORS);

    let (expression, velocity) = create_trajectory(42);

    // Dense
    let start = Instant::now();
    let dense = delta_correlation(&expression.view(), &velocity.view(), None)?;
    let dense_time = start.elapsed();
    println!("\nDense kernel: {:.2?}", dense_time);

    let c = CELLS / 3;
    println!(
        "  cell {}: ahead {:+.3}, behind {:+.3}",
        c,
        dense[[c, c + 5]],
        dense[[c, c - 5]]
    );

    // Sparse
    let ixs = knn(&expression, NEIGHBORS);
    let start = Instant::now();
    let sparse = delta_correlation_partial(&expression.view(), &velocity.view(), &ixs.view(), None)?;
    let sparse_time = start.elapsed();
    println!("\nSparse kernel (k = {}): {:.2?}", NEIGHBORS, sparse_time);

    let mut max_diff = 0.0_f64;
    for ((row, _), &i) in ixs.indexed_iter() {
        max_diff = max_diff.max((sparse[[row, i]] - dense[[row, i]]).abs());
    }
    let nonzero = sparse.iter().filter(|&&x| x != 0.0).count();
    println!("  non-zero entries: {} of {}", nonzero, CELLS * CELLS);
    println!("  max |sparse - dense| on visited entries: {:.2e}", max_diff);

    // Serial engine for comparison
    let serial = CorrelationEngine::new(CorrelationConfig::new().enable_parallel(false))?;
    let start = Instant::now();
    let serial_dense = serial.dense(&expression.view(), &velocity.view())?;
    let serial_time = start.elapsed();
    println!("\nSerial dense kernel: {:.2?}", serial_time);
    println!("  identical to parallel result: {}", serial_dense == dense);
    if dense_time.as_secs_f64() > 0.0 {
        println!(
            "  speedup: {:.2}x",
            serial_time.as_secs_f64() / dense_time.as_secs_f64()
        );
    }

    Ok(())
}
