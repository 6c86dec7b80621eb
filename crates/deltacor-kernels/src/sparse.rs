//! Neighbor-restricted velocity / expression-difference correlation
//!
//! Same statistic as the dense kernel, evaluated only for the `k` neighbors
//! listed for each cell. All other entries of the output stay zero, so the
//! result is semantically sparse while stored densely. Every visited entry
//! is bit-identical to the dense kernel's value at the same position.

use crate::config::CorrelationConfig;
use crate::dispatch::fill_rows;
use crate::engine::CorrelationEngine;
use crate::error::CorrelationResult;
use crate::pearson::{pair_correlation, CenteredVelocity};
use crate::validation::{NeighborIndex, PreparedInputs};
use scirs2_core::ndarray_ext::{Array2, ArrayView2};
use scirs2_core::numeric::NumCast;

/// Correlate each cell's velocity with its difference to its listed neighbors
///
/// # Arguments
///
/// * `expression` - Expression matrix with shape (genes, cells)
/// * `velocity` - Velocity/displacement matrix with the same shape
/// * `neighbors` - Index matrix with shape (cells, k); row `c` lists the
///   neighbors of cell `c`
/// * `threads` - Advisory worker count; `None` uses the global rayon pool
///
/// # Errors
///
/// * `ShapeMismatch` - if `expression` and `velocity` differ in shape
/// * `NeighborShapeMismatch` - if `neighbors` does not have one row per cell
/// * `NeighborIndexOutOfRange` - if any index is negative or ≥ cells
///
/// # Complexity
///
/// Time: O(genes × cells × k)
/// Space: O(cells²) output + O(genes) per in-flight row
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use deltacor_kernels::delta_correlation_partial;
///
/// let e = array![[0.0, 1.0, 2.0], [0.0, 3.0, 1.0]];
/// let d = array![[1.0, 2.0, 0.0], [2.0, 4.0, 1.0]];
/// let ixs = array![[1_usize], [0], [0]];
/// let out = delta_correlation_partial(&e.view(), &d.view(), &ixs.view(), None).unwrap();
///
/// assert!((out[[0, 1]] - 1.0).abs() < 1e-10);
/// assert_eq!(out[[0, 2]], 0.0); // not a neighbor
/// ```
pub fn delta_correlation_partial<T, I>(
    expression: &ArrayView2<T>,
    velocity: &ArrayView2<T>,
    neighbors: &ArrayView2<I>,
    threads: Option<usize>,
) -> CorrelationResult<Array2<f64>>
where
    T: Copy + Into<f64>,
    I: Copy + NumCast,
{
    CorrelationEngine::new(CorrelationConfig::default().with_threads(threads))?
        .sparse(expression, velocity, neighbors)
}

/// Sparse kernel over already validated inputs
pub(crate) fn sparse_rows(
    inputs: &PreparedInputs,
    neighbors: &NeighborIndex,
    config: &CorrelationConfig,
) -> CorrelationResult<Array2<f64>> {
    let n_cells = inputs.n_cells();
    let epsilon = config.epsilon;
    let mut out = Array2::<f64>::zeros((n_cells, n_cells));

    fill_rows(&mut out, config, |c, mut row| {
        let b = CenteredVelocity::new(&inputs.velocity(c));
        if b.is_degenerate(epsilon) {
            tracing::trace!(cell = c, norm = b.norm(), "skipping zero-variance velocity");
            return;
        }

        let source = inputs.profile(c);
        for &i in neighbors.neighbors(c) {
            row[i] = pair_correlation(&source, &inputs.profile(i), &b, epsilon);
        }
    })?;

    Ok(out)
}
