//! All-pairs velocity / expression-difference correlation
//!
//! For every ordered pair of cells `(c, i)` this computes the Pearson
//! correlation between the velocity of `c` and the expression difference
//! `E[:, i] - E[:, c]`. Rows are independent and processed in parallel;
//! each row needs O(genes) working memory regardless of the cell count.

use crate::config::CorrelationConfig;
use crate::dispatch::fill_rows;
use crate::engine::CorrelationEngine;
use crate::error::CorrelationResult;
use crate::pearson::{pair_correlation, CenteredVelocity};
use crate::validation::PreparedInputs;
use scirs2_core::ndarray_ext::{Array2, ArrayView2};

/// Correlate every cell's velocity with its difference to every other cell
///
/// # Arguments
///
/// * `expression` - Expression matrix with shape (genes, cells)
/// * `velocity` - Velocity/displacement matrix with the same shape
/// * `threads` - Advisory worker count; `None` uses the global rayon pool
///
/// # Returns
///
/// A (cells, cells) matrix whose entry `[c, i]` lies in [-1, 1]. Rows of
/// cells whose velocity is constant, and entries whose expression
/// difference is constant, are exactly `0.0`.
///
/// # Errors
///
/// * `ShapeMismatch` - if `expression` and `velocity` differ in shape
///
/// # Complexity
///
/// Time: O(genes × cells²)
/// Space: O(cells²) output + O(genes) per in-flight row
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use deltacor_kernels::delta_correlation;
///
/// let e = array![[0.0, 1.0], [0.0, 3.0]];
/// let d = array![[1.0, 2.0], [2.0, 4.0]];
/// let out = delta_correlation(&e.view(), &d.view(), None).unwrap();
///
/// assert_eq!(out.shape(), &[2, 2]);
/// assert_eq!(out[[0, 0]], 0.0);
/// assert!((out[[0, 1]] - 1.0).abs() < 1e-10);
/// assert!((out[[1, 0]] + 1.0).abs() < 1e-10);
/// ```
pub fn delta_correlation<T>(
    expression: &ArrayView2<T>,
    velocity: &ArrayView2<T>,
    threads: Option<usize>,
) -> CorrelationResult<Array2<f64>>
where
    T: Copy + Into<f64>,
{
    CorrelationEngine::new(CorrelationConfig::default().with_threads(threads))?
        .dense(expression, velocity)
}

/// Dense kernel over already validated inputs
pub(crate) fn dense_rows(
    inputs: &PreparedInputs,
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
        for (i, slot) in row.iter_mut().enumerate() {
            *slot = pair_correlation(&source, &inputs.profile(i), &b, epsilon);
        }
    })?;

    Ok(out)
}
