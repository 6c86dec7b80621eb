//! Log10- and sqrt-transformed correlation variants
//!
//! These entry points mirror the call surface of the transformed statistics
//! but are not implemented. Every call returns
//! [`CorrelationError::UnsupportedOperation`](crate::CorrelationError)
//! naming the variant, without inspecting its inputs. An approximation
//! here would hand silently wrong transition probabilities downstream.

use crate::config::CorrelationConfig;
use crate::engine::CorrelationEngine;
use crate::error::CorrelationResult;
use scirs2_core::ndarray_ext::{Array2, ArrayView2};

/// Conventional pseudocount for the log10 variants
pub const DEFAULT_LOG10_PSEUDOCOUNT: f64 = 1.0;

/// Conventional pseudocount for the sqrt variants
pub const DEFAULT_SQRT_PSEUDOCOUNT: f64 = 0.0;

/// Unimplemented log10(x + psc) all-pairs variant
///
/// # Errors
///
/// Always returns `UnsupportedOperation`.
pub fn delta_correlation_log10<T>(
    expression: &ArrayView2<T>,
    velocity: &ArrayView2<T>,
    threads: Option<usize>,
    psc: f64,
) -> CorrelationResult<Array2<f64>> {
    engine(threads)?.dense_log10(expression, velocity, psc)
}

/// Unimplemented log10(x + psc) neighbor-restricted variant
///
/// # Errors
///
/// Always returns `UnsupportedOperation`.
pub fn delta_correlation_log10_partial<T, I>(
    expression: &ArrayView2<T>,
    velocity: &ArrayView2<T>,
    neighbors: &ArrayView2<I>,
    threads: Option<usize>,
    psc: f64,
) -> CorrelationResult<Array2<f64>> {
    engine(threads)?.sparse_log10(expression, velocity, neighbors, psc)
}

/// Unimplemented sqrt(x + psc) all-pairs variant
///
/// # Errors
///
/// Always returns `UnsupportedOperation`.
pub fn delta_correlation_sqrt<T>(
    expression: &ArrayView2<T>,
    velocity: &ArrayView2<T>,
    threads: Option<usize>,
    psc: f64,
) -> CorrelationResult<Array2<f64>> {
    engine(threads)?.dense_sqrt(expression, velocity, psc)
}

/// Unimplemented sqrt(x + psc) neighbor-restricted variant
///
/// # Errors
///
/// Always returns `UnsupportedOperation`.
pub fn delta_correlation_sqrt_partial<T, I>(
    expression: &ArrayView2<T>,
    velocity: &ArrayView2<T>,
    neighbors: &ArrayView2<I>,
    threads: Option<usize>,
    psc: f64,
) -> CorrelationResult<Array2<f64>> {
    engine(threads)?.sparse_sqrt(expression, velocity, neighbors, psc)
}

fn engine(threads: Option<usize>) -> CorrelationResult<CorrelationEngine> {
    CorrelationEngine::new(CorrelationConfig::default().with_threads(threads))
}
