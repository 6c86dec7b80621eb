//! # deltacor - Velocity / Expression-Difference Correlation
//!
//! Computes, for a population of cells, how well each cell's velocity
//! vector points toward every other cell (or toward its nearest
//! neighbors) in expression space. The resulting cells × cells matrix is
//! what a transition-probability pipeline turns into a Markov kernel.
//!
//! This is the **meta crate** that re-exports the kernels for convenient
//! access.
//!
//! ## Quick Start
//!
//! ```
//! use deltacor::prelude::*;
//! use scirs2_core::ndarray_ext::array;
//!
//! // genes × cells
//! let expression = array![[0.0, 1.0], [0.0, 3.0]];
//! let velocity = array![[1.0, 2.0], [2.0, 4.0]];
//!
//! let corr = delta_correlation(&expression.view(), &velocity.view(), None)?;
//! assert_eq!(corr.shape(), &[2, 2]);
//! assert_eq!(corr[[0, 0]], 0.0);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Components
//!
//! ### Kernels ([`kernels`])
//!
//! Dense (all pairs) and sparse (neighbor-restricted) correlation, the
//! configured [`CorrelationEngine`](kernels::CorrelationEngine), and the
//! reserved log10/sqrt variants.
//!
//! ```
//! use deltacor::kernels::{CorrelationConfig, CorrelationEngine};
//! use scirs2_core::ndarray_ext::Array2;
//!
//! let engine = CorrelationEngine::new(CorrelationConfig::new().num_threads(2)).unwrap();
//! let e = Array2::<f64>::from_shape_fn((30, 8), |(j, c)| ((j + 2 * c) as f64).sin());
//! let d = Array2::<f64>::from_shape_fn((30, 8), |(j, c)| ((j * c) as f64).cos());
//! let ixs = Array2::<usize>::from_shape_fn((8, 3), |(c, s)| (c + s + 1) % 8);
//!
//! let sparse = engine.sparse(&e.view(), &d.view(), &ixs.view()).unwrap();
//! assert_eq!(sparse[[0, 5]], 0.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` (default) - Row-parallel kernels
//! - `tracing` - Subscriber initialization helpers

#![deny(warnings)]

pub use deltacor_kernels as kernels;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::kernels::{
        delta_correlation, delta_correlation_log10, delta_correlation_log10_partial,
        delta_correlation_partial, delta_correlation_sqrt, delta_correlation_sqrt_partial,
        CorrelationConfig, CorrelationEngine, CorrelationError, CorrelationResult,
        TransformVariant,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use scirs2_core::ndarray_ext::array;

    #[test]
    fn test_prelude_dense_and_sparse_agree() {
        let e = array![[0.0, 1.0], [0.0, 3.0]];
        let d = array![[1.0, 2.0], [2.0, 4.0]];
        let ixs = array![[1_u32], [0]];

        let dense = delta_correlation(&e.view(), &d.view(), Some(2)).unwrap();
        let sparse = delta_correlation_partial(&e.view(), &d.view(), &ixs.view(), None).unwrap();
        assert_eq!(dense, sparse);
    }

    #[test]
    fn test_prelude_transformed_reports_variant() {
        let e = array![[1.0, 2.0], [3.0, 4.0]];
        let err = delta_correlation_sqrt(&e.view(), &e.view(), None, 0.0).unwrap_err();
        assert!(matches!(
            err,
            CorrelationError::UnsupportedOperation {
                variant: TransformVariant::Sqrt
            }
        ));
    }
}
