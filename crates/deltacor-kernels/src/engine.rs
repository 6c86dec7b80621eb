//! Configured entry point for all correlation kernels
//!
//! The free functions in [`crate::dense`], [`crate::sparse`] and
//! [`crate::transformed`] build a default engine per call. Use an engine
//! directly to reuse a configuration (thread count, epsilon, parallel
//! threshold) across many calls. The engine holds no state besides its
//! configuration.

use crate::config::CorrelationConfig;
use crate::dense::dense_rows;
use crate::error::{CorrelationError, CorrelationResult, TransformVariant};
use crate::sparse::sparse_rows;
use crate::tracing_support::record_kernel_run;
use crate::validation::{validate_neighbors, validate_pair};
use scirs2_core::ndarray_ext::{Array2, ArrayView2};
use scirs2_core::numeric::NumCast;
use std::time::Instant;

/// Velocity / expression-difference correlation engine
#[derive(Debug, Clone, Default)]
pub struct CorrelationEngine {
    config: CorrelationConfig,
}

impl CorrelationEngine {
    /// Create an engine after validating `config`
    ///
    /// # Errors
    ///
    /// * `InvalidConfig` - if the configuration is rejected
    pub fn new(config: CorrelationConfig) -> CorrelationResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration
    pub fn config(&self) -> &CorrelationConfig {
        &self.config
    }

    /// All-pairs correlation; see [`crate::delta_correlation`]
    pub fn dense<T>(
        &self,
        expression: &ArrayView2<T>,
        velocity: &ArrayView2<T>,
    ) -> CorrelationResult<Array2<f64>>
    where
        T: Copy + Into<f64>,
    {
        let _span = tracing::debug_span!(
            "delta_correlation",
            genes = expression.nrows(),
            cells = expression.ncols()
        )
        .entered();

        let inputs = validate_pair(expression, velocity)?;
        let start = Instant::now();
        let out = dense_rows(&inputs, &self.config)?;

        let cells = inputs.n_cells();
        record_kernel_run("delta_correlation", cells, cells * cells, start.elapsed());
        Ok(out)
    }

    /// Neighbor-restricted correlation; see [`crate::delta_correlation_partial`]
    pub fn sparse<T, I>(
        &self,
        expression: &ArrayView2<T>,
        velocity: &ArrayView2<T>,
        neighbors: &ArrayView2<I>,
    ) -> CorrelationResult<Array2<f64>>
    where
        T: Copy + Into<f64>,
        I: Copy + NumCast,
    {
        let _span = tracing::debug_span!(
            "delta_correlation_partial",
            genes = expression.nrows(),
            cells = expression.ncols(),
            k = neighbors.ncols()
        )
        .entered();

        let inputs = validate_pair(expression, velocity)?;
        let index = validate_neighbors(neighbors, inputs.n_cells())?;
        let start = Instant::now();
        let out = sparse_rows(&inputs, &index, &self.config)?;

        let cells = inputs.n_cells();
        record_kernel_run(
            "delta_correlation_partial",
            cells,
            cells * index.k(),
            start.elapsed(),
        );
        Ok(out)
    }

    /// Always fails; see [`crate::delta_correlation_log10`]
    pub fn dense_log10<T>(
        &self,
        _expression: &ArrayView2<T>,
        _velocity: &ArrayView2<T>,
        psc: f64,
    ) -> CorrelationResult<Array2<f64>> {
        unsupported(TransformVariant::Log10, psc)
    }

    /// Always fails; see [`crate::delta_correlation_log10_partial`]
    pub fn sparse_log10<T, I>(
        &self,
        _expression: &ArrayView2<T>,
        _velocity: &ArrayView2<T>,
        _neighbors: &ArrayView2<I>,
        psc: f64,
    ) -> CorrelationResult<Array2<f64>> {
        unsupported(TransformVariant::Log10Partial, psc)
    }

    /// Always fails; see [`crate::delta_correlation_sqrt`]
    pub fn dense_sqrt<T>(
        &self,
        _expression: &ArrayView2<T>,
        _velocity: &ArrayView2<T>,
        psc: f64,
    ) -> CorrelationResult<Array2<f64>> {
        unsupported(TransformVariant::Sqrt, psc)
    }

    /// Always fails; see [`crate::delta_correlation_sqrt_partial`]
    pub fn sparse_sqrt<T, I>(
        &self,
        _expression: &ArrayView2<T>,
        _velocity: &ArrayView2<T>,
        _neighbors: &ArrayView2<I>,
        psc: f64,
    ) -> CorrelationResult<Array2<f64>> {
        unsupported(TransformVariant::SqrtPartial, psc)
    }
}

fn unsupported(variant: TransformVariant, psc: f64) -> CorrelationResult<Array2<f64>> {
    tracing::warn!(%variant, psc, "transformed correlation variant requested");
    Err(CorrelationError::unsupported(variant))
}
