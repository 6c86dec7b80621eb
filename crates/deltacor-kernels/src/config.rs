//! Configuration for the correlation engine
//!
//! # Environment Variables
//!
//! - `DELTACOR_NUM_THREADS`: bounded worker count (`0` = ambient rayon pool)
//! - `DELTACOR_EPSILON`: variance floor applied to both norms

use crate::error::{CorrelationError, CorrelationResult};

/// Variance floor below which a centered vector counts as constant
pub const DEFAULT_EPSILON: f64 = 1e-10;

/// Configuration for correlation kernels
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationConfig {
    /// Norm threshold for the zero-variance guard (default: 1e-10)
    pub epsilon: f64,
    /// Enable parallel row processing
    pub enable_parallel: bool,
    /// Number of worker threads (0 = automatic)
    pub num_threads: usize,
    /// Minimum number of cells before rows are dispatched in parallel
    /// Set to 0 to always go parallel when enabled
    pub min_cells_for_parallel: usize,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            enable_parallel: true,     // Enable by default (feature-gated)
            num_threads: 0,            // Automatic (use rayon default)
            min_cells_for_parallel: 64,
        }
    }
}

impl CorrelationConfig {
    /// Create new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `DELTACOR_NUM_THREADS` and `DELTACOR_EPSILON`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var("DELTACOR_NUM_THREADS") {
            match raw.trim().parse::<usize>() {
                Ok(threads) => config.num_threads = threads,
                Err(_) => tracing::warn!(value = %raw, "ignoring unparseable DELTACOR_NUM_THREADS"),
            }
        }

        if let Ok(raw) = std::env::var("DELTACOR_EPSILON") {
            match raw.trim().parse::<f64>() {
                Ok(eps) if eps.is_finite() && eps >= 0.0 => config.epsilon = eps,
                _ => tracing::warn!(value = %raw, "ignoring invalid DELTACOR_EPSILON"),
            }
        }

        config
    }

    /// Set the zero-variance threshold
    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Enable or disable parallel row processing
    pub fn enable_parallel(mut self, enable: bool) -> Self {
        self.enable_parallel = enable;
        self
    }

    /// Set number of worker threads (0 = automatic)
    pub fn num_threads(mut self, threads: usize) -> Self {
        self.num_threads = threads;
        self
    }

    /// Set the cell count at which parallel dispatch kicks in
    pub fn min_cells_for_parallel(mut self, min_cells: usize) -> Self {
        self.min_cells_for_parallel = min_cells;
        self
    }

    /// Apply the advisory thread count taken by the free functions
    pub(crate) fn with_threads(self, threads: Option<usize>) -> Self {
        match threads {
            Some(n) => self.num_threads(n),
            None => self,
        }
    }

    /// Check that every field is usable by the kernels
    pub fn validate(&self) -> CorrelationResult<()> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(CorrelationError::invalid_config(format!(
                "epsilon must be finite and non-negative, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }
}
