//! Structured logging support for correlation kernels
//!
//! The kernels always emit `tracing` spans and events; they cost nothing
//! until a subscriber is installed. With the `tracing` feature enabled,
//! [`init_tracing`] installs a `tracing-subscriber` formatter.
//!
//! # Example
//!
//! ```ignore
//! use deltacor_kernels::tracing_support::{init_tracing, TracingConfig};
//!
//! init_tracing(TracingConfig::default())?;
//! let out = deltacor_kernels::delta_correlation(&e.view(), &d.view(), None)?;
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: filter directive (e.g., `RUST_LOG=deltacor_kernels=debug`)
//! - `DELTACOR_LOG_FORMAT`: output format (`json`, `compact` or `pretty`, default: `pretty`)

use anyhow::Result;
use std::time::Duration;

#[cfg(feature = "tracing")]
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

#[cfg(feature = "tracing")]
type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Tracing output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracingFormat {
    /// Pretty-printed human-readable format
    Pretty,
    /// JSON format for structured logging
    Json,
    /// Compact format (single line per event)
    Compact,
}

impl TracingFormat {
    /// Parse from string
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => TracingFormat::Json,
            "compact" => TracingFormat::Compact,
            _ => TracingFormat::Pretty,
        }
    }
}

/// Tracing configuration
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Output format
    pub format: TracingFormat,
    /// Filter directive (e.g., "deltacor_kernels=debug,info")
    pub filter: String,
    /// Enable ANSI colors
    pub with_ansi: bool,
    /// Show target module paths
    pub with_target: bool,
    /// Show thread IDs (useful to watch row dispatch)
    pub with_thread_ids: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        let format = std::env::var("DELTACOR_LOG_FORMAT")
            .map(|s| TracingFormat::parse(&s))
            .unwrap_or(TracingFormat::Pretty);

        let filter =
            std::env::var("RUST_LOG").unwrap_or_else(|_| "deltacor_kernels=info,warn".to_string());

        Self {
            format,
            filter,
            with_ansi: true,
            with_target: true,
            with_thread_ids: false,
        }
    }
}

/// Install the global subscriber described by `config`
///
/// Fails if the filter directive does not parse or a global subscriber is
/// already set.
#[cfg(feature = "tracing")]
pub fn init_tracing(config: TracingConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.filter)?;

    let base = fmt::layer()
        .with_target(config.with_target)
        .with_thread_ids(config.with_thread_ids);
    let output: BoxedLayer = match config.format {
        TracingFormat::Pretty => base.pretty().with_ansi(config.with_ansi).boxed(),
        TracingFormat::Compact => base.compact().with_ansi(config.with_ansi).boxed(),
        TracingFormat::Json => base.json().boxed(),
    };

    tracing_subscriber::registry()
        .with(output.with_filter(filter))
        .try_init()?;
    Ok(())
}

/// No-op when the `tracing` feature is disabled
#[cfg(not(feature = "tracing"))]
pub fn init_tracing(_config: TracingConfig) -> Result<()> {
    Ok(())
}

/// Record a finished kernel run and its pair throughput
pub fn record_kernel_run(operation: &str, cells: usize, pairs: usize, elapsed: Duration) {
    let secs = elapsed.as_secs_f64();
    let pairs_per_sec = if secs > 0.0 { pairs as f64 / secs } else { 0.0 };
    tracing::debug!(
        operation = operation,
        cells = cells,
        pairs = pairs,
        elapsed_ms = secs * 1e3,
        pairs_per_sec = pairs_per_sec,
        "kernel_finished"
    );
}
