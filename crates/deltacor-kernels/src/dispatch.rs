//! Row-parallel dispatch for correlation kernels
//!
//! Each output row `Out[c, :]` depends only on the shared read-only inputs,
//! so rows are handed to workers as exclusive mutable views. There is no
//! cross-row reduction, which makes the result independent of thread count
//! and scheduling order.

use crate::config::CorrelationConfig;
use crate::error::CorrelationResult;
use scirs2_core::ndarray_ext::{Array2, ArrayViewMut1, Axis};

#[cfg(feature = "parallel")]
use crate::error::CorrelationError;

#[cfg(feature = "parallel")]
use scirs2_core::parallel_ops::*;

#[cfg(feature = "parallel")]
use scirs2_core::ThreadPoolBuilder;

/// How rows will be scheduled for a given problem size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStrategy {
    /// One row after another on the calling thread
    Serial,
    /// Rayon's global pool
    Ambient,
    /// A dedicated pool with this many workers
    Bounded(usize),
}

impl DispatchStrategy {
    /// Pick a strategy from the configuration and the number of rows
    pub fn select(config: &CorrelationConfig, n_rows: usize) -> Self {
        if !cfg!(feature = "parallel") || !config.enable_parallel {
            return DispatchStrategy::Serial;
        }
        if n_rows < config.min_cells_for_parallel {
            return DispatchStrategy::Serial;
        }
        match config.num_threads {
            0 => DispatchStrategy::Ambient,
            1 => DispatchStrategy::Serial,
            n => DispatchStrategy::Bounded(n),
        }
    }
}

/// Fill every row of `out` by calling `row_fn(c, row)`
///
/// `row_fn` receives a zeroed row and only writes the entries it computes.
///
/// # Errors
///
/// * `ThreadPool` - if a bounded pool was requested and could not be built
pub fn fill_rows<F>(
    out: &mut Array2<f64>,
    config: &CorrelationConfig,
    row_fn: F,
) -> CorrelationResult<()>
where
    F: Fn(usize, ArrayViewMut1<f64>) + Send + Sync,
{
    let strategy = DispatchStrategy::select(config, out.nrows());
    tracing::debug!(?strategy, rows = out.nrows(), "dispatching correlation rows");

    match strategy {
        DispatchStrategy::Serial => fill_rows_serial(out, &row_fn),
        #[cfg(feature = "parallel")]
        DispatchStrategy::Ambient => fill_rows_parallel(out, &row_fn),
        #[cfg(feature = "parallel")]
        DispatchStrategy::Bounded(threads) => {
            let pool = ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| CorrelationError::ThreadPool(e.to_string()))?;
            pool.install(|| fill_rows_parallel(out, &row_fn));
        }
        #[cfg(not(feature = "parallel"))]
        DispatchStrategy::Ambient | DispatchStrategy::Bounded(_) => fill_rows_serial(out, &row_fn),
    }

    Ok(())
}

fn fill_rows_serial<F>(out: &mut Array2<f64>, row_fn: &F)
where
    F: Fn(usize, ArrayViewMut1<f64>),
{
    for (c, row) in out.axis_iter_mut(Axis(0)).enumerate() {
        row_fn(c, row);
    }
}

#[cfg(feature = "parallel")]
fn fill_rows_parallel<F>(out: &mut Array2<f64>, row_fn: &F)
where
    F: Fn(usize, ArrayViewMut1<f64>) + Send + Sync,
{
    out.axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(c, row)| row_fn(c, row));
}
