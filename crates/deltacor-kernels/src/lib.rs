//! # deltacor-kernels
//!
//! Parallel streaming kernels that correlate each cell's velocity with the
//! expression difference between that cell and every other cell.
//!
//! ## Overview
//!
//! Given an expression matrix `E` and a velocity matrix `D` (both
//! genes × cells), the output `Out` (cells × cells) holds
//!
//! ```text
//! Out[c, i] = pearson(D[:, c], E[:, i] - E[:, c])
//! ```
//!
//! This is the statistic a cell-state-transition pipeline turns into
//! transition probabilities before running its diffusion step.
//!
//! **Key Features:**
//! - ✅ **Dense kernel** - every cell against every other cell
//! - ✅ **Sparse kernel** - every cell against a caller-supplied neighbor list
//! - ✅ **Streaming reduction** - O(genes) working memory per row, no
//!   genes × cells intermediates
//! - ✅ **Row-parallel dispatch** - disjoint output rows, deterministic
//!   regardless of thread count
//! - ✅ **Zero-variance guards** - degenerate inputs yield `0.0`, never NaN
//!
//! ## Quick Start
//!
//! ```rust
//! use scirs2_core::ndarray_ext::array;
//! use deltacor_kernels::{delta_correlation, delta_correlation_partial};
//!
//! let e = array![[0.0, 1.0], [0.0, 3.0]];
//! let d = array![[1.0, 2.0], [2.0, 4.0]];
//!
//! let dense = delta_correlation(&e.view(), &d.view(), None).unwrap();
//! assert!((dense[[0, 1]] - 1.0).abs() < 1e-10);
//! assert!((dense[[1, 0]] + 1.0).abs() < 1e-10);
//!
//! let ixs = array![[1_usize], [0]];
//! let sparse = delta_correlation_partial(&e.view(), &d.view(), &ixs.view(), None).unwrap();
//! assert_eq!(dense, sparse);
//! ```
//!
//! ## Configuration
//!
//! The free functions use [`CorrelationConfig::default`] and accept an
//! advisory thread count. For anything else, build a [`CorrelationEngine`]:
//!
//! ```rust
//! use scirs2_core::ndarray_ext::Array2;
//! use deltacor_kernels::{CorrelationConfig, CorrelationEngine};
//!
//! let engine = CorrelationEngine::new(
//!     CorrelationConfig::new().num_threads(2).min_cells_for_parallel(0),
//! )
//! .unwrap();
//! let e = Array2::<f64>::from_shape_fn((20, 6), |(j, c)| (j * c) as f64);
//! let d = Array2::<f64>::from_shape_fn((20, 6), |(j, c)| (j + c) as f64 % 3.0);
//! let out = engine.dense(&e.view(), &d.view()).unwrap();
//! assert_eq!(out.shape(), &[6, 6]);
//! ```
//!
//! ## Features
//!
//! - `parallel` (default) - Row-parallel dispatch using rayon via scirs2_core
//! - `tracing` - Subscriber setup in [`tracing_support`]
//!
//! ## SciRS2 Integration
//!
//! All array operations use `scirs2_core::ndarray_ext` and parallelism goes
//! through `scirs2_core::parallel_ops`.

#![deny(warnings)]

pub mod config;
pub mod dense;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod pearson;
pub mod sparse;
pub mod tracing_support;
pub mod transformed;
pub mod validation;


// Re-exports
pub use config::{CorrelationConfig, DEFAULT_EPSILON};
pub use dense::delta_correlation;
pub use dispatch::{fill_rows, DispatchStrategy};
pub use engine::CorrelationEngine;
pub use error::{CorrelationError, CorrelationResult, TransformVariant};
pub use pearson::{pair_correlation, CenteredVelocity};
pub use sparse::delta_correlation_partial;
pub use transformed::*;
pub use validation::{validate_neighbors, validate_pair, NeighborIndex, PreparedInputs};
