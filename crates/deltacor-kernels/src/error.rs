//! Error types for correlation kernel operations
//!
//! Every failure is detected during validation, before any numeric work
//! starts, so a failed call never leaves a partially filled output behind.
//! Numerical edge cases (zero-variance velocity or expression difference)
//! are not errors; they resolve to `0.0` in the output.

use std::fmt;
use thiserror::Error;

/// Transformed correlation variants kept for call compatibility only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformVariant {
    /// log10(x + psc) transform, all-pairs
    Log10,
    /// log10(x + psc) transform, neighbor-restricted
    Log10Partial,
    /// sqrt(x + psc) transform, all-pairs
    Sqrt,
    /// sqrt(x + psc) transform, neighbor-restricted
    SqrtPartial,
}

impl TransformVariant {
    /// Name of the public entry point for this variant
    pub fn name(&self) -> &'static str {
        match self {
            TransformVariant::Log10 => "delta_correlation_log10",
            TransformVariant::Log10Partial => "delta_correlation_log10_partial",
            TransformVariant::Sqrt => "delta_correlation_sqrt",
            TransformVariant::SqrtPartial => "delta_correlation_sqrt_partial",
        }
    }
}

impl fmt::Display for TransformVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error type for correlation kernel operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CorrelationError {
    /// Expression and velocity matrices differ in shape
    #[error("shape mismatch: expression has shape {expected:?} but velocity has shape {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Neighbor matrix does not have one row per cell
    #[error(
        "neighbor shape mismatch: expected {expected_rows} rows (one per cell), \
         got neighbor matrix of shape {neighbors:?} with {actual_rows} rows"
    )]
    NeighborShapeMismatch {
        expected_rows: usize,
        actual_rows: usize,
        neighbors: Vec<usize>,
    },

    /// A neighbor index is negative or not below the cell count
    #[error("neighbor index {index} at cell {cell}, slot {slot} is out of range for {n_cells} cells")]
    NeighborIndexOutOfRange {
        cell: usize,
        slot: usize,
        index: i128,
        n_cells: usize,
    },

    /// One of the transformed variants was called
    #[error("unsupported operation: {variant} is not implemented")]
    UnsupportedOperation { variant: TransformVariant },

    /// The bounded worker pool could not be created
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),

    /// A configuration value was rejected
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for correlation kernel operations
pub type CorrelationResult<T> = Result<T, CorrelationError>;

impl CorrelationError {
    /// Create a shape mismatch error from the two offending shapes
    pub fn shape_mismatch(expected: &[usize], actual: &[usize]) -> Self {
        CorrelationError::ShapeMismatch {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }

    /// Create a neighbor shape mismatch error
    pub fn neighbor_shape_mismatch(expected_rows: usize, neighbors: &[usize]) -> Self {
        CorrelationError::NeighborShapeMismatch {
            expected_rows,
            actual_rows: neighbors.first().copied().unwrap_or(0),
            neighbors: neighbors.to_vec(),
        }
    }

    /// Create an unsupported operation error
    pub fn unsupported(variant: TransformVariant) -> Self {
        CorrelationError::UnsupportedOperation { variant }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        CorrelationError::InvalidConfig(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_display() {
        let err = CorrelationError::shape_mismatch(&[50, 10], &[40, 10]);

        let msg = format!("{}", err);
        assert!(msg.contains("shape mismatch"));
        assert!(msg.contains("[50, 10]"));
        assert!(msg.contains("[40, 10]"));
    }

    #[test]
    fn test_neighbor_shape_mismatch_display() {
        let err = CorrelationError::neighbor_shape_mismatch(10, &[5, 3]);

        assert_eq!(
            err,
            CorrelationError::NeighborShapeMismatch {
                expected_rows: 10,
                actual_rows: 5,
                neighbors: vec![5, 3],
            }
        );
        let msg = format!("{}", err);
        assert!(msg.contains("expected 10 rows"));
        assert!(msg.contains("[5, 3]"));
    }

    #[test]
    fn test_out_of_range_display() {
        let err = CorrelationError::NeighborIndexOutOfRange {
            cell: 2,
            slot: 1,
            index: -4,
            n_cells: 8,
        };

        let msg = format!("{}", err);
        assert!(msg.contains("neighbor index -4"));
        assert!(msg.contains("cell 2, slot 1"));
        assert!(msg.contains("8 cells"));
    }

    #[test]
    fn test_unsupported_names_variant() {
        for variant in [
            TransformVariant::Log10,
            TransformVariant::Log10Partial,
            TransformVariant::Sqrt,
            TransformVariant::SqrtPartial,
        ] {
            let msg = format!("{}", CorrelationError::unsupported(variant));
            assert!(msg.contains("unsupported operation"));
            assert!(msg.contains(variant.name()));
        }
    }
}
