//! Input validation and normalization
//!
//! Both kernels start here. Shapes and neighbor indices are checked before
//! any numeric work, then the inputs are copied into contiguous `f64`
//! (and `usize`) buffers laid out cell-major: row `c` of a prepared matrix
//! holds column `c` of the caller's genes × cells matrix, so every cell
//! profile the reduction touches is a single contiguous slice.
//!
//! Normalization changes layout and element type only, never values.

use crate::error::{CorrelationError, CorrelationResult};
use scirs2_core::ndarray_ext::{Array2, ArrayView1, ArrayView2};
use scirs2_core::numeric::NumCast;

/// Expression and velocity matrices ready for the reduction kernels
#[derive(Debug, Clone)]
pub struct PreparedInputs {
    /// cells × genes expression profiles
    profiles: Array2<f64>,
    /// cells × genes velocity vectors
    velocities: Array2<f64>,
}

impl PreparedInputs {
    /// Number of genes (length of every profile)
    pub fn n_genes(&self) -> usize {
        self.profiles.ncols()
    }

    /// Number of cells
    pub fn n_cells(&self) -> usize {
        self.profiles.nrows()
    }

    /// Expression profile of cell `c`
    pub fn profile(&self, c: usize) -> ArrayView1<'_, f64> {
        self.profiles.row(c)
    }

    /// Velocity vector of cell `c`
    pub fn velocity(&self, c: usize) -> ArrayView1<'_, f64> {
        self.velocities.row(c)
    }
}

/// Bounds-checked neighbor lists, one row per cell
#[derive(Debug, Clone)]
pub struct NeighborIndex {
    indices: Array2<usize>,
}

impl NeighborIndex {
    /// Neighbors per cell
    pub fn k(&self) -> usize {
        self.indices.ncols()
    }

    /// Neighbor list of cell `c`
    pub fn neighbors(&self, c: usize) -> ArrayView1<'_, usize> {
        self.indices.row(c)
    }
}

/// Validate that expression and velocity agree in shape, then normalize
///
/// # Errors
///
/// * `ShapeMismatch` - if the two matrices differ in shape
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use deltacor_kernels::validate_pair;
///
/// let e = array![[0.0_f32, 1.0], [0.0, 3.0]];
/// let d = array![[1.0_f32, 2.0], [2.0, 4.0]];
/// let prepared = validate_pair(&e.view(), &d.view()).unwrap();
/// assert_eq!(prepared.n_cells(), 2);
/// assert_eq!(prepared.profile(1).to_vec(), vec![1.0, 3.0]);
/// ```
pub fn validate_pair<T>(
    expression: &ArrayView2<T>,
    velocity: &ArrayView2<T>,
) -> CorrelationResult<PreparedInputs>
where
    T: Copy + Into<f64>,
{
    if expression.shape() != velocity.shape() {
        return Err(CorrelationError::shape_mismatch(
            expression.shape(),
            velocity.shape(),
        ));
    }

    Ok(PreparedInputs {
        profiles: cell_major(expression),
        velocities: cell_major(velocity),
    })
}

/// Validate a neighbor matrix against the cell count
///
/// Every index must be a non-negative integer below `n_cells`.
///
/// # Errors
///
/// * `NeighborShapeMismatch` - if there is not exactly one row per cell
/// * `NeighborIndexOutOfRange` - on the first index outside `[0, n_cells)`
pub fn validate_neighbors<I>(
    neighbors: &ArrayView2<I>,
    n_cells: usize,
) -> CorrelationResult<NeighborIndex>
where
    I: Copy + NumCast,
{
    if neighbors.nrows() != n_cells {
        return Err(CorrelationError::neighbor_shape_mismatch(
            n_cells,
            neighbors.shape(),
        ));
    }

    let mut indices = Array2::<usize>::zeros(neighbors.raw_dim());
    for ((cell, slot), &raw) in neighbors.indexed_iter() {
        match <usize as NumCast>::from(raw) {
            Some(index) if index < n_cells => indices[[cell, slot]] = index,
            _ => {
                return Err(CorrelationError::NeighborIndexOutOfRange {
                    cell,
                    slot,
                    index: <i128 as NumCast>::from(raw).unwrap_or(i128::MAX),
                    n_cells,
                })
            }
        }
    }

    Ok(NeighborIndex { indices })
}

/// Transposed `f64` copy in standard layout
fn cell_major<T>(matrix: &ArrayView2<T>) -> Array2<f64>
where
    T: Copy + Into<f64>,
{
    let (genes, cells) = matrix.dim();
    Array2::from_shape_fn((cells, genes), |(c, j)| matrix[[j, c]].into())
}
