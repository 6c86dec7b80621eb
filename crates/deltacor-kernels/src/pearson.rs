//! Streaming Pearson correlation between a velocity and an expression delta
//!
//! For a source cell `c` with velocity `b` and a target cell `i`, the
//! statistic is the Pearson correlation of `b` with `E[:, i] - E[:, c]`.
//! The delta vector is never stored: its mean and largest magnitude are
//! streamed in one pass and the cross product and sum of squares are
//! streamed together in a second pass, so each pair costs O(genes) time
//! and O(1) extra memory.
//!
//! Both vectors are divided by their largest magnitude before squaring.
//! The scale factors cancel in the ratio, and no intermediate can overflow
//! or underflow for any finite input scale.

use scirs2_core::ndarray_ext::{Array1, ArrayView1, Zip};

/// A mean-centered velocity vector together with its L2 norm
///
/// The centered values are stored divided by their largest magnitude, so
/// `values()` lies in [-1, 1] and `norm()` is `scale × ‖values‖`.
#[derive(Debug, Clone)]
pub struct CenteredVelocity {
    scaled: Array1<f64>,
    scaled_norm: f64,
    norm: f64,
}

impl CenteredVelocity {
    /// Center `velocity` on its mean and record the norm of the result
    ///
    /// An empty vector yields a zero norm so that it always takes the
    /// zero-variance path.
    pub fn new(velocity: &ArrayView1<f64>) -> Self {
        let n = velocity.len();
        if n == 0 {
            return Self::degenerate(0);
        }

        let mean = velocity.sum() / n as f64;
        let centered = velocity.mapv(|v| v - mean);
        let scale = max_abs(&centered.view());
        if scale == 0.0 || !scale.is_finite() {
            return Self::degenerate(n);
        }

        let scaled = centered.mapv(|v| v / scale);
        let scaled_norm = scaled.iter().map(|v| v * v).sum::<f64>().sqrt();

        Self {
            scaled,
            scaled_norm,
            norm: scale * scaled_norm,
        }
    }

    fn degenerate(n: usize) -> Self {
        Self {
            scaled: Array1::zeros(n),
            scaled_norm: 0.0,
            norm: 0.0,
        }
    }

    /// L2 norm of the centered vector
    pub fn norm(&self) -> f64 {
        self.norm
    }

    /// The centered values divided by their largest magnitude
    pub fn values(&self) -> ArrayView1<'_, f64> {
        self.scaled.view()
    }

    /// Whether the velocity carries no directional variation
    pub fn is_degenerate(&self, epsilon: f64) -> bool {
        self.norm < epsilon || self.scaled_norm == 0.0
    }
}

/// Correlation between a centered velocity and `target - source`
///
/// Returns `0.0` when the expression delta has norm below `epsilon`.
/// Values that overshoot ±1 by rounding noise are clamped.
///
/// The caller is expected to have rejected degenerate velocities already;
/// this function divides by the velocity norm unconditionally.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use deltacor_kernels::{pair_correlation, CenteredVelocity};
///
/// let b = CenteredVelocity::new(&array![1.0, 2.0].view());
/// let source = array![0.0, 0.0];
/// let target = array![1.0, 3.0];
/// let r = pair_correlation(&source.view(), &target.view(), &b, 1e-10);
/// assert!((r - 1.0).abs() < 1e-12);
/// ```
pub fn pair_correlation(
    source: &ArrayView1<f64>,
    target: &ArrayView1<f64>,
    velocity: &CenteredVelocity,
    epsilon: f64,
) -> f64 {
    let n = source.len();
    if n == 0 {
        return 0.0;
    }

    // Pass 1: mean and largest magnitude of the delta
    let mut delta_sum = 0.0;
    let mut delta_max = 0.0_f64;
    Zip::from(source).and(target).for_each(|&s, &t| {
        let a = t - s;
        delta_sum += a;
        delta_max = delta_max.max(a.abs());
    });
    if delta_max == 0.0 || !delta_max.is_finite() {
        return 0.0;
    }
    let delta_mean = delta_sum / n as f64;

    // Pass 2: cross product and sum of squares of the scaled, centered delta
    let mut numerator = 0.0;
    let mut delta_ss = 0.0;
    Zip::from(source)
        .and(target)
        .and(&velocity.scaled)
        .for_each(|&s, &t, &b| {
            let a = (t - s - delta_mean) / delta_max;
            numerator += a * b;
            delta_ss += a * a;
        });

    let scaled_norm = delta_ss.sqrt();
    if scaled_norm == 0.0 || delta_max * scaled_norm < epsilon {
        return 0.0;
    }

    clamp_unit(numerator / (scaled_norm * velocity.scaled_norm))
}

/// Largest absolute value, `0.0` for an empty view
fn max_abs(values: &ArrayView1<f64>) -> f64 {
    values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
}

/// Snap values within 1e-12 outside [-1, 1] back onto the boundary
fn clamp_unit(value: f64) -> f64 {
    if value > 1.0 && value - 1.0 < 1e-12 {
        1.0
    } else if value < -1.0 && -1.0 - value < 1e-12 {
        -1.0
    } else {
        value
    }
}
