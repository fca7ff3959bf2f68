//! Approximate trigonometry

use super::{clamp, Float, PI};

/// Returns an approximation of `acos(x)` with an absolute error below 1e-4
/// radians. The argument is clamped to `[-1, 1]` so that rounding
/// error in normalized dot products never produces a NaN.
///
/// * `x` - Cosine of the angle.
#[inline(always)]
pub fn fast_acos(x: Float) -> Float {
    let x = clamp(x, -1.0, 1.0);
    let f = x.abs();
    let a = (1.0 - f).sqrt() * (1.5707963267 + f * (-0.213300989 + f * (0.077980478 + f * -0.02164095)));
    if x < 0.0 {
        PI - a
    } else {
        a
    }
}
