//! Common

use crate::geometry::*;
use crate::math::*;

/// Uniformly sample a direction from a cone of directions about the z-axis in a
/// given coordinate system.
///
/// * `u`             - The random sample point.
/// * `cos_theta_max` - Cosine of the maximum angle of the cone.
/// * `x`             - The x-axis basis vector.
/// * `y`             - The y-axis basis vector.
/// * `z`             - The z-axis basis vector (cone axis).
pub fn uniform_sample_cone(
    u: &Point2f,
    cos_theta_max: Float,
    x: &Vector3f,
    y: &Vector3f,
    z: &Vector3f,
) -> Vector3f {
    let cos_theta = lerp(u.x, 1.0, cos_theta_max);
    let sin_theta = max(0.0, 1.0 - cos_theta * cos_theta).sqrt();
    let phi = u.y * TWO_PI;
    (cos(phi) * sin_theta) * *x + (sin(phi) * sin_theta) * *y + cos_theta * *z
}

/// Returns the PDF for sampling a direction from a cone of directions.
///
/// * `cos_theta_max` - Cosine of the maximum angle of the cone.
#[inline]
pub fn uniform_cone_pdf(cos_theta_max: Float) -> Float {
    1.0 / (TWO_PI * (1.0 - cos_theta_max))
}

/// Uniformly sample barycentric coordinates on a triangle.
///
/// * `u` - The random sample point.
pub fn uniform_sample_triangle(u: &Point2f) -> Point2f {
    let su0 = u.x.sqrt();
    Point2f::new(1.0 - su0, u.y * su0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn cone_samples_stay_in_cone(u0 in 0.0..1.0f32, u1 in 0.0..1.0f32, cos_max in -0.9..0.99f32) {
            let z = Vector3f::Z_AXIS;
            let (x, y) = z.coordinate_system();
            let w = uniform_sample_cone(&Point2f::new(u0, u1), cos_max, &x, &y, &z);
            prop_assert!(w.dot(&z) >= cos_max - 1e-5);
            prop_assert!(approx_eq!(f32, w.length(), 1.0, epsilon = 1e-4));
        }

        #[test]
        fn triangle_barycentrics_are_valid(u0 in 0.0..1.0f32, u1 in 0.0..1.0f32) {
            let b = uniform_sample_triangle(&Point2f::new(u0, u1));
            prop_assert!(b.x >= 0.0 && b.y >= 0.0 && b.x + b.y <= 1.0 + 1e-6);
        }
    }

    #[test]
    fn cone_pdf_integrates_to_one() {
        // Solid angle of a cone is 2π(1 - cos θ).
        let cos_max = 0.5;
        let solid_angle = TWO_PI * (1.0 - cos_max);
        assert!(approx_eq!(f32, uniform_cone_pdf(cos_max) * solid_angle, 1.0, epsilon = 1e-6));
    }
}
