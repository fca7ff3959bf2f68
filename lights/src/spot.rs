//! Spot Light Source

use core::geometry::*;
use core::light::*;
use core::light_tree::*;
use core::math::*;

/// Implements a spot light source that emits light in a cone of directions
/// from its position.
#[derive(Clone)]
pub struct SpotLight {
    /// Light source type.
    pub light_type: LightType,

    /// Position.
    pub p_light: Point3f,

    /// Unit direction of the cone axis.
    pub direction: Vector3f,

    /// Overall angular width of the cone in radians.
    pub spot_angle: Float,

    /// Emitted power.
    pub strength: Float,

    /// Maximum bounce at which the light is sampled.
    pub max_bounces: usize,

    /// Cosine of half the overall angular width of the cone.
    cos_total_width: Float,

    /// Cosine of angle at which falloff starts.
    cos_falloff_start: Float,
}

impl SpotLight {
    /// Returns a new `SpotLight`.
    ///
    /// * `p_light`     - Position.
    /// * `direction`   - Direction of the cone axis.
    /// * `spot_angle`  - Overall angular width of the cone in radians.
    /// * `spot_smooth` - Fraction of the cone over which light falls off.
    /// * `strength`    - Emitted power.
    /// * `max_bounces` - Maximum bounce at which the light is sampled.
    pub fn new(
        p_light: Point3f,
        direction: Vector3f,
        spot_angle: Float,
        spot_smooth: Float,
        strength: Float,
        max_bounces: usize,
    ) -> Self {
        let spot_angle = clamp(spot_angle, 0.0, PI);
        let half_angle = 0.5 * spot_angle;
        let falloff_start = half_angle * (1.0 - clamp(spot_smooth, 0.0, 1.0));
        Self {
            light_type: LightType::DELTA_POSITION_LIGHT,
            p_light,
            direction: direction.normalize(),
            spot_angle,
            strength,
            max_bounces,
            cos_total_width: cos(half_angle),
            cos_falloff_start: cos(falloff_start),
        }
    }

    /// Returns the distribution of light accounting for the spotlight cone.
    ///
    /// * `w` - Unit vector from the light towards the shading point.
    fn falloff(&self, w: &Vector3f) -> Float {
        let cos_theta = w.dot(&self.direction);
        if cos_theta < self.cos_total_width {
            return 0.0;
        }
        if cos_theta >= self.cos_falloff_start {
            return 1.0;
        }

        // Compute falloff inside spotlight cone.
        let delta = (cos_theta - self.cos_total_width) / (self.cos_falloff_start - self.cos_total_width);
        (delta * delta) * (delta * delta)
    }
}

impl Light for SpotLight {
    /// Returns the type of light.
    fn get_type(&self) -> LightType {
        self.light_type
    }

    /// Return the light position as seen from a shading point. Points outside
    /// the cone still get a sample, with no emission.
    ///
    /// * `p` - The shading point.
    /// * `u` - Sample values for Monte Carlo integration.
    fn sample_li(&self, p: &Point3f, _u: &Point2f, _kind: SegmentKind) -> Option<LightSample> {
        let to_light = self.p_light - *p;
        let dist = to_light.length();
        if dist == 0.0 {
            return None;
        }
        let wi = to_light / dist;
        let eval_fac = self.strength * INV_FOUR_PI * self.falloff(&-wi);
        Some(LightSample::new(
            self.p_light,
            wi,
            dist,
            Normal3f::from(-wi),
            eval_fac,
            1.0,
            self.light_type,
        ))
    }

    /// Return the total emitted power.
    fn power(&self) -> Float {
        self.strength
    }

    /// Returns the maximum bounce at which the light is sampled.
    fn max_bounces(&self) -> usize {
        self.max_bounces
    }

    /// Returns a point with emission around the cone axis.
    fn tree_bounds(&self) -> Option<LightBounds> {
        Some(LightBounds::new(
            Bounds3f::from_point(self.p_light),
            self.direction,
            0.0,
            0.5 * self.spot_angle,
            self.strength,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    fn down_light() -> SpotLight {
        SpotLight::new(
            Point3f::new(0.0, 0.0, 5.0),
            Vector3f::new(0.0, 0.0, -2.0),
            PI_OVER_TWO,
            0.5,
            4.0,
            3,
        )
    }

    #[test]
    fn inside_cone_full_emission() {
        let light = down_light();
        let ls = light
            .sample_li(&Point3f::ZERO, &Point2f::new(0.5, 0.5), SegmentKind::Surface)
            .unwrap();
        assert_eq!(ls.pdf, 1.0);
        assert!(approx_eq!(f32, ls.eval_fac, 4.0 * INV_FOUR_PI, epsilon = 1e-6));
        assert_eq!(ls.d, Vector3f::Z_AXIS);
    }

    #[test]
    fn outside_cone_no_emission() {
        let light = down_light();
        let ls = light
            .sample_li(&Point3f::new(100.0, 0.0, 0.0), &Point2f::new(0.5, 0.5), SegmentKind::Surface)
            .unwrap();
        assert_eq!(ls.pdf, 1.0);
        assert_eq!(ls.eval_fac, 0.0);
    }

    #[test]
    fn falloff_is_monotonic() {
        let light = down_light();
        let eval = |x: Float| {
            light
                .sample_li(&Point3f::new(x, 0.0, 0.0), &Point2f::new(0.5, 0.5), SegmentKind::Surface)
                .map_or(0.0, |ls| ls.eval_fac)
        };
        // Cone half angle is 45 degrees; falloff starts at 22.5 degrees.
        assert!(eval(1.0) >= eval(3.0));
        assert!(eval(3.0) >= eval(4.5));
        assert!(eval(3.0) > 0.0);
        assert_eq!(eval(6.0), 0.0);
    }

    #[test]
    fn tree_bounds_follow_cone() {
        let bounds = down_light().tree_bounds().unwrap();
        assert_eq!(bounds.bounding_cone_axis, Vector3f::new(0.0, 0.0, -1.0));
        assert_eq!(bounds.theta_o, 0.0);
        assert!(approx_eq!(f32, bounds.theta_e, PI_OVER_FOUR, epsilon = 1e-6));
        assert_eq!(bounds.energy, 4.0);
    }
}
