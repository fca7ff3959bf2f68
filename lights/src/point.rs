//! Point Light Source

use core::geometry::*;
use core::light::*;
use core::light_tree::*;
use core::math::*;
use core::sampling::*;

/// Implements an isotropic point light source that emits the same amount of
/// light in all directions. A positive radius turns it into a sphere light.
#[derive(Clone)]
pub struct PointLight {
    /// Light source type.
    pub light_type: LightType,

    /// Position.
    pub p_light: Point3f,

    /// Radius of the emitting sphere.
    pub radius: Float,

    /// Emitted power.
    pub strength: Float,

    /// Maximum bounce at which the light is sampled.
    pub max_bounces: usize,
}

impl PointLight {
    /// Returns a new `PointLight`.
    ///
    /// * `p_light`     - Position.
    /// * `radius`      - Radius of the emitting sphere; 0 for a point.
    /// * `strength`    - Emitted power.
    /// * `max_bounces` - Maximum bounce at which the light is sampled.
    pub fn new(p_light: Point3f, radius: Float, strength: Float, max_bounces: usize) -> Self {
        let radius = max(radius, 0.0);
        let light_type = if radius > 0.0 {
            LightType::AREA_LIGHT
        } else {
            LightType::DELTA_POSITION_LIGHT
        };
        Self {
            light_type,
            p_light,
            radius,
            strength,
            max_bounces,
        }
    }
}

impl Light for PointLight {
    /// Returns the type of light.
    fn get_type(&self) -> LightType {
        self.light_type
    }

    /// Sample the light as seen from a shading point. Sphere lights sample
    /// the cone of directions the sphere subtends.
    ///
    /// * `p` - The shading point.
    /// * `u` - Sample values for Monte Carlo integration.
    fn sample_li(&self, p: &Point3f, u: &Point2f, _kind: SegmentKind) -> Option<LightSample> {
        let to_light = self.p_light - *p;
        let dist_sq = to_light.length_squared();
        if dist_sq == 0.0 {
            return None;
        }
        let dist = dist_sq.sqrt();
        let wc = to_light / dist;

        if self.radius == 0.0 {
            return Some(LightSample::new(
                self.p_light,
                wc,
                dist,
                Normal3f::from(-wc),
                self.strength * INV_FOUR_PI,
                1.0,
                self.light_type,
            ));
        }

        let radius_sq = self.radius * self.radius;
        if dist_sq <= radius_sq {
            // Inside the sphere.
            return None;
        }

        let (wc_x, wc_y) = wc.coordinate_system();
        let cos_theta_max = max(0.0, 1.0 - radius_sq / dist_sq).sqrt();
        let d = uniform_sample_cone(u, cos_theta_max, &wc_x, &wc_y, &wc);

        // Nearest intersection of the sampled direction with the sphere.
        let b = d.dot(&to_light);
        let t = b - max(radius_sq - (dist_sq - b * b), 0.0).sqrt();
        let p_light = *p + d * t;
        let ng = Normal3f::from((p_light - self.p_light).normalize());

        Some(LightSample::new(
            p_light,
            d,
            t,
            ng,
            self.strength * INV_FOUR_PI / (PI * radius_sq),
            uniform_cone_pdf(cos_theta_max),
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

    /// Returns the sphere bounds with normals spreading in every direction.
    fn tree_bounds(&self) -> Option<LightBounds> {
        let r = Vector3f::new(self.radius, self.radius, self.radius);
        Some(LightBounds::new(
            Bounds3f::new(self.p_light - r, self.p_light + r),
            Vector3f::Z_AXIS,
            PI,
            PI_OVER_TWO,
            self.strength,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use core::rng::*;

    #[test]
    fn delta_point_sample() {
        let light = PointLight::new(Point3f::new(0.0, 0.0, 4.0), 0.0, 8.0, 1);
        assert!(light.is_delta_light());
        let ls = light
            .sample_li(&Point3f::ZERO, &Point2f::new(0.3, 0.7), SegmentKind::Surface)
            .unwrap();
        assert_eq!(ls.pdf, 1.0);
        assert_eq!(ls.t, 4.0);
        assert_eq!(ls.d, Vector3f::Z_AXIS);
        assert_eq!(ls.p, light.p_light);
    }

    #[test]
    fn no_sample_at_light_position() {
        let light = PointLight::new(Point3f::ZERO, 0.0, 1.0, 1);
        assert!(light
            .sample_li(&Point3f::ZERO, &Point2f::new(0.5, 0.5), SegmentKind::Surface)
            .is_none());
    }

    #[test]
    fn no_sample_inside_sphere() {
        let light = PointLight::new(Point3f::ZERO, 2.0, 1.0, 1);
        assert!(light
            .sample_li(&Point3f::new(1.0, 0.0, 0.0), &Point2f::new(0.5, 0.5), SegmentKind::Surface)
            .is_none());
    }

    #[test]
    fn tree_bounds_cover_sphere() {
        let light = PointLight::new(Point3f::new(1.0, 2.0, 3.0), 0.5, 6.0, 1);
        let bounds = light.tree_bounds().unwrap();
        assert_eq!(bounds.bounding_box_min, Point3f::new(0.5, 1.5, 2.5));
        assert_eq!(bounds.bounding_box_max, Point3f::new(1.5, 2.5, 3.5));
        assert_eq!(bounds.theta_o, PI);
        assert_eq!(bounds.theta_e, PI_OVER_TWO);
        assert_eq!(bounds.energy, 6.0);
    }

    #[test]
    fn sphere_samples_lie_on_sphere() {
        let light = PointLight::new(Point3f::new(0.0, 0.0, 5.0), 1.0, 1.0, 1);
        let mut rng = RNG::new(17);
        for _ in 0..256 {
            let u = Point2f::new(rng.next_1d(), rng.next_1d());
            let ls = light.sample_li(&Point3f::ZERO, &u, SegmentKind::Surface).unwrap();
            assert!(approx_eq!(f32, ls.p.distance(&light.p_light), 1.0, epsilon = 1e-3));
            assert!(approx_eq!(f32, ls.d.length(), 1.0, epsilon = 1e-5));
            assert!(ls.pdf > 0.0);
            // The visible cap faces the shading point.
            assert!(ls.ng.dot(&ls.d) <= 1e-2);
        }
    }
}
