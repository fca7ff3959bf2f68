//! Distant Source

use core::geometry::*;
use core::light::*;
use core::light_tree::*;
use core::math::*;
use core::sampling::*;

/// Implements a directional light source that deposits illumination from the
/// same direction at every point in space. A positive angle spreads it over a
/// cone of directions, like the sun seen as a disk.
#[derive(Clone)]
pub struct DistantLight {
    /// Light source type.
    pub light_type: LightType,

    /// Unit direction the light travels in.
    pub w_light: Vector3f,

    /// Angular diameter of the light in radians.
    pub angle: Float,

    /// Emitted power.
    pub strength: Float,

    /// Maximum bounce at which the light is sampled.
    pub max_bounces: usize,

    /// Cosine of half the angular diameter.
    cos_half_angle: Float,
}

impl DistantLight {
    /// Returns a new `DistantLight`.
    ///
    /// * `w_light`     - Direction the light travels in.
    /// * `angle`       - Angular diameter of the light in radians.
    /// * `strength`    - Emitted power.
    /// * `max_bounces` - Maximum bounce at which the light is sampled.
    pub fn new(w_light: Vector3f, angle: Float, strength: Float, max_bounces: usize) -> Self {
        let angle = clamp(angle, 0.0, PI);
        let light_type = if angle > 0.0 {
            LightType::INFINITE_LIGHT
        } else {
            LightType::DELTA_DIRECTION_LIGHT
        };
        Self {
            light_type,
            w_light: w_light.normalize(),
            angle,
            strength,
            max_bounces,
            cos_half_angle: cos(0.5 * angle),
        }
    }
}

impl Light for DistantLight {
    /// Returns the type of light.
    fn get_type(&self) -> LightType {
        self.light_type
    }

    /// Sample a direction towards the light. The sample position holds the
    /// direction since the light is at infinity.
    ///
    /// * `_p` - The shading point.
    /// * `u`  - Sample values for Monte Carlo integration.
    fn sample_li(&self, _p: &Point3f, u: &Point2f, _kind: SegmentKind) -> Option<LightSample> {
        let wc = -self.w_light;
        let (d, eval_fac, pdf) = if self.angle > 0.0 {
            let (wc_x, wc_y) = wc.coordinate_system();
            let d = uniform_sample_cone(u, self.cos_half_angle, &wc_x, &wc_y, &wc);
            let pdf = uniform_cone_pdf(self.cos_half_angle);
            (d, self.strength * pdf, pdf)
        } else {
            (wc, self.strength, 1.0)
        };

        Some(LightSample::new(
            Point3f::new(d.x, d.y, d.z),
            d,
            INFINITY,
            Normal3f::from(-d),
            eval_fac,
            pdf,
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

    /// Distant lights have no bounds and are kept out of the tree.
    fn tree_bounds(&self) -> Option<LightBounds> {
        None
    }
}
