//! Light

use crate::geometry::*;
use crate::light_tree::LightBounds;
use crate::math::*;
use std::sync::Arc;

mod light_type;
mod sample;

/// Light trait provides common behavior of analytic lights (lamps).
pub trait Light {
    /// Returns the type of light.
    fn get_type(&self) -> LightType;

    /// Sample a point on the light as seen from a shading point. Returns `None`
    /// when the light cannot illuminate `p`.
    ///
    /// * `p`    - The shading point.
    /// * `u`    - Sample values for Monte Carlo integration.
    /// * `kind` - Surface or volume segment sampling.
    fn sample_li(&self, p: &Point3f, u: &Point2f, kind: SegmentKind) -> Option<LightSample>;

    /// Return the total emitted power. Used as the light's importance.
    fn power(&self) -> Float;

    /// Returns the maximum bounce at which the light is still sampled.
    fn max_bounces(&self) -> usize;

    /// Returns the bounds used to place the light in a light tree, or `None`
    /// for lights at infinity which are kept in the distant light list.
    fn tree_bounds(&self) -> Option<LightBounds>;

    /// Returns whether light source is a delta light.
    fn is_delta_light(&self) -> bool {
        self.get_type().is_delta_light()
    }
}

/// Atomic reference counted `Light`.
pub type ArcLight = Arc<dyn Light + Send + Sync>;

/// The renderer services light selection hands a selected emitter to. Light
/// selection itself only decides which emitter to sample; these calls produce
/// the actual `LightSample`.
pub trait EmitterSampler {
    /// Sample a point on an emissive triangle. The returned sample must have
    /// `pdf > 0` to be used.
    ///
    /// * `prim`   - Triangle index.
    /// * `object` - Object owning the triangle.
    /// * `randu`  - First sample value.
    /// * `randv`  - Second sample value.
    /// * `time`   - Time of the shading point.
    /// * `p`      - The shading point.
    /// * `kind`   - Surface or volume segment sampling.
    #[allow(clippy::too_many_arguments)]
    fn triangle_light_sample(
        &self,
        prim: usize,
        object: usize,
        randu: Float,
        randv: Float,
        time: Float,
        p: &Point3f,
        kind: SegmentKind,
    ) -> Option<LightSample>;

    /// Sample an analytic light.
    ///
    /// * `lamp`  - Light index.
    /// * `randu` - First sample value.
    /// * `randv` - Second sample value.
    /// * `p`     - The shading point.
    /// * `flags` - Path state.
    /// * `kind`  - Surface or volume segment sampling.
    fn light_sample(
        &self,
        lamp: usize,
        randu: Float,
        randv: Float,
        p: &Point3f,
        flags: PathFlags,
        kind: SegmentKind,
    ) -> Option<LightSample>;

    /// Returns true if the light is no longer sampled at the given bounce.
    ///
    /// * `lamp`   - Light index.
    /// * `bounce` - Path bounce.
    fn reached_max_bounces(&self, lamp: usize, bounce: usize) -> bool;

    /// Returns the flags of an object.
    ///
    /// * `object` - Object index.
    fn object_flags(&self, object: usize) -> ObjectFlags;
}

// Re-export
pub use light_type::*;
pub use sample::*;
