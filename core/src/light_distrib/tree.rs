//! Tree Light Selection.

use super::LightSelector;
use crate::geometry::*;
use crate::light::*;
use crate::light_tree::*;
use crate::math::*;
use crate::rng::*;
use std::sync::Arc;

/// TreeLightSelector selects lights according to their importance for the
/// shading point, traversing the light tree and splitting samples between the
/// tree and the distant lights.
pub struct TreeLightSelector {
    tree: Arc<LightTree>,
}

impl TreeLightSelector {
    /// Create a new instance of `TreeLightSelector`.
    ///
    /// * `tree` - The light tree and distant lights of the scene.
    pub fn new(tree: Arc<LightTree>) -> Self {
        Self { tree }
    }
}

impl LightSelector for TreeLightSelector {
    fn sample(
        &self,
        sampler: &dyn EmitterSampler,
        sp: &ShadingPoint,
        rng: &mut dyn RandomStream,
    ) -> Option<LightSample> {
        self.tree.sample_from_position(sampler, sp, rng)
    }

    fn pmf(&self, p: &Point3f, n: &Normal3f, light: LightRef) -> Float {
        self.tree.light_pmf(p, n, light)
    }
}
