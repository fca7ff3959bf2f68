//! Power Light Selection.

use super::LightSelector;
use crate::geometry::*;
use crate::light::*;
use crate::light_tree::*;
use crate::math::*;
use crate::rng::*;
use crate::sampling::*;
use std::sync::Arc;

/// PowerLightSelector selects lights with probability proportional to their
/// emitted power and ignores the shading point. This works well when the most
/// powerful lights are also the main contributors everywhere, and is used
/// when a scene only has a single light.
pub struct PowerLightSelector {
    tree: Arc<LightTree>,

    /// Energies of the tree emitters followed by the distant lights.
    distrib: Option<Distribution1D>,
}

impl PowerLightSelector {
    /// Create a new instance of `PowerLightSelector`.
    ///
    /// * `tree` - The light tree and distant lights of the scene.
    pub fn new(tree: Arc<LightTree>) -> Self {
        let energies: Vec<Float> = tree
            .emitters()
            .iter()
            .map(|e| e.bounds.energy)
            .chain(tree.distant_lights().iter().map(distant_light_importance))
            .collect();
        let total_energy: Float = energies.iter().sum();
        let distrib = if total_energy > 0.0 {
            Some(Distribution1D::new(energies))
        } else {
            warn!("No emitted power to select lights from.");
            None
        };
        Self { tree, distrib }
    }
}

impl LightSelector for PowerLightSelector {
    /// Selects a light by power and samples it.
    ///
    /// * `sampler` - Samples the selected light.
    /// * `sp`      - The shading point.
    /// * `rng`     - Source of variates.
    fn sample(
        &self,
        sampler: &dyn EmitterSampler,
        sp: &ShadingPoint,
        rng: &mut dyn RandomStream,
    ) -> Option<LightSample> {
        let distrib = self.distrib.as_ref()?;
        let (offset, pmf, _) = distrib.sample_discrete(rng.next_1d());
        let u = Point2f::new(rng.next_1d(), rng.next_1d());
        if pmf == 0.0 {
            return None;
        }

        let num_emitters = self.tree.num_emitters();
        let mut ls = if offset < num_emitters {
            sample_distribution_entry(sampler, &self.tree.distribution()[offset], sp, &u)?
        } else {
            let lamp = self.tree.distant_lights()[offset - num_emitters].lamp();
            sample_lamp(sampler, lamp, sp, &u)?
        };
        ls.pdf *= pmf;
        Some(ls)
    }

    /// Returns the probability of selecting a light; independent of the
    /// shading point.
    ///
    /// * `_p`    - The shading point.
    /// * `_n`    - The shading normal.
    /// * `light` - The light.
    fn pmf(&self, _p: &Point3f, _n: &Normal3f, light: LightRef) -> Float {
        let index = match light {
            LightRef::Emitter(i) if i < self.tree.num_emitters() => i,
            LightRef::Distant(i) if i < self.tree.num_distant_lights() => self.tree.num_emitters() + i,
            _ => return 0.0,
        };
        self.distrib.as_ref().map_or(0.0, |d| d.discrete_pdf(index))
    }
}
