//! Light Selection.

mod power;
mod tree;

pub use power::*;
pub use tree::*;

use crate::geometry::*;
use crate::light::*;
use crate::light_tree::*;
use crate::math::*;
use crate::rng::*;
use std::sync::Arc;

/// Light selection strategy.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LightSampleStrategy {
    /// Samples light sources according to their emitted power.
    Power,

    /// Samples light sources according to their importance for the shading
    /// point using the light tree.
    #[default]
    Tree,
}

impl From<&str> for LightSampleStrategy {
    /// Returns a `LightSampleStrategy` given a string name.
    fn from(name: &str) -> Self {
        match name {
            "power" => Self::Power,
            "tree" => Self::Tree,
            _ => {
                error!("Light sample strategy '{}' unknown. Using 'tree'.", name);
                Self::Tree
            }
        }
    }
}

/// Light selection options.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LightTreeOptions {
    /// The strategy to use for light selection.
    pub strategy: LightSampleStrategy,

    /// Importance of distant lights against the tree.
    pub distant_importance: DistantImportance,
}

impl LightTreeOptions {
    /// Returns new `LightTreeOptions` from option names.
    ///
    /// * `strategy`           - Name of the light selection strategy.
    /// * `distant_importance` - Name of the distant light importance mode.
    pub fn new(strategy: &str, distant_importance: &str) -> Self {
        Self {
            strategy: LightSampleStrategy::from(strategy),
            distant_importance: DistantImportance::from(distant_importance),
        }
    }
}

/// Interface of light selection implementations that choose and sample a
/// single light for a shading point.
pub trait LightSelector {
    /// Selects a light for the shading point and samples it. The sample's pdf
    /// includes the probability of selecting the light.
    ///
    /// * `sampler` - Samples the selected light.
    /// * `sp`      - The shading point.
    /// * `rng`     - Source of variates.
    fn sample(&self, sampler: &dyn EmitterSampler, sp: &ShadingPoint, rng: &mut dyn RandomStream)
        -> Option<LightSample>;

    /// Returns the probability of selecting a light at the shading point.
    ///
    /// * `p`     - The shading point.
    /// * `n`     - The shading normal.
    /// * `light` - The light.
    fn pmf(&self, p: &Point3f, n: &Normal3f, light: LightRef) -> Float;
}

/// Atomic reference counted `LightSelector`.
pub type ArcLightSelector = Arc<dyn LightSelector + Send + Sync>;

/// Returns a smart pointer to a new `LightSelector` implementation.
///
/// * `options` - Light selection options.
/// * `tree`    - The light tree and distant lights of the scene.
pub fn create_light_selector(options: &LightTreeOptions, tree: LightTree) -> ArcLightSelector {
    let tree = Arc::new(tree.with_distant_importance(options.distant_importance));
    let strategy = if tree.num_emitters() + tree.num_distant_lights() == 1 {
        LightSampleStrategy::Power
    } else {
        options.strategy
    };
    debug!("Light selection strategy {:?}", strategy);
    match strategy {
        LightSampleStrategy::Power => Arc::new(PowerLightSelector::new(tree)),
        LightSampleStrategy::Tree => Arc::new(TreeLightSelector::new(tree)),
    }
}
