//! Distant Light Selection

use super::*;
use crate::math::*;

impl LightTree {
    /// Chooses a distant light proportionally to its energy. Returns `None`
    /// when there are no distant lights or none of them emit.
    ///
    /// * `u` - Uniform variate in `[0, 1)`.
    pub fn select_distant(&self, u: Float) -> Option<EmitterSelection> {
        let lights = self.distant_lights();
        if lights.is_empty() {
            return None;
        }
        let total_energy: Float = lights.iter().map(distant_light_importance).sum();
        select_from_cdf(lights.iter().map(distant_light_importance), total_energy, u)
            .map(|(index, pdf_factor)| EmitterSelection { index, pdf_factor })
    }

    /// Returns the probability that `select_distant` chooses a distant light.
    ///
    /// * `index` - Index of the distant light.
    pub fn distant_pdf(&self, index: usize) -> Float {
        let lights = self.distant_lights();
        if index >= lights.len() {
            return 0.0;
        }
        let total_energy: Float = lights.iter().map(distant_light_importance).sum();
        if !(total_energy > 0.0) {
            return 0.0;
        }
        distant_light_importance(&lights[index]) * (1.0 / total_energy)
    }

    /// Returns the importance of the distant light list when it competes
    /// with the tree for a light sample.
    pub fn distant_population_importance(&self) -> Float {
        match self.distant_importance() {
            DistantImportance::Total => self.distant_lights().iter().map(distant_light_importance).sum(),
            DistantImportance::Representative => self
                .distant_lights()
                .first()
                .map_or(0.0, distant_light_importance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    fn distant_tree(energies: &[Float]) -> LightTree {
        let lights = energies
            .iter()
            .enumerate()
            .map(|(i, &e)| DistantLightEmitter::new(i, e))
            .collect();
        LightTree::new(vec![], vec![], vec![], lights).unwrap()
    }

    #[test]
    fn no_distant_lights() {
        let tree = distant_tree(&[]);
        assert_eq!(tree.select_distant(0.5), None);
        assert_eq!(tree.distant_pdf(0), 0.0);
        assert_eq!(tree.distant_population_importance(), 0.0);
    }

    #[test]
    fn selects_by_energy() {
        let tree = distant_tree(&[1.0, 2.0, 3.0]);
        assert_eq!(tree.select_distant(0.0).map(|s| s.index), Some(0));
        assert_eq!(tree.select_distant(0.2).map(|s| s.index), Some(1));
        assert_eq!(tree.select_distant(0.999999).map(|s| s.index), Some(2));

        let s = tree.select_distant(0.7).unwrap();
        assert_eq!(s.index, 2);
        assert!(approx_eq!(f32, s.pdf_factor, 0.5, epsilon = 1e-6));
        assert_eq!(s.pdf_factor, tree.distant_pdf(2));
    }

    #[test]
    fn dark_distant_lights() {
        let tree = distant_tree(&[0.0, 0.0]);
        assert_eq!(tree.select_distant(0.5), None);
        assert_eq!(tree.distant_pdf(1), 0.0);
    }

    #[test]
    fn population_importance() {
        let tree = distant_tree(&[1.0, 2.0, 3.0]);
        assert!(approx_eq!(f32, tree.distant_population_importance(), 6.0, epsilon = 1e-6));
        let tree = tree.with_distant_importance(DistantImportance::Representative);
        assert_eq!(tree.distant_population_importance(), 1.0);
    }
}
