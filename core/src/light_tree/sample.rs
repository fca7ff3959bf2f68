//! Light Tree Sampling

use super::*;
use crate::geometry::*;
use crate::light::*;
use crate::math::*;
use crate::rng::*;

/// The point a light sample is requested for.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ShadingPoint {
    /// Position.
    pub p: Point3f,

    /// Shading normal.
    pub n: Normal3f,

    /// Time of the path.
    pub time: Float,

    /// Path bounce.
    pub bounce: usize,

    /// Path state.
    pub flags: PathFlags,

    /// Surface or volume segment sampling.
    pub kind: SegmentKind,
}

impl ShadingPoint {
    /// Returns a surface `ShadingPoint` at time 0 on the first bounce.
    ///
    /// * `p` - Position.
    /// * `n` - Shading normal.
    pub fn new(p: Point3f, n: Normal3f) -> Self {
        Self {
            p,
            n,
            ..Default::default()
        }
    }
}

/// Identifies a light the way light selection sees it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LightRef {
    /// Emitter `i` of the tree.
    Emitter(usize),

    /// Distant light `i`.
    Distant(usize),
}

impl LightTree {
    /// Selects a light for a shading point and samples it. The returned
    /// sample's pdf includes the probability of every selection step.
    /// Returns `None` when no light can be sampled for this call.
    ///
    /// * `sampler` - Samples the selected emitter.
    /// * `sp`      - The shading point.
    /// * `rng`     - Source of variates.
    pub fn sample_from_position<S, R>(&self, sampler: &S, sp: &ShadingPoint, rng: &mut R) -> Option<LightSample>
    where
        S: EmitterSampler + ?Sized,
        R: RandomStream + ?Sized,
    {
        stat_inc!(TOTAL_SAMPLES, 1);

        let sample = if self.num_distant_lights() == 0 {
            self.sample_tree(sampler, sp, rng)
        } else if self.num_emitters() == 0 {
            self.sample_distant(sampler, sp, rng)
        } else {
            let tree_probability = self.tree_probability(&sp.p, &sp.n);
            if rng.next_1d() < tree_probability {
                self.sample_tree(sampler, sp, rng)
                    .map(|(ls, pdf_factor)| (ls, pdf_factor * tree_probability))
            } else {
                self.sample_distant(sampler, sp, rng)
                    .map(|(ls, pdf_factor)| (ls, pdf_factor * (1.0 - tree_probability)))
            }
        };

        match sample {
            Some((mut ls, pdf_factor)) => {
                ls.pdf *= pdf_factor;
                Some(ls)
            }
            None => {
                stat_inc!(FAILED_SAMPLES, 1);
                None
            }
        }
    }

    /// Returns the probability of sampling the tree rather than the distant
    /// lights at a shading point.
    ///
    /// * `p` - The shading point.
    /// * `n` - The shading normal.
    pub fn tree_probability(&self, p: &Point3f, n: &Normal3f) -> Float {
        if self.num_emitters() == 0 {
            return 0.0;
        }
        if self.num_distant_lights() == 0 {
            return 1.0;
        }
        let tree_importance = cluster_importance(p, n, &self.nodes()[0]);
        let distant_importance = self.distant_population_importance();
        let total_importance = tree_importance + distant_importance;
        if total_importance > 0.0 {
            tree_importance / total_importance
        } else {
            0.0
        }
    }

    /// Selects an emitter of the tree and samples it. Returns the sample and
    /// the selection probability, which is not yet applied to the sample.
    ///
    /// * `sampler` - Samples the selected emitter.
    /// * `sp`      - The shading point.
    /// * `rng`     - Source of variates.
    pub fn sample_tree<S, R>(&self, sampler: &S, sp: &ShadingPoint, rng: &mut R) -> Option<(LightSample, Float)>
    where
        S: EmitterSampler + ?Sized,
        R: RandomStream + ?Sized,
    {
        let tree_u = rng.next_1d();
        let u = Point2f::new(rng.next_1d(), rng.next_1d());

        let selection = self.select_tree_emitter(&sp.p, &sp.n, tree_u)?;
        let ls = sample_distribution_entry(sampler, &self.distribution()[selection.index], sp, &u)?;
        Some((ls, selection.pdf_factor))
    }

    /// Selects a distant light and samples it. Returns the sample and the
    /// selection probability, which is not yet applied to the sample.
    ///
    /// * `sampler` - Samples the selected light.
    /// * `sp`      - The shading point.
    /// * `rng`     - Source of variates.
    pub fn sample_distant<S, R>(&self, sampler: &S, sp: &ShadingPoint, rng: &mut R) -> Option<(LightSample, Float)>
    where
        S: EmitterSampler + ?Sized,
        R: RandomStream + ?Sized,
    {
        let distant_u = rng.next_1d();
        let u = Point2f::new(rng.next_1d(), rng.next_1d());

        let selection = self.select_distant(distant_u)?;
        let lamp = self.distant_lights()[selection.index].lamp();
        let ls = sample_lamp(sampler, lamp, sp, &u)?;
        Some((ls, selection.pdf_factor))
    }

    /// Returns the probability that `sample_from_position` selects a light at
    /// a shading point.
    ///
    /// * `p`     - The shading point.
    /// * `n`     - The shading normal.
    /// * `light` - The light.
    pub fn light_pmf(&self, p: &Point3f, n: &Normal3f, light: LightRef) -> Float {
        let tree_probability = self.tree_probability(p, n);
        match light {
            LightRef::Emitter(i) => tree_probability * self.emitter_pdf(p, n, i),
            LightRef::Distant(i) => (1.0 - tree_probability) * self.distant_pdf(i),
        }
    }
}

/// Samples the light a distribution entry refers to.
///
/// * `sampler` - Samples the light.
/// * `entry`   - The distribution entry.
/// * `sp`      - The shading point.
/// * `u`       - Sample values.
pub fn sample_distribution_entry<S>(
    sampler: &S,
    entry: &LightDistributionEntry,
    sp: &ShadingPoint,
    u: &Point2f,
) -> Option<LightSample>
where
    S: EmitterSampler + ?Sized,
{
    match entry.source() {
        LightSource::Triangle {
            prim,
            object,
            shader_flag,
        } => {
            if sp.flags.contains(PathFlags::SHADOW_CATCHER_PASS)
                && !sampler.object_flags(object).contains(ObjectFlags::SHADOW_CATCHER)
            {
                return None;
            }
            let mut ls = sampler.triangle_light_sample(prim, object, u.x, u.y, sp.time, &sp.p, sp.kind)?;
            if !(ls.pdf > 0.0) {
                return None;
            }
            ls.shader |= ShaderFlags::from_bits_retain(shader_flag);
            ls.prim = Some(prim);
            ls.object = Some(object);
            Some(ls)
        }
        LightSource::Lamp(lamp) => sample_lamp(sampler, lamp, sp, u),
    }
}

/// Samples an analytic light unless it is past its bounce limit.
///
/// * `sampler` - Samples the light.
/// * `lamp`    - Light index.
/// * `sp`      - The shading point.
/// * `u`       - Sample values.
pub(crate) fn sample_lamp<S>(sampler: &S, lamp: usize, sp: &ShadingPoint, u: &Point2f) -> Option<LightSample>
where
    S: EmitterSampler + ?Sized,
{
    if sampler.reached_max_bounces(lamp, sp.bounce) {
        return None;
    }
    let mut ls = sampler.light_sample(lamp, u.x, u.y, &sp.p, sp.flags, sp.kind)?;
    if !(ls.pdf > 0.0) {
        return None;
    }
    ls.lamp = Some(lamp);
    Some(ls)
}

#[cfg(test)]
mod tests {
    use super::super::mock::*;
    use super::*;
    use float_cmp::*;

    fn facing_emitter(p: Point3f, axis: Vector3f, energy: Float) -> LightBounds {
        LightBounds::new(Bounds3f::from_point(p), axis, 0.0, PI_OVER_TWO, energy)
    }

    /// Left leaf: emitter above the shading point facing it. Right leaf:
    /// weaker emitter facing away.
    fn two_leaf_tree(distribution: Vec<LightDistributionEntry>, distant: Vec<DistantLightEmitter>) -> LightTree {
        let left = facing_emitter(Point3f::new(0.0, 0.0, 2.0), Vector3f::new(0.0, 0.0, -1.0), 10.0);
        let right = facing_emitter(Point3f::new(1.0, 0.0, 2.0), Vector3f::Z_AXIS, 1.0);
        let root = LightBounds::new(
            left.bounds().union(&right.bounds()),
            Vector3f::new(0.0, 0.0, -1.0),
            PI,
            PI_OVER_TWO,
            11.0,
        );
        let nodes = vec![
            LightTreeNode::interior(root, 2),
            LightTreeNode::leaf(left, 0, 1),
            LightTreeNode::leaf(right, 1, 1),
        ];
        let emitters = vec![LightTreeEmitter::new(left), LightTreeEmitter::new(right)];
        LightTree::new(nodes, emitters, distribution, distant).unwrap()
    }

    fn lamps() -> Vec<LightDistributionEntry> {
        vec![LightDistributionEntry::lamp(0), LightDistributionEntry::lamp(1)]
    }

    fn shading_point() -> ShadingPoint {
        ShadingPoint::new(Point3f::ZERO, Normal3f::new(0.0, 0.0, 1.0))
    }

    #[test]
    fn empty_scene_has_no_sample() {
        let tree = LightTree::new(vec![], vec![], vec![], vec![]).unwrap();
        let mut rng = RNG::default();
        assert!(tree
            .sample_from_position(&MockSampler::default(), &shading_point(), &mut rng)
            .is_none());
    }

    #[test]
    fn facing_emitter_is_selected() {
        let tree = two_leaf_tree(lamps(), vec![]);
        let sampler = MockSampler::default();
        let sp = shading_point();
        let mut rng = RNG::new(3);

        let trials = 1000;
        let mut left = 0;
        let mut inv_pdf_sum = 0.0;
        for _ in 0..trials {
            if let Some(ls) = tree.sample_from_position(&sampler, &sp, &mut rng) {
                if ls.lamp == Some(0) {
                    left += 1;
                    inv_pdf_sum += 1.0 / ls.pdf;
                }
            }
        }
        assert!(left as Float / trials as Float > 0.9);
        // Selection is certain so each sample keeps the emitter pdf of 1.
        assert!(approx_eq!(f32, inv_pdf_sum / left as Float, 1.0, epsilon = 1e-4));
    }

    #[test]
    fn variates_reach_emitter_sampler() {
        let tree = two_leaf_tree(lamps(), vec![]);
        let sampler = MockSampler::default();
        let mut rng = FixedStream::new(&[0.25, 0.5, 0.75]);
        let ls = tree.sample_from_position(&sampler, &shading_point(), &mut rng).unwrap();
        assert_eq!(ls.lamp, Some(0));
        assert_eq!(sampler.lamp_calls.borrow().as_slice(), &[(0, 0.5, 0.75)]);
    }

    #[test]
    fn pdf_includes_selection_probability() {
        let tree = two_leaf_tree(lamps(), vec![]);
        let sampler = MockSampler {
            pdf: Some(2.0),
            ..Default::default()
        };
        let sp = shading_point();
        let mut rng = FixedStream::new(&[0.1, 0.3, 0.3]);
        let ls = tree.sample_from_position(&sampler, &sp, &mut rng).unwrap();
        let pmf = tree.light_pmf(&sp.p, &sp.n, LightRef::Emitter(0));
        assert!(pmf > 0.0);
        assert!(approx_eq!(f32, ls.pdf, 2.0 * pmf, epsilon = 1e-5));
    }

    #[test]
    fn non_positive_pdf_fails() {
        let tree = two_leaf_tree(lamps(), vec![]);
        let sampler = MockSampler {
            pdf: Some(0.0),
            ..Default::default()
        };
        let mut rng = RNG::default();
        let before = FAILED_SAMPLES.with(|v| *v.borrow());
        assert!(tree.sample_from_position(&sampler, &shading_point(), &mut rng).is_none());
        assert_eq!(FAILED_SAMPLES.with(|v| *v.borrow()), before + 1);
    }

    #[test]
    fn max_bounces_reached_fails() {
        let tree = two_leaf_tree(lamps(), vec![]);
        let sampler = MockSampler {
            exhausted_lamps: [0].into_iter().collect(),
            ..Default::default()
        };
        let mut rng = RNG::default();
        assert!(tree.sample_from_position(&sampler, &shading_point(), &mut rng).is_none());
        assert!(sampler.lamp_calls.borrow().is_empty());
    }

    #[test]
    fn shadow_catcher_pass_skips_regular_objects() {
        let distribution = vec![
            LightDistributionEntry::triangle(4, 1, ShaderFlags::USE_MIS.bits()),
            LightDistributionEntry::triangle(5, 2, 0),
        ];
        let tree = two_leaf_tree(distribution, vec![]);
        let sp = ShadingPoint {
            flags: PathFlags::SHADOW_CATCHER_PASS,
            ..shading_point()
        };

        let sampler = MockSampler::default();
        let mut rng = FixedStream::new(&[0.2, 0.5, 0.5]);
        assert!(tree.sample_from_position(&sampler, &sp, &mut rng).is_none());
        assert!(sampler.triangle_calls.borrow().is_empty());

        let sampler = MockSampler {
            shadow_catchers: [1].into_iter().collect(),
            ..Default::default()
        };
        let mut rng = FixedStream::new(&[0.2, 0.5, 0.5]);
        let ls = tree.sample_from_position(&sampler, &sp, &mut rng).unwrap();
        assert_eq!(ls.prim, Some(4));
        assert_eq!(ls.object, Some(1));
        assert!(ls.shader.contains(ShaderFlags::USE_MIS));
    }

    #[test]
    fn regular_pass_samples_triangles() {
        let distribution = vec![
            LightDistributionEntry::triangle(4, 1, 0),
            LightDistributionEntry::triangle(5, 2, 0),
        ];
        let tree = two_leaf_tree(distribution, vec![]);
        let sampler = MockSampler::default();
        let mut rng = FixedStream::new(&[0.2, 0.125, 0.625]);
        let ls = tree.sample_from_position(&sampler, &shading_point(), &mut rng).unwrap();
        assert_eq!(ls.prim, Some(4));
        assert_eq!(sampler.triangle_calls.borrow().as_slice(), &[(4, 1, 0.125, 0.625)]);
    }

    #[test]
    fn distant_only() {
        let distant = vec![DistantLightEmitter::new(0, 1.0), DistantLightEmitter::new(1, 3.0)];
        let tree = LightTree::new(vec![], vec![], vec![], distant).unwrap();
        let sampler = MockSampler::default();
        let mut rng = FixedStream::new(&[0.5, 0.1, 0.2]);
        let ls = tree.sample_from_position(&sampler, &shading_point(), &mut rng).unwrap();
        assert_eq!(ls.lamp, Some(1));
        assert!(approx_eq!(f32, ls.pdf, 0.75, epsilon = 1e-6));
        assert_eq!(sampler.lamp_calls.borrow().as_slice(), &[(1, 0.1, 0.2)]);
    }

    #[test]
    fn split_between_tree_and_distant() {
        let distribution = vec![LightDistributionEntry::lamp(0), LightDistributionEntry::lamp(1)];
        let distant = vec![DistantLightEmitter::new(2, 1.0), DistantLightEmitter::new(3, 1.0)];
        let tree = two_leaf_tree(distribution, distant);
        let sp = shading_point();
        let sampler = MockSampler::default();

        let p_tree = tree.tree_probability(&sp.p, &sp.n);
        assert!(p_tree > 0.0 && p_tree < 1.0);

        // Split variate below the tree probability picks the tree.
        let mut rng = FixedStream::new(&[0.0, 0.5, 0.5, 0.5]);
        let ls = tree.sample_from_position(&sampler, &sp, &mut rng).unwrap();
        assert_eq!(ls.lamp, Some(0));
        assert!(approx_eq!(f32, ls.pdf, tree.light_pmf(&sp.p, &sp.n, LightRef::Emitter(0)), epsilon = 1e-6));

        // Otherwise the distant list.
        let mut rng = FixedStream::new(&[0.9999, 0.75, 0.5, 0.5]);
        let ls = tree.sample_from_position(&sampler, &sp, &mut rng).unwrap();
        assert_eq!(ls.lamp, Some(3));
        let expected = (1.0 - p_tree) * 0.5;
        assert!(approx_eq!(f32, ls.pdf, expected, epsilon = 1e-6));
        assert!(approx_eq!(f32, tree.light_pmf(&sp.p, &sp.n, LightRef::Distant(1)), expected, epsilon = 1e-6));
    }

    #[test]
    fn representative_distant_importance_changes_split() {
        let distant = vec![DistantLightEmitter::new(2, 1.0), DistantLightEmitter::new(3, 5.0)];
        let tree = two_leaf_tree(lamps(), distant);
        let sp = shading_point();
        let total = tree.tree_probability(&sp.p, &sp.n);
        let tree = tree.with_distant_importance(DistantImportance::Representative);
        let representative = tree.tree_probability(&sp.p, &sp.n);
        assert!(representative > total);
    }

    #[test]
    fn pmf_sums_to_one() {
        let distant = vec![DistantLightEmitter::new(2, 2.0), DistantLightEmitter::new(3, 1.0)];
        let tree = two_leaf_tree(lamps(), distant);
        let p = Point3f::new(0.5, 0.2, -1.0);
        let n = Normal3f::new(0.0, 0.0, 1.0);
        let sum = tree.light_pmf(&p, &n, LightRef::Emitter(0))
            + tree.light_pmf(&p, &n, LightRef::Emitter(1))
            + tree.light_pmf(&p, &n, LightRef::Distant(0))
            + tree.light_pmf(&p, &n, LightRef::Distant(1));
        assert!(approx_eq!(f32, sum, 1.0, epsilon = 1e-5));
    }

    #[test]
    fn statistics_are_reported() {
        let tree = two_leaf_tree(lamps(), vec![]);
        let sampler = MockSampler {
            pdf: Some(0.0),
            ..Default::default()
        };
        let mut rng = RNG::default();
        for _ in 0..10 {
            let _ = tree.sample_from_position(&sampler, &shading_point(), &mut rng);
        }

        report_stats!();
        let accum = stats_accumulator().lock().unwrap();
        let (failed, total) = accum.percentage("Light Tree/Samples without a light");
        assert!(failed >= 10);
        assert!(total >= failed);
    }
}
