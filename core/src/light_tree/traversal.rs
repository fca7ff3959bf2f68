//! Light Tree Traversal

use super::*;
use crate::geometry::*;
use crate::math::*;

/// Child of an interior node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Branch {
    /// Left child, stored right after its parent.
    Left,

    /// Right child.
    Right,
}

/// An emitter chosen by light selection.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EmitterSelection {
    /// Index of the emitter (or distant light).
    pub index: usize,

    /// Probability of having chosen it.
    pub pdf_factor: Float,
}

/// Chooses a child proportionally to the importance of both children and
/// rescales `u` so it is again uniform in `[0, 1)` for the next decision.
/// Returns the chosen branch, the rescaled variate and the probability of
/// the choice. Returns `None` when neither child has any importance.
///
/// * `u`                 - Uniform variate in `[0, 1)`.
/// * `left_importance`   - Importance of the left child.
/// * `right_importance`  - Importance of the right child.
pub fn rescale_variate(u: Float, left_importance: Float, right_importance: Float) -> Option<(Branch, Float, Float)> {
    let total_importance = left_importance + right_importance;
    if !(total_importance > 0.0) {
        return None;
    }
    let left_probability = left_importance / total_importance;

    if u < left_probability {
        let u = u * total_importance / left_importance;
        Some((Branch::Left, clamp(u, 0.0, ONE_MINUS_EPSILON), left_probability))
    } else {
        let u = (u * total_importance - left_importance) / right_importance;
        Some((Branch::Right, clamp(u, 0.0, ONE_MINUS_EPSILON), 1.0 - left_probability))
    }
}

/// Selects an index from weights by walking their running normalized sum.
/// Returns the first index whose cumulative probability exceeds `u` and its
/// probability, or `None` if `total` is not positive. If rounding keeps the
/// sum below `u` the last index with a positive weight is returned.
///
/// * `weights` - Non-negative weights.
/// * `total`   - Sum of `weights`.
/// * `u`       - Uniform variate in `[0, 1)`.
pub fn select_from_cdf<I>(weights: I, total: Float, u: Float) -> Option<(usize, Float)>
where
    I: IntoIterator<Item = Float>,
{
    if !(total > 0.0) {
        return None;
    }
    let inv_total = 1.0 / total;

    let mut cdf = 0.0;
    let mut last = None;
    for (i, weight) in weights.into_iter().enumerate() {
        let pdf = weight * inv_total;
        cdf += pdf;
        if u < cdf {
            return Some((i, pdf));
        }
        if weight > 0.0 {
            last = Some((i, pdf));
        }
    }

    // Rounding can leave the running sum a few ulps short of `u`.
    debug_assert!(cdf > 1.0 - 1e-4, "CDF sums to {} which does not exceed {}", cdf, u);
    if cdf > 1.0 - 1e-4 {
        last
    } else {
        None
    }
}

impl LightTree {
    /// Descends the tree from the root, at each interior node choosing a child
    /// proportionally to its importance for the shading point, then chooses
    /// an emitter in the reached leaf. A single variate drives the whole
    /// descent. Returns `None` when a visited node has no importance at all.
    ///
    /// * `p` - The shading point.
    /// * `n` - The shading normal.
    /// * `u` - Uniform variate in `[0, 1)`.
    pub fn select_tree_emitter(&self, p: &Point3f, n: &Normal3f, u: Float) -> Option<EmitterSelection> {
        if self.nodes().is_empty() {
            return None;
        }

        let nodes = self.nodes();
        let mut index = 0;
        let mut u = u;
        let mut pdf_factor = 1.0;
        let mut depth = 0_i64;

        loop {
            match nodes[index].kind() {
                NodeKind::Interior { right_child } => {
                    let left_importance = cluster_importance(p, n, &nodes[index + 1]);
                    let right_importance = cluster_importance(p, n, &nodes[right_child]);

                    let (branch, u_next, probability) = rescale_variate(u, left_importance, right_importance)?;
                    index = match branch {
                        Branch::Left => index + 1,
                        Branch::Right => right_child,
                    };
                    u = u_next;
                    pdf_factor *= probability;
                    depth += 1;
                }
                NodeKind::Leaf {
                    first_emitter,
                    num_emitters,
                } => {
                    stat_dist!(TRAVERSAL_DEPTH, depth);
                    let selection = self.select_leaf_emitter(p, n, first_emitter, num_emitters, u)?;
                    return Some(EmitterSelection {
                        index: selection.index,
                        pdf_factor: pdf_factor * selection.pdf_factor,
                    });
                }
            }
        }
    }

    /// Chooses an emitter of a leaf proportionally to emitter importance.
    ///
    /// * `p`             - The shading point.
    /// * `n`             - The shading normal.
    /// * `first_emitter` - First emitter of the leaf.
    /// * `num_emitters`  - Number of emitters in the leaf.
    /// * `u`             - Uniform variate in `[0, 1)`.
    fn select_leaf_emitter(
        &self,
        p: &Point3f,
        n: &Normal3f,
        first_emitter: usize,
        num_emitters: usize,
        u: Float,
    ) -> Option<EmitterSelection> {
        let emitters = &self.emitters()[first_emitter..first_emitter + num_emitters];
        let total_importance: Float = emitters.iter().map(|e| emitter_importance(p, n, e)).sum();
        if total_importance == 0.0 {
            stat_inc!(ZERO_IMPORTANCE_LEAVES, 1);
            trace!("Light tree leaf at emitter {} has no importance at {}", first_emitter, p);
            return None;
        }

        let importances = emitters.iter().map(|e| emitter_importance(p, n, e));
        select_from_cdf(importances, total_importance, u).map(|(i, pdf)| EmitterSelection {
            index: first_emitter + i,
            pdf_factor: pdf,
        })
    }

    /// Returns the probability that `select_tree_emitter` chooses an emitter
    /// for the shading point, or 0 if it can never be chosen there.
    ///
    /// * `p`       - The shading point.
    /// * `n`       - The shading normal.
    /// * `emitter` - Index of the emitter.
    pub fn emitter_pdf(&self, p: &Point3f, n: &Normal3f, emitter: usize) -> Float {
        if emitter >= self.num_emitters() {
            return 0.0;
        }
        let nodes = self.nodes();

        let leaf = self.emitter_leaf(emitter);
        let (first_emitter, num_emitters) = match nodes[leaf].kind() {
            NodeKind::Leaf {
                first_emitter,
                num_emitters,
            } => (first_emitter, num_emitters),
            NodeKind::Interior { .. } => return 0.0,
        };
        let emitters = &self.emitters()[first_emitter..first_emitter + num_emitters];
        let total_importance: Float = emitters.iter().map(|e| emitter_importance(p, n, e)).sum();
        if !(total_importance > 0.0) {
            return 0.0;
        }
        let mut pdf = emitter_importance(p, n, &self.emitters()[emitter]) * (1.0 / total_importance);

        // Walk back to the root multiplying in each branch probability.
        let mut child = leaf;
        while child != 0 {
            let parent = self.parent(child);
            let right_child = match nodes[parent].kind() {
                NodeKind::Interior { right_child } => right_child,
                NodeKind::Leaf { .. } => return 0.0,
            };
            let left_importance = cluster_importance(p, n, &nodes[parent + 1]);
            let right_importance = cluster_importance(p, n, &nodes[right_child]);
            let total_importance = left_importance + right_importance;
            if !(total_importance > 0.0) {
                return 0.0;
            }
            let left_probability = left_importance / total_importance;
            pdf *= if child == parent + 1 {
                left_probability
            } else {
                1.0 - left_probability
            };
            child = parent;
        }
        pdf
    }
}
