//! Light Tree

use super::*;
use crate::math::*;

/// How much of the light selection budget distant lights compete for when a
/// shading point chooses between the tree and the distant light list.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DistantImportance {
    /// Sum of the energies of all distant lights.
    #[default]
    Total,

    /// Energy of the first distant light only.
    Representative,
}

impl From<&str> for DistantImportance {
    /// Returns a `DistantImportance` given a string name.
    fn from(name: &str) -> Self {
        match name {
            "total" => Self::Total,
            "representative" => Self::Representative,
            _ => {
                error!("Distant light importance '{}' unknown. Using 'total'.", name);
                Self::Total
            }
        }
    }
}

/// The light tree used to select an emitter for a shading point together with
/// the list of distant lights that cannot be placed in a tree.
///
/// The tree is built by the scene and only read here. Construction validates
/// the flattened layout so traversal can index the arrays without checks.
#[derive(Clone, Debug)]
pub struct LightTree {
    /// Flattened BVH nodes in pre-order.
    nodes: Vec<LightTreeNode>,

    /// Emitters referenced by leaf ranges.
    emitters: Vec<LightTreeEmitter>,

    /// Light each emitter samples; parallel to `emitters`.
    distribution: Vec<LightDistributionEntry>,

    /// Lights at infinity.
    distant_lights: Vec<DistantLightEmitter>,

    /// Importance of the distant light list against the tree.
    distant_importance: DistantImportance,

    /// Parent of each node. The root is its own parent.
    parents: Vec<usize>,

    /// Leaf node holding each emitter.
    emitter_leaves: Vec<usize>,

    /// Number of interior nodes on the longest root to leaf path.
    depth: usize,
}

impl LightTree {
    /// Returns a new `LightTree` after validating its layout.
    ///
    /// * `nodes`          - Flattened BVH nodes in pre-order.
    /// * `emitters`       - Emitters referenced by leaf ranges.
    /// * `distribution`   - Light each emitter samples; one entry per emitter.
    /// * `distant_lights` - Lights at infinity.
    pub fn new(
        nodes: Vec<LightTreeNode>,
        emitters: Vec<LightTreeEmitter>,
        distribution: Vec<LightDistributionEntry>,
        distant_lights: Vec<DistantLightEmitter>,
    ) -> Result<Self, String> {
        register_stats();

        if emitters.len() != distribution.len() {
            return Err(format!(
                "Light tree has {} emitters but {} distribution entries",
                emitters.len(),
                distribution.len()
            ));
        }
        if nodes.is_empty() && !emitters.is_empty() {
            return Err(format!("Light tree has {} emitters but no nodes", emitters.len()));
        }
        if nodes.len() > i32::MAX as usize || emitters.len() > i32::MAX as usize {
            return Err(String::from("Light tree is too large"));
        }
        for (i, emitter) in emitters.iter().enumerate() {
            check_bounds(&emitter.bounds).map_err(|e| format!("Light tree emitter {}: {}", i, e))?;
        }
        for (i, light) in distant_lights.iter().enumerate() {
            if light.prim_id >= 0 {
                return Err(format!("Distant light {} does not refer to a lamp", i));
            }
            if !(light.energy >= 0.0 && light.energy.is_finite()) {
                return Err(format!("Distant light {} has invalid energy {}", i, light.energy));
            }
        }

        let (parents, emitter_leaves, depth) = Self::link(&nodes, emitters.len())?;

        info!(
            "Light tree: {} nodes, {} emitters, depth {}, {} distant lights",
            nodes.len(),
            emitters.len(),
            depth,
            distant_lights.len()
        );

        Ok(Self {
            nodes,
            emitters,
            distribution,
            distant_lights,
            distant_importance: DistantImportance::default(),
            parents,
            emitter_leaves,
            depth,
        })
    }

    /// Walks the nodes in pre-order checking child links and leaf ranges.
    /// Returns the parent of every node, the leaf of every emitter and the
    /// depth of the tree.
    ///
    /// * `nodes`        - Flattened BVH nodes.
    /// * `num_emitters` - Number of emitters.
    fn link(nodes: &[LightTreeNode], num_emitters: usize) -> Result<(Vec<usize>, Vec<usize>, usize), String> {
        let mut parents = vec![0; nodes.len()];
        let mut emitter_leaves: Vec<Option<usize>> = vec![None; num_emitters];
        let mut depth = 0;

        let mut next = 0;
        let mut stack = if nodes.is_empty() { vec![] } else { vec![(0_usize, 0_usize)] };
        while let Some((i, node_depth)) = stack.pop() {
            if i != next {
                return Err(format!("Light tree node {} is not in pre-order (expected {})", i, next));
            }
            next += 1;
            depth = max(depth, node_depth);

            let node = &nodes[i];
            check_bounds(&node.bounds).map_err(|e| format!("Light tree node {}: {}", i, e))?;

            match node.kind() {
                NodeKind::Interior { right_child } => {
                    if right_child <= i + 1 || right_child >= nodes.len() {
                        return Err(format!(
                            "Light tree node {} has invalid right child {}",
                            i, right_child
                        ));
                    }
                    parents[i + 1] = i;
                    parents[right_child] = i;
                    stack.push((right_child, node_depth + 1));
                    stack.push((i + 1, node_depth + 1));
                }
                NodeKind::Leaf {
                    first_emitter,
                    num_emitters: count,
                } => {
                    if node.num_prims < 1 {
                        return Err(format!("Light tree leaf {} has no emitters", i));
                    }
                    if first_emitter + count > num_emitters {
                        return Err(format!(
                            "Light tree leaf {} emitters {}..{} out of range",
                            i,
                            first_emitter,
                            first_emitter + count
                        ));
                    }
                    for leaf in emitter_leaves[first_emitter..first_emitter + count].iter_mut() {
                        if leaf.is_some() {
                            return Err(format!("Light tree leaf {} shares emitters with another leaf", i));
                        }
                        *leaf = Some(i);
                    }
                }
            }
        }
        if next != nodes.len() {
            return Err(format!(
                "Light tree has {} nodes unreachable from the root",
                nodes.len() - next
            ));
        }

        let emitter_leaves = emitter_leaves
            .into_iter()
            .enumerate()
            .map(|(k, leaf)| leaf.ok_or_else(|| format!("Light tree emitter {} is in no leaf", k)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok((parents, emitter_leaves, depth))
    }

    /// Returns the tree with the given distant light importance.
    ///
    /// * `distant_importance` - Importance of the distant light list.
    pub fn with_distant_importance(mut self, distant_importance: DistantImportance) -> Self {
        self.distant_importance = distant_importance;
        self
    }

    /// Returns the flattened nodes.
    pub fn nodes(&self) -> &[LightTreeNode] {
        &self.nodes
    }

    /// Returns the emitters.
    pub fn emitters(&self) -> &[LightTreeEmitter] {
        &self.emitters
    }

    /// Returns the light distribution entries.
    pub fn distribution(&self) -> &[LightDistributionEntry] {
        &self.distribution
    }

    /// Returns the distant lights.
    pub fn distant_lights(&self) -> &[DistantLightEmitter] {
        &self.distant_lights
    }

    /// Returns the distant light importance mode.
    pub fn distant_importance(&self) -> DistantImportance {
        self.distant_importance
    }

    /// Returns the number of emitters in the tree.
    pub fn num_emitters(&self) -> usize {
        self.emitters.len()
    }

    /// Returns the number of distant lights.
    pub fn num_distant_lights(&self) -> usize {
        self.distant_lights.len()
    }

    /// Returns the number of interior nodes on the longest root to leaf path.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the parent of a node; the root is its own parent.
    pub(crate) fn parent(&self, node: usize) -> usize {
        self.parents[node]
    }

    /// Returns the leaf node holding an emitter.
    pub(crate) fn emitter_leaf(&self, emitter: usize) -> usize {
        self.emitter_leaves[emitter]
    }
}

/// Checks that bounds can be fed to the importance metric.
///
/// * `bounds` - The bounds.
fn check_bounds(bounds: &LightBounds) -> Result<(), String> {
    if !(bounds.energy >= 0.0 && bounds.energy.is_finite()) {
        return Err(format!("invalid energy {}", bounds.energy));
    }
    if bounds.bounding_cone_axis.has_nans() {
        return Err(String::from("invalid orientation axis"));
    }
    if !(bounds.theta_o >= 0.0 && bounds.theta_e >= 0.0) {
        return Err(format!("invalid cone angles {} {}", bounds.theta_o, bounds.theta_e));
    }
    let bbox = bounds.bounds();
    for axis in 0..3 {
        if !(bbox.p_min[axis] <= bbox.p_max[axis]) {
            return Err(format!("invalid bounding box {}", bbox));
        }
    }
    Ok(())
}
