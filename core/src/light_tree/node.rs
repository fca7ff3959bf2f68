//! Light Tree Nodes and Emitters

use crate::geometry::*;
use crate::math::*;

/// Spatial and directional bounds of a set of emitters: an axis aligned box
/// around the emitting geometry and a cone around the emission normals.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LightBounds {
    /// Minimum corner of the bounding box.
    pub bounding_box_min: Point3f,

    /// Maximum corner of the bounding box.
    pub bounding_box_max: Point3f,

    /// Unit vector; the average emission normal.
    pub bounding_cone_axis: Vector3f,

    /// Half-angle (radians) of the spread of emission normals around the axis.
    pub theta_o: Float,

    /// Half-angle (radians) past the normal at which emission falls to zero.
    pub theta_e: Float,

    /// Total emitted power.
    pub energy: Float,
}

impl LightBounds {
    /// Returns new `LightBounds`.
    ///
    /// * `bbox`    - Bounding box of the emitters.
    /// * `axis`    - Axis of the orientation cone. Normalized here.
    /// * `theta_o` - Spread of emission normals.
    /// * `theta_e` - Emission profile cutoff.
    /// * `energy`  - Total emitted power.
    pub fn new(bbox: Bounds3f, axis: Vector3f, theta_o: Float, theta_e: Float, energy: Float) -> Self {
        Self {
            bounding_box_min: bbox.p_min,
            bounding_box_max: bbox.p_max,
            bounding_cone_axis: axis.normalize(),
            theta_o,
            theta_e,
            energy,
        }
    }

    /// Returns the bounding box.
    pub fn bounds(&self) -> Bounds3f {
        Bounds3f {
            p_min: self.bounding_box_min,
            p_max: self.bounding_box_max,
        }
    }
}

/// Decoded layout information of a `LightTreeNode`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Interior node. The left child is the next node in the array.
    Interior {
        /// Index of the right child.
        right_child: usize,
    },

    /// Leaf node listing a contiguous range of emitters.
    Leaf {
        /// Index of the first emitter.
        first_emitter: usize,

        /// Number of emitters.
        num_emitters: usize,
    },
}

/// A node of the flattened light BVH.
///
/// Nodes are stored in pre-order: the left child of the interior node at
/// index `i` is at `i + 1`, its right child at `child_index`. A leaf stores
/// `-first_emitter` in `child_index` (so `child_index <= 0`) and the emitter
/// count in `num_prims`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LightTreeNode {
    /// Bounds of every emitter below this node.
    pub bounds: LightBounds,

    /// Right child index (> 0) or negated first emitter index (<= 0).
    pub child_index: i32,

    /// Number of emitters in a leaf.
    pub num_prims: i32,
}

impl LightTreeNode {
    /// Returns a new interior node.
    ///
    /// * `bounds`      - Bounds of both subtrees.
    /// * `right_child` - Index of the right child.
    pub fn interior(bounds: LightBounds, right_child: usize) -> Self {
        debug_assert!(right_child > 0);
        Self {
            bounds,
            child_index: right_child as i32,
            num_prims: 0,
        }
    }

    /// Returns a new leaf node.
    ///
    /// * `bounds`        - Bounds of the leaf's emitters.
    /// * `first_emitter` - Index of the first emitter.
    /// * `num_emitters`  - Number of emitters.
    pub fn leaf(bounds: LightBounds, first_emitter: usize, num_emitters: usize) -> Self {
        Self {
            bounds,
            child_index: -(first_emitter as i32),
            num_prims: num_emitters as i32,
        }
    }

    /// Decodes the node layout.
    pub fn kind(&self) -> NodeKind {
        if self.child_index > 0 {
            NodeKind::Interior {
                right_child: self.child_index as usize,
            }
        } else {
            NodeKind::Leaf {
                first_emitter: self.child_index.unsigned_abs() as usize,
                num_emitters: max(self.num_prims, 0) as usize,
            }
        }
    }

    /// Returns true for leaf nodes.
    pub fn is_leaf(&self) -> bool {
        self.child_index <= 0
    }
}

/// Bounds of a single emitter (an emissive triangle or an analytic light).
/// Emitter `k` is described by the light distribution entry `k`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LightTreeEmitter {
    /// Bounds of the emitter.
    pub bounds: LightBounds,
}

impl LightTreeEmitter {
    /// Returns a new `LightTreeEmitter`.
    ///
    /// * `bounds` - Bounds of the emitter.
    pub fn new(bounds: LightBounds) -> Self {
        Self { bounds }
    }
}

/// The emitter a light distribution entry refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LightSource {
    /// An emissive triangle of a mesh.
    Triangle {
        /// Triangle index.
        prim: usize,

        /// Object owning the triangle.
        object: usize,

        /// Shader flags added to samples of the triangle.
        shader_flag: u32,
    },

    /// An analytic light.
    Lamp(usize),
}

/// Mesh light part of a distribution entry.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MeshLight {
    /// Object owning the triangle.
    pub object_id: i32,

    /// Shader flags added to samples of the triangle.
    pub shader_flag: u32,
}

/// Maps an emitter to the light it samples. A non-negative `prim` is a
/// triangle index; a negative one encodes the analytic light `-prim - 1`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LightDistributionEntry {
    /// Encoded light reference.
    pub prim: i32,

    /// Only valid when `prim >= 0`.
    pub mesh_light: MeshLight,
}

impl LightDistributionEntry {
    /// Returns an entry referring to an emissive triangle.
    ///
    /// * `prim`        - Triangle index.
    /// * `object`      - Object owning the triangle.
    /// * `shader_flag` - Shader flags added to samples of the triangle.
    pub fn triangle(prim: usize, object: usize, shader_flag: u32) -> Self {
        Self {
            prim: prim as i32,
            mesh_light: MeshLight {
                object_id: object as i32,
                shader_flag,
            },
        }
    }

    /// Returns an entry referring to an analytic light.
    ///
    /// * `lamp` - Light index.
    pub fn lamp(lamp: usize) -> Self {
        Self {
            prim: encode_lamp(lamp),
            mesh_light: MeshLight::default(),
        }
    }

    /// Decodes the light reference.
    pub fn source(&self) -> LightSource {
        if self.prim >= 0 {
            LightSource::Triangle {
                prim: self.prim as usize,
                object: max(self.mesh_light.object_id, 0) as usize,
                shader_flag: self.mesh_light.shader_flag,
            }
        } else {
            LightSource::Lamp(decode_lamp(self.prim))
        }
    }
}

/// A light at infinity. It has no position so only its energy is used.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DistantLightEmitter {
    /// Encoded analytic light reference (`-lamp - 1`).
    pub prim_id: i32,

    /// Emitted power.
    pub energy: Float,
}

impl DistantLightEmitter {
    /// Returns a new `DistantLightEmitter`.
    ///
    /// * `lamp`   - Light index.
    /// * `energy` - Emitted power.
    pub fn new(lamp: usize, energy: Float) -> Self {
        Self {
            prim_id: encode_lamp(lamp),
            energy,
        }
    }

    /// Returns the analytic light index.
    pub fn lamp(&self) -> usize {
        decode_lamp(self.prim_id)
    }
}

/// Encodes an analytic light index as a negative prim.
fn encode_lamp(lamp: usize) -> i32 {
    -(lamp as i32) - 1
}

/// Decodes a negative prim into an analytic light index.
fn decode_lamp(prim: i32) -> usize {
    debug_assert!(prim < 0);
    (-prim - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_bounds() -> LightBounds {
        LightBounds::new(
            Bounds3f::new(Point3f::ZERO, Point3f::new(1.0, 1.0, 1.0)),
            Vector3f::new(0.0, 0.0, 2.0),
            0.0,
            PI_OVER_TWO,
            1.0,
        )
    }

    #[test]
    fn bounds_normalize_axis() {
        assert_eq!(unit_bounds().bounding_cone_axis, Vector3f::Z_AXIS);
    }

    #[test]
    fn node_kind_decoding() {
        let interior = LightTreeNode::interior(unit_bounds(), 4);
        assert_eq!(interior.kind(), NodeKind::Interior { right_child: 4 });
        assert!(!interior.is_leaf());

        let leaf = LightTreeNode::leaf(unit_bounds(), 3, 2);
        assert_eq!(leaf.child_index, -3);
        assert_eq!(leaf.kind(), NodeKind::Leaf { first_emitter: 3, num_emitters: 2 });

        // A leaf starting at the first emitter has child_index 0.
        let root_leaf = LightTreeNode::leaf(unit_bounds(), 0, 5);
        assert!(root_leaf.is_leaf());
        assert_eq!(root_leaf.kind(), NodeKind::Leaf { first_emitter: 0, num_emitters: 5 });
    }

    #[test]
    fn distribution_entry_decoding() {
        assert_eq!(
            LightDistributionEntry::triangle(12, 3, 1).source(),
            LightSource::Triangle { prim: 12, object: 3, shader_flag: 1 }
        );
        let lamp = LightDistributionEntry::lamp(0);
        assert_eq!(lamp.prim, -1);
        assert_eq!(lamp.source(), LightSource::Lamp(0));
        assert_eq!(LightDistributionEntry::lamp(7).source(), LightSource::Lamp(7));
    }

    #[test]
    fn distant_emitter_lamp() {
        let d = DistantLightEmitter::new(2, 5.0);
        assert_eq!(d.prim_id, -3);
        assert_eq!(d.lamp(), 2);
    }
}
