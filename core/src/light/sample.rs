//! Light Sample

use super::*;
use crate::geometry::*;
use crate::math::*;

/// Whether the light sample is requested for a surface shading point or for a
/// segment through a volume.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum SegmentKind {
    /// Sample as seen from a point on a surface.
    #[default]
    Surface,

    /// Sample as seen from a ray segment inside a volume.
    VolumeSegment,
}

/// A sampled point on a light source, as seen from a shading point.
#[derive(Clone, Debug)]
pub struct LightSample {
    /// Position on the light. For distant lights this is the direction.
    pub p: Point3f,

    /// Unit direction from the shading point towards the light.
    pub d: Vector3f,

    /// Distance to the sampled position; infinite for distant lights.
    pub t: Float,

    /// Geometric normal at the sampled position.
    pub ng: Normal3f,

    /// Emission scale along `d`.
    pub eval_fac: Float,

    /// Probability density with respect to solid angle. After light selection
    /// this includes the probability of having selected the light.
    pub pdf: Float,

    /// Shader flags.
    pub shader: ShaderFlags,

    /// Index of the analytic light, if any.
    pub lamp: Option<usize>,

    /// Index of the emissive triangle, if any.
    pub prim: Option<usize>,

    /// Object owning the emissive triangle, if any.
    pub object: Option<usize>,

    /// Light source type.
    pub light_type: LightType,
}

impl LightSample {
    /// Return a new `LightSample` that is not associated with a lamp, triangle
    /// or object yet.
    ///
    /// * `p`          - Position on the light.
    /// * `d`          - Unit direction towards the light.
    /// * `t`          - Distance to the light.
    /// * `ng`         - Geometric normal on the light.
    /// * `eval_fac`   - Emission scale.
    /// * `pdf`        - Solid angle PDF.
    /// * `light_type` - Light source type.
    pub fn new(
        p: Point3f,
        d: Vector3f,
        t: Float,
        ng: Normal3f,
        eval_fac: Float,
        pdf: Float,
        light_type: LightType,
    ) -> Self {
        Self {
            p,
            d,
            t,
            ng,
            eval_fac,
            pdf,
            shader: ShaderFlags::empty(),
            lamp: None,
            prim: None,
            object: None,
            light_type,
        }
    }
}
