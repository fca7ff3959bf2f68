//! Triangle Mesh Light

use core::geometry::*;
use core::light::*;
use core::light_tree::*;
use core::math::*;
use core::sampling::*;

/// An emissive triangle mesh. Each triangle is a separate emitter of the
/// light tree.
#[derive(Clone)]
pub struct TriangleMeshLight {
    /// Object index of the mesh.
    pub object: usize,

    /// Vertex positions.
    pub vertices: Vec<Point3f>,

    /// Vertex indices of each triangle.
    pub triangles: Vec<[usize; 3]>,

    /// Emitted radiance.
    pub strength: Float,

    /// Shader flags of the emission shader.
    pub shader: ShaderFlags,
}

impl TriangleMeshLight {
    /// Returns a new `TriangleMeshLight`.
    ///
    /// * `object`    - Object index of the mesh.
    /// * `vertices`  - Vertex positions.
    /// * `triangles` - Vertex indices of each triangle.
    /// * `strength`  - Emitted radiance.
    pub fn new(object: usize, vertices: Vec<Point3f>, triangles: Vec<[usize; 3]>, strength: Float) -> Self {
        Self {
            object,
            vertices,
            triangles,
            strength,
            shader: ShaderFlags::USE_MIS,
        }
    }

    /// Returns the number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Returns the vertices of a triangle.
    ///
    /// * `prim` - Triangle index.
    fn triangle(&self, prim: usize) -> Option<[Point3f; 3]> {
        let [i0, i1, i2] = *self.triangles.get(prim)?;
        Some([*self.vertices.get(i0)?, *self.vertices.get(i1)?, *self.vertices.get(i2)?])
    }

    /// Returns the area of a triangle.
    ///
    /// * `prim` - Triangle index.
    pub fn area(&self, prim: usize) -> Float {
        self.triangle(prim)
            .map_or(0.0, |[p0, p1, p2]| 0.5 * (p1 - p0).cross(&(p2 - p0)).length())
    }

    /// Uniformly sample a point on a triangle as seen from a shading point.
    /// Triangles emit on the side their winding order faces. Fails for
    /// degenerate triangles and triangles seen edge-on or from behind.
    ///
    /// * `prim` - Triangle index.
    /// * `u`    - Sample values for Monte Carlo integration.
    /// * `p`    - The shading point.
    pub fn sample(&self, prim: usize, u: &Point2f, p: &Point3f) -> Option<LightSample> {
        let [p0, p1, p2] = self.triangle(prim)?;
        let n = (p1 - p0).cross(&(p2 - p0));
        let area = 0.5 * n.length();
        if area == 0.0 {
            return None;
        }
        let ng = Normal3f::from(n.normalize());

        let b = uniform_sample_triangle(u);
        let p_light = p2 + b.x * (p0 - p2) + b.y * (p1 - p2);

        let to_light = p_light - *p;
        let t = to_light.length();
        if t == 0.0 {
            return None;
        }
        let d = to_light / t;
        let cos_light = ng.dot(&-d);
        if cos_light <= 0.0 {
            return None;
        }

        let mut ls = LightSample::new(
            p_light,
            d,
            t,
            ng,
            self.strength,
            t * t / (cos_light * area),
            LightType::AREA_LIGHT,
        );
        ls.shader = self.shader;
        Some(ls)
    }

    /// Returns the bounds of a triangle for the light tree.
    ///
    /// * `prim` - Triangle index.
    pub fn tree_bounds(&self, prim: usize) -> Option<LightBounds> {
        let [p0, p1, p2] = self.triangle(prim)?;
        let n = (p1 - p0).cross(&(p2 - p0));
        if n.length_squared() == 0.0 {
            debug!("Skipping degenerate triangle {} of object {}", prim, self.object);
            return None;
        }
        let bbox = Bounds3f::from_point(p0).union_point(&p1).union_point(&p2);
        Some(LightBounds::new(
            bbox,
            n,
            0.0,
            PI_OVER_TWO,
            self.strength * 0.5 * n.length(),
        ))
    }
}
