//! Scene Lights

use crate::mesh::TriangleMeshLight;
use core::geometry::*;
use core::light::*;
use core::light_tree::*;
use core::math::*;
use std::collections::HashMap;

/// Emitter arrays the light tree is built over.
#[derive(Clone, Debug, Default)]
pub struct TreeEmitters {
    /// Bounds of every lamp and emissive triangle with a position.
    pub emitters: Vec<LightTreeEmitter>,

    /// Light each emitter samples; parallel to `emitters`.
    pub distribution: Vec<LightDistributionEntry>,

    /// Lamps at infinity.
    pub distant_lights: Vec<DistantLightEmitter>,
}

/// The lights of a scene: analytic lights (lamps) and emissive meshes. Light
/// selection hands the emitter it picked to `SceneLights` for sampling.
#[derive(Clone, Default)]
pub struct SceneLights {
    /// Analytic lights.
    pub lamps: Vec<ArcLight>,

    /// Emissive meshes keyed by object index.
    meshes: HashMap<usize, TriangleMeshLight>,

    /// Object flags keyed by object index.
    object_flags: HashMap<usize, ObjectFlags>,
}

impl SceneLights {
    /// Returns new `SceneLights`.
    ///
    /// * `lamps`  - Analytic lights.
    /// * `meshes` - Emissive meshes.
    pub fn new(lamps: Vec<ArcLight>, meshes: Vec<TriangleMeshLight>) -> Self {
        Self {
            lamps,
            meshes: meshes.into_iter().map(|m| (m.object, m)).collect(),
            object_flags: HashMap::new(),
        }
    }

    /// Sets the flags of an object.
    ///
    /// * `object` - Object index.
    /// * `flags`  - Object flags.
    pub fn set_object_flags(&mut self, object: usize, flags: ObjectFlags) {
        self.object_flags.insert(object, flags);
    }

    /// Returns the emissive mesh of an object.
    ///
    /// * `object` - Object index.
    pub fn mesh(&self, object: usize) -> Option<&TriangleMeshLight> {
        self.meshes.get(&object)
    }

    /// Returns the emitter arrays for the light tree: lamps in order, then
    /// the triangles of each mesh by increasing object index. Lamps without
    /// bounds go to the distant light list.
    pub fn tree_emitters(&self) -> TreeEmitters {
        let mut result = TreeEmitters::default();

        for (lamp, light) in self.lamps.iter().enumerate() {
            match light.tree_bounds() {
                Some(bounds) => {
                    result.emitters.push(LightTreeEmitter::new(bounds));
                    result.distribution.push(LightDistributionEntry::lamp(lamp));
                }
                None => result.distant_lights.push(DistantLightEmitter::new(lamp, light.power())),
            }
        }

        let mut objects: Vec<&usize> = self.meshes.keys().collect();
        objects.sort();
        for object in objects {
            let mesh = &self.meshes[object];
            for prim in 0..mesh.num_triangles() {
                if let Some(bounds) = mesh.tree_bounds(prim) {
                    result.emitters.push(LightTreeEmitter::new(bounds));
                    result
                        .distribution
                        .push(LightDistributionEntry::triangle(prim, *object, mesh.shader.bits()));
                }
            }
        }

        info!(
            "{} tree emitters, {} distant lights",
            result.emitters.len(),
            result.distant_lights.len()
        );
        result
    }
}

impl EmitterSampler for SceneLights {
    fn triangle_light_sample(
        &self,
        prim: usize,
        object: usize,
        randu: Float,
        randv: Float,
        _time: Float,
        p: &Point3f,
        _kind: SegmentKind,
    ) -> Option<LightSample> {
        self.meshes.get(&object)?.sample(prim, &Point2f::new(randu, randv), p)
    }

    fn light_sample(
        &self,
        lamp: usize,
        randu: Float,
        randv: Float,
        p: &Point3f,
        _flags: PathFlags,
        kind: SegmentKind,
    ) -> Option<LightSample> {
        self.lamps.get(lamp)?.sample_li(p, &Point2f::new(randu, randv), kind)
    }

    fn reached_max_bounces(&self, lamp: usize, bounce: usize) -> bool {
        self.lamps.get(lamp).map_or(true, |light| bounce > light.max_bounces())
    }

    fn object_flags(&self, object: usize) -> ObjectFlags {
        self.object_flags.get(&object).copied().unwrap_or_default()
    }
}
