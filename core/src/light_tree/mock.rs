//! Emitter sampler used by light selection tests.

use crate::geometry::*;
use crate::light::*;
use crate::math::*;
use std::cell::RefCell;
use std::collections::HashSet;

/// Returns a sample with pdf 1 for every light unless configured otherwise
/// and records the calls it receives.
#[derive(Default)]
pub struct MockSampler {
    /// Lamps whose bounce limit is reached.
    pub exhausted_lamps: HashSet<usize>,

    /// Objects flagged as shadow catchers.
    pub shadow_catchers: HashSet<usize>,

    /// PDF returned by every sample.
    pub pdf: Option<Float>,

    /// Triangle calls as `(prim, object, randu, randv)`.
    pub triangle_calls: RefCell<Vec<(usize, usize, Float, Float)>>,

    /// Lamp calls as `(lamp, randu, randv)`.
    pub lamp_calls: RefCell<Vec<(usize, Float, Float)>>,
}

impl MockSampler {
    fn sample(&self, p: &Point3f) -> LightSample {
        LightSample::new(
            *p + Vector3f::Z_AXIS,
            Vector3f::Z_AXIS,
            1.0,
            Normal3f::new(0.0, 0.0, -1.0),
            1.0,
            self.pdf.unwrap_or(1.0),
            LightType::AREA_LIGHT,
        )
    }
}

impl EmitterSampler for MockSampler {
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
        self.triangle_calls.borrow_mut().push((prim, object, randu, randv));
        Some(self.sample(p))
    }

    fn light_sample(
        &self,
        lamp: usize,
        randu: Float,
        randv: Float,
        p: &Point3f,
        _flags: PathFlags,
        _kind: SegmentKind,
    ) -> Option<LightSample> {
        self.lamp_calls.borrow_mut().push((lamp, randu, randv));
        Some(self.sample(p))
    }

    fn reached_max_bounces(&self, lamp: usize, _bounce: usize) -> bool {
        self.exhausted_lamps.contains(&lamp)
    }

    fn object_flags(&self, object: usize) -> ObjectFlags {
        if self.shadow_catchers.contains(&object) {
            ObjectFlags::SHADOW_CATCHER
        } else {
            ObjectFlags::empty()
        }
    }
}

/// Returns a stream that replays the given variates and then repeats the
/// last one.
pub struct FixedStream {
    values: Vec<Float>,
    next: usize,
}

impl FixedStream {
    pub fn new(values: &[Float]) -> Self {
        Self {
            values: values.to_vec(),
            next: 0,
        }
    }
}

impl crate::rng::RandomStream for FixedStream {
    fn next_1d(&mut self) -> Float {
        let v = self.values[min(self.next, self.values.len() - 1)];
        self.next += 1;
        v
    }
}
