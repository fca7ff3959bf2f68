//! Light Types

use bitflags::bitflags;

bitflags! {
    /// Stores combination of flags for the light types.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct LightType: u8 {
        const DELTA_POSITION_LIGHT = 1;
        const DELTA_DIRECTION_LIGHT = 2;
        const AREA_LIGHT = 4;
        const INFINITE_LIGHT = 8;
    }
}

impl LightType {
    /// Returns true if the light flags has the DELTA_POSITION_LIGHT or
    /// DELTA_DIRECTION_LIGHT flag set.
    pub fn is_delta_light(&self) -> bool {
        self.intersects(Self::DELTA_POSITION_LIGHT | Self::DELTA_DIRECTION_LIGHT)
    }

    /// Returns true for lights at infinity that have no bounding geometry.
    pub fn is_distant(&self) -> bool {
        self.intersects(Self::DELTA_DIRECTION_LIGHT | Self::INFINITE_LIGHT)
    }
}

bitflags! {
    /// State of the path that requests a light sample.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct PathFlags: u32 {
        /// The path contributes to the shadow catcher pass.
        const SHADOW_CATCHER_PASS = 1 << 0;
    }
}

bitflags! {
    /// Per-object flags of the scene.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct ObjectFlags: u32 {
        /// The object takes part in the shadow catcher pass.
        const SHADOW_CATCHER = 1 << 0;
    }
}

bitflags! {
    /// Shader flags carried by a light sample.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct ShaderFlags: u32 {
        /// Combine the sample with BSDF sampling.
        const USE_MIS = 1 << 0;
        const EXCLUDE_DIFFUSE = 1 << 1;
        const EXCLUDE_GLOSSY = 1 << 2;
        const EXCLUDE_TRANSMIT = 1 << 3;
    }
}
