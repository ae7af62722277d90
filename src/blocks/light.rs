//! Scene lighting block

use log::warn;

use crate::core::types::{Vec3, Vec4};
use crate::layout::{BlockLayout, FieldDescriptor, UniformBlock};
use crate::writer::FieldValue;

/// Maximum number of point lights carried by the block
pub const MAX_LIGHTS: usize = 4;

/// Conventional binding slot for the light block
pub const LIGHT_BINDING: u32 = 4;

/// Hand-maintained expected size (header vec4 + 4 lights x 3 vec4)
pub const LIGHT_EXPECTED_SIZE: usize = 208;

pub const LIGHT_DECL: &str = "
layout(std140) uniform LightData {
    vec4 LightHeader; // lightCount, ambient rgb
    vec4 Lights[12];  // per light: position+strength, color+attenuation, direction+angle
};
";

pub static LIGHT_LAYOUT: BlockLayout = BlockLayout::new("LightData", &[
    FieldDescriptor::vec4("header"),
    FieldDescriptor::vec4_array("lights", MAX_LIGHTS * 3),
]);

/// One point light, packed into three vec4 slots
#[derive(Clone, Copy, Debug)]
pub struct Light {
    pub position: Vec3,
    pub strength: f32,
    pub color: Vec3,
    pub attenuation: f32,
    pub direction: Vec3,
    /// Cone angle for spotlights; zero for point lights
    pub angle: f32,
}

impl Light {
    fn pack(&self) -> [Vec4; 3] {
        [
            self.position.extend(self.strength),
            self.color.extend(self.attenuation),
            self.direction.extend(self.angle),
        ]
    }
}

/// Scene lighting: ambient color plus up to [`MAX_LIGHTS`] point lights.
///
/// Unused light slots are zero-filled by the writer, so a block with a
/// single light still occupies the full 208 bytes.
#[derive(Clone, Debug)]
pub struct LightBlock {
    pub ambient: Vec3,
    count: usize,
    packed: Vec<Vec4>,
}

impl Default for LightBlock {
    fn default() -> Self {
        Self::ambient_only(Vec3::new(0.01, 0.01, 0.002))
    }
}

impl LightBlock {
    /// Ambient color only, no active point lights
    pub fn ambient_only(ambient: Vec3) -> Self {
        Self {
            ambient,
            count: 0,
            packed: Vec::new(),
        }
    }

    /// Add a light; extra lights beyond [`MAX_LIGHTS`] are dropped
    pub fn add_light(&mut self, light: Light) {
        if self.count == MAX_LIGHTS {
            warn!("light limit reached ({MAX_LIGHTS}), dropping extra light");
            return;
        }
        self.packed.extend(light.pack());
        self.count += 1;
    }

    /// Number of active lights
    pub fn light_count(&self) -> usize {
        self.count
    }
}

impl UniformBlock for LightBlock {
    fn layout(&self) -> &'static BlockLayout {
        &LIGHT_LAYOUT
    }

    fn field(&self, index: usize) -> FieldValue<'_> {
        match index {
            0 => FieldValue::Vec4(Vec4::new(
                self.count as f32,
                self.ambient.x,
                self.ambient.y,
                self.ambient.z,
            )),
            1 => FieldValue::Vec4Slice(&self.packed),
            _ => FieldValue::Missing,
        }
    }
}
