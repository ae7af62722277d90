//! Global per-frame data block

use crate::core::types::Vec4;
use crate::layout::{BlockLayout, FieldDescriptor, UniformBlock};
use crate::writer::FieldValue;

/// Layout version stamped into the w component of every frame block,
/// letting shaders detect a stale CPU side after a layout change
pub const LAYOUT_VERSION: f32 = 1.0;

/// Conventional binding slot for the frame block
pub const FRAME_BINDING: u32 = 0;

/// Hand-maintained expected size (1 vec4)
pub const FRAME_EXPECTED_SIZE: usize = 16;

/// GLSL declaration consumed by shaders, kept beside the layout so drift
/// between the two is caught at startup
pub const FRAME_DECL: &str = "
layout(std140) uniform FrameData {
    vec4 FrameTime; // time, deltaTime, frameIndex, layoutVersion
};
";

pub static FRAME_LAYOUT: BlockLayout = BlockLayout::new("FrameData", &[
    FieldDescriptor::vec4("frame_time"),
]);

/// Global per-frame state: accumulated time, frame delta, frame counter
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameBlock {
    pub time: f32,
    pub delta_time: f32,
    pub frame_index: u32,
}

impl FrameBlock {
    pub fn new(time: f32, delta_time: f32, frame_index: u32) -> Self {
        Self {
            time,
            delta_time,
            frame_index,
        }
    }
}

impl UniformBlock for FrameBlock {
    fn layout(&self) -> &'static BlockLayout {
        &FRAME_LAYOUT
    }

    fn field(&self, index: usize) -> FieldValue<'_> {
        match index {
            0 => FieldValue::Vec4(Vec4::new(
                self.time,
                self.delta_time,
                self.frame_index as f32,
                LAYOUT_VERSION,
            )),
            _ => FieldValue::Missing,
        }
    }
}
