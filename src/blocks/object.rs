//! Per-instance object block

use crate::core::types::Vec4;
use crate::layout::{BlockLayout, FieldDescriptor, UniformBlock};
use crate::writer::FieldValue;

/// Conventional binding slot for the object block
pub const OBJECT_BINDING: u32 = 2;

/// Hand-maintained expected size (2 vec4)
pub const OBJECT_EXPECTED_SIZE: usize = 32;

pub const OBJECT_DECL: &str = "
layout(std140) uniform ObjectData {
    vec4 ObjectIdentity; // objectId, kind, flags, reserved
    vec4 ObjectTint;
};
";

pub static OBJECT_LAYOUT: BlockLayout = BlockLayout::new("ObjectData", &[
    FieldDescriptor::vec4("identity"),
    // debug label travels with the block but never reaches the GPU
    FieldDescriptor::reserved("label"),
    FieldDescriptor::vec4("tint"),
]);

/// Per-instance state: identity vector plus a tint color
#[derive(Clone, Copy, Debug, Default)]
pub struct ObjectBlock {
    pub object_id: u32,
    pub kind: u32,
    pub flags: u32,
    pub tint: Vec4,
    /// Debugging aid only; skipped by the writer
    pub label: Option<&'static str>,
}

impl ObjectBlock {
    pub fn new(object_id: u32, kind: u32, tint: Vec4) -> Self {
        Self {
            object_id,
            kind,
            tint,
            ..Default::default()
        }
    }
}

impl UniformBlock for ObjectBlock {
    fn layout(&self) -> &'static BlockLayout {
        &OBJECT_LAYOUT
    }

    fn field(&self, index: usize) -> FieldValue<'_> {
        match index {
            0 => FieldValue::Vec4(Vec4::new(
                self.object_id as f32,
                self.kind as f32,
                self.flags as f32,
                0.0,
            )),
            2 => FieldValue::Vec4(self.tint),
            _ => FieldValue::Missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::write_into;

    fn decode(bytes: &[u8]) -> Vec<f32> {
        bytes
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes(c.try_into().unwrap()))
            .collect()
    }

    #[test]
    fn test_reserved_label_contributes_no_bytes() {
        assert_eq!(OBJECT_LAYOUT.size_bytes(), OBJECT_EXPECTED_SIZE);

        let block = ObjectBlock {
            label: Some("probe"),
            ..Default::default()
        };
        let mut buf = Vec::new();
        write_into(&mut buf, &block).unwrap();
        assert_eq!(buf.len(), 32);
    }

    #[test]
    fn test_validates_against_declaration() {
        crate::validate::validate_layout(&OBJECT_LAYOUT, OBJECT_DECL).unwrap();
    }

    #[test]
    fn test_identity_then_tint() {
        let block = ObjectBlock::new(7, 2, Vec4::new(0.5, 0.25, 0.125, 1.0));
        let mut buf = Vec::new();
        write_into(&mut buf, &block).unwrap();

        let floats = decode(&buf);
        assert_eq!(&floats[0..4], &[7.0, 2.0, 0.0, 0.0]);
        assert_eq!(&floats[4..8], &[0.5, 0.25, 0.125, 1.0]);
    }
}
