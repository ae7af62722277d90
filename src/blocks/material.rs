//! Per-material surface properties block

use crate::core::types::Vec4;
use crate::layout::{BlockLayout, FieldDescriptor, UniformBlock};
use crate::writer::FieldValue;

/// Conventional binding slot for the material block
pub const MATERIAL_BINDING: u32 = 3;

/// Hand-maintained expected size (2 vec4)
pub const MATERIAL_EXPECTED_SIZE: usize = 32;

pub const MATERIAL_DECL: &str = "
layout(std140) uniform MaterialData {
    vec4 BaseColor;
    vec4 SurfaceParams; // roughness, metallic, emissive, reserved
};
";

pub static MATERIAL_LAYOUT: BlockLayout = BlockLayout::new("MaterialData", &[
    FieldDescriptor::vec4("base_color"),
    FieldDescriptor::vec4("surface"),
]);

/// Surface properties, updated rarely and cached by the caller
#[derive(Clone, Copy, Debug)]
pub struct MaterialBlock {
    pub base_color: Vec4,
    pub roughness: f32,
    pub metallic: f32,
    pub emissive: f32,
}

impl Default for MaterialBlock {
    fn default() -> Self {
        Self {
            base_color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            roughness: 0.5,
            metallic: 0.0,
            emissive: 0.0,
        }
    }
}

impl UniformBlock for MaterialBlock {
    fn layout(&self) -> &'static BlockLayout {
        &MATERIAL_LAYOUT
    }

    fn field(&self, index: usize) -> FieldValue<'_> {
        match index {
            0 => FieldValue::Vec4(self.base_color),
            1 => FieldValue::Vec4(Vec4::new(self.roughness, self.metallic, self.emissive, 0.0)),
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
    fn test_validates_against_declaration() {
        crate::validate::validate_layout(&MATERIAL_LAYOUT, MATERIAL_DECL).unwrap();
    }

    #[test]
    fn test_surface_params_pack_into_one_vec4() {
        let material = MaterialBlock {
            roughness: 0.25,
            metallic: 1.0,
            ..Default::default()
        };
        let mut buf = Vec::new();
        write_into(&mut buf, &material).unwrap();

        let floats = decode(&buf);
        assert_eq!(&floats[4..8], &[0.25, 1.0, 0.0, 0.0]);
    }
}
