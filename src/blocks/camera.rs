//! Camera block: view definition and matrices

use crate::core::types::{Mat4, Vec3, Vec4};
use crate::layout::{BlockLayout, FieldDescriptor, UniformBlock};
use crate::writer::FieldValue;

/// Conventional binding slot for the camera block
pub const CAMERA_BINDING: u32 = 1;

/// Hand-maintained expected size (4 vec4 + 2 mat4 + 2 reserved vec4)
pub const CAMERA_EXPECTED_SIZE: usize = 224;

pub const CAMERA_DECL: &str = "
layout(std140) uniform CameraData {
    vec4 CameraPosition; // xyz position, w reserved
    vec4 CameraForward;  // xyz forward, w aspect ratio
    vec4 CameraUp;       // xyz up, w vertical fov (radians)
    vec4 CameraClip;     // near, far, isFlying, reserved
    mat4 ViewProj;
    mat4 InvViewProj;
    vec4 Reserved0;      // held for PrevViewProj / motion vectors
    vec4 Reserved1;
};
";

pub static CAMERA_LAYOUT: BlockLayout = BlockLayout::new("CameraData", &[
    FieldDescriptor::vec4("position"),
    FieldDescriptor::vec4("forward"),
    FieldDescriptor::vec4("up"),
    FieldDescriptor::vec4("clip"),
    FieldDescriptor::mat4("view_proj"),
    FieldDescriptor::mat4("inv_view_proj"),
    FieldDescriptor::vec4("reserved0"),
    FieldDescriptor::vec4("reserved1"),
]);

/// View definition: position, orientation, projection parameters, and
/// the matrices derived from them.
///
/// The matrices are optional; a block written before the projection is
/// known falls back to identity transforms rather than zeros.
#[derive(Clone, Copy, Debug)]
pub struct CameraBlock {
    pub position: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    pub flying: bool,
    pub view_proj: Option<Mat4>,
    pub inv_view_proj: Option<Mat4>,
}

impl Default for CameraBlock {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: Vec3::NEG_Z,
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fov_y: std::f32::consts::FRAC_PI_2,
            near: 0.1,
            far: 1000.0,
            flying: false,
            view_proj: None,
            inv_view_proj: None,
        }
    }
}

impl CameraBlock {
    /// Attach a view-projection matrix and its inverse
    pub fn with_view_proj(mut self, view_proj: Mat4) -> Self {
        self.inv_view_proj = Some(view_proj.inverse());
        self.view_proj = Some(view_proj);
        self
    }
}

impl UniformBlock for CameraBlock {
    fn layout(&self) -> &'static BlockLayout {
        &CAMERA_LAYOUT
    }

    fn field(&self, index: usize) -> FieldValue<'_> {
        match index {
            0 => FieldValue::Vec4(self.position.extend(0.0)),
            1 => FieldValue::Vec4(self.forward.extend(self.aspect)),
            2 => FieldValue::Vec4(self.up.extend(self.fov_y)),
            3 => FieldValue::Vec4(Vec4::new(
                self.near,
                self.far,
                if self.flying { 1.0 } else { 0.0 },
                0.0,
            )),
            4 => self
                .view_proj
                .map_or(FieldValue::Missing, FieldValue::Mat4),
            5 => self
                .inv_view_proj
                .map_or(FieldValue::Missing, FieldValue::Mat4),
            // reserved slots write zeros until they grow a meaning
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
    fn test_layout_is_224_bytes() {
        assert_eq!(CAMERA_LAYOUT.size_bytes(), CAMERA_EXPECTED_SIZE);
    }

    #[test]
    fn test_validates_against_declaration() {
        crate::validate::validate_layout(&CAMERA_LAYOUT, CAMERA_DECL).unwrap();
    }

    #[test]
    fn test_missing_matrices_write_identity() {
        let mut buf = Vec::new();
        write_into(&mut buf, &CameraBlock::default()).unwrap();

        let floats = decode(&buf[64..128]);
        assert_eq!(Mat4::from_cols_slice(&floats), Mat4::IDENTITY);
    }

    #[test]
    fn test_packs_orientation_into_w_components() {
        let camera = CameraBlock {
            position: Vec3::new(1.0, 2.0, 3.0),
            aspect: 2.0,
            ..Default::default()
        };
        let mut buf = Vec::new();
        write_into(&mut buf, &camera).unwrap();

        let floats = decode(&buf);
        assert_eq!(&floats[0..4], &[1.0, 2.0, 3.0, 0.0]);
        assert_eq!(floats[7], 2.0); // forward.w carries the aspect ratio
    }

    #[test]
    fn test_with_view_proj_fills_inverse() {
        let vp = Mat4::from_scale(Vec3::splat(2.0));
        let camera = CameraBlock::default().with_view_proj(vp);
        assert_eq!(camera.inv_view_proj, Some(vp.inverse()));
    }
}
