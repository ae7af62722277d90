//! Built-in uniform blocks shared by all effects
//!
//! The five base blocks (frame, camera, object, material, light) cover
//! the state every effect consumes. Each module bundles the block type,
//! its static layout, its conventional binding slot, a hand-maintained
//! expected size, and the matching GLSL declaration, so layout drift on
//! any of the three sides is caught by [`register_builtin_layouts`].

pub mod camera;
pub mod frame;
pub mod light;
pub mod material;
pub mod object;

pub use camera::CameraBlock;
pub use frame::FrameBlock;
pub use light::{Light, LightBlock};
pub use material::MaterialBlock;
pub use object::ObjectBlock;

use crate::binding::BindingRegistry;
use crate::core::types::Result;
use crate::layout::BlockLayout;
use crate::validate;

/// Cross-validate every built-in block against its bundled declaration
/// and register its binding.
///
/// Runs once at startup, before any frame is written. The first failure
/// propagates and the caller is expected to treat it as fatal: rendering
/// against a known-bad layout reads misaligned data on every frame.
pub fn register_builtin_layouts(registry: &mut BindingRegistry) -> Result<()> {
    let builtins: [(&'static BlockLayout, &str, u32, usize); 5] = [
        (&frame::FRAME_LAYOUT, frame::FRAME_DECL, frame::FRAME_BINDING, frame::FRAME_EXPECTED_SIZE),
        (&camera::CAMERA_LAYOUT, camera::CAMERA_DECL, camera::CAMERA_BINDING, camera::CAMERA_EXPECTED_SIZE),
        (&object::OBJECT_LAYOUT, object::OBJECT_DECL, object::OBJECT_BINDING, object::OBJECT_EXPECTED_SIZE),
        (&material::MATERIAL_LAYOUT, material::MATERIAL_DECL, material::MATERIAL_BINDING, material::MATERIAL_EXPECTED_SIZE),
        (&light::LIGHT_LAYOUT, light::LIGHT_DECL, light::LIGHT_BINDING, light::LIGHT_EXPECTED_SIZE),
    ];

    for (layout, decl, slot, expected_size) in builtins {
        validate::validate_layout(layout, decl)?;
        registry.register(layout.name(), slot, expected_size)?;
        registry.check(layout.name(), layout.size_bytes())?;
    }
    Ok(())
}
