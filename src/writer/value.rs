//! Runtime field values handed to the writer

use crate::core::types::{Mat4, Vec4};
use crate::layout::UniformBlock;

/// The runtime value of one field, as exposed by [`UniformBlock::field`].
///
/// Borrowed variants borrow from the block instance for the duration of
/// a single write call; the writer never retains them.
#[derive(Clone, Copy)]
pub enum FieldValue<'a> {
    /// Four floats for a vec4 field
    Vec4(Vec4),
    /// A 4x4 matrix for a mat4 field
    Mat4(Mat4),
    /// A float run for a float-array field; may hold more than the
    /// declared count, never fewer
    Floats(&'a [f32]),
    /// Elements for a vec4-array field; shorter slices zero-fill
    Vec4Slice(&'a [Vec4]),
    /// An instance of a nested block
    Struct(&'a dyn UniformBlock),
    /// No value; the writer substitutes the field kind's default
    Missing,
}

impl FieldValue<'_> {
    /// Short label for error messages
    pub fn label(&self) -> &'static str {
        match self {
            FieldValue::Vec4(_) => "vec4",
            FieldValue::Mat4(_) => "mat4",
            FieldValue::Floats(_) => "float slice",
            FieldValue::Vec4Slice(_) => "vec4 slice",
            FieldValue::Struct(_) => "nested block",
            FieldValue::Missing => "missing",
        }
    }
}
