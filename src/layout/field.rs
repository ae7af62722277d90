//! Field descriptors and serialization kinds

use super::block::BlockLayout;

/// How one field is serialized into the std140 buffer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// 4 floats (16 bytes)
    Vec4,
    /// 4x4 matrix written column-major (64 bytes)
    Mat4,
    /// `count` floats, optionally zero-padded to the next vec4 boundary
    FloatArray { count: usize, pad: bool },
    /// `count` vec4 elements (`count * 16` bytes)
    Vec4Array { count: usize },
    /// Nested block, flattened in place in declaration order
    Struct(&'static BlockLayout),
    /// Declared but never serialized (reserved for future expansion)
    Reserved,
}

impl FieldKind {
    /// Byte contribution of one field of this kind
    pub fn size_bytes(&self) -> usize {
        match *self {
            FieldKind::Vec4 => 16,
            FieldKind::Mat4 => 64,
            FieldKind::FloatArray { count, pad } => {
                let base = count * 4;
                if pad && count % 4 != 0 {
                    base + (4 - count % 4) * 4
                } else {
                    base
                }
            }
            FieldKind::Vec4Array { count } => count * 16,
            FieldKind::Struct(layout) => layout.size_bytes(),
            FieldKind::Reserved => 0,
        }
    }

    /// GLSL-style label used in slot reports and error messages
    pub fn label(&self) -> String {
        match *self {
            FieldKind::Vec4 => "vec4".to_string(),
            FieldKind::Mat4 => "mat4".to_string(),
            FieldKind::FloatArray { count: 1, .. } => "float".to_string(),
            FieldKind::FloatArray { count, .. } => format!("float[{count}]"),
            FieldKind::Vec4Array { count } => format!("vec4[{count}]"),
            FieldKind::Struct(layout) => format!("struct {}", layout.name()),
            FieldKind::Reserved => "reserved".to_string(),
        }
    }
}

/// One field of a uniform block: a name plus its serialization kind.
///
/// Declaration order is slice order in the owning [`BlockLayout`]; there
/// are no explicit offsets anywhere, the byte layout is purely sequential.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: &'static str,
    kind: FieldKind,
}

impl FieldDescriptor {
    /// 4 floats (16 bytes)
    pub const fn vec4(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Vec4,
        }
    }

    /// 4x4 column-major matrix (64 bytes)
    pub const fn mat4(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Mat4,
        }
    }

    /// `count` tightly packed floats
    ///
    /// `count` must be a non-zero multiple of 4: an unpadded run that does
    /// not fill whole vec4 slots would knock every later field off its
    /// 16-byte boundary. Use [`padded_floats`](Self::padded_floats) for
    /// partial slots. Violations fail at compile time when the layout is
    /// built in a `static`.
    pub const fn floats(name: &'static str, count: usize) -> Self {
        assert!(count > 0, "float field must hold at least one element");
        assert!(
            count % 4 == 0,
            "unpadded float field must fill whole vec4 slots; use padded_floats"
        );
        Self {
            name,
            kind: FieldKind::FloatArray { count, pad: false },
        }
    }

    /// `count` floats followed by zero padding to the next vec4 boundary
    pub const fn padded_floats(name: &'static str, count: usize) -> Self {
        assert!(count > 0, "float field must hold at least one element");
        Self {
            name,
            kind: FieldKind::FloatArray { count, pad: true },
        }
    }

    /// `count` vec4 elements; instances shorter than `count` zero-fill
    pub const fn vec4_array(name: &'static str, count: usize) -> Self {
        assert!(count > 0, "vec4 array must hold at least one element");
        Self {
            name,
            kind: FieldKind::Vec4Array { count },
        }
    }

    /// Nested block, flattened in place
    pub const fn nested(name: &'static str, layout: &'static BlockLayout) -> Self {
        Self {
            name,
            kind: FieldKind::Struct(layout),
        }
    }

    /// Inert field: occupies a declaration slot but contributes no bytes
    pub const fn reserved(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Reserved,
        }
    }

    /// Field name (used in error messages and slot reports)
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Serialization kind
    pub fn kind(&self) -> FieldKind {
        self.kind
    }
}
