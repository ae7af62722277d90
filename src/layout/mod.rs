//! Block layouts, field descriptors, and the size calculator

pub mod block;
pub mod field;

pub use block::BlockLayout;
pub use field::{FieldDescriptor, FieldKind};

use crate::writer::FieldValue;

/// A record type that can be packed into a std140 uniform buffer.
///
/// Implemented once per block type. `layout()` fixes the field order and
/// kinds at build time; `field()` hands the writer the runtime value for
/// the descriptor at a given declaration index. The layout is the single
/// source of ordering truth: the writer never reorders fields, and the
/// byte sequence it emits is exactly the declaration-order concatenation
/// of the field contributions.
pub trait UniformBlock {
    /// Static shape shared by every instance of this block type
    fn layout(&self) -> &'static BlockLayout;

    /// Runtime value for the field at declaration index `index`
    ///
    /// Return [`FieldValue::Missing`] where no value exists; the writer
    /// substitutes four zeros for a vec4 and the identity matrix for a
    /// mat4 (a zeroed transform would collapse downstream geometry, so
    /// identity is the only sanctioned matrix fallback).
    fn field(&self, index: usize) -> FieldValue<'_>;
}
