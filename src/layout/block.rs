//! Uniform block layouts and the size calculator

use super::field::{FieldDescriptor, FieldKind};
use crate::validate::Slot;

/// The static shape of a uniform block: an ordered field list.
///
/// Built once per block type, usually in a `static`, and shared by every
/// instance. Only the shape is ever cached; instance data flows through
/// the writer and is never retained.
///
/// # Example
/// ```
/// use ublock::layout::{BlockLayout, FieldDescriptor};
///
/// static ORB_LAYOUT: BlockLayout = BlockLayout::new("OrbConfig", &[
///     FieldDescriptor::vec4("position"),
///     FieldDescriptor::vec4("color"),
///     FieldDescriptor::padded_floats("extra", 3),
/// ]);
///
/// assert_eq!(ORB_LAYOUT.size_bytes(), 48);
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct BlockLayout {
    name: &'static str,
    fields: &'static [FieldDescriptor],
}

impl BlockLayout {
    /// Create a layout from an ordered field list
    pub const fn new(name: &'static str, fields: &'static [FieldDescriptor]) -> Self {
        Self { name, fields }
    }

    /// Block name (used in logs, errors, and mismatch reports)
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &'static [FieldDescriptor] {
        self.fields
    }

    /// Total byte size: the sum of field contributions in declaration
    /// order, recursing into nested blocks.
    ///
    /// No alignment is inserted between fields beyond what a padded float
    /// field explicitly requests; the field kinds themselves keep the
    /// layout vec4-granular. The writer appends exactly this many bytes
    /// for any valid instance.
    pub fn size_bytes(&self) -> usize {
        self.fields.iter().map(|f| f.kind().size_bytes()).sum()
    }

    /// Flatten into the ordered slot list used by the cross-validator.
    ///
    /// Nested blocks contribute their own slots in place; reserved fields
    /// contribute nothing, matching their zero byte contribution.
    pub fn slots(&self) -> Vec<Slot> {
        let mut out = Vec::new();
        self.collect_slots(&mut out);
        out
    }

    fn collect_slots(&self, out: &mut Vec<Slot>) {
        for field in self.fields {
            match field.kind() {
                FieldKind::Reserved => {}
                FieldKind::Struct(sub) => sub.collect_slots(out),
                kind => out.push(Slot::new(field.name(), kind.label(), kind.size_bytes())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static INNER: BlockLayout = BlockLayout::new("Inner", &[
        FieldDescriptor::vec4("tint"),
        FieldDescriptor::mat4("transform"),
    ]);

    static OUTER: BlockLayout = BlockLayout::new("Outer", &[
        FieldDescriptor::vec4("position"),
        FieldDescriptor::reserved("debug_label"),
        FieldDescriptor::nested("inner", &INNER),
        FieldDescriptor::padded_floats("extra", 3),
    ]);

    #[test]
    fn test_size_sums_fields_in_order() {
        assert_eq!(INNER.size_bytes(), 16 + 64);
        assert_eq!(OUTER.size_bytes(), 16 + 0 + 80 + 16);
    }

    #[test]
    fn test_spec_example_is_48_bytes() {
        static ORB: BlockLayout = BlockLayout::new("Orb", &[
            FieldDescriptor::vec4("position"),
            FieldDescriptor::vec4("color"),
            FieldDescriptor::padded_floats("extra", 3),
        ]);
        assert_eq!(ORB.size_bytes(), 48);
    }

    #[test]
    fn test_slots_flatten_nested_and_skip_reserved() {
        let slots = OUTER.slots();
        let names: Vec<&str> = slots.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["position", "tint", "transform", "extra"]);

        let sizes: Vec<usize> = slots.iter().map(|s| s.size_bytes).collect();
        assert_eq!(sizes, [16, 16, 64, 16]);
    }

    #[test]
    fn test_slot_total_matches_size() {
        let total: usize = OUTER.slots().iter().map(|s| s.size_bytes).sum();
        assert_eq!(total, OUTER.size_bytes());
    }
}
