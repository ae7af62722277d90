//! Cross-validation of block layouts against GLSL declaration text
//!
//! A layout and the shader declaration that consumes it are authored
//! independently and can drift with no compiler in between. This module
//! parses the declaration into ordered (name, size) slots and compares
//! them positionally against the slots derived from the layout's field
//! kinds. It is meant to run once at startup, before any frame is
//! written, and to be treated as fatal on failure.

pub mod glsl;

use std::fmt;

use log::debug;

use crate::core::error::Error;
use crate::core::types::Result;
use crate::layout::BlockLayout;

/// One validation slot: a field's name, kind label, and byte size
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot {
    pub name: String,
    pub kind: String,
    pub size_bytes: usize,
}

impl Slot {
    pub fn new(name: impl Into<String>, kind: impl Into<String>, size_bytes: usize) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            size_bytes,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {} bytes)", self.name, self.kind, self.size_bytes)
    }
}

/// Everything needed to diff the two sides of a failed validation by hand
#[derive(Clone, Debug)]
pub struct MismatchReport {
    /// Block name from the layout side
    pub block: String,
    /// What diverged (slot count, or a specific slot's size)
    pub what: String,
    /// Expected-vs-actual detail for the diverging slot
    pub detail: String,
    /// Full slot list derived from the layout's field kinds
    pub schema_slots: Vec<Slot>,
    /// Full slot list parsed from the declaration text
    pub declared_slots: Vec<Slot>,
}

impl fmt::Display for MismatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "layout mismatch for {}: {}", self.block, self.what)?;
        writeln!(f, "  {}", self.detail)?;
        writeln!(f)?;
        writeln!(f, "schema slots ({}):", self.schema_slots.len())?;
        for (i, slot) in self.schema_slots.iter().enumerate() {
            writeln!(f, "  {i}: {slot}")?;
        }
        writeln!(f, "declaration slots ({}):", self.declared_slots.len())?;
        for (i, slot) in self.declared_slots.iter().enumerate() {
            writeln!(f, "  {i}: {slot}")?;
        }
        Ok(())
    }
}

/// Validate a block layout against a GLSL uniform block declaration.
///
/// Uses the first uniform block found in `text`; see
/// [`validate_named_layout`] to pick a block by name. Comparison is
/// positional: slot counts must match and every slot's byte size must
/// match. Identifier names may legitimately differ between the two sides,
/// so they are reported but never load-bearing; only order and size
/// determine the binary layout.
pub fn validate_layout(layout: &BlockLayout, text: &str) -> Result<()> {
    let declared = glsl::parse_block(text, None)?;
    compare_slots(layout, declared)
}

/// Validate against the uniform block named `block_name` in `text`
pub fn validate_named_layout(layout: &BlockLayout, text: &str, block_name: &str) -> Result<()> {
    let declared = glsl::parse_block(text, Some(block_name))?;
    compare_slots(layout, declared)
}

fn compare_slots(layout: &BlockLayout, declared_slots: Vec<Slot>) -> Result<()> {
    let schema_slots = layout.slots();

    if schema_slots.len() != declared_slots.len() {
        return Err(mismatch(
            layout,
            "slot count mismatch".to_string(),
            format!(
                "schema has {} slots, declaration has {}",
                schema_slots.len(),
                declared_slots.len()
            ),
            schema_slots,
            declared_slots,
        ));
    }

    for (i, (schema, declared)) in schema_slots.iter().zip(&declared_slots).enumerate() {
        if schema.size_bytes != declared.size_bytes {
            return Err(mismatch(
                layout,
                format!("slot {i} size mismatch"),
                format!(
                    "schema '{}' ({}) is {} bytes, declaration '{}' ({}) is {} bytes",
                    schema.name,
                    schema.kind,
                    schema.size_bytes,
                    declared.name,
                    declared.kind,
                    declared.size_bytes
                ),
                schema_slots.clone(),
                declared_slots.clone(),
            ));
        }
    }

    debug!(
        "validated layout '{}': {} slots, {} bytes",
        layout.name(),
        schema_slots.len(),
        layout.size_bytes()
    );
    Ok(())
}

fn mismatch(
    layout: &BlockLayout,
    what: String,
    detail: String,
    schema_slots: Vec<Slot>,
    declared_slots: Vec<Slot>,
) -> Error {
    Error::LayoutMismatch(Box::new(MismatchReport {
        block: layout.name().to_string(),
        what,
        detail,
        schema_slots,
        declared_slots,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FieldDescriptor;

    static ORB_LAYOUT: BlockLayout = BlockLayout::new("OrbConfig", &[
        FieldDescriptor::vec4("position"),
        FieldDescriptor::vec4("color"),
        FieldDescriptor::padded_floats("extra", 3),
    ]);

    #[test]
    fn test_spec_example_validates() {
        let text = "
            layout(std140) uniform OrbConfig {
                vec4 Position;
                vec4 Color;
                vec3 Extra;
            };
        ";
        validate_layout(&ORB_LAYOUT, text).unwrap();
    }

    #[test]
    fn test_names_are_not_load_bearing() {
        // Same sizes, completely different identifiers: still valid.
        let text = "
            uniform Whatever {
                vec4 a;
                vec4 b;
                vec3 c;
            };
        ";
        validate_layout(&ORB_LAYOUT, text).unwrap();
    }

    #[test]
    fn test_slot_count_mismatch() {
        let text = "
            uniform OrbConfig {
                vec4 Position;
                vec4 Color;
            };
        ";
        let err = validate_layout(&ORB_LAYOUT, text).unwrap_err();
        match err {
            Error::LayoutMismatch(report) => {
                assert_eq!(report.block, "OrbConfig");
                assert_eq!(report.schema_slots.len(), 3);
                assert_eq!(report.declared_slots.len(), 2);
                assert!(report.what.contains("count"));
            }
            other => panic!("expected layout mismatch, got {other}"),
        }
    }

    #[test]
    fn test_slot_size_mismatch_names_the_slot() {
        let text = "
            uniform OrbConfig {
                vec4 Position;
                mat4 Color;
                vec3 Extra;
            };
        ";
        let err = validate_layout(&ORB_LAYOUT, text).unwrap_err();
        match err {
            Error::LayoutMismatch(report) => {
                assert_eq!(report.what, "slot 1 size mismatch");
                assert!(report.detail.contains("16 bytes"));
                assert!(report.detail.contains("64 bytes"));
            }
            other => panic!("expected layout mismatch, got {other}"),
        }
    }

    #[test]
    fn test_report_display_lists_both_sides() {
        let text = "
            uniform OrbConfig {
                vec4 Position;
            };
        ";
        let err = validate_layout(&ORB_LAYOUT, text).unwrap_err();
        let rendered = err.to_string();
        assert!(rendered.contains("schema slots (3):"));
        assert!(rendered.contains("declaration slots (1):"));
        assert!(rendered.contains("0: position (vec4, 16 bytes)"));
    }

    #[test]
    fn test_named_block_selection() {
        let text = "
            uniform Other {
                mat4 Unrelated;
            };

            uniform OrbConfig {
                vec4 Position;
                vec4 Color;
                vec3 Extra;
            };
        ";
        validate_named_layout(&ORB_LAYOUT, text, "OrbConfig").unwrap();
        assert!(validate_named_layout(&ORB_LAYOUT, text, "Other").is_err());
    }

    #[test]
    fn test_same_size_swapped_fields_still_validate() {
        // Two same-size slots with swapped meanings cannot be told apart
        // by a size-only comparison. Known relaxation, kept deliberately.
        let text = "
            uniform OrbConfig {
                vec4 Color;
                vec4 Position;
                vec3 Extra;
            };
        ";
        validate_layout(&ORB_LAYOUT, text).unwrap();
    }
}
