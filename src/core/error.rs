//! Error types for uniform block packing and validation

use thiserror::Error;

use crate::validate::MismatchReport;

/// Main error type for the crate
///
/// Every variant is a configuration defect: retrying cannot succeed
/// without a code or shader change, so callers are expected to treat
/// these as fatal during startup and to stop writing frames when one
/// surfaces from the per-frame writer.
#[derive(Debug, Error)]
pub enum Error {
    /// A field's runtime value does not satisfy its declared kind
    #[error("shape error in {block}.{field}: {detail}")]
    Shape {
        block: &'static str,
        field: &'static str,
        detail: String,
    },

    /// Calculated byte size disagrees with a predicted or registered size
    #[error("size mismatch for {name}: calculated={calculated}, expected={expected}")]
    SizeMismatch {
        name: String,
        calculated: usize,
        expected: usize,
    },

    /// Schema-derived slots disagree with slots parsed from declaration text
    #[error("{0}")]
    LayoutMismatch(Box<MismatchReport>),

    /// Declaration text does not conform to the uniform block grammar
    #[error("parse error: {0}")]
    Parse(String),

    /// Binding registry misuse (duplicate or unknown entry)
    #[error("binding error: {0}")]
    Binding(String),
}
