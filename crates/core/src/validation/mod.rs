//! Document field validation engine.
//!
//! Provides field shape contracts, per-document schemas, the static schema
//! registry, and a pure evaluator. No I/O happens anywhere in this module.

pub mod document_type;
pub mod evaluator;
pub mod fields;
pub mod record;
pub mod registry;
pub mod rules;

pub use document_type::{CardKind, DocumentType};
pub use evaluator::{evaluate, FieldViolation, Rejection, ValidationOutcome, ValidationReport};
pub use fields::FieldKind;
pub use record::ExtractedRecord;
pub use registry::SchemaRegistry;
pub use rules::{DocumentSchema, ErrorMode, FieldConstraint};

use crate::error::CoreError;

/// Validate `record` against the builtin schema for the document type `tag`.
///
/// Fails only when `tag` is not a registered document type; field problems
/// are reported through [`ValidationOutcome::Rejected`].
pub fn validate(tag: &str, record: &ExtractedRecord) -> Result<ValidationOutcome, CoreError> {
    SchemaRegistry::builtin().validate_tag(tag, record)
}
