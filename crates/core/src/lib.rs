//! Field validation core for scanned identity and certificate documents.
//!
//! An external extractor (OCR plus a language model) turns a document into a
//! flat map of field name to text. This crate decides whether that map is
//! acceptable for a given document type and reports exactly which fields are
//! wrong. Everything here is pure logic except the [`extraction`] adapter,
//! which only spawns the configured extractor program.

pub mod error;
pub mod extraction;
pub mod validation;

pub use error::CoreError;
pub use validation::{validate, DocumentType, ExtractedRecord, SchemaRegistry, ValidationOutcome};
