//! Boundary to the external field extractor.
//!
//! OCR and language-model prompting live outside this crate. They are reached
//! only through [`FieldExtractor`], whose single output is an
//! [`ExtractedRecord`](crate::validation::ExtractedRecord).

pub mod command;
pub mod extractor;
pub mod pipeline;

pub use command::CommandExtractor;
pub use extractor::{DocumentInput, ExtractionError, FieldExtractor};
pub use pipeline::{process_document, ProcessedDocument};
