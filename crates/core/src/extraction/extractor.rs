//! Extractor interface and shared types.
//!
//! Defines [`FieldExtractor`], the trait every extraction backend implements,
//! along with [`DocumentInput`] and [`ExtractionError`].

use uuid::Uuid;

use crate::validation::{DocumentType, ExtractedRecord};

/// A scanned document submitted for extraction.
#[derive(Debug, Clone)]
pub struct DocumentInput {
    /// Correlates log lines for one request.
    pub request_id: Uuid,
    pub document_type: DocumentType,
    /// Original file name as uploaded; informational only.
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl DocumentInput {
    pub fn new(
        document_type: DocumentType,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            request_id: Uuid::now_v7(),
            document_type,
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

/// Errors from an extraction backend. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// Spawning or talking to the backend failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend exceeded its configured timeout and was killed.
    #[error("Extractor timed out after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },

    /// The backend ran but reported failure.
    #[error("Extractor failed with exit code {exit_code}: {stderr}")]
    Failed { exit_code: i32, stderr: String },

    /// The backend's output is not a field map.
    #[error("Malformed extractor output: {0}")]
    Malformed(String),
}

/// Trait implemented by every extraction backend.
///
/// An implementation turns document bytes into a flat field map. It must not
/// validate the fields; that is the engine's job.
pub trait FieldExtractor: Send + Sync {
    fn extract(
        &self,
        input: &DocumentInput,
    ) -> impl std::future::Future<Output = Result<ExtractedRecord, ExtractionError>> + Send;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
