//! Extract-then-validate flow for one document.

use tracing::Instrument;

use super::extractor::{DocumentInput, FieldExtractor};
use crate::error::CoreError;
use crate::validation::{
    evaluate, ExtractedRecord, SchemaRegistry, ValidationOutcome, ValidationReport,
};

/// An extracted record together with its validation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedDocument {
    pub record: ExtractedRecord,
    pub outcome: ValidationOutcome,
    /// The same report `validate` produces for this record.
    pub report: ValidationReport,
}

impl ProcessedDocument {
    pub fn is_accepted(&self) -> bool {
        self.outcome.is_accepted()
    }

    /// The record when accepted, otherwise the field error.
    pub fn into_record(self) -> Result<ExtractedRecord, CoreError> {
        self.outcome.into_result()?;
        Ok(self.record)
    }
}

/// Extract fields from `input` and validate them against its document type.
///
/// A rejected record is still `Ok`; see [`ProcessedDocument::outcome`].
/// Unregistered types and extraction errors are `Err`, and extraction is
/// never retried.
pub async fn process_document<E: FieldExtractor>(
    extractor: &E,
    registry: &SchemaRegistry,
    input: &DocumentInput,
) -> Result<ProcessedDocument, CoreError> {
    let span = tracing::info_span!(
        "process_document",
        request_id = %input.request_id,
        document_type = %input.document_type,
    );

    async {
        // Unregistered types never reach the extractor.
        let schema = registry
            .get(&input.document_type)
            .ok_or_else(|| CoreError::UnknownDocumentType(input.document_type.to_string()))?;

        let record = extractor.extract(input).await.map_err(|e| {
            tracing::warn!(error = %e, "Field extraction failed");
            CoreError::from(e)
        })?;

        let outcome = evaluate(schema, &record);
        tracing::info!(
            accepted = outcome.is_accepted(),
            failed_fields = ?outcome.failed_fields(),
            "Document validated",
        );

        let report = ValidationReport::new(schema, &outcome);
        Ok(ProcessedDocument {
            record,
            outcome,
            report,
        })
    }
    .instrument(span)
    .await
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use assert_matches::assert_matches;

    use super::*;
    use crate::extraction::ExtractionError;
    use crate::validation::DocumentType;

    /// Returns a canned record (or error) and counts calls.
    struct CannedExtractor {
        response: Result<ExtractedRecord, String>,
        calls: AtomicUsize,
    }

    impl CannedExtractor {
        fn returning(pairs: &[(&str, &str)]) -> Self {
            Self {
                response: Ok(pairs.iter().copied().collect()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(stderr: &str) -> Self {
            Self {
                response: Err(stderr.to_string()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl FieldExtractor for CannedExtractor {
        async fn extract(&self, _input: &DocumentInput) -> Result<ExtractedRecord, ExtractionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.clone().map_err(|stderr| ExtractionError::Failed {
                exit_code: 1,
                stderr,
            })
        }
    }

    fn aadhaar_input() -> DocumentInput {
        DocumentInput::new(DocumentType::Aadhaar, "aadhaar.pdf", "application/pdf", b"%PDF".to_vec())
    }

    #[tokio::test]
    async fn returns_record_when_accepted() {
        let extractor = CannedExtractor::returning(&[
            ("Name", "Ravi Kumar"),
            ("Aadhaar_number", "1234 5678 9012"),
            ("Date_of_birth", "01/02/1990"),
        ]);
        let processed = process_document(&extractor, SchemaRegistry::builtin(), &aadhaar_input())
            .await
            .expect("processed");
        assert!(processed.is_accepted());
        assert!(processed.report.accepted);
        let record = processed.into_record().expect("accepted");
        assert_eq!(record.value("Name"), "Ravi Kumar");
        assert_eq!(extractor.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn rejection_carries_outcome_and_report() {
        let extractor = CannedExtractor::returning(&[
            ("Name", "Ravi Kumar"),
            ("Aadhaar_number", "1234-5678-9012"),
            ("Date_of_birth", "01/02/1990"),
        ]);
        let processed = process_document(&extractor, SchemaRegistry::builtin(), &aadhaar_input())
            .await
            .expect("processed");
        assert_eq!(processed.outcome.failed_fields(), vec!["Aadhaar_number"]);
        assert!(!processed.report.accepted);
        assert!(processed.report.errors.contains_key("Aadhaar_number"));
        assert_matches!(
            processed.into_record(),
            Err(CoreError::FieldFormat { field, .. }) if field == "Aadhaar_number"
        );
    }

    #[tokio::test]
    async fn report_matches_direct_validation() {
        let pairs = [
            ("Applicant Name", "Ravi Kumar"),
            ("Father_Husband_Name", ""),
            ("Date_of_birth", "1990/02/01"),
            ("Adhaar_Number", "1234 5678 9012"),
            ("Mobile_number", "9876543210"),
        ];
        let extractor = CannedExtractor::returning(&pairs);
        let input = DocumentInput::new(
            DocumentType::IncomeCertificate,
            "income.pdf",
            "application/pdf",
            Vec::new(),
        );
        let processed = process_document(&extractor, SchemaRegistry::builtin(), &input)
            .await
            .expect("processed");

        let schema = SchemaRegistry::builtin()
            .get(&DocumentType::IncomeCertificate)
            .expect("registered");
        let record: ExtractedRecord = pairs.into_iter().collect();
        let direct = ValidationReport::new(schema, &evaluate(schema, &record));
        assert_eq!(processed.report, direct);
        assert_eq!(processed.report.errors.len(), 3);
    }

    #[tokio::test]
    async fn extraction_failure_is_not_retried() {
        let extractor = CannedExtractor::failing("OCR unavailable");
        let result = process_document(&extractor, SchemaRegistry::builtin(), &aadhaar_input()).await;
        assert_matches!(
            result,
            Err(CoreError::Extraction(ExtractionError::Failed { stderr, .. }))
                if stderr == "OCR unavailable"
        );
        assert_eq!(extractor.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unregistered_type_skips_extraction() {
        let extractor = CannedExtractor::returning(&[]);
        let registry = SchemaRegistry::default();
        let result = process_document(&extractor, &registry, &aadhaar_input()).await;
        assert_matches!(result, Err(CoreError::UnknownDocumentType(_)));
        assert_eq!(extractor.calls.load(Ordering::SeqCst), 0);
    }
}
