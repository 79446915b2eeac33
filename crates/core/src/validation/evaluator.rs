//! Schema evaluator: pure logic, no I/O.

use indexmap::IndexMap;
use serde::Serialize;

use super::document_type::DocumentType;
use super::record::ExtractedRecord;
use super::rules::{DocumentSchema, ErrorMode, FieldConstraint};
use crate::error::CoreError;

/// A single field that failed its constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub label: String,
    pub message: String,
}

impl FieldViolation {
    fn new(constraint: &FieldConstraint) -> Self {
        Self {
            field: constraint.key.to_string(),
            label: constraint.label.to_string(),
            message: constraint.message().to_string(),
        }
    }
}

/// Failure payload; its shape follows the schema's [`ErrorMode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The first failing field of a fail-fast schema.
    Single(FieldViolation),
    /// Every failing field of a collect-all schema, in schema order.
    Collected(IndexMap<String, String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Accepted,
    Rejected(Rejection),
}

impl ValidationOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Keys of the fields that failed, in schema order.
    pub fn failed_fields(&self) -> Vec<&str> {
        match self {
            Self::Accepted => Vec::new(),
            Self::Rejected(Rejection::Single(v)) => vec![v.field.as_str()],
            Self::Rejected(Rejection::Collected(errors)) => {
                errors.keys().map(String::as_str).collect()
            }
        }
    }

    /// Convert into the error taxonomy callers propagate with `?`.
    pub fn into_result(self) -> Result<(), CoreError> {
        match self {
            Self::Accepted => Ok(()),
            Self::Rejected(Rejection::Single(v)) => Err(CoreError::FieldFormat {
                field: v.field,
                label: v.label,
                message: v.message,
            }),
            Self::Rejected(Rejection::Collected(errors)) => {
                Err(CoreError::MultiFieldFormat(errors))
            }
        }
    }
}

/// Evaluate every constraint of `schema` against `record`.
///
/// Values are trimmed before matching; absent keys read as empty.
pub fn evaluate(schema: &DocumentSchema, record: &ExtractedRecord) -> ValidationOutcome {
    let mut errors = IndexMap::new();

    for constraint in &schema.fields {
        if constraint.accepts(record.value(constraint.key)) {
            continue;
        }

        tracing::debug!(
            document_type = %schema.document_type,
            field = constraint.key,
            "Field failed validation",
        );

        match schema.mode {
            ErrorMode::FailFast => {
                return ValidationOutcome::Rejected(Rejection::Single(FieldViolation::new(
                    constraint,
                )));
            }
            ErrorMode::CollectAll => {
                errors.insert(constraint.key.to_string(), constraint.message().to_string());
            }
        }
    }

    if errors.is_empty() {
        ValidationOutcome::Accepted
    } else {
        ValidationOutcome::Rejected(Rejection::Collected(errors))
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Serializable summary of one validation, suitable as a response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub document_type: DocumentType,
    pub mode: ErrorMode,
    pub accepted: bool,
    /// The single failure message of a fail-fast rejection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Failure messages keyed by field.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub errors: IndexMap<String, String>,
}

impl ValidationReport {
    pub fn new(schema: &DocumentSchema, outcome: &ValidationOutcome) -> Self {
        let (error, errors) = match outcome {
            ValidationOutcome::Accepted => (None, IndexMap::new()),
            ValidationOutcome::Rejected(Rejection::Single(v)) => {
                let error = CoreError::FieldFormat {
                    field: v.field.clone(),
                    label: v.label.clone(),
                    message: v.message.clone(),
                };
                let errors = IndexMap::from([(v.field.clone(), v.message.clone())]);
                (Some(error.to_string()), errors)
            }
            ValidationOutcome::Rejected(Rejection::Collected(errors)) => (None, errors.clone()),
        };

        Self {
            document_type: schema.document_type,
            mode: schema.mode,
            accepted: outcome.is_accepted(),
            error,
            errors,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;
    use crate::validation::fields::FieldKind;

    fn schema(mode: ErrorMode) -> DocumentSchema {
        DocumentSchema::new(
            DocumentType::Aadhaar,
            mode,
            vec![
                FieldConstraint::required("Name", "Name", FieldKind::PersonName),
                FieldConstraint::required(
                    "Aadhaar_number",
                    "Aadhaar Number",
                    FieldKind::AadhaarNumber,
                ),
                FieldConstraint::required("Date_of_birth", "Date of Birth", FieldKind::DateOfBirth),
            ],
        )
    }

    fn record(pairs: &[(&str, &str)]) -> ExtractedRecord {
        pairs.iter().copied().collect()
    }

    #[test]
    fn accepts_valid_record() {
        let r = record(&[
            ("Name", "Ravi Kumar"),
            ("Aadhaar_number", "1234 5678 9012"),
            ("Date_of_birth", "01/02/1990"),
        ]);
        assert_eq!(evaluate(&schema(ErrorMode::FailFast), &r), ValidationOutcome::Accepted);
    }

    #[test]
    fn trims_before_matching() {
        let r = record(&[
            ("Name", "  Ravi Kumar  "),
            ("Aadhaar_number", "\t1234 5678 9012\n"),
            ("Date_of_birth", " 01/02/1990"),
        ]);
        assert!(evaluate(&schema(ErrorMode::FailFast), &r).is_accepted());
    }

    #[test]
    fn fail_fast_stops_at_first_failure() {
        let r = record(&[("Name", "Ravi Kumar"), ("Aadhaar_number", "1234")]);
        let outcome = evaluate(&schema(ErrorMode::FailFast), &r);
        assert_matches!(
            &outcome,
            ValidationOutcome::Rejected(Rejection::Single(v))
                if v.field == "Aadhaar_number" && v.label == "Aadhaar Number"
        );
        assert_eq!(outcome.failed_fields(), vec!["Aadhaar_number"]);
    }

    #[test]
    fn collect_all_reports_every_failure_in_order() {
        let r = record(&[("Name", "Ravi Kumar"), ("Aadhaar_number", "1234")]);
        let outcome = evaluate(&schema(ErrorMode::CollectAll), &r);
        assert_eq!(outcome.failed_fields(), vec!["Aadhaar_number", "Date_of_birth"]);
    }

    #[test]
    fn into_result_maps_to_error_taxonomy() {
        let r = record(&[("Name", "R2D2")]);
        assert_matches!(
            evaluate(&schema(ErrorMode::FailFast), &r).into_result(),
            Err(CoreError::FieldFormat { field, .. }) if field == "Name"
        );
        assert_matches!(
            evaluate(&schema(ErrorMode::CollectAll), &r).into_result(),
            Err(CoreError::MultiFieldFormat(errors)) if errors.len() == 3
        );
        assert!(ValidationOutcome::Accepted.into_result().is_ok());
    }

    #[test]
    fn report_for_fail_fast_rejection() {
        let s = schema(ErrorMode::FailFast);
        let outcome = evaluate(&s, &record(&[("Name", "Ravi Kumar")]));
        let report = serde_json::to_value(ValidationReport::new(&s, &outcome)).expect("ser");
        assert_eq!(report["document_type"], "aadhaar");
        assert_eq!(report["mode"], "fail_fast");
        assert_eq!(report["accepted"], false);
        assert_eq!(
            report["error"],
            "Unrecognized entity: Aadhaar Number is missing or invalid \
             (expected 12 digits in groups of 4, optionally separated by single spaces)"
        );
        assert_eq!(
            report["errors"],
            json!({"Aadhaar_number": FieldKind::AadhaarNumber.expectation()})
        );
    }

    #[test]
    fn report_for_acceptance_omits_errors() {
        let s = schema(ErrorMode::CollectAll);
        let report =
            serde_json::to_value(ValidationReport::new(&s, &ValidationOutcome::Accepted)).expect("ser");
        assert_eq!(
            report,
            json!({"document_type": "aadhaar", "mode": "collect_all", "accepted": true})
        );
    }
}
