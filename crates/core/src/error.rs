use indexmap::IndexMap;

use crate::extraction::ExtractionError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unknown document type: {0}")]
    UnknownDocumentType(String),

    #[error("Unrecognized entity: {label} is missing or invalid ({message})")]
    FieldFormat {
        field: String,
        label: String,
        message: String,
    },

    #[error("Unrecognized entities: {}", describe_fields(.0))]
    MultiFieldFormat(IndexMap<String, String>),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
}

impl CoreError {
    /// Whether the error describes bad input that a caller should surface as
    /// an unprocessable-entity response, as opposed to a configuration or
    /// upstream failure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::FieldFormat { .. } | Self::MultiFieldFormat(_) | Self::MalformedRecord(_)
        )
    }
}

fn describe_fields(errors: &IndexMap<String, String>) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_format_names_label_and_shape() {
        let err = CoreError::FieldFormat {
            field: "Date_of_birth".to_string(),
            label: "Date of Birth".to_string(),
            message: "expected dd/mm/yyyy".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unrecognized entity: Date of Birth is missing or invalid (expected dd/mm/yyyy)"
        );
    }

    #[test]
    fn multi_field_format_lists_every_field_in_order() {
        let mut errors = IndexMap::new();
        errors.insert("Mobile_number".to_string(), "bad mobile".to_string());
        errors.insert("Ration_card".to_string(), "bad card".to_string());
        let err = CoreError::MultiFieldFormat(errors);
        assert_eq!(
            err.to_string(),
            "Unrecognized entities: Mobile_number: bad mobile; Ration_card: bad card"
        );
    }

    #[test]
    fn client_error_classification() {
        assert!(CoreError::MalformedRecord("x".into()).is_client_error());
        assert!(CoreError::MultiFieldFormat(IndexMap::new()).is_client_error());
        assert!(!CoreError::UnknownDocumentType("x".into()).is_client_error());
        let upstream = CoreError::from(ExtractionError::Timeout { elapsed_ms: 10 });
        assert!(!upstream.is_client_error());
    }
}
