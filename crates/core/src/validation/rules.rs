//! Field constraint and document schema types.

use serde::{Deserialize, Serialize};

use super::document_type::DocumentType;
use super::fields::FieldKind;

/// How a schema reports failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorMode {
    /// Stop at the first failing field in schema order.
    FailFast,
    /// Check every field and report all failures together.
    CollectAll,
}

/// One field of a document schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldConstraint {
    /// Exact key in the extracted record.
    pub key: &'static str,
    /// Human-readable field name used in error messages.
    pub label: &'static str,
    pub kind: FieldKind,
    /// Optional fields are skipped when empty but still checked when present.
    pub required: bool,
}

impl FieldConstraint {
    pub const fn required(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            required: true,
        }
    }

    pub const fn optional(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            required: false,
        }
    }

    /// The message reported when this field fails.
    pub fn message(&self) -> &'static str {
        self.kind.expectation()
    }

    /// Check an already-trimmed value.
    pub fn accepts(&self, value: &str) -> bool {
        (!self.required && value.is_empty()) || self.kind.matches(value)
    }
}

/// The ordered field constraints that define a valid document of one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSchema {
    pub document_type: DocumentType,
    pub mode: ErrorMode,
    pub fields: Vec<FieldConstraint>,
}

impl DocumentSchema {
    pub fn new(document_type: DocumentType, mode: ErrorMode, fields: Vec<FieldConstraint>) -> Self {
        Self {
            document_type,
            mode,
            fields,
        }
    }

    /// A copy of this schema reporting with `mode` instead.
    pub fn with_mode(&self, mode: ErrorMode) -> Self {
        Self {
            mode,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_field_skips_empty_only() {
        let c = FieldConstraint::optional("Member_Name(s)", "Member Names", FieldKind::MemberNames);
        assert!(c.accepts(""));
        assert!(c.accepts("Ravi, Sita"));
        assert!(!c.accepts("Ravi 2"));
    }

    #[test]
    fn required_field_rejects_empty() {
        let c = FieldConstraint::required("Name", "Name", FieldKind::PersonName);
        assert!(!c.accepts(""));
    }

    #[test]
    fn with_mode_leaves_original_untouched() {
        let schema = DocumentSchema::new(
            DocumentType::Aadhaar,
            ErrorMode::FailFast,
            vec![FieldConstraint::required("Name", "Name", FieldKind::PersonName)],
        );
        let collected = schema.with_mode(ErrorMode::CollectAll);
        assert_eq!(schema.mode, ErrorMode::FailFast);
        assert_eq!(collected.mode, ErrorMode::CollectAll);
        assert_eq!(collected.fields, schema.fields);
    }
}
