//! The static document schema registry.
//!
//! Built once on first use and read-only afterwards, so it can be shared
//! freely across threads.

use std::sync::LazyLock;

use indexmap::IndexMap;

use super::document_type::{CardKind, DocumentType};
use super::evaluator::{evaluate, ValidationOutcome};
use super::fields::FieldKind;
use super::record::ExtractedRecord;
use super::rules::{DocumentSchema, ErrorMode, FieldConstraint};
use crate::error::CoreError;

static BUILTIN: LazyLock<SchemaRegistry> = LazyLock::new(SchemaRegistry::standard);

// Shared constraints. Record keys differ between document types because each
// extraction prompt names its fields differently.
const NAME: FieldConstraint = FieldConstraint::required("Name", "Name", FieldKind::PersonName);
const FATHER_HUSBAND_NAME: FieldConstraint = FieldConstraint::required(
    "Father_Husband_Name",
    "Father/Husband Name",
    FieldKind::PersonName,
);
const DATE_OF_BIRTH: FieldConstraint =
    FieldConstraint::required("Date_of_birth", "Date of Birth", FieldKind::DateOfBirth);
const CASTE: FieldConstraint = FieldConstraint::required("Caste", "Caste", FieldKind::PlaceName);
const MOBILE_NO: FieldConstraint =
    FieldConstraint::required("Mobile_No", "Mobile Number", FieldKind::MobileNumber);
const AADHAR_CARD_NO: FieldConstraint = FieldConstraint::required(
    "Aadhar_Card_No",
    "Aadhaar Card Number",
    FieldKind::AadhaarNumber,
);
const ANNUAL_INCOME: FieldConstraint =
    FieldConstraint::required("Annual_Income", "Annual Income", FieldKind::AnnualIncome);

/// Lookup table from document type to schema.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: IndexMap<DocumentType, DocumentSchema>,
}

impl SchemaRegistry {
    /// The process-wide registry holding every standard schema.
    pub fn builtin() -> &'static SchemaRegistry {
        &BUILTIN
    }

    /// Build a fresh registry with every standard schema.
    ///
    /// Income certificates collect every failure; all other types fail fast.
    pub fn standard() -> Self {
        let mut registry = Self::default();

        registry.insert(DocumentSchema::new(
            DocumentType::Aadhaar,
            ErrorMode::FailFast,
            vec![
                NAME,
                FieldConstraint::required(
                    "Aadhaar_number",
                    "Aadhaar Number",
                    FieldKind::AadhaarNumber,
                ),
                DATE_OF_BIRTH,
            ],
        ));

        registry.insert(DocumentSchema::new(
            DocumentType::IncomeCertificate,
            ErrorMode::CollectAll,
            vec![
                FieldConstraint::required(
                    "Applicant Name",
                    "Applicant Name",
                    FieldKind::PersonName,
                ),
                FATHER_HUSBAND_NAME,
                DATE_OF_BIRTH,
                FieldConstraint::required(
                    "Adhaar_Number",
                    "Aadhaar Number",
                    FieldKind::AadhaarNumber,
                ),
                FieldConstraint::required(
                    "Mobile_number",
                    "Mobile Number",
                    FieldKind::MobileNumber,
                ),
                FieldConstraint::required(
                    "Ration_card",
                    "Ration Card Number",
                    FieldKind::Identifier,
                ),
            ],
        ));

        registry.insert(DocumentSchema::new(
            DocumentType::CommunityCertificate,
            ErrorMode::FailFast,
            vec![
                NAME,
                FATHER_HUSBAND_NAME,
                DATE_OF_BIRTH,
                FieldConstraint::required(
                    "Mobile_number",
                    "Mobile Number",
                    FieldKind::MobileNumber,
                ),
                CASTE,
                FieldConstraint::required(
                    "Aadhaar_Number",
                    "Aadhaar Number",
                    FieldKind::AadhaarNumber,
                ),
            ],
        ));

        for kind in CardKind::ALL {
            let mut fields = vec![
                NAME,
                DATE_OF_BIRTH,
                FieldConstraint::required("Card_No", "Card Number", FieldKind::Identifier),
            ];
            if kind == CardKind::RationCard {
                fields.push(FieldConstraint::optional(
                    "Member_Name(s)",
                    "Member Names",
                    FieldKind::MemberNames,
                ));
            }
            registry.insert(DocumentSchema::new(
                DocumentType::IdCard(kind),
                ErrorMode::FailFast,
                fields,
            ));
        }

        for document_type in [DocumentType::EbcCertificate, DocumentType::EwsApplicant] {
            registry.insert(DocumentSchema::new(
                document_type,
                ErrorMode::FailFast,
                vec![
                    NAME,
                    FATHER_HUSBAND_NAME,
                    DATE_OF_BIRTH,
                    MOBILE_NO,
                    CASTE,
                    AADHAR_CARD_NO,
                    ANNUAL_INCOME,
                ],
            ));
        }

        registry.insert(DocumentSchema::new(
            DocumentType::ObcApplicant,
            ErrorMode::FailFast,
            vec![
                NAME,
                FATHER_HUSBAND_NAME,
                DATE_OF_BIRTH,
                MOBILE_NO,
                FieldConstraint::required("Caste_Subcaste", "Caste/Subcaste", FieldKind::PlaceName),
                AADHAR_CARD_NO,
            ],
        ));

        registry.insert(DocumentSchema::new(
            DocumentType::ResidenceCertificate,
            ErrorMode::FailFast,
            vec![
                NAME,
                FATHER_HUSBAND_NAME,
                FieldConstraint::required("Mandal_Name", "Mandal Name", FieldKind::PlaceName),
                FieldConstraint::required("Village_Name", "Village Name", FieldKind::PlaceName),
                FieldConstraint::required("House_Number", "House Number", FieldKind::Identifier),
                FieldConstraint::required(
                    "No_of_years",
                    "Number of Years",
                    FieldKind::NumberOfYears,
                ),
                FieldConstraint::required("Address", "Address", FieldKind::Address),
            ],
        ));

        registry
    }

    /// Register `schema`, replacing any schema for the same document type.
    pub fn insert(&mut self, schema: DocumentSchema) {
        self.schemas.insert(schema.document_type, schema);
    }

    pub fn get(&self, document_type: &DocumentType) -> Option<&DocumentSchema> {
        self.schemas.get(document_type)
    }

    /// Registered schemas in registration order.
    pub fn schemas(&self) -> impl Iterator<Item = &DocumentSchema> {
        self.schemas.values()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Validate `record` against the schema registered for `document_type`.
    pub fn validate(
        &self,
        document_type: &DocumentType,
        record: &ExtractedRecord,
    ) -> Result<ValidationOutcome, CoreError> {
        let schema = self
            .get(document_type)
            .ok_or_else(|| CoreError::UnknownDocumentType(document_type.to_string()))?;
        Ok(evaluate(schema, record))
    }

    /// Parse `tag` and validate `record` against its schema.
    pub fn validate_tag(
        &self,
        tag: &str,
        record: &ExtractedRecord,
    ) -> Result<ValidationOutcome, CoreError> {
        let document_type: DocumentType = tag.parse()?;
        self.validate(&document_type, record)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
