//! Document type tags.
//!
//! Tags are the strings callers use to pick a schema (`aadhaar`,
//! `income_certificate`, `id_card:ration_card`, ...). Top-level tags are
//! strict: anything unregistered is [`CoreError::UnknownDocumentType`]. Under
//! `id_card` the sub-kind only picks between card-specific schemas, so a bare
//! `id_card` or an unlisted sub-kind selects the generic card schema.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Separator between `id_card` and its sub-kind in a tag.
pub const CARD_KIND_SEPARATOR: char = ':';

/// The physical card behind an `id_card` document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    AadhaarCard,
    RationCard,
    EpicCard,
    /// No sub-kind, or one without card-specific rules.
    Other,
}

impl CardKind {
    pub const ALL: [CardKind; 4] = [
        Self::AadhaarCard,
        Self::RationCard,
        Self::EpicCard,
        Self::Other,
    ];

    /// The tag suffix after `id_card:`. `None` for [`CardKind::Other`].
    pub fn as_str(self) -> Option<&'static str> {
        match self {
            Self::AadhaarCard => Some("aadhaar_card"),
            Self::RationCard => Some("ration_card"),
            Self::EpicCard => Some("epic_card"),
            Self::Other => None,
        }
    }

    /// Map a tag suffix to its card kind. Never fails.
    pub fn from_sub_kind(sub_kind: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == Some(sub_kind))
            .unwrap_or(Self::Other)
    }
}

/// A document type with a registered schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DocumentType {
    Aadhaar,
    IncomeCertificate,
    CommunityCertificate,
    IdCard(CardKind),
    EbcCertificate,
    EwsApplicant,
    ObcApplicant,
    ResidenceCertificate,
}

impl DocumentType {
    /// Every registered document type, id-card sub-kinds expanded.
    pub const ALL: [DocumentType; 11] = [
        Self::Aadhaar,
        Self::IncomeCertificate,
        Self::CommunityCertificate,
        Self::IdCard(CardKind::AadhaarCard),
        Self::IdCard(CardKind::RationCard),
        Self::IdCard(CardKind::EpicCard),
        Self::IdCard(CardKind::Other),
        Self::EbcCertificate,
        Self::EwsApplicant,
        Self::ObcApplicant,
        Self::ResidenceCertificate,
    ];
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aadhaar => f.write_str("aadhaar"),
            Self::IncomeCertificate => f.write_str("income_certificate"),
            Self::CommunityCertificate => f.write_str("community_certificate"),
            Self::IdCard(kind) => match kind.as_str() {
                Some(sub_kind) => write!(f, "id_card{CARD_KIND_SEPARATOR}{sub_kind}"),
                None => f.write_str("id_card"),
            },
            Self::EbcCertificate => f.write_str("ebc_certificate"),
            Self::EwsApplicant => f.write_str("ews_applicant"),
            Self::ObcApplicant => f.write_str("obc_applicant"),
            Self::ResidenceCertificate => f.write_str("residence_certificate"),
        }
    }
}

impl FromStr for DocumentType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((prefix, kind)) = s.split_once(CARD_KIND_SEPARATOR) {
            if prefix == "id_card" {
                return Ok(Self::IdCard(CardKind::from_sub_kind(kind)));
            }
            return Err(CoreError::UnknownDocumentType(s.to_string()));
        }

        match s {
            "aadhaar" => Ok(Self::Aadhaar),
            "income_certificate" => Ok(Self::IncomeCertificate),
            "community_certificate" | "community_or_birth_certificate" | "birth_certificate" => {
                Ok(Self::CommunityCertificate)
            }
            "id_card" => Ok(Self::IdCard(CardKind::Other)),
            "ebc_certificate" => Ok(Self::EbcCertificate),
            "ews_applicant" => Ok(Self::EwsApplicant),
            "obc_applicant" => Ok(Self::ObcApplicant),
            "residence_certificate" => Ok(Self::ResidenceCertificate),
            _ => Err(CoreError::UnknownDocumentType(s.to_string())),
        }
    }
}

impl TryFrom<String> for DocumentType {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DocumentType> for String {
    fn from(value: DocumentType) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn canonical_tags_round_trip() {
        for doc in DocumentType::ALL {
            let parsed: DocumentType = doc.to_string().parse().expect("parse canonical tag");
            assert_eq!(parsed, doc);
        }
    }

    #[test]
    fn community_aliases() {
        for tag in ["community_or_birth_certificate", "birth_certificate"] {
            assert_eq!(
                tag.parse::<DocumentType>().expect("alias"),
                DocumentType::CommunityCertificate
            );
        }
    }

    #[test]
    fn id_card_sub_kinds() {
        assert_eq!(
            "id_card:ration_card".parse::<DocumentType>().expect("parse"),
            DocumentType::IdCard(CardKind::RationCard)
        );
        assert_eq!(
            "id_card:epic_card".parse::<DocumentType>().expect("parse"),
            DocumentType::IdCard(CardKind::EpicCard)
        );
    }

    #[test]
    fn bare_or_unlisted_id_card_is_generic_card() {
        for tag in ["id_card", "id_card:pan_card", "id_card:passport", "id_card:"] {
            assert_eq!(
                tag.parse::<DocumentType>().expect("id card tag"),
                DocumentType::IdCard(CardKind::Other),
                "{tag}"
            );
        }
        assert_eq!(DocumentType::IdCard(CardKind::Other).to_string(), "id_card");
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert_matches!(
            "pan_card".parse::<DocumentType>(),
            Err(CoreError::UnknownDocumentType(tag)) if tag == "pan_card"
        );
        assert_matches!(
            "passport:ration_card".parse::<DocumentType>(),
            Err(CoreError::UnknownDocumentType(_))
        );
        assert_matches!(
            "id_cards:ration_card".parse::<DocumentType>(),
            Err(CoreError::UnknownDocumentType(_))
        );
    }

    #[test]
    fn serde_uses_tag_strings() {
        let json = serde_json::to_value(DocumentType::IdCard(CardKind::EpicCard)).expect("ser");
        assert_eq!(json, "id_card:epic_card");
        let back: DocumentType = serde_json::from_value(json).expect("de");
        assert_eq!(back, DocumentType::IdCard(CardKind::EpicCard));
        assert!(serde_json::from_value::<DocumentType>(serde_json::json!("nope")).is_err());
    }
}
