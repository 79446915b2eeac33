//! Field shape contracts.
//!
//! Every extracted field belongs to one [`FieldKind`]. A kind owns a fully
//! anchored pattern and a description of the shape it expects. Values are
//! matched verbatim: no case folding, no digit normalisation.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

/// Letters, whitespace and hyphens (person and party names).
pub const PERSON_NAME_PATTERN: &str = r"^[A-Za-z\s-]+$";

/// `dd/mm/yyyy`, digits only, no calendar check.
pub const DATE_OF_BIRTH_PATTERN: &str = r"^[0-9]{2}/[0-9]{2}/[0-9]{4}$";

/// Three groups of four digits, each gap at most one ASCII space.
pub const AADHAAR_NUMBER_PATTERN: &str = r"^[0-9]{4} ?[0-9]{4} ?[0-9]{4}$";

/// Exactly ten digits.
pub const MOBILE_NUMBER_PATTERN: &str = r"^[0-9]{10}$";

/// Card, ration card and house numbers.
pub const IDENTIFIER_PATTERN: &str = r"^[A-Za-z0-9\s-]+$";

/// Caste, sub-caste, mandal and village names. Unlike person names, no hyphen.
pub const PLACE_NAME_PATTERN: &str = r"^[A-Za-z\s]+$";

/// Plain digits, or a leading digit run followed by comma-separated triples.
pub const ANNUAL_INCOME_PATTERN: &str = r"^[0-9]+(?:,[0-9]{3})*$";

pub const ADDRESS_PATTERN: &str = r"^[A-Za-z0-9\s,]+$";

/// Comma-separated member names on a ration card.
pub const MEMBER_NAMES_PATTERN: &str = r"^[A-Za-z\s,]+$";

pub const NUMBER_OF_YEARS_PATTERN: &str = r"^[0-9]+$";

static PERSON_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PERSON_NAME_PATTERN).expect("valid regex"));
static DATE_OF_BIRTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DATE_OF_BIRTH_PATTERN).expect("valid regex"));
static AADHAAR_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(AADHAAR_NUMBER_PATTERN).expect("valid regex"));
static MOBILE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(MOBILE_NUMBER_PATTERN).expect("valid regex"));
static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(IDENTIFIER_PATTERN).expect("valid regex"));
static PLACE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PLACE_NAME_PATTERN).expect("valid regex"));
static ANNUAL_INCOME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ANNUAL_INCOME_PATTERN).expect("valid regex"));
static ADDRESS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ADDRESS_PATTERN).expect("valid regex"));
static MEMBER_NAMES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(MEMBER_NAMES_PATTERN).expect("valid regex"));
static NUMBER_OF_YEARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(NUMBER_OF_YEARS_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// FieldKind
// ---------------------------------------------------------------------------

/// The shape contract a field value must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    PersonName,
    DateOfBirth,
    AadhaarNumber,
    MobileNumber,
    Identifier,
    PlaceName,
    AnnualIncome,
    Address,
    MemberNames,
    NumberOfYears,
}

impl FieldKind {
    /// The anchored pattern source for this kind.
    pub fn pattern(self) -> &'static str {
        self.regex().as_str()
    }

    /// Whether `value` matches this kind in full. Empty never matches.
    pub fn matches(self, value: &str) -> bool {
        self.regex().is_match(value)
    }

    /// Human-readable description of the accepted shape.
    pub fn expectation(self) -> &'static str {
        match self {
            Self::PersonName => "only letters, spaces and hyphens are allowed",
            Self::DateOfBirth => "expected format is dd/mm/yyyy",
            Self::AadhaarNumber => {
                "expected 12 digits in groups of 4, optionally separated by single spaces"
            }
            Self::MobileNumber => "expected exactly 10 digits",
            Self::Identifier => "only letters, digits, spaces and hyphens are allowed",
            Self::PlaceName => "only letters and spaces are allowed",
            Self::AnnualIncome => {
                "expected digits, optionally grouped in threes with commas (e.g. 1,234,567)"
            }
            Self::Address => "only letters, digits, spaces and commas are allowed",
            Self::MemberNames => "only letters, spaces and commas are allowed",
            Self::NumberOfYears => "expected a whole number of years",
        }
    }

    fn regex(self) -> &'static Regex {
        match self {
            Self::PersonName => &PERSON_NAME_RE,
            Self::DateOfBirth => &DATE_OF_BIRTH_RE,
            Self::AadhaarNumber => &AADHAAR_NUMBER_RE,
            Self::MobileNumber => &MOBILE_NUMBER_RE,
            Self::Identifier => &IDENTIFIER_RE,
            Self::PlaceName => &PLACE_NAME_RE,
            Self::AnnualIncome => &ANNUAL_INCOME_RE,
            Self::Address => &ADDRESS_RE,
            Self::MemberNames => &MEMBER_NAMES_RE,
            Self::NumberOfYears => &NUMBER_OF_YEARS_RE,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
