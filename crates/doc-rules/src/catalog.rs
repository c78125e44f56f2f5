//! Fixed enumerations shared by every screen.
//!
//! Wire values must match what the rules backend accepts exactly; labels are what
//! the admin screens display. Both the editor and the list/result views read from
//! here so the two never drift apart.

use serde::{Deserialize, Serialize};

/// A selectable `(value, label)` pair rendered as a dropdown option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn choice(value: &'static str, label: &'static str) -> ChoiceOption {
    ChoiceOption { value, label }
}

static FAMILY_STATUS_VALUES: [ChoiceOption; 2] =
    [choice("new", "New"), choice("returning", "Returning")];
static BUSINESS_OWNER_VALUES: [ChoiceOption; 2] = [choice("true", "Yes"), choice("false", "No")];
static TAX_FILING_VALUES: [ChoiceOption; 2] = [
    choice("filed", "Filed 2021 Taxes"),
    choice("not_filed", "Did Not File 2021 Taxes"),
];

/// Applicant attribute a rule condition can test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionType {
    FamilyStatus,
    BusinessOwner,
    TaxFiling,
}

impl ConditionType {
    pub const ALL: [ConditionType; 3] = [
        ConditionType::FamilyStatus,
        ConditionType::BusinessOwner,
        ConditionType::TaxFiling,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ConditionType::FamilyStatus => "family_status",
            ConditionType::BusinessOwner => "business_owner",
            ConditionType::TaxFiling => "tax_filing",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ConditionType::FamilyStatus => "Family Status",
            ConditionType::BusinessOwner => "Business Owner",
            ConditionType::TaxFiling => "US Tax Filing Status",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == raw)
    }

    /// Values the backend accepts for this condition type.
    pub fn values(self) -> &'static [ChoiceOption] {
        match self {
            ConditionType::FamilyStatus => &FAMILY_STATUS_VALUES,
            ConditionType::BusinessOwner => &BUSINESS_OWNER_VALUES,
            ConditionType::TaxFiling => &TAX_FILING_VALUES,
        }
    }

    pub fn accepts(self, value: &str) -> bool {
        self.values().iter().any(|option| option.value == value)
    }

    pub fn option(self) -> ChoiceOption {
        choice(self.as_str(), self.label())
    }
}

/// Document an applicant can be asked to provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentType {
    TaxReturn,
    BusinessDocs,
    IncomeVerification,
}

impl DocumentType {
    pub const ALL: [DocumentType; 3] = [
        DocumentType::TaxReturn,
        DocumentType::BusinessDocs,
        DocumentType::IncomeVerification,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            DocumentType::TaxReturn => "tax_return",
            DocumentType::BusinessDocs => "business_docs",
            DocumentType::IncomeVerification => "income_verification",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            DocumentType::TaxReturn => "Tax Return",
            DocumentType::BusinessDocs => "Business Documents",
            DocumentType::IncomeVerification => "Income Verification",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == raw)
    }

    pub fn option(self) -> ChoiceOption {
        choice(self.as_str(), self.label())
    }
}

/// Applicant family status as submitted with an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyStatus {
    New,
    Returning,
}

impl FamilyStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            FamilyStatus::New => "new",
            FamilyStatus::Returning => "returning",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "new" => Some(Self::New),
            "returning" => Some(Self::Returning),
            _ => None,
        }
    }

    pub fn options() -> &'static [ChoiceOption] {
        &FAMILY_STATUS_VALUES
    }
}

/// Whether the applicant filed their 2021 taxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxFiling {
    Filed,
    NotFiled,
}

impl TaxFiling {
    pub const fn as_str(self) -> &'static str {
        match self {
            TaxFiling::Filed => "filed",
            TaxFiling::NotFiled => "not_filed",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "filed" => Some(Self::Filed),
            "not_filed" => Some(Self::NotFiled),
            _ => None,
        }
    }

    pub fn options() -> &'static [ChoiceOption] {
        &TAX_FILING_VALUES
    }
}

/// Business-owner answers; the wire form is a JSON boolean.
pub fn parse_business_owner(raw: &str) -> Option<bool> {
    match raw {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

pub fn business_owner_options() -> &'static [ChoiceOption] {
    &BUSINESS_OWNER_VALUES
}

/// Human label for a document string; unknown documents render verbatim.
pub fn document_label(raw: &str) -> String {
    DocumentType::parse(raw)
        .map(|kind| kind.label().to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Compact chip text for a condition in the rule list, e.g. `Business Owner: Yes`.
///
/// Unknown condition types yield an empty label.
pub fn condition_chip_label(kind: &str, value: &str) -> String {
    match ConditionType::parse(kind) {
        Some(ConditionType::FamilyStatus) => {
            let shown = if value == "new" { "New" } else { "Returning" };
            format!("Family Status: {shown}")
        }
        Some(ConditionType::BusinessOwner) => {
            let shown = if value == "true" { "Yes" } else { "No" };
            format!("Business Owner: {shown}")
        }
        Some(ConditionType::TaxFiling) => {
            let shown = if value == "filed" { "Filed" } else { "Not Filed" };
            format!("Tax Filing: {shown} 2021")
        }
        None => String::new(),
    }
}
