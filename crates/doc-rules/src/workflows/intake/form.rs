use serde::Deserialize;
use uuid::Uuid;

use crate::catalog::{self, FamilyStatus, TaxFiling};

use super::domain::Application;

/// Raw posted fields of the application form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationFormFields {
    #[serde(default)]
    pub family_status: String,
    #[serde(default)]
    pub business_owner: String,
    #[serde(default)]
    pub tax_filing: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplicationFormError {
    #[error("All fields are required")]
    MissingField,
}

/// The three fixed-choice answers, each unset until chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplicationForm {
    pub family_status: Option<FamilyStatus>,
    pub business_owner: Option<bool>,
    pub tax_filing: Option<TaxFiling>,
}

impl ApplicationForm {
    /// Values outside the fixed choices are treated as unanswered.
    pub fn from_fields(fields: &ApplicationFormFields) -> Self {
        Self {
            family_status: FamilyStatus::parse(fields.family_status.trim()),
            business_owner: catalog::parse_business_owner(fields.business_owner.trim()),
            tax_filing: TaxFiling::parse(fields.tax_filing.trim()),
        }
    }

    /// Build the submission with a freshly generated family id.
    pub fn to_application(&self) -> Result<Application, ApplicationFormError> {
        self.to_application_with_id(Uuid::new_v4())
    }

    pub fn to_application_with_id(
        &self,
        family_id: Uuid,
    ) -> Result<Application, ApplicationFormError> {
        match (self.family_status, self.business_owner, self.tax_filing) {
            (Some(family_status), Some(business_owner), Some(tax_filing)) => Ok(Application {
                family_id,
                family_status,
                business_owner,
                tax_filing,
            }),
            _ => Err(ApplicationFormError::MissingField),
        }
    }
}
