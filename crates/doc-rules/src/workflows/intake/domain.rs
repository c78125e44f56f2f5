use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{FamilyStatus, TaxFiling};
use crate::workflows::rules::domain::RuleId;

/// Applicant record posted to `/applications/`. Never stored by this service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub family_id: Uuid,
    pub family_status: FamilyStatus,
    pub business_owner: bool,
    pub tax_filing: TaxFiling,
}

/// Subset of a matched rule the result view needs. Other fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedRule {
    #[serde(default)]
    pub id: Option<RuleId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub document_types: Vec<String>,
}

/// Backend verdict for a submitted application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationResult {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub family_id: Option<Uuid>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub matching_rules: Vec<MatchedRule>,
}

impl ApplicationResult {
    /// Union of document types across matching rules, without duplicates, in
    /// first-seen order.
    pub fn required_documents(&self) -> Vec<String> {
        let mut documents: Vec<String> = Vec::new();
        for doc in self
            .matching_rules
            .iter()
            .flat_map(|rule| rule.document_types.iter())
        {
            if !documents.contains(doc) {
                documents.push(doc.clone());
            }
        }
        documents
    }
}
