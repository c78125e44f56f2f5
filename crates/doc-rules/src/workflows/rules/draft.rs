//! Local draft state behind the rule editor.
//!
//! The draft keeps condition types and document types unique within a rule: the
//! choices offered to a row exclude everything other rows already picked, and
//! setters refuse a choice another row holds.

use std::collections::HashMap;
use std::str::FromStr;

use crate::catalog::{ConditionType, DocumentType};

use super::domain::{Condition, NewRule, Rule};

/// Upper bound on rows accepted from a posted form.
const MAX_FORM_ROWS: usize = 16;

const PLACEHOLDER_BASE_APPLICANTS: u32 = 1000;
const PLACEHOLDER_STEP_PER_CONDITION: u32 = 100;

/// One condition row: a type, and a value valid for that type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionRow {
    pub kind: Option<ConditionType>,
    pub value: Option<String>,
}

impl ConditionRow {
    pub fn is_complete(&self) -> bool {
        self.kind.is_some() && self.value.is_some()
    }
}

/// Client-side validation failure; blocks the submit before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("All conditions must have both a type and value selected")]
    IncompleteCondition,
    #[error("All document types must be selected")]
    IncompleteDocument,
    #[error("Rule name is required")]
    MissingName,
}

/// Button pressed on the editor form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftAction {
    Submit,
    Refresh,
    AddCondition,
    RemoveCondition(usize),
    AddDocument,
    RemoveDocument(usize),
}

impl FromStr for DraftAction {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        let indexed = |prefix: &str| {
            raw.strip_prefix(prefix)
                .and_then(|index| index.parse::<usize>().ok())
        };

        match raw {
            "submit" => Ok(Self::Submit),
            "refresh" => Ok(Self::Refresh),
            "add_condition" => Ok(Self::AddCondition),
            "add_document" => Ok(Self::AddDocument),
            _ => {
                if let Some(index) = indexed("remove_condition:") {
                    Ok(Self::RemoveCondition(index))
                } else if let Some(index) = indexed("remove_document:") {
                    Ok(Self::RemoveDocument(index))
                } else {
                    Err(format!("unknown editor action '{raw}'"))
                }
            }
        }
    }
}

/// Unsaved rule being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDraft {
    pub name: String,
    conditions: Vec<ConditionRow>,
    documents: Vec<Option<DocumentType>>,
}

impl Default for RuleDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleDraft {
    /// A blank draft with one empty condition row and one empty document row.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            conditions: vec![ConditionRow::default()],
            documents: vec![None],
        }
    }

    /// Seed a draft from a stored rule. Entries outside the catalog, or repeating
    /// an earlier entry, come through as empty rows.
    pub fn from_rule(rule: &Rule) -> Self {
        let mut draft = Self {
            name: rule.name.clone(),
            conditions: Vec::with_capacity(rule.conditions.len()),
            documents: Vec::with_capacity(rule.document_types.len()),
        };

        for condition in &rule.conditions {
            let kind = ConditionType::parse(&condition.kind)
                .filter(|kind| !draft.condition_type_taken(*kind, None));
            let value = kind
                .filter(|kind| kind.accepts(&condition.value))
                .map(|_| condition.value.clone());
            draft.conditions.push(ConditionRow { kind, value });
        }

        for document in &rule.document_types {
            let kind = DocumentType::parse(document)
                .filter(|kind| !draft.document_type_taken(*kind, None));
            draft.documents.push(kind);
        }

        if draft.conditions.is_empty() {
            draft.conditions.push(ConditionRow::default());
        }
        if draft.documents.is_empty() {
            draft.documents.push(None);
        }

        draft
    }

    /// Rebuild a draft from posted editor fields and return it with the pressed button.
    ///
    /// Fields: `name`, `condition_count`, `condition_type_{i}`,
    /// `condition_prev_type_{i}`, `condition_value_{i}`, `document_count`,
    /// `document_{i}`, `action`. A row whose type differs from its previous type
    /// loses its value.
    pub fn from_form(fields: &[(String, String)]) -> (Self, DraftAction) {
        let fields: HashMap<&str, &str> = fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect();
        let field = |key: &str| fields.get(key).copied().filter(|value| !value.is_empty());
        let row_count = |key: &str| {
            field(key)
                .and_then(|raw| raw.parse::<usize>().ok())
                .unwrap_or(1)
                .clamp(1, MAX_FORM_ROWS)
        };

        let mut draft = Self {
            name: field("name").unwrap_or_default().to_string(),
            conditions: Vec::new(),
            documents: Vec::new(),
        };

        for index in 0..row_count("condition_count") {
            let previous = field(&format!("condition_prev_type_{index}"))
                .and_then(ConditionType::parse);
            let kind = field(&format!("condition_type_{index}"))
                .and_then(ConditionType::parse)
                .filter(|kind| !draft.condition_type_taken(*kind, None));
            let value = match kind {
                Some(kind) if previous == Some(kind) => field(&format!("condition_value_{index}"))
                    .filter(|value| kind.accepts(value))
                    .map(str::to_string),
                _ => None,
            };
            draft.conditions.push(ConditionRow { kind, value });
        }

        for index in 0..row_count("document_count") {
            let kind = field(&format!("document_{index}"))
                .and_then(DocumentType::parse)
                .filter(|kind| !draft.document_type_taken(*kind, None));
            draft.documents.push(kind);
        }

        let action = field("action")
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DraftAction::Refresh);

        (draft, action)
    }

    pub fn conditions(&self) -> &[ConditionRow] {
        &self.conditions
    }

    pub fn documents(&self) -> &[Option<DocumentType>] {
        &self.documents
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Apply a row edit. Returns `false` when the action was not applicable;
    /// `Submit` and `Refresh` never change the draft.
    pub fn apply(&mut self, action: DraftAction) -> bool {
        match action {
            DraftAction::Submit | DraftAction::Refresh => false,
            DraftAction::AddCondition => self.add_condition(),
            DraftAction::RemoveCondition(index) => self.remove_condition(index),
            DraftAction::AddDocument => self.add_document(),
            DraftAction::RemoveDocument(index) => self.remove_document(index),
        }
    }

    pub fn can_add_condition(&self) -> bool {
        !self.available_condition_types(None).is_empty()
    }

    pub fn add_condition(&mut self) -> bool {
        if !self.can_add_condition() {
            return false;
        }
        self.conditions.push(ConditionRow::default());
        true
    }

    /// The first condition row is pinned; every other row may be removed.
    pub fn can_remove_condition(&self, index: usize) -> bool {
        index > 0 && index < self.conditions.len()
    }

    pub fn remove_condition(&mut self, index: usize) -> bool {
        if !self.can_remove_condition(index) {
            return false;
        }
        self.conditions.remove(index);
        true
    }

    pub fn can_add_document(&self) -> bool {
        !self.available_document_types(None).is_empty()
    }

    pub fn add_document(&mut self) -> bool {
        if !self.can_add_document() {
            return false;
        }
        self.documents.push(None);
        true
    }

    /// Removal is disabled on the sole remaining document row.
    pub fn can_remove_document(&self, index: usize) -> bool {
        self.documents.len() > 1 && index < self.documents.len()
    }

    pub fn remove_document(&mut self, index: usize) -> bool {
        if !self.can_remove_document(index) {
            return false;
        }
        self.documents.remove(index);
        true
    }

    /// Choose a condition type for a row. Changing the type clears the row's value.
    /// Refused when the type belongs to another row.
    pub fn set_condition_type(&mut self, index: usize, kind: Option<ConditionType>) -> bool {
        if index >= self.conditions.len() {
            return false;
        }
        if let Some(kind) = kind {
            if self.condition_type_taken(kind, Some(index)) {
                return false;
            }
        }

        let row = &mut self.conditions[index];
        if row.kind != kind {
            row.kind = kind;
            row.value = None;
        }
        true
    }

    /// Choose a value for a row. Refused unless the row's type accepts it.
    pub fn set_condition_value(&mut self, index: usize, value: Option<&str>) -> bool {
        let Some(row) = self.conditions.get_mut(index) else {
            return false;
        };

        match (row.kind, value) {
            (_, None) => {
                row.value = None;
                true
            }
            (Some(kind), Some(value)) if kind.accepts(value) => {
                row.value = Some(value.to_string());
                true
            }
            _ => false,
        }
    }

    /// Choose a document type for a row. Refused when another row holds it.
    pub fn set_document(&mut self, index: usize, kind: Option<DocumentType>) -> bool {
        if index >= self.documents.len() {
            return false;
        }
        if let Some(kind) = kind {
            if self.document_type_taken(kind, Some(index)) {
                return false;
            }
        }
        self.documents[index] = kind;
        true
    }

    /// Condition types selectable for row `index`: the catalog minus the types
    /// chosen by every other row. `None` excludes the types chosen by all rows.
    pub fn available_condition_types(&self, index: Option<usize>) -> Vec<ConditionType> {
        ConditionType::ALL
            .into_iter()
            .filter(|kind| !self.condition_type_taken(*kind, index))
            .collect()
    }

    /// Document types selectable for row `index`, analogous to conditions.
    pub fn available_document_types(&self, index: Option<usize>) -> Vec<DocumentType> {
        DocumentType::ALL
            .into_iter()
            .filter(|kind| !self.document_type_taken(*kind, index))
            .collect()
    }

    /// Mock figure shown under the conditions: a fixed base minus a fixed step per
    /// filled condition. It is not derived from any applicant data.
    pub fn placeholder_matching_applicants(&self) -> u32 {
        let filled = self
            .conditions
            .iter()
            .filter(|row| row.is_complete())
            .count() as u32;
        PLACEHOLDER_BASE_APPLICANTS.saturating_sub(filled * PLACEHOLDER_STEP_PER_CONDITION)
    }

    /// Check the draft and produce the body for `POST /rules/`.
    pub fn validate(&self) -> Result<NewRule, DraftError> {
        let conditions = self
            .conditions
            .iter()
            .map(|row| match (row.kind, row.value.as_deref()) {
                (Some(kind), Some(value)) => Ok(Condition::new(kind.as_str(), value)),
                _ => Err(DraftError::IncompleteCondition),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let document_types = self
            .documents
            .iter()
            .map(|doc| {
                doc.map(|kind| kind.as_str().to_string())
                    .ok_or(DraftError::IncompleteDocument)
            })
            .collect::<Result<Vec<_>, _>>()?;

        if document_types.is_empty() {
            return Err(DraftError::IncompleteDocument);
        }

        let name = self.name.trim();
        if name.is_empty() {
            return Err(DraftError::MissingName);
        }

        Ok(NewRule {
            name: name.to_string(),
            conditions,
            document_types,
        })
    }

    fn condition_type_taken(&self, kind: ConditionType, except: Option<usize>) -> bool {
        self.conditions
            .iter()
            .enumerate()
            .any(|(index, row)| Some(index) != except && row.kind == Some(kind))
    }

    fn document_type_taken(&self, kind: DocumentType, except: Option<usize>) -> bool {
        self.documents
            .iter()
            .enumerate()
            .any(|(index, doc)| Some(index) != except && *doc == Some(kind))
    }
}
