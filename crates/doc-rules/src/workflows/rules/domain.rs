use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::catalog;

/// Backend-assigned rule identifier; opaque to the admin screens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(pub String);

impl RuleId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Admin page path for this rule; the id is percent-encoded as one segment.
    pub fn admin_path(&self) -> String {
        let segment: String = url::form_urlencoded::byte_serialize(self.0.as_bytes()).collect();
        // Form encoding writes spaces as `+` and escapes a literal `+`.
        format!("/rules/{}", segment.replace('+', "%20"))
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RuleId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One `(type, value)` predicate in wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

impl Condition {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }

    pub fn chip_label(&self) -> String {
        catalog::condition_chip_label(&self.kind, &self.value)
    }
}

/// A rule as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub id: RuleId,
    pub name: String,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub document_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Rule {
    pub fn document_labels(&self) -> Vec<String> {
        self.document_types
            .iter()
            .map(|doc| catalog::document_label(doc))
            .collect()
    }
}

/// Body of `POST /rules/`: a rule without its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRule {
    pub name: String,
    pub conditions: Vec<Condition>,
    pub document_types: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_backend_rule_with_naive_timestamps() {
        let payload = json!({
            "id": "5f0c1a52-8d7e-4c55-9d57-2b1d8f0b7a10",
            "name": "New Family Document Request",
            "conditions": [{ "type": "family_status", "value": "new" }],
            "document_types": ["tax_return", "business_docs"],
            "created_at": "2024-11-02T09:15:27.412907",
            "updated_at": "2024-11-02T09:15:27.412911"
        });

        let rule: Rule = serde_json::from_value(payload).expect("rule decodes");
        assert_eq!(rule.id.as_str(), "5f0c1a52-8d7e-4c55-9d57-2b1d8f0b7a10");
        assert_eq!(rule.conditions[0].kind, "family_status");
        assert!(rule.created_at.is_some());
        assert_eq!(
            rule.document_labels(),
            vec!["Tax Return".to_string(), "Business Documents".to_string()]
        );
    }

    #[test]
    fn admin_path_encodes_reserved_characters() {
        assert_eq!(RuleId::from("rule-1").admin_path(), "/rules/rule-1");
        assert_eq!(
            RuleId::from("a b/c+d?").admin_path(),
            "/rules/a%20b%2Fc%2Bd%3F"
        );
    }

    #[test]
    fn new_rule_serializes_condition_type_field() {
        let rule = NewRule {
            name: "Tax Filing Verification".to_string(),
            conditions: vec![Condition::new("tax_filing", "not_filed")],
            document_types: vec!["income_verification".to_string()],
        };

        let value = serde_json::to_value(&rule).expect("serializes");
        assert_eq!(
            value,
            json!({
                "name": "Tax Filing Verification",
                "conditions": [{ "type": "tax_filing", "value": "not_filed" }],
                "document_types": ["income_verification"]
            })
        );
    }
}
