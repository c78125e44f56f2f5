use serde_json::{json, Value};

pub(super) use crate::workflows::test_support::*;

pub(super) fn new_family_rule() -> Value {
    json!({
        "id": "rule-1",
        "name": "New Family Document Request",
        "conditions": [
            { "type": "family_status", "value": "new" },
            { "type": "business_owner", "value": "true" }
        ],
        "document_types": ["tax_return", "business_docs"],
        "created_at": "2024-11-02T09:15:27.412907",
        "updated_at": "2024-11-02T09:15:27.412907"
    })
}

pub(super) fn tax_filing_rule() -> Value {
    json!({
        "id": "rule-2",
        "name": "Tax Filing Verification",
        "conditions": [{ "type": "tax_filing", "value": "not_filed" }],
        "document_types": ["income_verification"]
    })
}

/// Owned form pairs for `RuleDraft::from_form`.
pub(super) fn form(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// A complete, valid editor submission.
pub(super) fn valid_rule_form(action: &str) -> Vec<(String, String)> {
    form(&[
        ("name", "Tax Filing Verification"),
        ("condition_count", "1"),
        ("condition_prev_type_0", "tax_filing"),
        ("condition_type_0", "tax_filing"),
        ("condition_value_0", "not_filed"),
        ("document_count", "1"),
        ("document_0", "income_verification"),
        ("action", action),
    ])
}
