use tracing::{info, warn};

use crate::backend::RulesClient;

use super::domain::{Rule, RuleId};

/// State of the rule list page for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleListScreen {
    pub rules: Vec<Rule>,
    pub error: Option<String>,
}

impl RuleListScreen {
    /// Fetch every rule. A failed fetch is logged and shown inline over an empty list.
    pub async fn load(client: &RulesClient) -> Self {
        match client.list_rules().await {
            Ok(rules) => Self { rules, error: None },
            Err(err) => {
                warn!(error = %err, "failed to load rules");
                Self {
                    rules: Vec::new(),
                    error: Some(err.user_message("Failed to load rules")),
                }
            }
        }
    }

    /// Delete one rule, then re-fetch the full list exactly once.
    ///
    /// Nothing is removed locally; the page shows whatever the backend returns
    /// afterwards. A delete failure takes precedence over a fetch failure in the
    /// error banner.
    pub async fn delete(client: &RulesClient, id: &RuleId) -> Self {
        let deleted = client.delete_rule(id).await;
        let mut screen = Self::load(client).await;

        match deleted {
            Ok(()) => info!(rule_id = %id, "rule deleted"),
            Err(err) => {
                warn!(rule_id = %id, error = %err, "failed to delete rule");
                screen.error = Some(err.user_message("Failed to delete rule"));
            }
        }

        screen
    }
}
