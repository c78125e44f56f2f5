use tracing::{debug, info, warn};

use crate::backend::{BackendError, RulesClient};

use super::domain::{Rule, RuleId};
use super::draft::{DraftAction, RuleDraft};

/// Whether the editor started from a blank draft or from a stored rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(RuleId),
}

/// State of the rule editor page for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleEditorScreen {
    pub mode: EditorMode,
    pub draft: RuleDraft,
    pub error: Option<String>,
}

/// Result of handling a posted editor form.
#[derive(Debug)]
pub enum EditorOutcome {
    /// The backend stored the rule; the caller navigates back to the list.
    Saved(Rule),
    /// The editor stays open, possibly with an inline error.
    Editing(RuleEditorScreen),
}

impl RuleEditorScreen {
    pub fn create() -> Self {
        Self {
            mode: EditorMode::Create,
            draft: RuleDraft::new(),
            error: None,
        }
    }

    /// Open the editor on a stored rule; `None` when the backend does not know the id.
    pub async fn load(client: &RulesClient, id: &RuleId) -> Result<Option<Self>, BackendError> {
        let rule = client.get_rule(id).await?;
        Ok(rule.map(|rule| Self {
            mode: EditorMode::Edit(rule.id.clone()),
            draft: RuleDraft::from_rule(&rule),
            error: None,
        }))
    }

    /// Rebuild the editor from posted fields.
    pub fn from_form(mode: EditorMode, fields: &[(String, String)]) -> (Self, DraftAction) {
        let (draft, action) = RuleDraft::from_form(fields);
        let screen = Self {
            mode,
            draft,
            error: None,
        };
        (screen, action)
    }

    pub fn heading(&self) -> &'static str {
        match self.mode {
            EditorMode::Create => "Create New Rule",
            EditorMode::Edit(_) => "Edit Rule",
        }
    }

    /// Path the editor form posts back to.
    pub fn form_path(&self) -> String {
        match &self.mode {
            EditorMode::Create => "/rules/new".to_string(),
            EditorMode::Edit(id) => id.admin_path(),
        }
    }

    /// Handle the pressed button: row edits stay local, `Submit` goes to the backend.
    pub async fn handle(mut self, action: DraftAction, client: &RulesClient) -> EditorOutcome {
        match action {
            DraftAction::Submit => self.submit(client).await,
            other => {
                if !self.draft.apply(other) {
                    debug!(action = ?other, "editor action not applicable");
                }
                EditorOutcome::Editing(self)
            }
        }
    }

    /// Validate locally, then post the rule. Invalid drafts never reach the backend.
    ///
    /// The backend has no update route, so a rule opened for editing is saved with
    /// the same create call.
    pub async fn submit(mut self, client: &RulesClient) -> EditorOutcome {
        self.error = None;

        let new_rule = match self.draft.validate() {
            Ok(new_rule) => new_rule,
            Err(err) => {
                debug!(error = %err, "rule draft rejected");
                self.error = Some(err.to_string());
                return EditorOutcome::Editing(self);
            }
        };

        match client.create_rule(&new_rule).await {
            Ok(rule) => {
                info!(rule_id = %rule.id, name = %rule.name, "rule saved");
                EditorOutcome::Saved(rule)
            }
            Err(err) => {
                warn!(error = %err, "failed to create rule");
                self.error = Some(err.user_message("Failed to create rule"));
                EditorOutcome::Editing(self)
            }
        }
    }
}
