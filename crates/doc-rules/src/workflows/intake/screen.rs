use tracing::{debug, info, warn};

use crate::backend::RulesClient;

use super::form::ApplicationForm;

/// Where a submission ended up. The request/response cycle is synchronous, so the
/// in-flight state never reaches a rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    /// The backend accepted the application; documents are already de-duplicated.
    Accepted { required_documents: Vec<String> },
    Failed(String),
}

/// State of the application submission page for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationScreen {
    pub form: ApplicationForm,
    pub state: SubmissionState,
}

impl Default for ApplicationScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationScreen {
    pub fn new() -> Self {
        Self {
            form: ApplicationForm::default(),
            state: SubmissionState::Idle,
        }
    }

    /// Validate the answers, post them, and record the outcome.
    pub async fn submit(form: ApplicationForm, client: &RulesClient) -> Self {
        let application = match form.to_application() {
            Ok(application) => application,
            Err(err) => {
                debug!(error = %err, "application form rejected");
                return Self {
                    form,
                    state: SubmissionState::Failed(err.to_string()),
                };
            }
        };

        let state = match client.submit_application(&application).await {
            Ok(result) => {
                let required_documents = result.required_documents();
                info!(
                    family_id = %application.family_id,
                    matched = result.matching_rules.len(),
                    documents = required_documents.len(),
                    "application submitted"
                );
                SubmissionState::Accepted { required_documents }
            }
            Err(err) => {
                warn!(error = %err, "failed to submit application");
                SubmissionState::Failed(err.user_message("Failed to submit application"))
            }
        };

        Self { form, state }
    }
}
