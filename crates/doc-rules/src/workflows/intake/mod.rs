//! Mock applicant submission: collect three answers, post them, show required documents.

pub mod domain;
pub mod form;
pub mod screen;


pub use domain::{Application, ApplicationResult, MatchedRule};
pub use form::{ApplicationForm, ApplicationFormError, ApplicationFormFields};
pub use screen::{ApplicationScreen, SubmissionState};
