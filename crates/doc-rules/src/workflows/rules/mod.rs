//! Rule list and rule editor screens.

pub mod domain;
pub mod draft;
pub mod editor;
pub mod list;

#[cfg(test)]
mod tests;

pub use domain::{Condition, NewRule, Rule, RuleId};
pub use draft::{ConditionRow, DraftAction, DraftError, RuleDraft};
pub use editor::{EditorMode, EditorOutcome, RuleEditorScreen};
pub use list::RuleListScreen;
