use std::fmt::Write;

use crate::catalog::ChoiceOption;
use crate::workflows::rules::{Rule, RuleEditorScreen, RuleListScreen};

use super::{error_alert, escape, hidden, layout, select};

pub fn render_rule_list(screen: &RuleListScreen) -> String {
    let mut body = String::from(
        "<div class=\"row\"><h1>Document Request Rules</h1>\
         <a href=\"/rules/new\">Create New Rule</a></div>",
    );

    if let Some(message) = &screen.error {
        body.push_str(&error_alert(message));
    }

    if screen.rules.is_empty() {
        body.push_str("<div class=\"card\"><p class=\"muted\">No rules defined yet.</p></div>");
    }

    for rule in &screen.rules {
        body.push_str(&render_rule_card(rule));
    }

    layout("Document Request Rules", &body)
}

fn render_rule_card(rule: &Rule) -> String {
    let rule_path = escape(&rule.id.admin_path());
    let mut card = String::new();

    let _ = write!(
        card,
        "<div class=\"card\"><div class=\"row\"><h3><a href=\"{rule_path}\">{name}</a></h3>\
         <form method=\"post\" action=\"{rule_path}/delete\">\
         <button type=\"submit\">Delete</button></form></div>",
        name = escape(&rule.name),
    );

    card.push_str("<div class=\"muted\">Conditions:</div><div>");
    for condition in &rule.conditions {
        let _ = write!(
            card,
            "<span class=\"chip\">{}</span>",
            escape(&condition.chip_label())
        );
    }
    card.push_str("</div><div class=\"muted\">Required Documents:</div><div>");
    for label in rule.document_labels() {
        let _ = write!(card, "<span class=\"chip doc\">{}</span>", escape(&label));
    }
    card.push_str("</div>");

    if let Some(updated) = rule.updated_at {
        let _ = write!(
            card,
            "<div class=\"muted\">Updated {}</div>",
            updated.format("%Y-%m-%d %H:%M")
        );
    }

    card.push_str("</div>");
    card
}

pub fn render_rule_editor(screen: &RuleEditorScreen) -> String {
    let draft = &screen.draft;
    let mut body = format!("<div class=\"card\"><h2>{}</h2>", screen.heading());

    if let Some(message) = &screen.error {
        body.push_str(&error_alert(message));
    }

    let _ = write!(
        body,
        "<form method=\"post\" action=\"{path}\">\
         <button type=\"submit\" name=\"action\" value=\"submit\" hidden></button>\
         <div class=\"row\"><label>Rule Name <input type=\"text\" name=\"name\" value=\"{name}\"></label></div>\
         <h3>Conditions</h3>",
        path = escape(&screen.form_path()),
        name = escape(&draft.name),
    );
    body.push_str(&hidden(
        "condition_count",
        &draft.conditions().len().to_string(),
    ));

    for (index, row) in draft.conditions().iter().enumerate() {
        let type_options: Vec<ChoiceOption> = draft
            .available_condition_types(Some(index))
            .into_iter()
            .map(|kind| kind.option())
            .collect();
        let value_options = row.kind.map(|kind| kind.values()).unwrap_or(&[]);

        body.push_str("<div class=\"row\">");
        body.push_str(&hidden(
            &format!("condition_prev_type_{index}"),
            row.kind.map(|kind| kind.as_str()).unwrap_or(""),
        ));
        body.push_str(&select(
            &format!("condition_type_{index}"),
            "Condition Type",
            &type_options,
            row.kind.map(|kind| kind.as_str()),
            false,
        ));
        body.push_str(&select(
            &format!("condition_value_{index}"),
            "Value",
            value_options,
            row.value.as_deref(),
            row.kind.is_none(),
        ));
        if draft.can_remove_condition(index) {
            let _ = write!(
                body,
                "<button type=\"submit\" name=\"action\" value=\"remove_condition:{index}\">Remove</button>"
            );
        }
        body.push_str("</div>");
    }

    if draft.can_add_condition() {
        body.push_str(
            "<button type=\"submit\" name=\"action\" value=\"add_condition\">+ Add another condition</button>",
        );
    }

    if !draft.conditions().is_empty() {
        let _ = write!(
            body,
            "<p class=\"muted\">Placeholder estimate (not computed from applicant data): \
             {} matching applicants.</p>",
            draft.placeholder_matching_applicants()
        );
    }

    body.push_str("<h3>Required Documents</h3>");
    body.push_str(&hidden(
        "document_count",
        &draft.documents().len().to_string(),
    ));

    for (index, doc) in draft.documents().iter().enumerate() {
        let options: Vec<ChoiceOption> = draft
            .available_document_types(Some(index))
            .into_iter()
            .map(|kind| kind.option())
            .collect();

        body.push_str("<div class=\"row\">");
        body.push_str(&select(
            &format!("document_{index}"),
            "Document Type",
            &options,
            doc.map(|kind| kind.as_str()),
            false,
        ));
        if draft.can_remove_document(index) {
            let _ = write!(
                body,
                "<button type=\"submit\" name=\"action\" value=\"remove_document:{index}\">Remove</button>"
            );
        }
        body.push_str("</div>");
    }

    if draft.can_add_document() {
        body.push_str(
            "<button type=\"submit\" name=\"action\" value=\"add_document\">+ Add another document</button>",
        );
    }

    body.push_str(
        "<div class=\"row\"><a href=\"/\">Cancel</a>\
         <button type=\"submit\" name=\"action\" value=\"refresh\">Update choices</button>\
         <button type=\"submit\" name=\"action\" value=\"submit\">Save Rule</button></div>\
         </form></div>",
    );

    layout(screen.heading(), &body)
}

pub fn render_rule_not_found(id: &str) -> String {
    let body = format!(
        "<div class=\"card\">{}<a href=\"/\">Back to rules</a></div>",
        error_alert(&format!("Rule not found: {id}"))
    );
    layout("Rule not found", &body)
}
