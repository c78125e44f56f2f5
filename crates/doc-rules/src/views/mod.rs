//! Server-rendered HTML for the admin screens.
//!
//! Pages are plain HTML forms; every dynamic string goes through [`escape`].

pub mod intake;
pub mod rules;

use std::fmt::Write;

use crate::catalog::ChoiceOption;

const STYLE: &str = "body{font-family:sans-serif;margin:0;background:#f5f5f5}\
nav{background:#1976d2;padding:12px 24px}nav a{color:#fff;margin-right:16px;text-decoration:none}\
main{padding:24px}.card{background:#fff;border-radius:4px;padding:16px;margin-bottom:16px;\
box-shadow:0 1px 3px rgba(0,0,0,.2)}.chip{display:inline-block;border:1px solid #999;\
border-radius:12px;padding:2px 10px;margin:2px;font-size:13px}.chip.doc{background:#1976d2;\
color:#fff;border-color:#1976d2}.alert{padding:12px;border-radius:4px;margin-bottom:16px}\
.alert.error{background:#fdecea;color:#611a15}.alert.success{background:#edf7ed;color:#1e4620}\
.row{display:flex;gap:8px;margin-bottom:8px;align-items:center}.muted{color:#666;font-size:14px}";

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Wrap page content in the shared document shell and navigation bar.
pub fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <nav><a href=\"/\">Document Request Rules</a><a href=\"/apply\">Submit Application</a></nav>\n\
         <main>\n{body}\n</main>\n</body>\n</html>\n",
        title = escape(title),
    )
}

pub(crate) fn error_alert(message: &str) -> String {
    format!(
        "<div class=\"alert error\" role=\"alert\">{}</div>",
        escape(message)
    )
}

/// Render a `<select>` with a leading blank option.
pub(crate) fn select(
    name: &str,
    label: &str,
    options: &[ChoiceOption],
    selected: Option<&str>,
    disabled: bool,
) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<label>{label} <select name=\"{name}\"{disabled}><option value=\"\"></option>",
        label = escape(label),
        name = escape(name),
        disabled = if disabled { " disabled" } else { "" },
    );
    for option in options {
        let is_selected = selected == Some(option.value);
        let _ = write!(
            html,
            "<option value=\"{value}\"{selected}>{label}</option>",
            value = escape(option.value),
            selected = if is_selected { " selected" } else { "" },
            label = escape(option.label),
        );
    }
    html.push_str("</select></label>");
    html
}

pub(crate) fn hidden(name: &str, value: &str) -> String {
    format!(
        "<input type=\"hidden\" name=\"{}\" value=\"{}\">",
        escape(name),
        escape(value)
    )
}
