use std::fmt::Write;

use crate::catalog::{self, FamilyStatus, TaxFiling};
use crate::workflows::intake::{ApplicationScreen, SubmissionState};

use super::{error_alert, escape, layout, select};

pub fn render_application(screen: &ApplicationScreen) -> String {
    let mut body = String::from("<div class=\"card\"><h2>Submit Application</h2>");

    if let SubmissionState::Failed(message) = &screen.state {
        body.push_str(&error_alert(message));
    }

    let form = &screen.form;
    let family_status = form.family_status.map(FamilyStatus::as_str);
    let business_owner = form
        .business_owner
        .map(|owner| if owner { "true" } else { "false" });
    let tax_filing = form.tax_filing.map(TaxFiling::as_str);

    body.push_str("<form method=\"post\" action=\"/apply\">");
    let _ = write!(
        body,
        "<div class=\"row\">{}</div><div class=\"row\">{}</div><div class=\"row\">{}</div>",
        select(
            "family_status",
            "Family Status",
            FamilyStatus::options(),
            family_status,
            false
        ),
        select(
            "business_owner",
            "Business Owner",
            catalog::business_owner_options(),
            business_owner,
            false
        ),
        select(
            "tax_filing",
            "Tax Filing Status",
            TaxFiling::options(),
            tax_filing,
            false
        ),
    );
    body.push_str("<button type=\"submit\">Submit Application</button></form>");

    if let SubmissionState::Accepted { required_documents } = &screen.state {
        body.push_str(
            "<div class=\"alert success\"><h3>Application submitted successfully!</h3>",
        );
        if required_documents.is_empty() {
            body.push_str("<p>No additional documents required at this time.</p>");
        } else {
            body.push_str("<p>Please provide the following documents:</p><ul>");
            for doc in required_documents {
                let _ = write!(body, "<li>{}</li>", escape(&catalog::document_label(doc)));
            }
            body.push_str("</ul>");
        }
        body.push_str("</div>");
    }

    body.push_str("</div>");
    layout("Submit Application", &body)
}
