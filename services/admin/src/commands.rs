use std::fmt::Write;
use std::sync::Arc;

use clap::{ArgAction, Args};
use doc_rules::backend::RulesClient;
use doc_rules::catalog::{self, FamilyStatus, TaxFiling};
use doc_rules::config::AppConfig;
use doc_rules::error::AppError;
use doc_rules::telemetry;
use doc_rules::workflows::intake::{ApplicationForm, ApplicationScreen, SubmissionState};
use doc_rules::workflows::rules::{Rule, RuleId, RuleListScreen};

use crate::infra::rules_client;

#[derive(Args, Debug)]
pub(crate) struct ApplyArgs {
    /// Applicant family status (new | returning)
    #[arg(long, value_parser = parse_family_status)]
    pub(crate) family_status: FamilyStatus,
    /// Whether the applicant owns a business (true | false)
    #[arg(long, value_parser = parse_business_owner, action = ArgAction::Set)]
    pub(crate) business_owner: bool,
    /// 2021 tax filing status (filed | not_filed)
    #[arg(long, value_parser = parse_tax_filing)]
    pub(crate) tax_filing: TaxFiling,
}

fn parse_family_status(raw: &str) -> Result<FamilyStatus, String> {
    FamilyStatus::parse(raw.trim()).ok_or_else(|| format!("expected new or returning, got '{raw}'"))
}

fn parse_business_owner(raw: &str) -> Result<bool, String> {
    catalog::parse_business_owner(raw.trim())
        .ok_or_else(|| format!("expected true or false, got '{raw}'"))
}

fn parse_tax_filing(raw: &str) -> Result<TaxFiling, String> {
    TaxFiling::parse(raw.trim()).ok_or_else(|| format!("expected filed or not_filed, got '{raw}'"))
}

/// Load configuration, start logging and build the backend client.
fn prepare() -> Result<Arc<RulesClient>, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    rules_client(&config)
}

pub(crate) async fn run_rules_list() -> Result<(), AppError> {
    let client = prepare()?;
    print!("{}", list_rules(&client).await?);
    Ok(())
}

pub(crate) async fn run_rules_show(id: String) -> Result<(), AppError> {
    let client = prepare()?;
    print!("{}", show_rule(&client, &RuleId(id)).await?);
    Ok(())
}

pub(crate) async fn run_rules_delete(id: String) -> Result<(), AppError> {
    let client = prepare()?;
    print!("{}", delete_rule(&client, &RuleId(id)).await?);
    Ok(())
}

pub(crate) async fn run_apply(args: ApplyArgs) -> Result<(), AppError> {
    let client = prepare()?;
    print!("{}", submit_application(&client, &args).await?);
    Ok(())
}

async fn list_rules(client: &RulesClient) -> Result<String, AppError> {
    let rules = client.list_rules().await?;
    Ok(render_rules(&rules))
}

async fn show_rule(client: &RulesClient, id: &RuleId) -> Result<String, AppError> {
    match client.get_rule(id).await? {
        Some(rule) => Ok(render_rule(&rule)),
        None => Err(AppError::NotFound(format!("rule {id}"))),
    }
}

/// Delete, then render the refreshed list. Any banner error fails the command.
async fn delete_rule(client: &RulesClient, id: &RuleId) -> Result<String, AppError> {
    let screen = RuleListScreen::delete(client, id).await;
    match screen.error {
        Some(message) => Err(AppError::Workflow(message)),
        None => Ok(render_rules(&screen.rules)),
    }
}

async fn submit_application(client: &RulesClient, args: &ApplyArgs) -> Result<String, AppError> {
    let form = ApplicationForm {
        family_status: Some(args.family_status),
        business_owner: Some(args.business_owner),
        tax_filing: Some(args.tax_filing),
    };
    match ApplicationScreen::submit(form, client).await.state {
        SubmissionState::Failed(message) => Err(AppError::Workflow(message)),
        state => Ok(render_submission(&state)),
    }
}

pub(crate) fn render_rules(rules: &[Rule]) -> String {
    if rules.is_empty() {
        return "No rules defined yet.\n".to_string();
    }
    rules.iter().map(render_rule).collect::<Vec<_>>().join("\n")
}

pub(crate) fn render_rule(rule: &Rule) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} [{}]", rule.name, rule.id);

    let conditions: Vec<String> = rule
        .conditions
        .iter()
        .map(|condition| condition.chip_label())
        .collect();
    let _ = writeln!(out, "  Conditions: {}", conditions.join(", "));
    let _ = writeln!(
        out,
        "  Required Documents: {}",
        rule.document_labels().join(", ")
    );
    if let Some(updated) = rule.updated_at {
        let _ = writeln!(out, "  Updated: {}", updated.format("%Y-%m-%d %H:%M"));
    }
    out
}

pub(crate) fn render_submission(state: &SubmissionState) -> String {
    match state {
        SubmissionState::Idle => String::new(),
        SubmissionState::Failed(message) => format!("Error: {message}\n"),
        SubmissionState::Accepted { required_documents } if required_documents.is_empty() => {
            "Application submitted successfully!\nNo additional documents required at this time.\n"
                .to_string()
        }
        SubmissionState::Accepted { required_documents } => {
            let mut out = String::from(
                "Application submitted successfully!\nPlease provide the following documents:\n",
            );
            for doc in required_documents {
                let _ = writeln!(out, "  - {}", catalog::document_label(doc));
            }
            out
        }
    }
}
