use super::common::*;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::catalog::ConditionType;
use crate::workflows::rules::domain::RuleId;
use crate::workflows::rules::draft::{DraftAction, RuleDraft};
use crate::workflows::rules::editor::{EditorMode, EditorOutcome, RuleEditorScreen};
use crate::workflows::rules::list::RuleListScreen;

#[tokio::test]
async fn list_screen_loads_every_rule() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rules/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([new_family_rule(), tax_filing_rule()])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let screen = RuleListScreen::load(&client_for(&server)).await;
    assert_eq!(screen.error, None);
    assert_eq!(screen.rules.len(), 2);
    assert_eq!(
        screen.rules[0].conditions[1].chip_label(),
        "Business Owner: Yes"
    );
}

#[tokio::test]
async fn list_screen_surfaces_fetch_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rules/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let screen = RuleListScreen::load(&client_for(&server)).await;
    assert!(screen.rules.is_empty());
    assert_eq!(screen.error.as_deref(), Some("Failed to load rules"));
}

#[tokio::test]
async fn delete_triggers_exactly_one_refetch() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/rules/rule-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "Rule deleted successfully" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rules/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([tax_filing_rule()])))
        .expect(1)
        .mount(&server)
        .await;

    let screen = RuleListScreen::delete(&client_for(&server), &RuleId::from("rule-1")).await;
    assert_eq!(screen.error, None);
    assert_eq!(screen.rules.len(), 1);
    assert_eq!(screen.rules[0].id.as_str(), "rule-2");
}

#[tokio::test]
async fn failed_delete_still_refetches_and_reports_detail() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/rules/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "Rule not found" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rules/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([new_family_rule()])))
        .expect(1)
        .mount(&server)
        .await;

    let screen = RuleListScreen::delete(&client_for(&server), &RuleId::from("missing")).await;
    assert_eq!(screen.error.as_deref(), Some("Rule not found"));
    assert_eq!(screen.rules.len(), 1);
}

#[tokio::test]
async fn invalid_draft_never_reaches_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut screen = RuleEditorScreen::create();
    screen.draft.set_name("Incomplete");
    assert!(screen
        .draft
        .set_condition_type(0, Some(ConditionType::FamilyStatus)));

    match screen.submit(&client_for(&server)).await {
        EditorOutcome::Editing(screen) => assert_eq!(
            screen.error.as_deref(),
            Some("All conditions must have both a type and value selected")
        ),
        EditorOutcome::Saved(rule) => panic!("unexpected save of {rule:?}"),
    }
}

#[tokio::test]
async fn valid_draft_posts_rule_and_reports_saved() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rules/"))
        .and(body_json(json!({
            "name": "Tax Filing Verification",
            "conditions": [{ "type": "tax_filing", "value": "not_filed" }],
            "document_types": ["income_verification"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(tax_filing_rule()))
        .expect(1)
        .mount(&server)
        .await;

    let (screen, action) = RuleEditorScreen::from_form(EditorMode::Create, &valid_rule_form("submit"));
    assert_eq!(action, DraftAction::Submit);

    match screen.handle(action, &client_for(&server)).await {
        EditorOutcome::Saved(rule) => assert_eq!(rule.id.as_str(), "rule-2"),
        EditorOutcome::Editing(screen) => panic!("rule not saved: {:?}", screen.error),
    }
}

#[tokio::test]
async fn backend_rejection_shows_detail_or_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rules/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "detail": "invalid document type" })),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rules/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let (screen, _) = RuleEditorScreen::from_form(EditorMode::Create, &valid_rule_form("submit"));
    let EditorOutcome::Editing(screen) = screen.submit(&client).await else {
        panic!("expected the editor to stay open");
    };
    assert_eq!(screen.error.as_deref(), Some("invalid document type"));

    let EditorOutcome::Editing(screen) = screen.submit(&client).await else {
        panic!("expected the editor to stay open");
    };
    assert_eq!(screen.error.as_deref(), Some("Failed to create rule"));
}

#[tokio::test]
async fn row_actions_stay_local() {
    let server = MockServer::start().await;

    let (screen, action) = RuleEditorScreen::from_form(
        EditorMode::Create,
        &valid_rule_form("add_condition"),
    );
    let EditorOutcome::Editing(screen) = screen.handle(action, &client_for(&server)).await else {
        panic!("row action must not save");
    };

    assert_eq!(screen.draft.conditions().len(), 2);
    let received = server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty());
}

#[tokio::test]
async fn edit_screen_loads_stored_rule() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rules/rule-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(new_family_rule()))
        .mount(&server)
        .await;

    let screen = RuleEditorScreen::load(&client_for(&server), &RuleId::from("rule-1"))
        .await
        .expect("backend reachable")
        .expect("rule exists");

    assert_eq!(screen.mode, EditorMode::Edit(RuleId::from("rule-1")));
    assert_eq!(screen.heading(), "Edit Rule");
    assert_eq!(screen.form_path(), "/rules/rule-1");
    assert_eq!(screen.draft.conditions().len(), 2);
    assert_eq!(screen.draft.documents().len(), 2);
    assert!(screen.draft.validate().is_ok());
}

#[tokio::test]
async fn edit_screen_for_unknown_rule_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rules/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "Rule not found" })))
        .mount(&server)
        .await;

    let screen = RuleEditorScreen::load(&client_for(&server), &RuleId::from("ghost"))
        .await
        .expect("backend reachable");
    assert!(screen.is_none());
}

#[test]
fn create_screen_is_blank() {
    let screen = RuleEditorScreen::create();
    assert_eq!(screen.draft, RuleDraft::new());
    assert_eq!(screen.heading(), "Create New Rule");
    assert_eq!(screen.form_path(), "/rules/new");
}
