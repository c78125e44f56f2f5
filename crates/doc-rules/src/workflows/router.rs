use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};

use crate::backend::RulesClient;
use crate::error::AppError;
use crate::views;

use super::intake::{ApplicationForm, ApplicationFormFields, ApplicationScreen};
use super::rules::{EditorMode, EditorOutcome, RuleEditorScreen, RuleId, RuleListScreen};

/// Router builder exposing the three admin screens.
pub fn admin_router(client: Arc<RulesClient>) -> Router {
    Router::new()
        .route("/", get(rule_list_handler))
        .route(
            "/rules/new",
            get(new_rule_handler).post(create_rule_handler),
        )
        .route(
            "/rules/:rule_id",
            get(edit_rule_handler).post(update_rule_handler),
        )
        .route("/rules/:rule_id/delete", post(delete_rule_handler))
        .route(
            "/apply",
            get(application_form_handler).post(submit_application_handler),
        )
        .with_state(client)
}

pub(crate) async fn rule_list_handler(State(client): State<Arc<RulesClient>>) -> Html<String> {
    let screen = RuleListScreen::load(&client).await;
    Html(views::rules::render_rule_list(&screen))
}

pub(crate) async fn delete_rule_handler(
    State(client): State<Arc<RulesClient>>,
    Path(rule_id): Path<String>,
) -> Html<String> {
    let screen = RuleListScreen::delete(&client, &RuleId(rule_id)).await;
    Html(views::rules::render_rule_list(&screen))
}

pub(crate) async fn new_rule_handler() -> Html<String> {
    Html(views::rules::render_rule_editor(&RuleEditorScreen::create()))
}

pub(crate) async fn create_rule_handler(
    State(client): State<Arc<RulesClient>>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Response {
    handle_editor_post(&client, EditorMode::Create, &fields).await
}

pub(crate) async fn edit_rule_handler(
    State(client): State<Arc<RulesClient>>,
    Path(rule_id): Path<String>,
) -> Result<Response, AppError> {
    let id = RuleId(rule_id);
    let response = match RuleEditorScreen::load(&client, &id).await? {
        Some(screen) => Html(views::rules::render_rule_editor(&screen)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html(views::rules::render_rule_not_found(id.as_str())),
        )
            .into_response(),
    };
    Ok(response)
}

pub(crate) async fn update_rule_handler(
    State(client): State<Arc<RulesClient>>,
    Path(rule_id): Path<String>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Response {
    handle_editor_post(&client, EditorMode::Edit(RuleId(rule_id)), &fields).await
}

async fn handle_editor_post(
    client: &RulesClient,
    mode: EditorMode,
    fields: &[(String, String)],
) -> Response {
    let (screen, action) = RuleEditorScreen::from_form(mode, fields);
    match screen.handle(action, client).await {
        EditorOutcome::Saved(_) => Redirect::to("/").into_response(),
        EditorOutcome::Editing(screen) => {
            Html(views::rules::render_rule_editor(&screen)).into_response()
        }
    }
}

pub(crate) async fn application_form_handler() -> Html<String> {
    Html(views::intake::render_application(&ApplicationScreen::new()))
}

pub(crate) async fn submit_application_handler(
    State(client): State<Arc<RulesClient>>,
    Form(fields): Form<ApplicationFormFields>,
) -> Html<String> {
    let form = ApplicationForm::from_fields(&fields);
    let screen = ApplicationScreen::submit(form, &client).await;
    Html(views::intake::render_application(&screen))
}
