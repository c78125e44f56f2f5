//! Helpers shared by the workflow test trees.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use wiremock::MockServer;

use crate::backend::RulesClient;
use crate::config::BackendConfig;

use super::admin_router;

pub(crate) fn client_for(server: &MockServer) -> RulesClient {
    let config = BackendConfig::with_base_url(&server.uri()).expect("mock server url");
    RulesClient::new(&config).expect("client builds")
}

pub(crate) fn router_for(server: &MockServer) -> axum::Router {
    admin_router(Arc::new(client_for(server)))
}

/// Url-encode pairs the way a browser posts a form.
pub(crate) fn encode_form(pairs: &[(&str, &str)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

pub(crate) fn form_request(uri: &str, pairs: &[(&str, &str)]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(encode_form(pairs)))
        .expect("request")
}

pub(crate) fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub(crate) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}

#[test]
fn form_encoding_escapes_reserved_characters() {
    assert_eq!(
        encode_form(&[("name", "Tax & Docs"), ("action", "remove_condition:1")]),
        "name=Tax+%26+Docs&action=remove_condition%3A1"
    );
}
