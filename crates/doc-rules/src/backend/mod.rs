//! Typed client for the rules backend.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/rules/` | List rules |
//! | GET    | `/rules/{id}` | Get one rule |
//! | POST   | `/rules/` | Create rule |
//! | DELETE | `/rules/{id}` | Delete rule |
//! | POST   | `/applications/` | Submit an application and receive matching rules |

mod error;

pub use error::BackendError;

use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::BackendConfig;
use crate::workflows::intake::domain::{Application, ApplicationResult};
use crate::workflows::rules::domain::{NewRule, Rule, RuleId};

/// Client for the rules backend. Cheap to clone; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct RulesClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RulesClient {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(BackendError::Client)?;

        // `Url::join` replaces the last segment unless the base ends with a slash.
        let mut base_url = config.base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Calls `GET {base_url}/rules/`.
    pub async fn list_rules(&self) -> Result<Vec<Rule>, BackendError> {
        let endpoint = "GET /rules/";
        let url = self.collection_url(endpoint, "rules/")?;
        let resp = self.execute(endpoint, self.http.get(url)).await?;
        decode(endpoint, resp).await
    }

    /// Calls `GET {base_url}/rules/{id}`; a 404 maps to `None`.
    pub async fn get_rule(&self, id: &RuleId) -> Result<Option<Rule>, BackendError> {
        let endpoint = format!("GET /rules/{id}");
        let url = self.rule_url(&endpoint, id)?;

        match self.execute(&endpoint, self.http.get(url)).await {
            Ok(resp) => decode(&endpoint, resp).await.map(Some),
            Err(BackendError::Api { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Calls `POST {base_url}/rules/`.
    pub async fn create_rule(&self, rule: &NewRule) -> Result<Rule, BackendError> {
        let endpoint = "POST /rules/";
        let url = self.collection_url(endpoint, "rules/")?;
        let resp = self.execute(endpoint, self.http.post(url).json(rule)).await?;
        decode(endpoint, resp).await
    }

    /// Calls `DELETE {base_url}/rules/{id}`. The response body is ignored.
    pub async fn delete_rule(&self, id: &RuleId) -> Result<(), BackendError> {
        let endpoint = format!("DELETE /rules/{id}");
        let url = self.rule_url(&endpoint, id)?;
        self.execute(&endpoint, self.http.delete(url)).await?;
        Ok(())
    }

    /// Calls `POST {base_url}/applications/`.
    pub async fn submit_application(
        &self,
        application: &Application,
    ) -> Result<ApplicationResult, BackendError> {
        let endpoint = "POST /applications/";
        let url = self.collection_url(endpoint, "applications/")?;
        let resp = self
            .execute(endpoint, self.http.post(url).json(application))
            .await?;
        decode(endpoint, resp).await
    }

    fn collection_url(&self, endpoint: &str, path: &str) -> Result<Url, BackendError> {
        self.base_url
            .join(path)
            .map_err(|_| BackendError::InvalidUrl {
                endpoint: endpoint.to_string(),
            })
    }

    fn rule_url(&self, endpoint: &str, id: &RuleId) -> Result<Url, BackendError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BackendError::InvalidUrl {
                endpoint: endpoint.to_string(),
            })?
            .pop_if_empty()
            .push("rules")
            .push(id.as_str());
        Ok(url)
    }

    async fn execute(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<Response, BackendError> {
        debug!(endpoint, "calling rules backend");

        let resp = request.send().await.map_err(|source| BackendError::Http {
            endpoint: endpoint.to_string(),
            source,
        })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(BackendError::api(endpoint, status, body));
        }

        Ok(resp)
    }
}

async fn decode<T: DeserializeOwned>(endpoint: &str, resp: Response) -> Result<T, BackendError> {
    resp.json()
        .await
        .map_err(|source| BackendError::Deserialization {
            endpoint: endpoint.to_string(),
            source,
        })
}
