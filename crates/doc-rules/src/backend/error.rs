use serde_json::Value;

/// Failure talking to the rules backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The request never produced a response (connection refused, timeout, ...).
    #[error("rules backend unreachable for {endpoint}: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// The backend answered with a non-2xx status.
    #[error("rules backend returned {status} for {endpoint}")]
    Api {
        endpoint: String,
        status: u16,
        detail: Option<String>,
        body: String,
    },
    #[error("unexpected response body from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("cannot build backend url for {endpoint}")]
    InvalidUrl { endpoint: String },
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
}

impl BackendError {
    /// Build an API error, lifting a FastAPI-style `{"detail": "..."}` message out of the body.
    pub(crate) fn api(endpoint: impl Into<String>, status: u16, body: String) -> Self {
        let detail = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|payload| payload.get("detail").and_then(Value::as_str).map(str::to_string))
            .filter(|detail| !detail.trim().is_empty());

        Self::Api {
            endpoint: endpoint.into(),
            status,
            detail,
            body,
        }
    }

    /// The backend-provided detail message, when the backend sent one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            BackendError::Api { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message shown to the admin: the backend detail, else the given fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }
}
