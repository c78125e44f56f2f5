use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use doc_rules::backend::RulesClient;
use doc_rules::config::AppConfig;
use doc_rules::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;

/// Operational state shared with `/ready` and `/metrics`.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Backend client built from the loaded configuration.
pub(crate) fn rules_client(config: &AppConfig) -> Result<Arc<RulesClient>, AppError> {
    Ok(Arc::new(RulesClient::new(&config.backend)?))
}
