use crate::cli::ServeArgs;
use crate::infra::{rules_client, AppState};
use crate::routes::with_admin_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use doc_rules::config::AppConfig;
use doc_rules::error::AppError;
use doc_rules::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let client = rules_client(&config)?;
    let backend = client.base_url().to_string();

    let app = with_admin_routes(client)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, %backend, "document rules admin ready");

    axum::serve(listener, app).await?;
    Ok(())
}
