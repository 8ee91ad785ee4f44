use crate::cli::ServeArgs;
use crate::infra::{build_engine, AppState};
use crate::routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use outreach_ai::config::AppConfig;
use outreach_ai::error::AppError;
use outreach_ai::telemetry;
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

    // Misconfigured weights or fallback bounds abort here, before binding.
    let engine = Arc::new(build_engine(&config.matching)?);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = routes::router(engine)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "placement outreach matcher ready");

    axum::serve(listener, app).await?;
    Ok(())
}
