use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryHistoryRepository};
use crate::routes::with_assessment_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use osteo_risk::assessment::AssessmentService;
use osteo_risk::config::AppConfig;
use osteo_risk::error::AppError;
use osteo_risk::telemetry;
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

    let history = Arc::new(InMemoryHistoryRepository::with_limit(
        config.assessment.history_limit,
    ));
    let assessment_service = Arc::new(AssessmentService::with_config(
        history,
        config.assessment,
    ));

    let app = with_assessment_routes(assessment_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        history_limit = config.assessment.history_limit,
        "bone health risk service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
