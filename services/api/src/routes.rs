use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use osteo_risk::assessment::{
    assessment_router, calculate_risk_score, AssessmentService, CohortImporter, CohortSummary,
    HistoryRepository,
};
use osteo_risk::error::AppError;
use serde::Deserialize;
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct CohortRequest {
    pub(crate) csv: String,
}

pub(crate) fn with_assessment_routes<R>(service: Arc<AssessmentService<R>>) -> axum::Router
where
    R: HistoryRepository + 'static,
{
    assessment_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/assessments/cohort",
            axum::routing::post(cohort_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let (status, label) = if ready {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "initializing")
    };

    (status, Json(json!({ "status": label })))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Scores an uploaded CSV export without recording anything in the history.
pub(crate) async fn cohort_endpoint(
    Json(payload): Json<CohortRequest>,
) -> Result<Json<CohortSummary>, AppError> {
    let inputs = CohortImporter::from_reader(Cursor::new(payload.csv.into_bytes()))?;
    let analyses: Vec<_> = inputs.iter().map(calculate_risk_score).collect();

    Ok(Json(CohortSummary::from_analyses(&analyses)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemoryHistoryRepository;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app_state(ready: bool) -> AppState {
        let recorder = PrometheusBuilder::new().build_recorder();
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(recorder.handle()),
        }
    }

    fn app(ready: bool) -> axum::Router {
        let service = Arc::new(AssessmentService::new(Arc::new(
            InMemoryHistoryRepository::default(),
        )));
        with_assessment_routes(service).layer(Extension(app_state(ready)))
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = app(true)
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn readiness_waits_for_listener() {
        let response = app(false)
            .oneshot(
                Request::builder()
                    .uri("/ready")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn cohort_endpoint_summarises_export() {
        let request = CohortRequest {
            csv: "age,activity,calcium\n72,Sedentary,Rarely\n35,Very Active,Daily\n".to_string(),
        };

        let Json(body) = cohort_endpoint(Json(request)).await.expect("summary");

        assert_eq!(body.respondents, 2);
        assert_eq!(body.high_risk, 1);
        assert_eq!(body.low_risk, 1);
        assert_eq!(body.mean_score, Some(66.0));
    }

    #[tokio::test]
    async fn cohort_endpoint_rejects_ragged_rows() {
        let request = CohortRequest {
            csv: "age,gender\n40,Female,extra\n".to_string(),
        };

        let response = cohort_endpoint(Json(request)).await.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn assessment_routes_are_mounted() {
        let response = app(true)
            .oneshot(
                Request::builder()
                    .uri("/api/v1/assessments/history")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }
}
