use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::domain::AssessmentInput;
use super::history::HistoryRepository;
use super::service::{AssessmentService, AssessmentServiceError};

/// Router exposing the scoring pipeline and the evaluation history.
pub fn assessment_router<R>(service: Arc<AssessmentService<R>>) -> Router
where
    R: HistoryRepository + 'static,
{
    Router::new()
        .route("/api/v1/assessments", post(assess_handler::<R>))
        .route("/api/v1/assessments/score", post(score_handler::<R>))
        .route("/api/v1/assessments/history", get(history_handler::<R>))
        .with_state(service)
}

pub(crate) async fn assess_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Json(input): Json<AssessmentInput>,
) -> Response
where
    R: HistoryRepository + 'static,
{
    match service.assess(&input) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(error) => service_error(error),
    }
}

pub(crate) async fn score_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Json(input): Json<AssessmentInput>,
) -> Response
where
    R: HistoryRepository + 'static,
{
    (StatusCode::OK, Json(service.score(&input))).into_response()
}

pub(crate) async fn history_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
) -> Response
where
    R: HistoryRepository + 'static,
{
    match service.history() {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(error) => service_error(error),
    }
}

fn service_error(error: AssessmentServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
}
