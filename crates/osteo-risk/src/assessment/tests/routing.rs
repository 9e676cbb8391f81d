use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::assessment::router::{assess_handler, history_handler};
use crate::assessment::{assessment_router, AssessmentService};

#[tokio::test]
async fn assess_handler_returns_report() {
    let (service, history) = build_service();

    let response = assess_handler::<MemoryHistory>(State(service), axum::Json(scenario_a())).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["analysis"]["score"], 0);
    assert_eq!(body["analysis"]["classification"], "OSTEOPOROSIS");
    assert_eq!(body["plan"][1]["focusFactor"], "Activity Level (Sedentary)");
    assert_eq!(body["recommendations"]["medical"][0], "URGENT: Schedule DEXA scan immediately");
    assert_eq!(history.stored(), 1);
}

#[tokio::test]
async fn assess_handler_returns_internal_error_on_repository_failure() {
    let service = Arc::new(AssessmentService::new(Arc::new(UnavailableHistory)));

    let response =
        assess_handler::<UnavailableHistory>(State(service), axum::Json(scenario_b())).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("offline"));
}

#[tokio::test]
async fn history_handler_reports_store_failure() {
    let service = Arc::new(AssessmentService::new(Arc::new(UnavailableHistory)));

    let response = history_handler::<UnavailableHistory>(State(service)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn router_scores_partial_questionnaires() {
    let (service, history) = build_service();
    let router = assessment_router(service);

    let payload = json!({ "age": 65, "activity": "Unknown", "calcium": "Rarely" });
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/assessments/score")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["score"], 62);
    assert_eq!(body["riskLevel"], "MODERATE");
    assert_eq!(body["allFactors"].as_array().map(Vec::len), Some(2));
    assert_eq!(history.stored(), 0);
}

#[tokio::test]
async fn router_lists_history_after_assessment() {
    let (service, _) = build_service();
    let router = assessment_router(service);

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/assessments")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_string(&scenario_b()).expect("encode"),
                ))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/v1/assessments/history")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body[0]["score"], 100);
    assert_eq!(body[0]["classification"], "NORMAL");
    assert!(body[0]["assessedAt"].is_string());
}

#[tokio::test]
async fn router_rejects_non_object_payloads() {
    let (service, _) = build_service();
    let router = assessment_router(service);

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/assessments/score")
                .header("content-type", "application/json")
                .body(Body::from("\"just a string\""))
                .expect("request"),
        )
        .await
        .expect("response");

    assert!(response.status().is_client_error());
}
