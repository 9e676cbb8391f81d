use super::common::*;
use std::sync::Arc;

use crate::assessment::domain::{Classification, RiskLevel};
use crate::assessment::service::{AssessmentService, AssessmentServiceError};
use crate::config::AssessmentConfig;

#[test]
fn assess_returns_full_report_and_records_history() {
    let (service, history) = build_service();

    let report = service
        .assess_at(&scenario_a(), assessed_on(3))
        .expect("assessment succeeds");

    assert_eq!(report.analysis.score, 0);
    assert_eq!(report.plan.len(), 3);
    assert!(!report.recommendations.is_empty());
    assert!(report.summary.starts_with("score 0/100: OSTEOPOROSIS"));
    assert_eq!(history.stored(), 1);
}

#[test]
fn history_lists_newest_first() {
    let (service, _) = build_service();
    service
        .assess_at(&scenario_a(), assessed_on(1))
        .expect("first");
    service
        .assess_at(&scenario_b(), assessed_on(2))
        .expect("second");

    let entries = service.history().expect("history");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].score, 100);
    assert_eq!(entries[0].risk_level, RiskLevel::Low);
    assert_eq!(entries[1].classification, Classification::Osteoporosis);
    assert_eq!(entries[1].assessed_at, assessed_on(1));
}

#[test]
fn history_is_trimmed_to_configured_limit() {
    let history = Arc::new(MemoryHistory::default());
    let service = AssessmentService::with_config(
        history,
        AssessmentConfig { history_limit: 2 },
    );

    for day in 1..=4 {
        service
            .assess_at(&scenario_b(), assessed_on(day))
            .expect("assessment");
    }

    let entries = service.history().expect("history");
    assert_eq!(service.history_limit(), 2);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].assessed_at, assessed_on(4));
    assert_eq!(entries[1].assessed_at, assessed_on(3));
}

#[test]
fn score_does_not_touch_history() {
    let (service, history) = build_service();
    let analysis = service.score(&scenario_a());

    assert_eq!(analysis.score, 0);
    assert_eq!(history.stored(), 0);
}

#[test]
fn repository_failure_surfaces_as_error() {
    let service = AssessmentService::new(Arc::new(UnavailableHistory));

    let err = service
        .assess(&scenario_b())
        .expect_err("store is offline");
    assert!(matches!(err, AssessmentServiceError::Repository(_)));
    assert!(service.history().is_err());
}
