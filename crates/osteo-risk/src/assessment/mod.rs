//! Osteoporosis risk assessment pipeline.
//!
//! `calculate_risk_score` turns questionnaire answers into a [`RiskAnalysis`];
//! `generate_recommendations` and `generate_90_day_plan` both consume that
//! analysis independently. All three are pure. The service, history, router,
//! and cohort modules are the caller-side plumbing around them.

pub mod cohort;
pub mod domain;
pub mod history;
pub mod plan;
pub mod recommendations;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use cohort::{CohortImportError, CohortImporter, CohortSummary};
pub use domain::{
    ActivityLevel, AssessmentInput, CalciumFrequency, Choice, Classification, DietQuality,
    FactorCategory, FactorSeverity, FamilyHistory, Gender, MedicalCondition, RiskAnalysis,
    RiskFactor, RiskLevel, SubstanceUse, SunExposure, SupplementUsage, Symptom, YesNo,
};
pub use history::{
    HistoryEntry, HistoryLog, HistoryRepository, RepositoryError, DEFAULT_HISTORY_LIMIT,
};
pub use plan::{generate_90_day_plan, Plan, PlanPhase, PlanTemplate};
pub use recommendations::{generate_recommendations, RecommendationSet};
pub use router::assessment_router;
pub use scoring::{calculate_risk_score, t_score, TOP_FACTOR_COUNT};
pub use service::{AssessmentReport, AssessmentService, AssessmentServiceError};
