use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::domain::{AssessmentInput, RiskAnalysis};
use super::history::{HistoryEntry, HistoryRepository, RepositoryError};
use super::plan::{generate_90_day_plan, Plan};
use super::recommendations::{generate_recommendations, RecommendationSet};
use super::scoring::calculate_risk_score;
use crate::config::AssessmentConfig;

/// Everything a renderer needs for one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentReport {
    pub analysis: RiskAnalysis,
    pub recommendations: RecommendationSet,
    pub plan: Plan,
    pub summary: String,
}

impl AssessmentReport {
    /// Runs the full pipeline without touching any store.
    pub fn build(input: &AssessmentInput) -> Self {
        let analysis = calculate_risk_score(input);
        let recommendations = generate_recommendations(&analysis, input);
        let plan = generate_90_day_plan(&analysis);
        let summary = analysis.summary();

        Self {
            analysis,
            recommendations,
            plan,
            summary,
        }
    }
}

/// Runs the scoring pipeline and keeps a capped history of past evaluations.
pub struct AssessmentService<R> {
    history: Arc<R>,
    history_limit: usize,
}

impl<R> AssessmentService<R>
where
    R: HistoryRepository + 'static,
{
    pub fn new(history: Arc<R>) -> Self {
        Self::with_config(history, AssessmentConfig::default())
    }

    pub fn with_config(history: Arc<R>, config: AssessmentConfig) -> Self {
        Self {
            history,
            history_limit: config.history_limit.max(1),
        }
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Evaluate a questionnaire and record it in the history.
    pub fn assess(
        &self,
        input: &AssessmentInput,
    ) -> Result<AssessmentReport, AssessmentServiceError> {
        self.assess_at(input, Utc::now())
    }

    pub fn assess_at(
        &self,
        input: &AssessmentInput,
        assessed_at: DateTime<Utc>,
    ) -> Result<AssessmentReport, AssessmentServiceError> {
        let report = AssessmentReport::build(input);

        let entry = HistoryEntry::from_analysis(&report.analysis, assessed_at);
        if let Err(err) = self.history.record(entry) {
            warn!(error = %err, "failed to record assessment history");
            return Err(err.into());
        }

        info!(
            score = report.analysis.score,
            risk_level = report.analysis.risk_level.label(),
            phases = report.plan.len(),
            "assessment completed"
        );

        Ok(report)
    }

    /// Score only; nothing is recorded.
    pub fn score(&self, input: &AssessmentInput) -> RiskAnalysis {
        calculate_risk_score(input)
    }

    /// Most recent evaluations, newest first.
    pub fn history(&self) -> Result<Vec<HistoryEntry>, AssessmentServiceError> {
        Ok(self.history.recent(self.history_limit)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
