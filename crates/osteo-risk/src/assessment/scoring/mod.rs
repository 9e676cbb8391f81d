mod bands;
mod rules;

pub use bands::t_score;

use super::domain::{AssessmentInput, Classification, RiskAnalysis, RiskFactor, RiskLevel};
use bands::{bone_age_estimate, clamp_score, round_to_tenth};
use tracing::debug;

/// Number of deductions surfaced as the headline contributors.
pub const TOP_FACTOR_COUNT: usize = 3;

/// Score a questionnaire. Total: unknown answers and missing numbers have no effect.
pub fn calculate_risk_score(input: &AssessmentInput) -> RiskAnalysis {
    let (all_factors, total_delta, signals) = rules::score_input(input);
    let score = clamp_score(total_delta);

    let top_risk_factors = top_risk_factors(&all_factors);

    debug!(
        score,
        total_delta,
        factors = all_factors.len(),
        "questionnaire scored"
    );

    RiskAnalysis {
        score,
        t_score: t_score(score),
        classification: Classification::from_score(score),
        risk_level: RiskLevel::from_score(score),
        bone_age_estimate: bone_age_estimate(input.age, score),
        risk_percentile: 100 - score,
        bmi: signals.bmi.map(round_to_tenth),
        top_risk_factors,
        all_factors,
    }
}

/// Most negative deductions first; ties keep evaluation order.
fn top_risk_factors(factors: &[RiskFactor]) -> Vec<RiskFactor> {
    let mut deductions: Vec<RiskFactor> = factors
        .iter()
        .filter(|factor| factor.point_delta < 0)
        .cloned()
        .collect();
    deductions.sort_by_key(|factor| factor.point_delta);
    deductions.truncate(TOP_FACTOR_COUNT);
    deductions
}
