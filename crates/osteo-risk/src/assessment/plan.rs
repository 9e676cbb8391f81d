use serde::{Deserialize, Serialize};

use super::domain::{FactorCategory, RiskAnalysis};
use super::scoring::TOP_FACTOR_COUNT;

const WEEKS_PER_PHASE: usize = 4;

const ACTIVITY_GOALS: [&str; 4] = [
    "Walk 20 minutes daily",
    "Add 10-minute strength training",
    "Try balance exercises 3x/week",
    "Track daily steps (aim 7000+)",
];

const CALCIUM_GOALS: [&str; 4] = [
    "Add dairy/calcium source to each meal",
    "Track calcium intake daily",
    "Try 3 new calcium-rich recipes",
    "Maintain 1200mg calcium daily",
];

const VITAMIN_D_GOALS: [&str; 4] = [
    "Get 20 minutes sun exposure daily",
    "Start Vitamin D supplement",
    "Add fatty fish 2x/week",
    "Check Vitamin D levels",
];

const SUBSTANCE_GOALS: [&str; 4] = [
    "Reduce smoking/alcohol by 50%",
    "Find healthy alternatives",
    "Join support group",
    "Track substance-free days",
];

const MONITORING_GOALS: [&str; 4] = [
    "Monitor symptoms daily",
    "Follow medical advice",
    "Maintain healthy habits",
    "Schedule follow-up appointment",
];

/// Goal template a phase is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanTemplate {
    Activity,
    Calcium,
    VitaminD,
    SubstanceReduction,
    Monitoring,
}

impl PlanTemplate {
    pub const fn for_category(category: FactorCategory) -> Self {
        match category {
            FactorCategory::Activity => PlanTemplate::Activity,
            FactorCategory::Calcium => PlanTemplate::Calcium,
            FactorCategory::SunExposure => PlanTemplate::VitaminD,
            FactorCategory::SmokingAlcohol => PlanTemplate::SubstanceReduction,
            _ => PlanTemplate::Monitoring,
        }
    }

    pub const fn goals(self) -> [&'static str; 4] {
        match self {
            PlanTemplate::Activity => ACTIVITY_GOALS,
            PlanTemplate::Calcium => CALCIUM_GOALS,
            PlanTemplate::VitaminD => VITAMIN_D_GOALS,
            PlanTemplate::SubstanceReduction => SUBSTANCE_GOALS,
            PlanTemplate::Monitoring => MONITORING_GOALS,
        }
    }
}

/// One four-week block of the action plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanPhase {
    pub week_range: String,
    pub focus_factor: String,
    pub goals: Vec<String>,
    pub completed_count: u32,
}

/// Ordered phases, at most one per top risk factor. Serializes as a plain list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Plan {
    pub phases: Vec<PlanPhase>,
}

impl Plan {
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn total_weeks(&self) -> usize {
        self.phases.len() * WEEKS_PER_PHASE
    }
}

pub fn generate_90_day_plan(analysis: &RiskAnalysis) -> Plan {
    let phases = analysis
        .top_risk_factors
        .iter()
        .take(TOP_FACTOR_COUNT)
        .enumerate()
        .map(|(index, factor)| {
            let first_week = index * WEEKS_PER_PHASE + 1;
            let last_week = first_week + WEEKS_PER_PHASE - 1;
            let template = PlanTemplate::for_category(factor.category);

            PlanPhase {
                week_range: format!("Weeks {first_week}-{last_week}"),
                focus_factor: factor.label.clone(),
                goals: template.goals().iter().map(|goal| goal.to_string()).collect(),
                completed_count: 0,
            }
        })
        .collect();

    Plan { phases }
}
