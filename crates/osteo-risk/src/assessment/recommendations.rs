use serde::{Deserialize, Serialize};

use super::domain::{
    ActivityLevel, AssessmentInput, CalciumFrequency, RiskAnalysis, RiskLevel, SubstanceUse,
    SunExposure, SupplementUsage,
};

const CALCIUM_FOODS: &str = "Increase calcium-rich foods: milk, yogurt, cheese, leafy greens";
const CALCIUM_TARGET: &str = "Aim for 1000-1200mg calcium daily";
const VITAMIN_D_FOODS: &str = "Add Vitamin D sources: fatty fish, egg yolks, fortified foods";
const PROTEIN: &str = "Include protein-rich foods for bone strength";
const SODIUM_CAFFEINE: &str = "Limit caffeine and sodium intake";

const WEIGHT_BEARING_START: &str = "Start with 30 minutes weight-bearing exercise daily";
const WALKING_OPTIONS: &str = "Try walking, jogging, or dancing";
const STRENGTH_TRAINING: &str = "Add strength training 2-3 times per week";
const BALANCE: &str = "Practice balance exercises to prevent falls";
const FLEXIBILITY: &str = "Consider yoga or tai chi for flexibility";

const URGENT_DEXA: &str = "URGENT: Schedule DEXA scan immediately";
const SPECIALIST: &str = "Consult orthopedic specialist or endocrinologist";
const DEXA_WITHIN_QUARTER: &str = "Schedule DEXA scan within 3 months";
const DISCUSS_WITH_DOCTOR: &str = "Discuss bone health with your doctor";
const START_BOTH_SUPPLEMENTS: &str = "Consider Vitamin D3 (1000-2000 IU) and Calcium supplements";
const ADD_CALCIUM_SUPPLEMENT: &str = "Add Calcium supplement (500-600mg twice daily)";
const ADD_VITAMIN_D_SUPPLEMENT: &str = "Add Vitamin D3 supplement (1000-2000 IU daily)";
const DENSITY_MONITORING: &str = "Get regular bone density monitoring";
const REDUCE_SUBSTANCES: &str = "Reduce or eliminate smoking and excessive alcohol";

/// Advice grouped by category. List order is significant to renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub diet: Vec<String>,
    pub exercise: Vec<String>,
    pub medical: Vec<String>,
}

impl RecommendationSet {
    pub fn len(&self) -> usize {
        self.diet.len() + self.exercise.len() + self.medical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn generate_recommendations(
    analysis: &RiskAnalysis,
    input: &AssessmentInput,
) -> RecommendationSet {
    RecommendationSet {
        diet: diet_advice(input),
        exercise: exercise_advice(input),
        medical: medical_advice(analysis, input),
    }
}

fn diet_advice(input: &AssessmentInput) -> Vec<String> {
    let mut advice = Vec::new();

    if input.calcium != Some(CalciumFrequency::Daily) {
        advice.push(CALCIUM_FOODS);
        advice.push(CALCIUM_TARGET);
    }
    if matches!(
        input.sun_exposure,
        Some(SunExposure::AlmostNone | SunExposure::UnderFifteenMinutes)
    ) {
        advice.push(VITAMIN_D_FOODS);
    }
    advice.push(PROTEIN);
    advice.push(SODIUM_CAFFEINE);

    owned(advice)
}

fn exercise_advice(input: &AssessmentInput) -> Vec<String> {
    let mut advice = Vec::new();

    if matches!(
        input.activity,
        Some(ActivityLevel::Sedentary | ActivityLevel::LightlyActive)
    ) {
        advice.push(WEIGHT_BEARING_START);
        advice.push(WALKING_OPTIONS);
    }
    advice.extend([STRENGTH_TRAINING, BALANCE, FLEXIBILITY]);

    owned(advice)
}

fn medical_advice(analysis: &RiskAnalysis, input: &AssessmentInput) -> Vec<String> {
    let mut advice = Vec::new();

    match analysis.risk_level {
        RiskLevel::High => advice.extend([URGENT_DEXA, SPECIALIST]),
        RiskLevel::Moderate => advice.extend([DEXA_WITHIN_QUARTER, DISCUSS_WITH_DOCTOR]),
        RiskLevel::Low => {}
    }

    match input.supplements {
        Some(SupplementUsage::NoSupplements) => advice.push(START_BOTH_SUPPLEMENTS),
        Some(SupplementUsage::VitaminDOnly) => advice.push(ADD_CALCIUM_SUPPLEMENT),
        Some(SupplementUsage::CalciumOnly) => advice.push(ADD_VITAMIN_D_SUPPLEMENT),
        Some(SupplementUsage::Both) | None => {}
    }

    advice.push(DENSITY_MONITORING);

    // An unanswered habit question still gets the reduction tip.
    if input.smoking_alcohol != Some(SubstanceUse::Neither) {
        advice.push(REDUCE_SUBSTANCES);
    }

    owned(advice)
}

fn owned(advice: Vec<&'static str>) -> Vec<String> {
    advice.into_iter().map(str::to_string).collect()
}
