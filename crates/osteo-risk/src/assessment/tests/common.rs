use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::assessment::domain::{
    ActivityLevel, AssessmentInput, CalciumFrequency, FactorCategory, FactorSeverity,
    FamilyHistory, Gender, MedicalCondition, RiskAnalysis, RiskFactor, SubstanceUse, SunExposure,
    SupplementUsage, Symptom, YesNo,
};
use crate::assessment::history::{
    HistoryEntry, HistoryLog, HistoryRepository, RepositoryError,
};
use crate::assessment::scoring::calculate_risk_score;
use crate::assessment::AssessmentService;

/// Elderly, sedentary respondent with a fracture history.
pub(super) fn scenario_a() -> AssessmentInput {
    AssessmentInput {
        age: Some(75),
        gender: Some(Gender::Female),
        height_cm: Some(160.0),
        weight_kg: Some(50.0),
        menopausal: Some(YesNo::Yes),
        activity: Some(ActivityLevel::Sedentary),
        calcium: Some(CalciumFrequency::Rarely),
        sun_exposure: Some(SunExposure::AlmostNone),
        smoking_alcohol: Some(SubstanceUse::Neither),
        symptoms: vec![Symptom::FrequentFractures],
        family_history: Some(FamilyHistory::ParentsOrSiblings),
        diet: None,
        supplements: Some(SupplementUsage::NoSupplements),
        previous_fractures: Some(YesNo::Yes),
        steroid_use: Some(YesNo::No),
        conditions: Vec::new(),
    }
}

/// Young, active respondent taking both supplements.
pub(super) fn scenario_b() -> AssessmentInput {
    AssessmentInput {
        age: Some(30),
        gender: Some(Gender::Male),
        height_cm: Some(175.0),
        weight_kg: Some(70.0),
        menopausal: None,
        activity: Some(ActivityLevel::VeryActive),
        calcium: Some(CalciumFrequency::Daily),
        sun_exposure: Some(SunExposure::OverThirtyMinutes),
        smoking_alcohol: Some(SubstanceUse::Neither),
        symptoms: Vec::new(),
        family_history: Some(FamilyHistory::NoHistory),
        diet: None,
        supplements: Some(SupplementUsage::Both),
        previous_fractures: Some(YesNo::No),
        steroid_use: Some(YesNo::No),
        conditions: vec![MedicalCondition::NoConditions],
    }
}

pub(super) fn analysis_with_factors(factors: Vec<RiskFactor>) -> RiskAnalysis {
    let mut analysis = calculate_risk_score(&AssessmentInput::default());
    analysis.top_risk_factors = factors.clone();
    analysis.all_factors = factors;
    analysis
}

pub(super) fn factor(category: FactorCategory, label: &str, point_delta: i32) -> RiskFactor {
    RiskFactor {
        label: label.to_string(),
        point_delta,
        severity: FactorSeverity::High,
        category,
    }
}

pub(super) fn assessed_on(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, day, 8, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn build_service() -> (Arc<AssessmentService<MemoryHistory>>, Arc<MemoryHistory>) {
    let history = Arc::new(MemoryHistory::default());
    let service = Arc::new(AssessmentService::new(history.clone()));
    (service, history)
}

#[derive(Default)]
pub(super) struct MemoryHistory {
    log: Mutex<HistoryLog>,
}

impl MemoryHistory {
    pub(super) fn stored(&self) -> usize {
        self.log.lock().expect("lock").len()
    }
}

impl HistoryRepository for MemoryHistory {
    fn record(&self, entry: HistoryEntry) -> Result<(), RepositoryError> {
        self.log.lock().expect("lock").push(entry);
        Ok(())
    }

    fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>, RepositoryError> {
        Ok(self.log.lock().expect("lock").recent(limit))
    }
}

pub(super) struct UnavailableHistory;

impl HistoryRepository for UnavailableHistory {
    fn record(&self, _entry: HistoryEntry) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<HistoryEntry>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
