use super::super::domain::{
    ActivityLevel, AssessmentInput, CalciumFrequency, Choice, FactorCategory, FactorSeverity,
    FamilyHistory, Gender, MedicalCondition, RiskFactor, SubstanceUse, SunExposure,
    SupplementUsage, Symptom, YesNo,
};

/// Per-table cutoffs; a delta at or below `high` is High, at or below `medium` is Medium.
#[derive(Debug, Clone, Copy)]
struct SeverityBands {
    high: i32,
    medium: i32,
}

impl SeverityBands {
    fn classify(self, points: i32) -> FactorSeverity {
        if points <= self.high {
            FactorSeverity::High
        } else if points <= self.medium {
            FactorSeverity::Medium
        } else {
            FactorSeverity::Low
        }
    }
}

const ACTIVITY_BANDS: SeverityBands = SeverityBands {
    high: -15,
    medium: -5,
};
const CALCIUM_BANDS: SeverityBands = SeverityBands {
    high: -15,
    medium: -5,
};
const SUN_BANDS: SeverityBands = SeverityBands {
    high: -10,
    medium: -5,
};
const SUBSTANCE_BANDS: SeverityBands = SeverityBands {
    high: -10,
    medium: -5,
};
const FAMILY_BANDS: SeverityBands = SeverityBands {
    high: -10,
    medium: -5,
};

const CONDITION_POINTS: i32 = -8;
const LOW_BMI_THRESHOLD: f64 = 18.5;
const HIGH_BMI_THRESHOLD: f64 = 30.0;

impl ActivityLevel {
    pub(crate) const fn points(self) -> i32 {
        match self {
            ActivityLevel::Sedentary => -20,
            ActivityLevel::LightlyActive => -10,
            ActivityLevel::ModeratelyActive => 0,
            ActivityLevel::VeryActive => 5,
        }
    }
}

impl CalciumFrequency {
    pub(crate) const fn points(self) -> i32 {
        match self {
            CalciumFrequency::Rarely => -18,
            CalciumFrequency::OnceOrTwiceWeekly => -10,
            CalciumFrequency::ThreeToFourWeekly => -4,
            CalciumFrequency::Daily => 0,
        }
    }
}

impl SunExposure {
    pub(crate) const fn points(self) -> i32 {
        match self {
            SunExposure::AlmostNone => -12,
            SunExposure::UnderFifteenMinutes => -8,
            SunExposure::FifteenToThirtyMinutes => -3,
            SunExposure::OverThirtyMinutes => 0,
        }
    }
}

impl SubstanceUse {
    pub(crate) const fn points(self) -> i32 {
        match self {
            SubstanceUse::BothRegularly => -15,
            SubstanceUse::OneRegularly => -8,
            SubstanceUse::Occasionally => -3,
            SubstanceUse::Neither => 0,
        }
    }
}

impl FamilyHistory {
    pub(crate) const fn points(self) -> i32 {
        match self {
            FamilyHistory::ParentsOrSiblings => -15,
            FamilyHistory::ExtendedFamily => -8,
            FamilyHistory::NotSure | FamilyHistory::NoHistory => 0,
        }
    }
}

impl SupplementUsage {
    pub(crate) const fn points(self) -> i32 {
        match self {
            SupplementUsage::NoSupplements => 0,
            SupplementUsage::VitaminDOnly | SupplementUsage::CalciumOnly => 4,
            SupplementUsage::Both => 8,
        }
    }
}

impl Symptom {
    /// Symptom deduction with its fixed label and severity. `None` for the "None" tag.
    pub(crate) const fn deduction(self) -> Option<(&'static str, i32, FactorSeverity)> {
        match self {
            Symptom::BackPainHeightLoss => {
                Some(("Back Pain & Height Loss", -10, FactorSeverity::High))
            }
            Symptom::FrequentFractures => Some(("Frequent Fractures", -20, FactorSeverity::High)),
            Symptom::JointStiffnessFatigue => {
                Some(("Joint Stiffness & Fatigue", -8, FactorSeverity::Medium))
            }
            Symptom::MuscleWeakness => Some(("Muscle Weakness", -6, FactorSeverity::Medium)),
            Symptom::NoSymptoms => None,
        }
    }
}

/// Values derived while scoring that the analysis reports alongside the factors.
pub(crate) struct ScoreSignals {
    pub bmi: Option<f64>,
}

#[derive(Default)]
struct FactorLog {
    factors: Vec<RiskFactor>,
    total: i32,
}

impl FactorLog {
    fn push(
        &mut self,
        category: FactorCategory,
        label: impl Into<String>,
        points: i32,
        severity: FactorSeverity,
    ) {
        self.total += points;
        self.factors.push(RiskFactor {
            label: label.into(),
            point_delta: points,
            severity,
            category,
        });
    }

    fn lookup<T: Choice>(
        &mut self,
        category: FactorCategory,
        heading: &str,
        answer: Option<T>,
        points: fn(T) -> i32,
        bands: SeverityBands,
    ) {
        let Some(answer) = answer else {
            return;
        };
        let delta = points(answer);
        if delta != 0 {
            self.push(
                category,
                format!("{heading} ({})", answer.label()),
                delta,
                bands.classify(delta),
            );
        }
    }
}

/// Applies every rule in evaluation order, returning the factors, the raw
/// (unclamped) sum of their deltas, and the derived signals.
pub(crate) fn score_input(input: &AssessmentInput) -> (Vec<RiskFactor>, i32, ScoreSignals) {
    let mut log = FactorLog::default();

    if let Some(age) = input.age {
        if age >= 70 {
            log.push(FactorCategory::Age, "Age (70+)", -30, FactorSeverity::High);
        } else if age >= 60 {
            log.push(FactorCategory::Age, "Age (60-70)", -20, FactorSeverity::Medium);
        } else if age >= 50 {
            log.push(FactorCategory::Age, "Age (50-60)", -10, FactorSeverity::Low);
        }
    }

    match input.gender {
        Some(Gender::Female) => log.push(
            FactorCategory::Gender,
            "Gender (Female)",
            -8,
            FactorSeverity::Medium,
        ),
        Some(Gender::Male) => log.push(
            FactorCategory::Gender,
            "Gender (Male)",
            -4,
            FactorSeverity::Low,
        ),
        Some(Gender::Other) | None => {}
    }

    let bmi = body_mass_index(input.height_cm, input.weight_kg);
    if let Some(bmi) = bmi {
        if bmi < LOW_BMI_THRESHOLD {
            log.push(
                FactorCategory::BodyMass,
                "Low BMI (<18.5)",
                -15,
                FactorSeverity::High,
            );
        } else if bmi > HIGH_BMI_THRESHOLD {
            log.push(
                FactorCategory::BodyMass,
                "High BMI (>30)",
                -5,
                FactorSeverity::Low,
            );
        }
    }

    log.lookup(
        FactorCategory::Activity,
        "Activity Level",
        input.activity,
        ActivityLevel::points,
        ACTIVITY_BANDS,
    );
    log.lookup(
        FactorCategory::Calcium,
        "Calcium Intake",
        input.calcium,
        CalciumFrequency::points,
        CALCIUM_BANDS,
    );
    log.lookup(
        FactorCategory::SunExposure,
        "Sun Exposure",
        input.sun_exposure,
        SunExposure::points,
        SUN_BANDS,
    );
    log.lookup(
        FactorCategory::SmokingAlcohol,
        "Smoking/Alcohol",
        input.smoking_alcohol,
        SubstanceUse::points,
        SUBSTANCE_BANDS,
    );

    let mut seen_symptoms = Vec::with_capacity(input.symptoms.len());
    for symptom in &input.symptoms {
        if seen_symptoms.contains(symptom) {
            continue;
        }
        seen_symptoms.push(*symptom);
        if let Some((label, points, severity)) = symptom.deduction() {
            log.push(FactorCategory::Symptom, label, points, severity);
        }
    }

    log.lookup(
        FactorCategory::FamilyHistory,
        "Family History",
        input.family_history,
        FamilyHistory::points,
        FAMILY_BANDS,
    );

    if let Some(supplements) = input.supplements {
        let bonus = supplements.points();
        if bonus > 0 {
            log.push(
                FactorCategory::Supplements,
                format!("Supplements ({})", supplements.label()),
                bonus,
                FactorSeverity::Positive,
            );
        }
    }

    if input.menopausal == Some(YesNo::Yes) {
        log.push(
            FactorCategory::Menopause,
            "Post-Menopausal",
            -12,
            FactorSeverity::High,
        );
    }

    let condition_count = distinct_conditions(&input.conditions);
    if condition_count > 0 {
        log.push(
            FactorCategory::Conditions,
            format!("Medical Conditions ({condition_count})"),
            CONDITION_POINTS * condition_count,
            FactorSeverity::High,
        );
    }

    if input.steroid_use == Some(YesNo::Yes) {
        log.push(
            FactorCategory::Steroids,
            "Steroid Medication Use",
            -10,
            FactorSeverity::High,
        );
    }

    if input.previous_fractures == Some(YesNo::Yes) {
        log.push(
            FactorCategory::Fractures,
            "Previous Fractures",
            -12,
            FactorSeverity::High,
        );
    }

    let FactorLog { factors, total } = log;
    (factors, total, ScoreSignals { bmi })
}

/// BMI from centimetres and kilograms; `None` unless the result is finite.
pub(crate) fn body_mass_index(height_cm: Option<f64>, weight_kg: Option<f64>) -> Option<f64> {
    let height_m = height_cm? / 100.0;
    let bmi = weight_kg? / (height_m * height_m);
    bmi.is_finite().then_some(bmi)
}

fn distinct_conditions(conditions: &[MedicalCondition]) -> i32 {
    let mut seen: Vec<MedicalCondition> = Vec::with_capacity(conditions.len());
    for condition in conditions {
        if *condition != MedicalCondition::NoConditions && !seen.contains(condition) {
            seen.push(*condition);
        }
    }
    seen.len() as i32
}
