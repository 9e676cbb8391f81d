use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Closed answer vocabulary for a single questionnaire field.
///
/// Labels are the exact strings the questionnaire UI submits.
pub trait Choice: Copy + Sized + 'static {
    const ALL: &'static [Self];

    fn label(self) -> &'static str;

    fn from_label(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.iter().copied().find(|choice| choice.label() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Choice for Gender {
    const ALL: &'static [Self] = &[Gender::Male, Gender::Female, Gender::Other];

    fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

/// Yes/No answer used for menopausal status, steroid use, and prior fractures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YesNo {
    Yes,
    No,
}

impl Choice for YesNo {
    const ALL: &'static [Self] = &[YesNo::Yes, YesNo::No];

    fn label(self) -> &'static str {
        match self {
            YesNo::Yes => "Yes",
            YesNo::No => "No",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityLevel {
    Sedentary,
    #[serde(rename = "Lightly Active")]
    LightlyActive,
    #[serde(rename = "Moderately Active")]
    ModeratelyActive,
    #[serde(rename = "Very Active")]
    VeryActive,
}

impl Choice for ActivityLevel {
    const ALL: &'static [Self] = &[
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
    ];

    fn label(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::LightlyActive => "Lightly Active",
            ActivityLevel::ModeratelyActive => "Moderately Active",
            ActivityLevel::VeryActive => "Very Active",
        }
    }
}

/// How often calcium-rich foods are eaten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalciumFrequency {
    Rarely,
    #[serde(rename = "1-2x/week")]
    OnceOrTwiceWeekly,
    #[serde(rename = "3-4x/week")]
    ThreeToFourWeekly,
    Daily,
}

impl Choice for CalciumFrequency {
    const ALL: &'static [Self] = &[
        CalciumFrequency::Rarely,
        CalciumFrequency::OnceOrTwiceWeekly,
        CalciumFrequency::ThreeToFourWeekly,
        CalciumFrequency::Daily,
    ];

    fn label(self) -> &'static str {
        match self {
            CalciumFrequency::Rarely => "Rarely",
            CalciumFrequency::OnceOrTwiceWeekly => "1-2x/week",
            CalciumFrequency::ThreeToFourWeekly => "3-4x/week",
            CalciumFrequency::Daily => "Daily",
        }
    }
}

/// Daily time spent in the sun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SunExposure {
    #[serde(rename = "Almost none")]
    AlmostNone,
    #[serde(rename = "<15 min")]
    UnderFifteenMinutes,
    #[serde(rename = "15-30 min")]
    FifteenToThirtyMinutes,
    #[serde(rename = ">30 min")]
    OverThirtyMinutes,
}

impl Choice for SunExposure {
    const ALL: &'static [Self] = &[
        SunExposure::AlmostNone,
        SunExposure::UnderFifteenMinutes,
        SunExposure::FifteenToThirtyMinutes,
        SunExposure::OverThirtyMinutes,
    ];

    fn label(self) -> &'static str {
        match self {
            SunExposure::AlmostNone => "Almost none",
            SunExposure::UnderFifteenMinutes => "<15 min",
            SunExposure::FifteenToThirtyMinutes => "15-30 min",
            SunExposure::OverThirtyMinutes => ">30 min",
        }
    }
}

/// Combined smoking and alcohol habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubstanceUse {
    #[serde(rename = "Both regularly")]
    BothRegularly,
    #[serde(rename = "One regularly")]
    OneRegularly,
    Occasionally,
    Neither,
}

impl Choice for SubstanceUse {
    const ALL: &'static [Self] = &[
        SubstanceUse::BothRegularly,
        SubstanceUse::OneRegularly,
        SubstanceUse::Occasionally,
        SubstanceUse::Neither,
    ];

    fn label(self) -> &'static str {
        match self {
            SubstanceUse::BothRegularly => "Both regularly",
            SubstanceUse::OneRegularly => "One regularly",
            SubstanceUse::Occasionally => "Occasionally",
            SubstanceUse::Neither => "Neither",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symptom {
    #[serde(rename = "Back pain & height loss")]
    BackPainHeightLoss,
    #[serde(rename = "Frequent fractures")]
    FrequentFractures,
    #[serde(rename = "Joint stiffness & fatigue")]
    JointStiffnessFatigue,
    #[serde(rename = "Muscle weakness")]
    MuscleWeakness,
    #[serde(rename = "None")]
    NoSymptoms,
}

impl Choice for Symptom {
    const ALL: &'static [Self] = &[
        Symptom::BackPainHeightLoss,
        Symptom::FrequentFractures,
        Symptom::JointStiffnessFatigue,
        Symptom::MuscleWeakness,
        Symptom::NoSymptoms,
    ];

    fn label(self) -> &'static str {
        match self {
            Symptom::BackPainHeightLoss => "Back pain & height loss",
            Symptom::FrequentFractures => "Frequent fractures",
            Symptom::JointStiffnessFatigue => "Joint stiffness & fatigue",
            Symptom::MuscleWeakness => "Muscle weakness",
            Symptom::NoSymptoms => "None",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FamilyHistory {
    #[serde(rename = "Parents/siblings")]
    ParentsOrSiblings,
    #[serde(rename = "Extended family")]
    ExtendedFamily,
    #[serde(rename = "Not sure")]
    NotSure,
    #[serde(rename = "No history")]
    NoHistory,
}

impl Choice for FamilyHistory {
    const ALL: &'static [Self] = &[
        FamilyHistory::ParentsOrSiblings,
        FamilyHistory::ExtendedFamily,
        FamilyHistory::NotSure,
        FamilyHistory::NoHistory,
    ];

    fn label(self) -> &'static str {
        match self {
            FamilyHistory::ParentsOrSiblings => "Parents/siblings",
            FamilyHistory::ExtendedFamily => "Extended family",
            FamilyHistory::NotSure => "Not sure",
            FamilyHistory::NoHistory => "No history",
        }
    }
}

/// Self-rated diet quality. Collected but not scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DietQuality {
    Poor,
    Average,
    Good,
    Excellent,
}

impl Choice for DietQuality {
    const ALL: &'static [Self] = &[
        DietQuality::Poor,
        DietQuality::Average,
        DietQuality::Good,
        DietQuality::Excellent,
    ];

    fn label(self) -> &'static str {
        match self {
            DietQuality::Poor => "Poor",
            DietQuality::Average => "Average",
            DietQuality::Good => "Good",
            DietQuality::Excellent => "Excellent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupplementUsage {
    #[serde(rename = "None")]
    NoSupplements,
    #[serde(rename = "Vitamin D only")]
    VitaminDOnly,
    #[serde(rename = "Calcium only")]
    CalciumOnly,
    Both,
}

impl Choice for SupplementUsage {
    const ALL: &'static [Self] = &[
        SupplementUsage::NoSupplements,
        SupplementUsage::VitaminDOnly,
        SupplementUsage::CalciumOnly,
        SupplementUsage::Both,
    ];

    fn label(self) -> &'static str {
        match self {
            SupplementUsage::NoSupplements => "None",
            SupplementUsage::VitaminDOnly => "Vitamin D only",
            SupplementUsage::CalciumOnly => "Calcium only",
            SupplementUsage::Both => "Both",
        }
    }
}

/// Existing conditions offered by the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MedicalCondition {
    Diabetes,
    #[serde(rename = "Rheumatoid Arthritis")]
    RheumatoidArthritis,
    Thyroid,
    #[serde(rename = "Kidney disease")]
    KidneyDisease,
    #[serde(rename = "None")]
    NoConditions,
}

impl Choice for MedicalCondition {
    const ALL: &'static [Self] = &[
        MedicalCondition::Diabetes,
        MedicalCondition::RheumatoidArthritis,
        MedicalCondition::Thyroid,
        MedicalCondition::KidneyDisease,
        MedicalCondition::NoConditions,
    ];

    fn label(self) -> &'static str {
        match self {
            MedicalCondition::Diabetes => "Diabetes",
            MedicalCondition::RheumatoidArthritis => "Rheumatoid Arthritis",
            MedicalCondition::Thyroid => "Thyroid",
            MedicalCondition::KidneyDisease => "Kidney disease",
            MedicalCondition::NoConditions => "None",
        }
    }
}

/// Questionnaire answers handed over by the intake UI.
///
/// Deserialization never fails on unknown answers: unrecognized categorical
/// values and unparseable numbers are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentInput {
    #[serde(default, deserialize_with = "lenient_age")]
    pub age: Option<i32>,
    #[serde(default, deserialize_with = "lenient_choice")]
    pub gender: Option<Gender>,
    #[serde(default, alias = "height", deserialize_with = "lenient_number")]
    pub height_cm: Option<f64>,
    #[serde(default, alias = "weight", deserialize_with = "lenient_number")]
    pub weight_kg: Option<f64>,
    #[serde(default, deserialize_with = "lenient_choice")]
    pub menopausal: Option<YesNo>,
    #[serde(default, deserialize_with = "lenient_choice")]
    pub activity: Option<ActivityLevel>,
    #[serde(default, deserialize_with = "lenient_choice")]
    pub calcium: Option<CalciumFrequency>,
    #[serde(default, deserialize_with = "lenient_choice")]
    pub sun_exposure: Option<SunExposure>,
    #[serde(default, deserialize_with = "lenient_choice")]
    pub smoking_alcohol: Option<SubstanceUse>,
    #[serde(default, deserialize_with = "lenient_choices")]
    pub symptoms: Vec<Symptom>,
    #[serde(default, deserialize_with = "lenient_choice")]
    pub family_history: Option<FamilyHistory>,
    #[serde(default, deserialize_with = "lenient_choice")]
    pub diet: Option<DietQuality>,
    #[serde(default, deserialize_with = "lenient_choice")]
    pub supplements: Option<SupplementUsage>,
    #[serde(default, deserialize_with = "lenient_choice")]
    pub previous_fractures: Option<YesNo>,
    #[serde(default, deserialize_with = "lenient_choice")]
    pub steroid_use: Option<YesNo>,
    #[serde(default, deserialize_with = "lenient_choices")]
    pub conditions: Vec<MedicalCondition>,
}

/// How strongly a factor moved the score. `Positive` marks protective factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactorSeverity {
    Low,
    Medium,
    High,
    Positive,
}

/// Stable tag identifying which rule produced a factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorCategory {
    Age,
    Gender,
    BodyMass,
    Activity,
    Calcium,
    SunExposure,
    SmokingAlcohol,
    Symptom,
    FamilyHistory,
    Supplements,
    Menopause,
    Conditions,
    Steroids,
    Fractures,
}

/// A single named, signed contribution to the overall score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactor {
    pub label: String,
    pub point_delta: i32,
    pub severity: FactorSeverity,
    pub category: FactorCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Classification {
    Normal,
    Osteopenia,
    Osteoporosis,
}

impl Classification {
    pub const fn label(self) -> &'static str {
        match self {
            Classification::Normal => "NORMAL",
            Classification::Osteopenia => "OSTEOPENIA",
            Classification::Osteoporosis => "OSTEOPOROSIS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::High => "HIGH",
        }
    }
}

/// Score calculator output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAnalysis {
    pub score: u8,
    pub t_score: f64,
    pub classification: Classification,
    pub risk_level: RiskLevel,
    /// `None` when age was missing.
    pub bone_age_estimate: Option<i32>,
    pub risk_percentile: u8,
    /// `None` when height or weight was missing or produced a non-finite BMI.
    pub bmi: Option<f64>,
    pub top_risk_factors: Vec<RiskFactor>,
    pub all_factors: Vec<RiskFactor>,
}

impl RiskAnalysis {
    pub fn leading_factor(&self) -> Option<&RiskFactor> {
        self.top_risk_factors.first()
    }

    pub fn summary(&self) -> String {
        let headline = format!(
            "score {}/100: {} ({} risk), simulated T-score {:.1}",
            self.score,
            self.classification.label(),
            self.risk_level.label(),
            self.t_score
        );

        match self.leading_factor() {
            Some(factor) => format!(
                "{headline}; leading factor {} ({} points)",
                factor.label, factor.point_delta
            ),
            None => format!("{headline}; no risk-increasing factors reported"),
        }
    }
}

fn lenient_choice<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Choice,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(Value::as_str).and_then(T::from_label))
}

fn lenient_choices<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Choice,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    let choices = match raw {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .filter_map(T::from_label)
            .collect(),
        Some(Value::String(single)) => T::from_label(&single).into_iter().collect(),
        _ => Vec::new(),
    };
    Ok(choices)
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(number_from_value))
}

fn lenient_age<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?.map(|age| age.trunc() as i32))
}

/// Accepts JSON numbers and numeric strings; rejects NaN and infinities.
pub(crate) fn number_from_value(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => parse_number(raw),
        _ => None,
    };
    parsed.filter(|number| number.is_finite())
}

/// Reads the leading number of a free-text answer, so `"160cm"` is 160.
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    numeric_prefix(raw.trim())
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

fn numeric_prefix(raw: &str) -> &str {
    let bytes = raw.as_bytes();
    let digits_from = |mut at: usize| {
        while bytes.get(at).is_some_and(u8::is_ascii_digit) {
            at += 1;
        }
        at
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let integer_end = digits_from(end);
    let mut has_digits = integer_end > end;
    end = integer_end;

    if bytes.get(end) == Some(&b'.') {
        let fraction_end = digits_from(end + 1);
        if fraction_end > end + 1 {
            has_digits = true;
            end = fraction_end;
        }
    }
    if !has_digits {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let exponent_end = digits_from(exponent);
        if exponent_end > exponent {
            end = exponent_end;
        }
    }

    &raw[..end]
}
