use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use super::domain::{parse_number, AssessmentInput, Choice, RiskAnalysis, RiskLevel};

const LIST_SEPARATOR: char = ';';

#[derive(Debug)]
pub enum CohortImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl fmt::Display for CohortImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CohortImportError::Io(err) => write!(f, "failed to read cohort export: {}", err),
            CohortImportError::Csv(err) => write!(f, "invalid cohort CSV data: {}", err),
        }
    }
}

impl std::error::Error for CohortImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CohortImportError::Io(err) => Some(err),
            CohortImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CohortImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CohortImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads questionnaire answers exported one respondent per CSV row.
pub struct CohortImporter;

impl CohortImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<AssessmentInput>, CohortImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<AssessmentInput>, CohortImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut inputs = Vec::new();
        for record in csv_reader.deserialize::<CohortRow>() {
            let row = record?;
            inputs.push(row.into_input());
        }
        Ok(inputs)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CohortRow {
    #[serde(deserialize_with = "empty_string_as_none")]
    age: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    gender: Option<String>,
    #[serde(alias = "height_cm", deserialize_with = "empty_string_as_none")]
    height: Option<String>,
    #[serde(alias = "weight_kg", deserialize_with = "empty_string_as_none")]
    weight: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    menopausal: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    activity: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    calcium: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    sun_exposure: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    smoking_alcohol: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    symptoms: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    family_history: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    diet: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    supplements: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    previous_fractures: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    steroid_use: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    conditions: Option<String>,
}

impl CohortRow {
    fn into_input(self) -> AssessmentInput {
        AssessmentInput {
            age: self
                .age
                .as_deref()
                .and_then(parse_number)
                .map(|age| age.trunc() as i32),
            gender: choice(&self.gender),
            height_cm: self.height.as_deref().and_then(parse_number),
            weight_kg: self.weight.as_deref().and_then(parse_number),
            menopausal: choice(&self.menopausal),
            activity: choice(&self.activity),
            calcium: choice(&self.calcium),
            sun_exposure: choice(&self.sun_exposure),
            smoking_alcohol: choice(&self.smoking_alcohol),
            symptoms: choices(&self.symptoms),
            family_history: choice(&self.family_history),
            diet: choice(&self.diet),
            supplements: choice(&self.supplements),
            previous_fractures: choice(&self.previous_fractures),
            steroid_use: choice(&self.steroid_use),
            conditions: choices(&self.conditions),
        }
    }
}

fn choice<T: Choice>(raw: &Option<String>) -> Option<T> {
    raw.as_deref().and_then(T::from_label)
}

fn choices<T: Choice>(raw: &Option<String>) -> Vec<T> {
    raw.as_deref()
        .map(|cell| cell.split(LIST_SEPARATOR).filter_map(T::from_label).collect())
        .unwrap_or_default()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Aggregate view over a batch of evaluations.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortSummary {
    pub respondents: usize,
    pub mean_score: Option<f64>,
    pub low_risk: usize,
    pub moderate_risk: usize,
    pub high_risk: usize,
}

impl CohortSummary {
    pub fn from_analyses(analyses: &[RiskAnalysis]) -> Self {
        let mut summary = CohortSummary {
            respondents: analyses.len(),
            mean_score: None,
            low_risk: 0,
            moderate_risk: 0,
            high_risk: 0,
        };

        for analysis in analyses {
            match analysis.risk_level {
                RiskLevel::Low => summary.low_risk += 1,
                RiskLevel::Moderate => summary.moderate_risk += 1,
                RiskLevel::High => summary.high_risk += 1,
            }
        }

        if !analyses.is_empty() {
            let total: u32 = analyses.iter().map(|analysis| u32::from(analysis.score)).sum();
            summary.mean_score = Some(f64::from(total) / analyses.len() as f64);
        }

        summary
    }
}
