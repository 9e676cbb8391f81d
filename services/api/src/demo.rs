use crate::infra::InMemoryHistoryRepository;
use clap::Args;
use osteo_risk::assessment::{
    calculate_risk_score, ActivityLevel, AssessmentInput, AssessmentReport, AssessmentService,
    CalciumFrequency, CohortImporter, CohortSummary, FamilyHistory, Gender, MedicalCondition,
    SubstanceUse, SunExposure, SupplementUsage, Symptom, YesNo,
};
use osteo_risk::error::AppError;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Questionnaire answers as a JSON object
    pub(crate) input: PathBuf,
    /// Print the full report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CohortArgs {
    /// CSV export with one respondent per row
    pub(crate) csv: PathBuf,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.input)?;
    let input: AssessmentInput = serde_json::from_str(&raw)?;
    let report = AssessmentReport::build(&input);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_report(&report);
    }
    Ok(())
}

pub(crate) fn run_cohort(args: CohortArgs) -> Result<(), AppError> {
    let inputs = CohortImporter::from_path(&args.csv)?;
    let analyses: Vec<_> = inputs.iter().map(calculate_risk_score).collect();
    let summary = CohortSummary::from_analyses(&analyses);

    println!("Cohort summary for {}", args.csv.display());
    render_cohort(&summary);
    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let history = Arc::new(InMemoryHistoryRepository::default());
    let service = AssessmentService::new(history);

    println!("Bone health assessment demo");
    for (name, input) in [
        ("Respondent A", elderly_respondent()),
        ("Respondent B", active_respondent()),
    ] {
        println!("\n== {name} ==");
        let report = service.assess(&input)?;
        render_report(&report);
    }

    println!("\nAssessment history (newest first):");
    for entry in service.history()? {
        println!("- {}", entry.headline());
    }
    Ok(())
}

fn render_report(report: &AssessmentReport) {
    let analysis = &report.analysis;
    println!(
        "Bone health score: {}/100 ({})",
        analysis.score,
        analysis.classification.label()
    );
    println!(
        "- Risk level {} | T-score {:.1} | higher risk than {}% of peers",
        analysis.risk_level.label(),
        analysis.t_score,
        analysis.risk_percentile
    );
    if let Some(bone_age) = analysis.bone_age_estimate {
        println!("- Estimated bone age: {bone_age}");
    }
    if let Some(bmi) = analysis.bmi {
        println!("- BMI: {bmi:.1}");
    }

    if analysis.top_risk_factors.is_empty() {
        println!("Top risk factors: none reported");
    } else {
        println!("Top risk factors:");
        for factor in &analysis.top_risk_factors {
            println!(
                "  - {} ({} points, {:?})",
                factor.label, factor.point_delta, factor.severity
            );
        }
    }

    for (heading, tips) in [
        ("Diet", &report.recommendations.diet),
        ("Exercise", &report.recommendations.exercise),
        ("Medical", &report.recommendations.medical),
    ] {
        println!("{heading} recommendations:");
        for tip in tips {
            println!("  - {tip}");
        }
    }

    if report.plan.is_empty() {
        println!("90-day plan: maintain current habits");
        return;
    }
    println!("90-day plan:");
    for phase in &report.plan.phases {
        println!("  {} - focus: {}", phase.week_range, phase.focus_factor);
        for goal in &phase.goals {
            println!("    [ ] {goal}");
        }
    }
}

fn render_cohort(summary: &CohortSummary) {
    println!("- {} respondents", summary.respondents);
    match summary.mean_score {
        Some(mean) => println!("- mean score {mean:.1}/100"),
        None => println!("- mean score unavailable"),
    }
    println!(
        "- {} low | {} moderate | {} high risk",
        summary.low_risk, summary.moderate_risk, summary.high_risk
    );
}

fn elderly_respondent() -> AssessmentInput {
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

fn active_respondent() -> AssessmentInput {
    AssessmentInput {
        age: Some(30),
        gender: Some(Gender::Male),
        height_cm: Some(175.0),
        weight_kg: Some(70.0),
        activity: Some(ActivityLevel::VeryActive),
        calcium: Some(CalciumFrequency::Daily),
        sun_exposure: Some(SunExposure::OverThirtyMinutes),
        smoking_alcohol: Some(SubstanceUse::Neither),
        family_history: Some(FamilyHistory::NoHistory),
        supplements: Some(SupplementUsage::Both),
        previous_fractures: Some(YesNo::No),
        steroid_use: Some(YesNo::No),
        conditions: vec![MedicalCondition::NoConditions],
        ..AssessmentInput::default()
    }
}
