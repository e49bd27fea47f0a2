use crate::infra::{InMemoryApplicantRepository, InMemoryDecisionStore};
use admissions_ai::config::{load_policy, AppConfig};
use admissions_ai::error::AppError;
use admissions_ai::workflows::admissions::{
    AcademicSummary, AdmissionService, ApplicantContext, ApplicationId, CharacterReference,
    DecisionResult, EligibilityStatus, EvaluationConfig, EvaluationEngine,
    InterviewRecommendation, InterviewRecord, MissionAlignmentSummary, ScoreSheet,
    ScoreSheetImporter,
};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// CSV score sheet with columns application_id,dimension,score,scale
    #[arg(long)]
    pub(crate) scores_csv: PathBuf,
    /// JSON evaluation policy. Defaults to the configured policy.
    #[arg(long)]
    pub(crate) policy: Option<PathBuf>,
    /// Print decisions as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Submission date for the seeded applicant (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) submitted_on: Option<NaiveDate>,
    /// Leave the interview panel out to show how missing evidence lowers confidence.
    #[arg(long)]
    pub(crate) skip_interviews: bool,
}

pub(crate) fn run_score_sheet(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        scores_csv,
        policy,
        json,
    } = args;

    let policy = match policy {
        Some(path) => load_policy(&path)?,
        None => AppConfig::load()?.evaluation_policy(),
    };
    let sheet = ScoreSheetImporter::from_path(&scores_csv)?;
    let results = evaluate_sheet(&EvaluationEngine::new(policy), &sheet);

    if json {
        match serde_json::to_string_pretty(&results) {
            Ok(payload) => println!("{}", payload),
            Err(err) => println!("Decision payload unavailable: {}", err),
        }
        return Ok(());
    }

    println!(
        "Score sheet {} ({} applications)",
        scores_csv.display(),
        results.len()
    );
    for result in &results {
        render_decision(result);
    }
    Ok(())
}

pub(crate) fn evaluate_sheet(engine: &EvaluationEngine, sheet: &ScoreSheet) -> Vec<DecisionResult> {
    sheet
        .iter()
        .map(|(application_id, scores)| engine.evaluate(application_id, scores))
        .collect()
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        submitted_on,
        skip_interviews,
    } = args;
    let submitted_on = submitted_on.unwrap_or_else(|| Local::now().date_naive());

    println!("Admission evaluation demo");
    let repository = Arc::new(InMemoryApplicantRepository::default());
    let decisions = Arc::new(InMemoryDecisionStore::default());
    let service = AdmissionService::new(
        repository,
        decisions.clone(),
        EvaluationConfig::default(),
    );

    let record = service.submit(demo_applicant(submitted_on, skip_interviews))?;
    let public_view = record.status_view();
    println!(
        "- Received application {} ({}, {}) -> status {}",
        public_view.application_id.0,
        public_view.applicant_name,
        public_view.program,
        public_view.status
    );

    let application_id = record.application_id().clone();
    let result = service.evaluate_application(&application_id).await?;
    render_decision(&result);

    let stored_view = service.get(&application_id)?.status_view();
    match serde_json::to_string_pretty(&stored_view) {
        Ok(json) => println!("  Public status payload:\n{}", json),
        Err(err) => println!("  Public status payload unavailable: {}", err),
    }

    render_history(&application_id, &decisions.history(&application_id));
    Ok(())
}

fn render_decision(result: &DecisionResult) {
    println!("\n{}: {}", result.application_id.0, result.summary());
    println!("  Basis: {}", result.basis.summary());
    println!("  Component scores:");
    for (dimension, value) in &result.component_scores {
        println!("    - {}: {:.1}", dimension.display_name(), value);
    }
    if !result.missing_dimensions.is_empty() {
        let missing: Vec<&str> = result
            .missing_dimensions
            .iter()
            .map(|dimension| dimension.label())
            .collect();
        println!("  Missing: {}", missing.join(", "));
    }
    println!("  Reasoning: {}", result.reasoning);
    for recommendation in &result.recommendations {
        println!("  Next step: {}", recommendation);
    }
}

fn render_history(application_id: &ApplicationId, history: &[DecisionResult]) {
    if history.is_empty() {
        println!("  Decision history for {}: none recorded", application_id.0);
        return;
    }
    println!("  Decision history for {}:", application_id.0);
    for (index, result) in history.iter().enumerate() {
        println!("    {}. {}", index + 1, result.summary());
    }
}

fn demo_applicant(submitted_on: NaiveDate, skip_interviews: bool) -> ApplicantContext {
    let interviews = if skip_interviews {
        Vec::new()
    } else {
        let conducted_on = submitted_on + chrono::Duration::days(14);
        vec![
            InterviewRecord {
                interviewer: "Dr. Amsel".to_string(),
                conducted_on,
                recommendation: InterviewRecommendation::StronglyRecommend,
                notes: Some("Clear sense of calling".to_string()),
            },
            InterviewRecord {
                interviewer: "Prof. Iyer".to_string(),
                conducted_on,
                recommendation: InterviewRecommendation::Recommend,
                notes: None,
            },
        ]
    };

    ApplicantContext {
        application_id: ApplicationId::default(),
        applicant_name: "Miriam Okafor".to_string(),
        program: "Master of Divinity".to_string(),
        submitted_on,
        academic: Some(AcademicSummary {
            gpa: Some(3.65),
            gpa_scale: 4.0,
            transcript_average: None,
            completed_credits: 96,
        }),
        mission: Some(MissionAlignmentSummary {
            alignment_rating: 8.68,
            ministry_experience_years: Some(3.0),
            statement_reviewed: true,
        }),
        character_references: vec![
            CharacterReference {
                referee: "Rev. Daniel Cho".to_string(),
                relationship: "pastor".to_string(),
                rating: 4.5,
            },
            CharacterReference {
                referee: "Grace Mensah".to_string(),
                relationship: "supervisor".to_string(),
                rating: 4.25,
            },
        ],
        interviews,
        eligibility: Some(EligibilityStatus::Eligible),
        credentials: Vec::new(),
        readiness: None,
        skills: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use admissions_ai::workflows::admissions::{AdmissionDecision, DimensionId};

    fn service() -> (
        AdmissionService<InMemoryApplicantRepository, InMemoryDecisionStore>,
        Arc<InMemoryDecisionStore>,
    ) {
        let decisions = Arc::new(InMemoryDecisionStore::default());
        let service = AdmissionService::new(
            Arc::new(InMemoryApplicantRepository::default()),
            decisions.clone(),
            EvaluationConfig::default(),
        );
        (service, decisions)
    }

    fn submitted_on() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date")
    }

    #[tokio::test]
    async fn seeded_applicant_is_accepted_and_recorded() {
        let (service, decisions) = service();
        let record = service
            .submit(demo_applicant(submitted_on(), false))
            .expect("submit");
        let id = record.application_id().clone();

        let result = service.evaluate_application(&id).await.expect("evaluate");

        assert_eq!(result.decision, AdmissionDecision::Accepted);
        assert!(result.overall_score >= 85.0);
        assert_eq!(decisions.history(&id).len(), 1);
    }

    #[tokio::test]
    async fn skipping_interviews_reports_the_gap() {
        let (service, _) = service();
        let record = service
            .submit(demo_applicant(submitted_on(), true))
            .expect("submit");

        let result = service
            .evaluate_application(record.application_id())
            .await
            .expect("evaluate");

        assert!(result.missing_dimensions.contains(&DimensionId::Interview));
        assert!(!result.component_scores.contains_key(&DimensionId::Interview));
    }

    #[test]
    fn score_sheet_rows_are_evaluated_per_application() {
        let csv = "application_id,dimension,score,scale\n\
                   adm-1,academic,91.25,percent\n\
                   adm-1,spiritual,91.8,percent\n\
                   adm-2,academic,40,percent\n";
        let sheet = ScoreSheetImporter::from_reader(csv.as_bytes()).expect("sheet");

        let results = evaluate_sheet(&EvaluationEngine::new(EvaluationConfig::default()), &sheet);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].application_id.0, "adm-1");
        assert_eq!(results[0].decision, AdmissionDecision::Accepted);
        assert_eq!(results[1].decision, AdmissionDecision::Rejected);
    }
}
