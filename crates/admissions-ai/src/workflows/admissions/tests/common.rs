use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::admissions::assessors::ComponentAssessor;
use crate::workflows::admissions::domain::{
    AcademicSummary, ApplicantContext, ApplicationId, ApplicationStatus, CharacterReference,
    ComponentScore, DimensionId, EligibilityStatus, InterviewRecommendation, InterviewRecord,
    MissionAlignmentSummary,
};
use crate::workflows::admissions::evaluation::{DecisionResult, EvaluationConfig};
use crate::workflows::admissions::repository::{
    ApplicantRepository, ApplicationRecord, DecisionStore, RepositoryError,
};
use crate::workflows::admissions::{admission_router, AdmissionService};

pub(crate) fn submitted_on() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date")
}

/// Context with no collaborator results delivered yet.
pub(crate) fn bare_context(suffix: &str) -> ApplicantContext {
    ApplicantContext {
        application_id: ApplicationId(format!("adm-test-{suffix}")),
        applicant_name: "Miriam Okafor".to_string(),
        program: "Master of Divinity".to_string(),
        submitted_on: submitted_on(),
        academic: None,
        mission: None,
        character_references: Vec::new(),
        interviews: Vec::new(),
        eligibility: None,
        credentials: Vec::new(),
        readiness: None,
        skills: Vec::new(),
    }
}

pub(crate) fn interview(interviewer: &str, recommendation: InterviewRecommendation) -> InterviewRecord {
    InterviewRecord {
        interviewer: interviewer.to_string(),
        conducted_on: NaiveDate::from_ymd_opt(2025, 4, 2).expect("valid date"),
        recommendation,
        notes: None,
    }
}

/// Strong applicant whose assessed scores reproduce the reference scenario:
/// academic 91.25, spiritual 91.8, character 87.5, interview 87.5, eligibility 100.
pub(crate) fn strong_context(suffix: &str) -> ApplicantContext {
    let mut context = bare_context(suffix);
    context.academic = Some(AcademicSummary {
        gpa: Some(3.65),
        gpa_scale: 4.0,
        transcript_average: None,
        completed_credits: 96,
    });
    context.mission = Some(MissionAlignmentSummary {
        alignment_rating: 8.68,
        ministry_experience_years: Some(3.0),
        statement_reviewed: true,
    });
    context.character_references = vec![
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
    ];
    context.interviews = vec![
        interview("Dr. Amsel", InterviewRecommendation::StronglyRecommend),
        interview("Prof. Iyer", InterviewRecommendation::Recommend),
    ];
    context.eligibility = Some(EligibilityStatus::Eligible);
    context
}

pub(crate) fn scores(entries: &[(DimensionId, f64)]) -> BTreeMap<DimensionId, ComponentScore> {
    entries
        .iter()
        .map(|(dimension, value)| (*dimension, ComponentScore::available(*dimension, *value)))
        .collect()
}

pub(crate) fn strong_scores() -> BTreeMap<DimensionId, ComponentScore> {
    scores(&[
        (DimensionId::Academic, 91.25),
        (DimensionId::Spiritual, 91.8),
        (DimensionId::Character, 87.5),
        (DimensionId::Interview, 87.5),
        (DimensionId::Eligibility, 100.0),
    ])
}

pub(crate) fn weak_scores() -> BTreeMap<DimensionId, ComponentScore> {
    scores(&[
        (DimensionId::Academic, 45.75),
        (DimensionId::Spiritual, 50.0),
        (DimensionId::Character, 44.25),
        (DimensionId::Interview, 47.5),
        (DimensionId::Eligibility, 50.0),
    ])
}

pub(crate) fn application_id(value: &str) -> ApplicationId {
    ApplicationId(value.to_string())
}

pub(crate) fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}

pub(crate) fn build_service() -> (
    AdmissionService<MemoryRepository, MemoryStore>,
    Arc<MemoryRepository>,
    Arc<MemoryStore>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let store = Arc::new(MemoryStore::default());
    let service =
        AdmissionService::new(repository.clone(), store.clone(), EvaluationConfig::default());
    (service, repository, store)
}

pub(crate) fn admission_router_with_service(
    service: AdmissionService<MemoryRepository, MemoryStore>,
) -> axum::Router {
    admission_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(crate) struct MemoryRepository {
    pub(crate) records: Arc<Mutex<HashMap<ApplicationId, ApplicationRecord>>>,
}

impl ApplicantRepository for MemoryRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(record.application_id()) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.application_id().clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.application_id().clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn pending(&self, limit: usize) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut pending: Vec<ApplicationRecord> = guard
            .values()
            .filter(|record| {
                matches!(
                    record.status,
                    ApplicationStatus::Submitted | ApplicationStatus::UnderReview
                )
            })
            .cloned()
            .collect();
        pending.sort_by(|left, right| left.application_id().cmp(right.application_id()));
        pending.truncate(limit);
        Ok(pending)
    }
}

impl MemoryRepository {
    pub(crate) fn status_of(&self, id: &ApplicationId) -> Option<ApplicationStatus> {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .get(id)
            .map(|record| record.status)
    }
}

#[derive(Default, Clone)]
pub(crate) struct MemoryStore {
    saved: Arc<Mutex<Vec<DecisionResult>>>,
}

impl MemoryStore {
    pub(crate) fn saved(&self) -> Vec<DecisionResult> {
        self.saved.lock().expect("store mutex poisoned").clone()
    }
}

impl DecisionStore for MemoryStore {
    fn save(&self, result: &DecisionResult) -> Result<(), RepositoryError> {
        self.saved
            .lock()
            .expect("store mutex poisoned")
            .push(result.clone());
        Ok(())
    }

    fn latest(&self, id: &ApplicationId) -> Result<Option<DecisionResult>, RepositoryError> {
        Ok(self
            .saved
            .lock()
            .expect("store mutex poisoned")
            .iter()
            .rev()
            .find(|result| &result.application_id == id)
            .cloned())
    }
}

pub(crate) struct UnavailableStore;

impl DecisionStore for UnavailableStore {
    fn save(&self, _result: &DecisionResult) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("decision store offline".to_string()))
    }

    fn latest(&self, _id: &ApplicationId) -> Result<Option<DecisionResult>, RepositoryError> {
        Err(RepositoryError::Unavailable("decision store offline".to_string()))
    }
}

pub(crate) struct UnavailableRepository;

impl ApplicantRepository for UnavailableRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: ApplicationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn pending(&self, _limit: usize) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Assessor that blocks its worker thread longer than any test deadline.
pub(crate) struct SlowAssessor {
    pub(crate) dimension: DimensionId,
    pub(crate) delay: Duration,
}

impl ComponentAssessor for SlowAssessor {
    fn dimension(&self) -> DimensionId {
        self.dimension
    }

    fn assess(&self, _context: &ApplicantContext) -> ComponentScore {
        std::thread::sleep(self.delay);
        ComponentScore::available(self.dimension, 99.0)
    }
}

pub(crate) struct PanickingAssessor(pub(crate) DimensionId);

impl ComponentAssessor for PanickingAssessor {
    fn dimension(&self) -> DimensionId {
        self.0
    }

    fn assess(&self, _context: &ApplicantContext) -> ComponentScore {
        panic!("assessor backend crashed");
    }
}

/// Fixed-output assessor registered under any dimension.
pub(crate) struct StaticAssessor {
    pub(crate) dimension: DimensionId,
    pub(crate) value: f64,
}

impl ComponentAssessor for StaticAssessor {
    fn dimension(&self) -> DimensionId {
        self.dimension
    }

    fn assess(&self, _context: &ApplicantContext) -> ComponentScore {
        ComponentScore::available(self.dimension, self.value)
    }
}

pub(crate) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
