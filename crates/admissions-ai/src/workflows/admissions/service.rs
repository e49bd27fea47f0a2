use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use super::assessors::AssessorRegistry;
use super::domain::{ApplicantContext, ApplicationId, ApplicationStatus, ComponentScore, DimensionId};
use super::evaluation::{
    AdmissionDecision, DecisionBasis, DecisionCriteria, DecisionResult, EvaluationConfig,
    EvaluationEngine, WeightVector,
};
use super::pipeline::AssessmentPipeline;
use super::repository::{ApplicantRepository, ApplicationRecord, DecisionStore, RepositoryError};

/// Service composing the applicant repository, decision store, assessor
/// pipeline, and evaluation engine.
pub struct AdmissionService<R, S> {
    repository: Arc<R>,
    store: Arc<S>,
    engine: Arc<EvaluationEngine>,
    pipeline: AssessmentPipeline,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("adm-{id:06}"))
}

impl<R, S> AdmissionService<R, S>
where
    R: ApplicantRepository + 'static,
    S: DecisionStore + 'static,
{
    pub fn new(repository: Arc<R>, store: Arc<S>, config: EvaluationConfig) -> Self {
        Self::with_registry(repository, store, config, AssessorRegistry::standard())
    }

    pub fn with_registry(
        repository: Arc<R>,
        store: Arc<S>,
        config: EvaluationConfig,
        registry: AssessorRegistry,
    ) -> Self {
        let engine = EvaluationEngine::new(config);
        let timeout = Duration::from_millis(engine.config().assessor_timeout_ms);
        let pipeline = AssessmentPipeline::new(Arc::new(registry), timeout);

        Self {
            repository,
            store,
            engine: Arc::new(engine),
            pipeline,
        }
    }

    pub fn engine(&self) -> &EvaluationEngine {
        &self.engine
    }

    /// Register a new applicant, returning the repository-backed record.
    pub fn submit(
        &self,
        mut context: ApplicantContext,
    ) -> Result<ApplicationRecord, AdmissionServiceError> {
        context.application_id = next_application_id();
        let stored = self.repository.insert(ApplicationRecord::submitted(context))?;
        info!(application_id = %stored.application_id(), "application submitted");
        Ok(stored)
    }

    /// Evaluate precomputed component scores for a known application.
    ///
    /// Absent `weights` or `criteria` fall back to the configured policy. The
    /// result is persisted best effort and returned even when persistence fails.
    pub fn evaluate_scores(
        &self,
        application_id: &ApplicationId,
        scores: &BTreeMap<DimensionId, ComponentScore>,
        weights: Option<WeightVector>,
        criteria: Option<DecisionCriteria>,
    ) -> Result<DecisionResult, AdmissionServiceError> {
        let record = self.fetch_record(application_id)?;
        let result = self
            .engine
            .evaluate_with(application_id, scores, weights, criteria);
        self.persist(record, &result);
        Ok(result)
    }

    /// Run every registered assessor against the stored context, then evaluate.
    pub async fn evaluate_application(
        &self,
        application_id: &ApplicationId,
    ) -> Result<DecisionResult, AdmissionServiceError> {
        let record = self.fetch_record(application_id)?;
        let scores = self.pipeline.run(Arc::new(record.context.clone())).await;
        let result = self.engine.evaluate(application_id, &scores);
        self.persist(record, &result);
        Ok(result)
    }

    /// Fetch an application and current status for API responses.
    pub fn get(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ApplicationRecord, AdmissionServiceError> {
        self.fetch_record(application_id)
    }

    pub fn latest_decision(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Option<DecisionResult>, AdmissionServiceError> {
        Ok(self.store.latest(application_id)?)
    }

    pub fn pending(&self, limit: usize) -> Result<Vec<ApplicationRecord>, AdmissionServiceError> {
        Ok(self.repository.pending(limit)?)
    }

    fn fetch_record(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ApplicationRecord, AdmissionServiceError> {
        match self.repository.fetch(application_id) {
            Ok(Some(record)) => Ok(record),
            Ok(None) | Err(RepositoryError::NotFound) => {
                Err(AdmissionServiceError::NotFound(application_id.clone()))
            }
            Err(other) => Err(other.into()),
        }
    }

    fn persist(&self, mut record: ApplicationRecord, result: &DecisionResult) {
        info!(
            application_id = %result.application_id,
            decision = result.decision.label(),
            overall = result.overall_score,
            confidence = result.confidence,
            "admission decision produced"
        );

        if let Err(error) = self.store.save(result) {
            warn!(application_id = %result.application_id, %error, "failed to persist decision");
        }

        record.status = status_for(result);
        record.decision = Some(result.clone());
        if let Err(error) = self.repository.update(record) {
            warn!(application_id = %result.application_id, %error, "failed to update application status");
        }
    }
}

/// Rejections caused by absent evidence keep the application open for review.
fn status_for(result: &DecisionResult) -> ApplicationStatus {
    match (result.decision, &result.basis) {
        (AdmissionDecision::Accepted, _) => ApplicationStatus::Accepted,
        (AdmissionDecision::ConditionalAcceptance, _) => ApplicationStatus::ConditionallyAccepted,
        (AdmissionDecision::Waitlisted, _) => ApplicationStatus::Waitlisted,
        (
            AdmissionDecision::Rejected,
            DecisionBasis::NoAvailableAssessments | DecisionBasis::MissingRequiredDimensions { .. },
        ) => ApplicationStatus::UnderReview,
        (AdmissionDecision::Rejected, _) => ApplicationStatus::Rejected,
    }
}

/// Error raised by the admission service.
#[derive(Debug, thiserror::Error)]
pub enum AdmissionServiceError {
    #[error("application {0} not found")]
    NotFound(ApplicationId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
