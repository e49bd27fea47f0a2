use serde::{Deserialize, Serialize};

use super::domain::{ApplicantContext, ApplicationId, ApplicationStatus};
use super::evaluation::DecisionResult;

/// Repository record holding the applicant context, status, and latest decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub context: ApplicantContext,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub decision: Option<DecisionResult>,
}

impl ApplicationRecord {
    pub fn submitted(context: ApplicantContext) -> Self {
        Self {
            context,
            status: ApplicationStatus::Submitted,
            decision: None,
        }
    }

    pub fn application_id(&self) -> &ApplicationId {
        &self.context.application_id
    }

    pub fn decision_rationale(&self) -> String {
        match &self.decision {
            Some(result) => result.summary(),
            None => "pending evaluation".to_string(),
        }
    }

    pub fn status_view(&self) -> ApplicationStatusView {
        ApplicationStatusView {
            application_id: self.context.application_id.clone(),
            applicant_name: self.context.applicant_name.clone(),
            program: self.context.program.clone(),
            status: self.status.label(),
            decision_rationale: self.decision_rationale(),
            overall_score: self.decision.as_ref().map(|result| result.overall_score),
            confidence: self.decision.as_ref().map(|result| result.confidence),
        }
    }
}

/// Storage abstraction for applicant records.
pub trait ApplicantRepository: Send + Sync {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError>;
    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError>;
    fn pending(&self, limit: usize) -> Result<Vec<ApplicationRecord>, RepositoryError>;
}

/// Decision persistence. Saves are best effort from the service's point of view.
pub trait DecisionStore: Send + Sync {
    fn save(&self, result: &DecisionResult) -> Result<(), RepositoryError>;
    fn latest(&self, id: &ApplicationId) -> Result<Option<DecisionResult>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Sanitized representation of an application's exposed status.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationStatusView {
    pub application_id: ApplicationId,
    pub applicant_name: String,
    pub program: String,
    pub status: &'static str,
    pub decision_rationale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}
