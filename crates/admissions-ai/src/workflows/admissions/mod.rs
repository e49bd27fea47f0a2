//! Admission evaluation: component assessors, weighted aggregation, the
//! decision rule chain, confidence estimation, and explainable reasoning.
//!
//! [`evaluation::evaluate`] is the pure core. [`AdmissionService`] wraps it
//! with applicant records, concurrent assessor fan-out, and best-effort
//! decision persistence.

pub mod assessors;
pub mod domain;
pub mod evaluation;
pub mod import;
pub mod pipeline;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
pub(crate) mod tests;

pub use assessors::{AssessorRegistry, ComponentAssessor};
pub use domain::{
    AcademicSummary, ApplicantContext, ApplicationId, ApplicationStatus, CharacterReference,
    ComponentScore, CredentialRecord, CredentialStatus, DimensionId, EligibilityStatus,
    InterviewRecommendation, InterviewRecord, MissionAlignmentSummary, ReadinessSummary,
    SkillLevel, SkillRating,
};
pub use evaluation::{
    evaluate, AdmissionDecision, ConfidencePolicy, DecisionBasis, DecisionCriteria,
    DecisionResult, EvaluationConfig, EvaluationEngine, WeightVector,
};
pub use import::{ScoreImportError, ScoreSheet, ScoreSheetImporter};
pub use pipeline::AssessmentPipeline;
pub use repository::{
    ApplicantRepository, ApplicationRecord, ApplicationStatusView, DecisionStore,
    RepositoryError,
};
pub use router::{admission_router, DecisionRequest};
pub use service::{AdmissionService, AdmissionServiceError};
