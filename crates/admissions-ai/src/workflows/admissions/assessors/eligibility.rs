use super::super::domain::{ApplicantContext, ComponentScore, DimensionId, EligibilityStatus};
use super::normalize::CategoricalScale;
use super::ComponentAssessor;

/// `ELIGIBLE -> 100`, `CONDITIONALLY_ELIGIBLE -> 75`, `PENDING_REVIEW -> 50`, `INELIGIBLE -> 0`.
impl CategoricalScale for EligibilityStatus {
    fn normalized(&self) -> f64 {
        match self {
            EligibilityStatus::Eligible => 100.0,
            EligibilityStatus::ConditionallyEligible => 75.0,
            EligibilityStatus::PendingReview => 50.0,
            EligibilityStatus::Ineligible => 0.0,
        }
    }
}

/// Maps the eligibility gate result onto 0-100.
pub struct EligibilityAssessor;

impl ComponentAssessor for EligibilityAssessor {
    fn dimension(&self) -> DimensionId {
        DimensionId::Eligibility
    }

    fn assess(&self, context: &ApplicantContext) -> ComponentScore {
        match context.eligibility {
            Some(status) => ComponentScore::available(self.dimension(), status.normalized())
                .with_evidence(format!("eligibility gate returned {status:?}")),
            None => ComponentScore::unavailable(self.dimension(), "eligibility gate has not run"),
        }
    }
}
