use super::super::domain::{ApplicantContext, ComponentScore, CredentialStatus, DimensionId};
use super::normalize::{mean, CategoricalScale, RawScore};
use super::ComponentAssessor;

/// `VERIFIED -> 100`, `PENDING_VERIFICATION -> 50`, `REJECTED -> 0`.
impl CategoricalScale for CredentialStatus {
    fn normalized(&self) -> f64 {
        match self {
            CredentialStatus::Verified => 100.0,
            CredentialStatus::PendingVerification => 50.0,
            CredentialStatus::Rejected => 0.0,
        }
    }
}

/// Averages credential statuses, each discounted by its authenticity
/// probability ([`RawScore::Fraction`]) when the checks reported one.
pub struct CredentialAssessor;

impl ComponentAssessor for CredentialAssessor {
    fn dimension(&self) -> DimensionId {
        DimensionId::Credential
    }

    fn assess(&self, context: &ApplicantContext) -> ComponentScore {
        let per_credential: Vec<f64> = context
            .credentials
            .iter()
            .map(|credential| {
                let authenticity = credential
                    .authenticity
                    .map(|probability| RawScore::Fraction(probability).normalize() / 100.0)
                    .unwrap_or(1.0);
                credential.status.normalized() * authenticity
            })
            .collect();

        let Some(value) = mean(per_credential.iter().copied()) else {
            return ComponentScore::unavailable(self.dimension(), "no credentials submitted");
        };

        let verified = context
            .credentials
            .iter()
            .filter(|credential| credential.status == CredentialStatus::Verified)
            .count();

        let mut score = ComponentScore::available(self.dimension(), value)
            .with_subscore("verified_count", verified as f64);
        for (credential, credential_score) in context.credentials.iter().zip(&per_credential) {
            score = score.with_evidence(format!(
                "{}: {:?} ({credential_score:.0})",
                credential.name, credential.status
            ));
        }
        score
    }
}
