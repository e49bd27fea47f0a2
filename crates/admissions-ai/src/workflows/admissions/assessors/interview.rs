use super::super::domain::{ApplicantContext, ComponentScore, DimensionId, InterviewRecommendation};
use super::normalize::{mean, CategoricalScale};
use super::ComponentAssessor;

/// Recommendation table, aligned with the eligibility table:
/// `STRONGLY_RECOMMEND -> 100`, `RECOMMEND -> 75`,
/// `RECOMMEND_WITH_RESERVATIONS -> 50`, `DO_NOT_RECOMMEND -> 0`.
impl CategoricalScale for InterviewRecommendation {
    fn normalized(&self) -> f64 {
        match self {
            InterviewRecommendation::StronglyRecommend => 100.0,
            InterviewRecommendation::Recommend => 75.0,
            InterviewRecommendation::RecommendWithReservations => 50.0,
            InterviewRecommendation::DoNotRecommend => 0.0,
        }
    }
}

/// Averages every interview record's mapped recommendation.
pub struct InterviewAssessor;

impl ComponentAssessor for InterviewAssessor {
    fn dimension(&self) -> DimensionId {
        DimensionId::Interview
    }

    fn assess(&self, context: &ApplicantContext) -> ComponentScore {
        let Some(value) = mean(
            context
                .interviews
                .iter()
                .map(|record| record.recommendation.normalized()),
        ) else {
            return ComponentScore::unavailable(self.dimension(), "no interview records");
        };

        let mut score = ComponentScore::available(self.dimension(), value)
            .with_subscore("interview_count", context.interviews.len() as f64);
        for record in &context.interviews {
            score = score.with_evidence(format!(
                "{} on {}: {:?}",
                record.interviewer, record.conducted_on, record.recommendation
            ));
        }
        score
    }
}
