use super::super::domain::{clamp_score, ApplicantContext, ComponentScore, DimensionId};
use super::normalize::RawScore;
use super::ComponentAssessor;

const EXPERIENCE_BONUS_YEARS: f64 = 2.0;
const EXPERIENCE_BONUS: f64 = 5.0;

/// Scores mission alignment from the statement review.
///
/// The reviewer's 0-10 rating is a [`RawScore::TenPoint`]. Two or more years of
/// ministry experience add a flat bonus, capped at 100.
pub struct SpiritualAssessor;

impl ComponentAssessor for SpiritualAssessor {
    fn dimension(&self) -> DimensionId {
        DimensionId::Spiritual
    }

    fn assess(&self, context: &ApplicantContext) -> ComponentScore {
        let Some(summary) = &context.mission else {
            return ComponentScore::unavailable(
                self.dimension(),
                "mission alignment review not completed",
            );
        };

        let rating = RawScore::TenPoint(summary.alignment_rating).normalize();
        let experienced = summary
            .ministry_experience_years
            .is_some_and(|years| years >= EXPERIENCE_BONUS_YEARS);
        let bonus = if experienced { EXPERIENCE_BONUS } else { 0.0 };

        let mut score = ComponentScore::available(self.dimension(), clamp_score(rating + bonus))
            .with_subscore("alignment_rating", rating)
            .with_evidence(format!(
                "alignment rating {:.1}/10",
                summary.alignment_rating
            ));
        if let Some(years) = summary.ministry_experience_years {
            score = score.with_evidence(format!("{years:.1} years of ministry experience"));
        }
        if !summary.statement_reviewed {
            score = score.with_evidence("statement pending full review");
        }
        score
    }
}
