use super::super::domain::{ApplicantContext, ComponentScore, DimensionId};
use super::normalize::{mean, RawScore};
use super::ComponentAssessor;

/// Averages referee ratings, each a [`RawScore::FivePoint`].
pub struct CharacterAssessor;

impl ComponentAssessor for CharacterAssessor {
    fn dimension(&self) -> DimensionId {
        DimensionId::Character
    }

    fn assess(&self, context: &ApplicantContext) -> ComponentScore {
        let ratings = context
            .character_references
            .iter()
            .map(|reference| RawScore::FivePoint(reference.rating).normalize());

        let Some(value) = mean(ratings) else {
            return ComponentScore::unavailable(self.dimension(), "no character references received");
        };

        context.character_references.iter().fold(
            ComponentScore::available(self.dimension(), value)
                .with_subscore("reference_count", context.character_references.len() as f64),
            |score, reference| {
                score.with_evidence(format!(
                    "{} ({}) rated {:.1}/5",
                    reference.referee, reference.relationship, reference.rating
                ))
            },
        )
    }
}
