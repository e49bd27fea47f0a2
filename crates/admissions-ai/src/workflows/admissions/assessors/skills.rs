use super::super::domain::{ApplicantContext, ComponentScore, DimensionId, SkillLevel};
use super::normalize::{mean, CategoricalScale};
use super::ComponentAssessor;

/// `EXPERT -> 100`, `ADVANCED -> 80`, `INTERMEDIATE -> 60`, `BEGINNER -> 35`.
impl CategoricalScale for SkillLevel {
    fn normalized(&self) -> f64 {
        match self {
            SkillLevel::Expert => 100.0,
            SkillLevel::Advanced => 80.0,
            SkillLevel::Intermediate => 60.0,
            SkillLevel::Beginner => 35.0,
        }
    }
}

pub struct SkillsAssessor;

impl ComponentAssessor for SkillsAssessor {
    fn dimension(&self) -> DimensionId {
        DimensionId::Skills
    }

    fn assess(&self, context: &ApplicantContext) -> ComponentScore {
        let Some(value) = mean(context.skills.iter().map(|rating| rating.level.normalized())) else {
            return ComponentScore::unavailable(self.dimension(), "no skills self-assessment");
        };

        context.skills.iter().fold(
            ComponentScore::available(self.dimension(), value),
            |score, rating| {
                score
                    .with_subscore(rating.skill.clone(), rating.level.normalized())
                    .with_evidence(format!("{}: {:?}", rating.skill, rating.level))
            },
        )
    }
}
