use super::super::domain::{ApplicantContext, ComponentScore, DimensionId};
use super::normalize::RawScore;
use super::ComponentAssessor;

const INDEX_WEIGHT: f64 = 0.7;
const MILESTONE_WEIGHT: f64 = 0.3;

/// Blends the readiness index ([`RawScore::Fraction`]) with milestone
/// completion ([`RawScore::Ratio`]) at 70/30 when milestones are tracked.
pub struct ReadinessAssessor;

impl ComponentAssessor for ReadinessAssessor {
    fn dimension(&self) -> DimensionId {
        DimensionId::Readiness
    }

    fn assess(&self, context: &ApplicantContext) -> ComponentScore {
        let Some(summary) = &context.readiness else {
            return ComponentScore::unavailable(self.dimension(), "readiness estimate missing");
        };

        let index = RawScore::Fraction(summary.readiness_index).normalize();
        if summary.milestones_total == 0 {
            return ComponentScore::available(self.dimension(), index)
                .with_subscore("index", index)
                .with_evidence(format!("readiness index {:.2}", summary.readiness_index));
        }

        let milestones = RawScore::Ratio {
            value: f64::from(summary.milestones_completed),
            max: f64::from(summary.milestones_total),
        }
        .normalize();

        ComponentScore::available(
            self.dimension(),
            index * INDEX_WEIGHT + milestones * MILESTONE_WEIGHT,
        )
        .with_subscore("index", index)
        .with_subscore("milestones", milestones)
        .with_evidence(format!("readiness index {:.2}", summary.readiness_index))
        .with_evidence(format!(
            "{}/{} milestones complete",
            summary.milestones_completed, summary.milestones_total
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::admissions::domain::ReadinessSummary;
    use crate::workflows::admissions::tests::common::bare_context;

    #[test]
    fn blends_index_and_milestones() {
        let mut context = bare_context("readiness");
        context.readiness = Some(ReadinessSummary {
            readiness_index: 0.5,
            milestones_completed: 4,
            milestones_total: 4,
        });

        let score = ReadinessAssessor.assess(&context);

        assert!((score.value - 65.0).abs() < 1e-9);
        assert_eq!(score.subscores.get("milestones"), Some(&100.0));
    }
}
