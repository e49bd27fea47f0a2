use super::super::domain::{ApplicantContext, ComponentScore, DimensionId};
use super::normalize::{mean, RawScore};
use super::ComponentAssessor;

/// Scores the academic summary.
///
/// GPA is a [`RawScore::Ratio`] over its declared scale and the transcript
/// average is a [`RawScore::Percent`]; the component value is their mean.
pub struct AcademicAssessor;

impl ComponentAssessor for AcademicAssessor {
    fn dimension(&self) -> DimensionId {
        DimensionId::Academic
    }

    fn assess(&self, context: &ApplicantContext) -> ComponentScore {
        let Some(summary) = &context.academic else {
            return ComponentScore::unavailable(self.dimension(), "no academic summary on file");
        };

        let gpa = summary.gpa.map(|gpa| {
            RawScore::Ratio {
                value: gpa,
                max: summary.gpa_scale,
            }
            .normalize()
        });
        let transcript = summary
            .transcript_average
            .map(|average| RawScore::Percent(average).normalize());

        let Some(value) = mean(gpa.into_iter().chain(transcript)) else {
            return ComponentScore::unavailable(
                self.dimension(),
                "academic summary has neither GPA nor transcript average",
            );
        };

        let mut score = ComponentScore::available(self.dimension(), value);
        if let (Some(raw), Some(normalized)) = (summary.gpa, gpa) {
            score = score
                .with_subscore("gpa", normalized)
                .with_evidence(format!("GPA {raw:.2} on a {:.1} scale", summary.gpa_scale));
        }
        if let Some(normalized) = transcript {
            score = score
                .with_subscore("transcript", normalized)
                .with_evidence(format!("transcript average {normalized:.1}%"));
        }
        if summary.completed_credits > 0 {
            score = score.with_evidence(format!(
                "{} credits completed",
                summary.completed_credits
            ));
        }
        score
    }
}
