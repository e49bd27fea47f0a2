use super::super::domain::DimensionId;
use super::aggregate::Aggregate;
use super::confidence::ConfidenceAssessment;
use super::config::WeightVector;
use super::policy::{join_labels, AdmissionDecision, DecisionBasis};
use super::thresholds::{SOFT_FLOOR, STRENGTH_THRESHOLD};

pub(crate) struct Reasoning {
    pub strengths: Vec<String>,
    pub concerns: Vec<String>,
    pub recommendations: Vec<String>,
    pub narrative: String,
}

pub(crate) fn generate(
    decision: AdmissionDecision,
    basis: &DecisionBasis,
    aggregate: &Aggregate,
    weights: &WeightVector,
    missing: &[DimensionId],
    confidence: &ConfidenceAssessment,
) -> Reasoning {
    let strengths: Vec<String> = aggregate
        .available
        .iter()
        .filter(|(_, value)| **value >= STRENGTH_THRESHOLD)
        .map(|(dimension, value)| format!("{}: {value:.1}", dimension.display_name()))
        .collect();

    let concern_dimensions: Vec<DimensionId> = aggregate
        .available
        .iter()
        .filter(|(_, value)| **value < SOFT_FLOOR)
        .map(|(dimension, _)| *dimension)
        .collect();
    let concerns: Vec<String> = concern_dimensions
        .iter()
        .map(|dimension| {
            format!(
                "{}: {:.1} is below {SOFT_FLOOR:.0}",
                dimension.display_name(),
                aggregate.available[dimension]
            )
        })
        .collect();

    let mut recommendations = vec![decision_recommendation(decision, basis)];
    recommendations.extend(concern_dimensions.iter().map(|dimension| {
        format!(
            "Request supporting material addressing {}",
            dimension.display_name().to_lowercase()
        )
    }));
    recommendations.extend(missing.iter().map(|dimension| {
        format!(
            "Complete the {} assessment and re-evaluate",
            dimension.label()
        )
    }));

    let narrative = narrative(decision, basis, aggregate, weights, missing, confidence);

    Reasoning {
        strengths,
        concerns,
        recommendations,
        narrative,
    }
}

fn decision_recommendation(decision: AdmissionDecision, basis: &DecisionBasis) -> String {
    match (decision, basis) {
        (AdmissionDecision::Accepted, _) => "Issue an admission offer".to_string(),
        (AdmissionDecision::ConditionalAcceptance, DecisionBasis::BelowSoftFloor { dimensions }) => {
            format!(
                "Issue a conditional offer contingent on improvement in {}",
                join_labels(dimensions)
            )
        }
        (AdmissionDecision::ConditionalAcceptance, _) => "Issue a conditional offer".to_string(),
        (AdmissionDecision::Waitlisted, _) => {
            "Place on the waitlist and reconsider as seats open".to_string()
        }
        (AdmissionDecision::Rejected, DecisionBasis::NoAvailableAssessments) => {
            "Collect assessments before issuing a final decision".to_string()
        }
        (AdmissionDecision::Rejected, DecisionBasis::MissingRequiredDimensions { .. }) => {
            "Hold the decline until required assessments are complete".to_string()
        }
        (AdmissionDecision::Rejected, _) => "Send a decline notice".to_string(),
    }
}

fn narrative(
    decision: AdmissionDecision,
    basis: &DecisionBasis,
    aggregate: &Aggregate,
    weights: &WeightVector,
    missing: &[DimensionId],
    confidence: &ConfidenceAssessment,
) -> String {
    let mut text = format!(
        "Decision: {} ({}). Overall score {:.2} from {} assessment(s)",
        decision.label(),
        basis.summary(),
        aggregate.overall,
        aggregate.available.len()
    );

    if aggregate.has_evidence() {
        let breakdown = aggregate
            .available
            .iter()
            .map(|(dimension, value)| {
                format!(
                    "{} {value:.2} (weight {:.2})",
                    dimension.label(),
                    weights.weight_for(*dimension)
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        text.push_str(&format!(": {breakdown}"));
    }
    text.push('.');

    if !missing.is_empty() {
        text.push_str(&format!(" Missing: {}.", join_labels(missing)));
    }

    text.push_str(&format!(" Confidence {:.0}", confidence.value));
    let mut adjustments = Vec::new();
    if confidence.missing_penalty > 0.0 {
        adjustments.push(format!("-{:.0} missing inputs", confidence.missing_penalty));
    }
    if confidence.variance_penalty > 0.0 {
        adjustments.push(format!("-{:.0} score disagreement", confidence.variance_penalty));
    }
    if confidence.borderline_penalty > 0.0 {
        adjustments.push(format!("-{:.0} borderline score", confidence.borderline_penalty));
    }
    if !adjustments.is_empty() {
        text.push_str(&format!(" ({})", adjustments.join(", ")));
    }
    text.push('.');
    text
}
