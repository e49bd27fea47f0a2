use serde::{Deserialize, Serialize};

use super::super::domain::DimensionId;
use super::aggregate::{population_variance, Aggregate};
use super::config::{ConfidencePolicy, DecisionCriteria};
use super::thresholds::{CONFIDENCE_CEILING, CONFIDENCE_FLOOR};

/// Confidence value together with the penalties that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceAssessment {
    pub value: f64,
    pub missing_inputs: Vec<DimensionId>,
    pub missing_penalty: f64,
    pub variance: Option<f64>,
    pub variance_penalty: f64,
    pub borderline_penalty: f64,
}

/// Start from full confidence and subtract, independently:
/// a penalty per missing input category, a penalty when the available scores
/// disagree (variance above threshold), and a penalty when the overall score
/// sits in the borderline band around the admission floor. Never below
/// [`CONFIDENCE_FLOOR`].
pub(crate) fn estimate(
    aggregate: &Aggregate,
    criteria: &DecisionCriteria,
    policy: &ConfidencePolicy,
) -> ConfidenceAssessment {
    let mut missing_inputs = Vec::new();
    let mut missing_penalty = 0.0;
    for (dimension, penalty) in &policy.missing_penalties {
        if !aggregate.available.contains_key(dimension) {
            missing_inputs.push(*dimension);
            missing_penalty += penalty.max(0.0);
        }
    }

    let values: Vec<f64> = aggregate.available.values().copied().collect();
    let variance = population_variance(&values);
    let variance_penalty = match variance {
        Some(variance) if variance > policy.variance_threshold => policy.variance_penalty,
        _ => 0.0,
    };

    let borderline = aggregate.has_evidence()
        && (aggregate.overall - criteria.minimum_overall).abs() <= policy.borderline_band;
    let borderline_penalty = if borderline {
        policy.borderline_penalty
    } else {
        0.0
    };

    let value = bounded_confidence(
        CONFIDENCE_CEILING - missing_penalty - variance_penalty - borderline_penalty,
    );

    ConfidenceAssessment {
        value,
        missing_inputs,
        missing_penalty,
        variance,
        variance_penalty,
        borderline_penalty,
    }
}

/// Clamp onto [`CONFIDENCE_FLOOR`, `CONFIDENCE_CEILING`]. NaN collapses to the floor.
fn bounded_confidence(raw: f64) -> f64 {
    if raw.is_nan() {
        CONFIDENCE_FLOOR
    } else {
        raw.clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEILING)
    }
}
