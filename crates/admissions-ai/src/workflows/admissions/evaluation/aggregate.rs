use std::collections::BTreeMap;

use tracing::warn;

use super::super::domain::{clamp_score, ComponentScore, DimensionId};
use super::config::WeightVector;

/// Weighted combination of the available component scores.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Aggregate {
    pub overall: f64,
    /// Clamped values of the dimensions that produced a score, keyed by dimension.
    pub available: BTreeMap<DimensionId, f64>,
}

impl Aggregate {
    pub fn has_evidence(&self) -> bool {
        !self.available.is_empty()
    }
}

/// Weighted mean over available dimensions only.
///
/// Unavailable dimensions drop out of both numerator and denominator, so the
/// weights are effectively renormalized over what was actually assessed.
/// Missingness is penalized by the confidence estimator, not here.
pub(crate) fn aggregate(
    scores: &BTreeMap<DimensionId, ComponentScore>,
    weights: &WeightVector,
) -> Aggregate {
    let available: BTreeMap<DimensionId, f64> = scores
        .iter()
        .filter_map(|(dimension, score)| score.effective_value().map(|value| (*dimension, value)))
        .collect();

    if available.is_empty() {
        return Aggregate {
            overall: 0.0,
            available,
        };
    }

    // Weights are scaled by the largest one so huge finite weights cannot overflow.
    let max_weight = available
        .keys()
        .map(|dimension| weights.weight_for(*dimension))
        .fold(0.0, f64::max);

    let overall = if max_weight > 0.0 {
        let (numerator, denominator) =
            available
                .iter()
                .fold((0.0, 0.0), |(numerator, denominator), (dimension, value)| {
                    let weight = weights.weight_for(*dimension) / max_weight;
                    (numerator + weight * value, denominator + weight)
                });
        numerator / denominator
    } else {
        warn!(
            dimensions = available.len(),
            "every available dimension carries zero weight; using unweighted mean"
        );
        available.values().sum::<f64>() / available.len() as f64
    };

    Aggregate {
        overall: clamp_score(overall),
        available,
    }
}

/// Population variance; `None` with fewer than two values.
pub(crate) fn population_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    Some(
        values
            .iter()
            .map(|value| (value - mean).powi(2))
            .sum::<f64>()
            / count,
    )
}
