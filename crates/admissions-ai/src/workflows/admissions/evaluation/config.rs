use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::super::domain::{clamp_score, DimensionId};
use super::thresholds::ADMISSION_FLOOR;

/// Weight applied to an available dimension that has no entry in the vector.
pub const FALLBACK_WEIGHT: f64 = 0.05;

pub const DEFAULT_ASSESSOR_TIMEOUT_MS: u64 = 2_000;

/// Per-dimension weights. Weights need not sum to one; the aggregator
/// normalizes over whichever dimensions actually produced a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightVector(BTreeMap<DimensionId, f64>);

impl Default for WeightVector {
    fn default() -> Self {
        Self::empty()
            .with(DimensionId::Spiritual, 0.35)
            .with(DimensionId::Academic, 0.25)
            .with(DimensionId::Character, 0.20)
            .with(DimensionId::Interview, 0.15)
            .with(DimensionId::Eligibility, 0.05)
    }
}

impl WeightVector {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn with(mut self, dimension: DimensionId, weight: f64) -> Self {
        self.0.insert(dimension, weight);
        self
    }

    /// Configured weight, [`FALLBACK_WEIGHT`] when absent, and zero for
    /// negative or non-finite entries.
    pub fn weight_for(&self, dimension: DimensionId) -> f64 {
        match self.0.get(&dimension) {
            Some(weight) => sanitize_weight(*weight),
            None => FALLBACK_WEIGHT,
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (DimensionId, f64)> + '_ {
        self.0.iter().map(|(dimension, weight)| (*dimension, *weight))
    }

    /// Dimensions the vector explicitly asks for.
    pub fn weighted_dimensions(&self) -> impl Iterator<Item = DimensionId> + '_ {
        self.0
            .iter()
            .filter(|(_, weight)| sanitize_weight(**weight) > 0.0)
            .map(|(dimension, _)| *dimension)
    }

    pub fn sanitized(mut self) -> Self {
        for (dimension, weight) in self.0.iter_mut() {
            let cleaned = sanitize_weight(*weight);
            if cleaned != *weight {
                warn!(%dimension, weight = *weight, "replacing invalid weight with 0");
                *weight = cleaned;
            }
        }
        self
    }
}

fn sanitize_weight(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

/// Admission thresholds. All bounds are inclusive (`score >= threshold` passes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionCriteria {
    pub minimum_overall: f64,
    pub minimum_per_dimension: BTreeMap<DimensionId, f64>,
    pub require_all_dimensions: bool,
}

impl Default for DecisionCriteria {
    fn default() -> Self {
        let mut minimum_per_dimension = BTreeMap::new();
        minimum_per_dimension.insert(DimensionId::Academic, 50.0);
        minimum_per_dimension.insert(DimensionId::Spiritual, 50.0);

        Self {
            minimum_overall: ADMISSION_FLOOR,
            minimum_per_dimension,
            require_all_dimensions: false,
        }
    }
}

impl DecisionCriteria {
    /// Dimensions that must be present when `require_all_dimensions` is set:
    /// every positively weighted dimension plus every dimension with a minimum.
    pub fn required_dimensions(&self, weights: &WeightVector) -> BTreeSet<DimensionId> {
        weights
            .weighted_dimensions()
            .chain(self.minimum_per_dimension.keys().copied())
            .collect()
    }

    pub fn sanitized(mut self) -> Self {
        let minimum_overall = clamp_score(self.minimum_overall);
        if minimum_overall != self.minimum_overall {
            warn!(
                configured = self.minimum_overall,
                applied = minimum_overall,
                "minimum_overall out of range"
            );
            self.minimum_overall = minimum_overall;
        }
        for (dimension, minimum) in self.minimum_per_dimension.iter_mut() {
            let cleaned = clamp_score(*minimum);
            if cleaned != *minimum {
                warn!(%dimension, configured = *minimum, applied = cleaned, "dimension minimum out of range");
                *minimum = cleaned;
            }
        }
        self
    }
}

/// Penalties applied by the confidence estimator. All magnitudes are additive
/// and independent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidencePolicy {
    pub missing_penalties: BTreeMap<DimensionId, f64>,
    pub variance_threshold: f64,
    pub variance_penalty: f64,
    pub borderline_band: f64,
    pub borderline_penalty: f64,
}

impl Default for ConfidencePolicy {
    fn default() -> Self {
        let mut missing_penalties = BTreeMap::new();
        missing_penalties.insert(DimensionId::Academic, 20.0);
        missing_penalties.insert(DimensionId::Spiritual, 15.0);
        missing_penalties.insert(DimensionId::Interview, 15.0);
        missing_penalties.insert(DimensionId::Eligibility, 10.0);
        missing_penalties.insert(DimensionId::Character, 10.0);

        Self {
            missing_penalties,
            variance_threshold: 225.0,
            variance_penalty: 10.0,
            borderline_band: 5.0,
            borderline_penalty: 5.0,
        }
    }
}

impl ConfidencePolicy {
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        for (dimension, penalty) in self.missing_penalties.iter_mut() {
            if !penalty.is_finite() || *penalty < 0.0 {
                warn!(%dimension, penalty = *penalty, "ignoring invalid missing-input penalty");
                *penalty = 0.0;
            }
        }
        self.variance_threshold = non_negative_or(
            "variance_threshold",
            self.variance_threshold,
            defaults.variance_threshold,
        );
        self.variance_penalty = non_negative_or(
            "variance_penalty",
            self.variance_penalty,
            defaults.variance_penalty,
        );
        self.borderline_band = non_negative_or(
            "borderline_band",
            self.borderline_band,
            defaults.borderline_band,
        );
        self.borderline_penalty = non_negative_or(
            "borderline_penalty",
            self.borderline_penalty,
            defaults.borderline_penalty,
        );
        self
    }
}

fn non_negative_or(field: &'static str, value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        warn!(field, value, fallback, "confidence setting invalid, using default");
        fallback
    }
}

/// Deployment policy for the evaluation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    pub weights: WeightVector,
    pub criteria: DecisionCriteria,
    pub confidence: ConfidencePolicy,
    pub assessor_timeout_ms: u64,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            weights: WeightVector::default(),
            criteria: DecisionCriteria::default(),
            confidence: ConfidencePolicy::default(),
            assessor_timeout_ms: DEFAULT_ASSESSOR_TIMEOUT_MS,
        }
    }
}

impl EvaluationConfig {
    pub fn sanitized(self) -> Self {
        let assessor_timeout_ms = if self.assessor_timeout_ms == 0 {
            warn!("assessor timeout of 0 ms would mark every assessment unavailable; using default");
            DEFAULT_ASSESSOR_TIMEOUT_MS
        } else {
            self.assessor_timeout_ms
        };

        Self {
            weights: self.weights.sanitized(),
            criteria: self.criteria.sanitized(),
            confidence: self.confidence.sanitized(),
            assessor_timeout_ms,
        }
    }
}
