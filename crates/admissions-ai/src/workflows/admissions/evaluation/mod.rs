mod aggregate;
mod confidence;
mod config;
mod policy;
mod reasoning;
pub mod thresholds;

pub use confidence::ConfidenceAssessment;
pub use config::{
    ConfidencePolicy, DecisionCriteria, EvaluationConfig, WeightVector,
    DEFAULT_ASSESSOR_TIMEOUT_MS, FALLBACK_WEIGHT,
};
pub use policy::{AdmissionDecision, DecisionBasis};

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{ApplicationId, ComponentScore, DimensionId};

/// Stateless evaluator applying the configured policy to a score snapshot.
#[derive(Debug, Clone)]
pub struct EvaluationEngine {
    config: EvaluationConfig,
}

impl EvaluationEngine {
    pub fn new(config: EvaluationConfig) -> Self {
        Self {
            config: config.sanitized(),
        }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Evaluate with the configured weights and criteria.
    pub fn evaluate(
        &self,
        application_id: &ApplicationId,
        scores: &BTreeMap<DimensionId, ComponentScore>,
    ) -> DecisionResult {
        evaluate(
            application_id,
            scores,
            &self.config.weights,
            &self.config.criteria,
            &self.config.confidence,
        )
    }

    /// Evaluate with per-request overrides; absent overrides use the configured policy.
    pub fn evaluate_with(
        &self,
        application_id: &ApplicationId,
        scores: &BTreeMap<DimensionId, ComponentScore>,
        weights: Option<WeightVector>,
        criteria: Option<DecisionCriteria>,
    ) -> DecisionResult {
        let weights = weights.map(WeightVector::sanitized);
        let criteria = criteria.map(DecisionCriteria::sanitized);
        evaluate(
            application_id,
            scores,
            weights.as_ref().unwrap_or(&self.config.weights),
            criteria.as_ref().unwrap_or(&self.config.criteria),
            &self.config.confidence,
        )
    }
}

/// Evaluation output: the decision plus everything needed to explain it.
///
/// Built fresh for each request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionResult {
    pub application_id: ApplicationId,
    pub decision: AdmissionDecision,
    pub basis: DecisionBasis,
    pub overall_score: f64,
    pub component_scores: BTreeMap<DimensionId, f64>,
    pub missing_dimensions: Vec<DimensionId>,
    pub strengths: Vec<String>,
    pub concerns: Vec<String>,
    pub recommendations: Vec<String>,
    pub reasoning: String,
    pub confidence: f64,
}

impl DecisionResult {
    pub fn summary(&self) -> String {
        format!(
            "{} (score {:.1}, confidence {:.0})",
            self.decision.label(),
            self.overall_score,
            self.confidence
        )
    }
}

/// Pure evaluation: aggregate, classify, estimate confidence, explain.
///
/// Scores keyed by dimension; an absent key and an unavailable score are
/// treated the same way. Criteria and confidence policy are sanitized before
/// use. Output depends only on the arguments.
pub fn evaluate(
    application_id: &ApplicationId,
    scores: &BTreeMap<DimensionId, ComponentScore>,
    weights: &WeightVector,
    criteria: &DecisionCriteria,
    confidence_policy: &ConfidencePolicy,
) -> DecisionResult {
    let criteria = &criteria.clone().sanitized();
    let confidence_policy = &confidence_policy.clone().sanitized();

    let aggregate = aggregate::aggregate(scores, weights);
    let (decision, basis) = policy::classify(&aggregate, weights, criteria);
    let confidence = confidence::estimate(&aggregate, criteria, confidence_policy);

    let missing_dimensions: Vec<DimensionId> = scores
        .keys()
        .copied()
        .chain(criteria.required_dimensions(weights))
        .chain(confidence_policy.missing_penalties.keys().copied())
        .filter(|dimension| !aggregate.available.contains_key(dimension))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let reasoning = reasoning::generate(
        decision,
        &basis,
        &aggregate,
        weights,
        &missing_dimensions,
        &confidence,
    );

    debug!(
        application_id = %application_id,
        decision = decision.label(),
        overall = aggregate.overall,
        confidence = confidence.value,
        available = aggregate.available.len(),
        "evaluation complete"
    );

    DecisionResult {
        application_id: application_id.clone(),
        decision,
        basis,
        overall_score: aggregate.overall,
        component_scores: aggregate.available,
        missing_dimensions,
        strengths: reasoning.strengths,
        concerns: reasoning.concerns,
        recommendations: reasoning.recommendations,
        reasoning: reasoning.narrative,
        confidence: confidence.value,
    }
}
