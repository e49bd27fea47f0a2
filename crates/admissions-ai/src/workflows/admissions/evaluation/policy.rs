use serde::{Deserialize, Serialize};

use super::super::domain::DimensionId;
use super::aggregate::Aggregate;
use super::config::{DecisionCriteria, WeightVector};
use super::thresholds::{
    ACCEPTANCE_THRESHOLD, MISSION_RESCUE_THRESHOLD, SOFT_FLOOR, WAITLIST_THRESHOLD,
};

/// Terminal admission tier for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdmissionDecision {
    Accepted,
    ConditionalAcceptance,
    Waitlisted,
    Rejected,
}

impl AdmissionDecision {
    pub const fn label(self) -> &'static str {
        match self {
            AdmissionDecision::Accepted => "accepted",
            AdmissionDecision::ConditionalAcceptance => "conditional acceptance",
            AdmissionDecision::Waitlisted => "waitlisted",
            AdmissionDecision::Rejected => "rejected",
        }
    }
}

/// Which rule of the chain produced the decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum DecisionBasis {
    NoAvailableAssessments,
    MissingRequiredDimensions { dimensions: Vec<DimensionId> },
    MeetsAcceptanceThreshold,
    MeetsAdmissionFloor,
    BelowSoftFloor { dimensions: Vec<DimensionId> },
    MissionAlignmentRescue,
    BelowThresholds { unmet_minimums: Vec<DimensionId> },
}

impl DecisionBasis {
    pub fn summary(&self) -> String {
        match self {
            DecisionBasis::NoAvailableAssessments => "no assessments were available".to_string(),
            DecisionBasis::MissingRequiredDimensions { dimensions } => format!(
                "required assessments missing: {}",
                join_labels(dimensions)
            ),
            DecisionBasis::MeetsAcceptanceThreshold => format!(
                "overall score meets the {ACCEPTANCE_THRESHOLD:.0} acceptance threshold"
            ),
            DecisionBasis::MeetsAdmissionFloor => {
                "overall score meets the admission floor with no dimension below the soft floor"
                    .to_string()
            }
            DecisionBasis::BelowSoftFloor { dimensions } => format!(
                "admission floor met but below {SOFT_FLOOR:.0} in: {}",
                join_labels(dimensions)
            ),
            DecisionBasis::MissionAlignmentRescue => format!(
                "overall score of at least {WAITLIST_THRESHOLD:.0} with mission alignment of at least {MISSION_RESCUE_THRESHOLD:.0}"
            ),
            DecisionBasis::BelowThresholds { unmet_minimums } if unmet_minimums.is_empty() => {
                "overall score below admission thresholds".to_string()
            }
            DecisionBasis::BelowThresholds { unmet_minimums } => format!(
                "dimension minimums not met: {}",
                join_labels(unmet_minimums)
            ),
        }
    }
}

pub(crate) fn join_labels(dimensions: &[DimensionId]) -> String {
    dimensions
        .iter()
        .map(|dimension| dimension.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Ordered rule chain; the first matching rule wins and every bound is inclusive.
///
/// 1. minimums met and overall >= 85: accepted
/// 2. minimums met and overall >= `minimum_overall`: conditional when any
///    dimension sits below the soft floor, accepted otherwise
/// 3. overall >= 65 and mission alignment >= 70: waitlisted, regardless of
///    other weak dimensions
/// 4. rejected
///
/// No available dimension, or a missing required dimension under
/// `require_all_dimensions`, goes straight to rule 4.
pub(crate) fn classify(
    aggregate: &Aggregate,
    weights: &WeightVector,
    criteria: &DecisionCriteria,
) -> (AdmissionDecision, DecisionBasis) {
    if !aggregate.has_evidence() {
        return (
            AdmissionDecision::Rejected,
            DecisionBasis::NoAvailableAssessments,
        );
    }

    let available = &aggregate.available;
    let overall = aggregate.overall;

    if criteria.require_all_dimensions {
        let missing: Vec<DimensionId> = criteria
            .required_dimensions(weights)
            .into_iter()
            .filter(|dimension| !available.contains_key(dimension))
            .collect();
        if !missing.is_empty() {
            return (
                AdmissionDecision::Rejected,
                DecisionBasis::MissingRequiredDimensions { dimensions: missing },
            );
        }
    }

    let unmet_minimums: Vec<DimensionId> = criteria
        .minimum_per_dimension
        .iter()
        .filter(|(dimension, minimum)| {
            available
                .get(*dimension)
                .is_some_and(|value| *value < **minimum)
        })
        .map(|(dimension, _)| *dimension)
        .collect();
    let minimums_met = unmet_minimums.is_empty();

    if minimums_met && overall >= ACCEPTANCE_THRESHOLD.max(criteria.minimum_overall) {
        return (
            AdmissionDecision::Accepted,
            DecisionBasis::MeetsAcceptanceThreshold,
        );
    }

    if minimums_met && overall >= criteria.minimum_overall {
        let below_soft_floor: Vec<DimensionId> = available
            .iter()
            .filter(|(_, value)| **value < SOFT_FLOOR)
            .map(|(dimension, _)| *dimension)
            .collect();
        return if below_soft_floor.is_empty() {
            (AdmissionDecision::Accepted, DecisionBasis::MeetsAdmissionFloor)
        } else {
            (
                AdmissionDecision::ConditionalAcceptance,
                DecisionBasis::BelowSoftFloor {
                    dimensions: below_soft_floor,
                },
            )
        };
    }

    let mission_rescue = available
        .get(&DimensionId::Spiritual)
        .is_some_and(|value| *value >= MISSION_RESCUE_THRESHOLD);
    if overall >= WAITLIST_THRESHOLD && mission_rescue {
        return (
            AdmissionDecision::Waitlisted,
            DecisionBasis::MissionAlignmentRescue,
        );
    }

    (
        AdmissionDecision::Rejected,
        DecisionBasis::BelowThresholds { unmet_minimums },
    )
}
