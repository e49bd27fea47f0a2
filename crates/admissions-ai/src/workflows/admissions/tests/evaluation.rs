use std::collections::BTreeMap;

use super::common::*;
use crate::workflows::admissions::domain::{ComponentScore, DimensionId};
use crate::workflows::admissions::evaluation::{
    evaluate, AdmissionDecision, ConfidencePolicy, DecisionBasis, DecisionCriteria,
    EvaluationConfig, EvaluationEngine, WeightVector,
};

fn engine() -> EvaluationEngine {
    EvaluationEngine::new(EvaluationConfig::default())
}

#[test]
fn strong_applicant_is_accepted_with_full_confidence() {
    let result = engine().evaluate(&application_id("adm-strong"), &strong_scores());

    assert_close(result.overall_score, 90.5675, 1e-6);
    assert_eq!(result.decision, AdmissionDecision::Accepted);
    assert_eq!(result.basis, DecisionBasis::MeetsAcceptanceThreshold);
    assert_eq!(result.confidence, 100.0);
    assert!(result.missing_dimensions.is_empty());
    assert_eq!(result.strengths.len(), 5);
    assert!(result.concerns.is_empty());
    assert_eq!(result.recommendations[0], "Issue an admission offer");
}

#[test]
fn weak_applicant_is_rejected_with_concerns_everywhere() {
    let result = engine().evaluate(&application_id("adm-weak"), &weak_scores());

    assert_close(result.overall_score, 47.6, 0.5);
    assert_eq!(result.decision, AdmissionDecision::Rejected);
    assert_eq!(
        result.basis,
        DecisionBasis::BelowThresholds {
            unmet_minimums: vec![DimensionId::Academic],
        }
    );
    assert_eq!(result.concerns.len(), 5);
    assert!(result.strengths.is_empty());
    assert_eq!(result.recommendations[0], "Send a decline notice");
}

#[test]
fn single_dimension_renormalizes_and_penalizes_confidence() {
    let result = engine().evaluate(
        &application_id("adm-spiritual-only"),
        &scores(&[(DimensionId::Spiritual, 75.0)]),
    );

    assert_close(result.overall_score, 75.0, 1e-9);
    assert_eq!(result.decision, AdmissionDecision::Accepted);
    assert_eq!(result.basis, DecisionBasis::MeetsAdmissionFloor);
    assert_eq!(result.confidence, 50.0);
    assert_eq!(
        result.missing_dimensions,
        vec![
            DimensionId::Academic,
            DimensionId::Character,
            DimensionId::Interview,
            DimensionId::Eligibility,
        ]
    );
    assert!(result
        .recommendations
        .iter()
        .any(|line| line == "Complete the academic assessment and re-evaluate"));
    assert!(result
        .reasoning
        .contains("Missing: academic, character, interview, eligibility."));
}

#[test]
fn no_available_scores_reject_at_confidence_floor() {
    let mut unavailable = scores(&[]);
    unavailable.insert(
        DimensionId::Interview,
        ComponentScore::unavailable(DimensionId::Interview, "panel cancelled"),
    );

    let result = engine().evaluate(&application_id("adm-empty"), &unavailable);

    assert_eq!(result.overall_score, 0.0);
    assert_eq!(result.decision, AdmissionDecision::Rejected);
    assert_eq!(result.basis, DecisionBasis::NoAvailableAssessments);
    assert_eq!(result.confidence, 50.0);
    assert!(result.component_scores.is_empty());
    assert!(result.missing_dimensions.contains(&DimensionId::Interview));
    assert!(!result.reasoning.contains("Overall score 0.00 from 0 assessment(s):"));
}

#[test]
fn acceptance_threshold_is_inclusive() {
    let at_threshold = engine().evaluate(
        &application_id("adm-85"),
        &scores(&[(DimensionId::Academic, 85.0)]),
    );
    assert_eq!(at_threshold.decision, AdmissionDecision::Accepted);
    assert_eq!(at_threshold.basis, DecisionBasis::MeetsAcceptanceThreshold);

    let just_below = engine().evaluate(
        &application_id("adm-84"),
        &scores(&[(DimensionId::Academic, 84.999)]),
    );
    assert_eq!(just_below.decision, AdmissionDecision::Accepted);
    assert_eq!(just_below.basis, DecisionBasis::MeetsAdmissionFloor);
}

#[test]
fn weak_dimension_above_floor_gives_conditional_acceptance() {
    let result = engine().evaluate(
        &application_id("adm-conditional"),
        &scores(&[
            (DimensionId::Academic, 90.0),
            (DimensionId::Spiritual, 90.0),
            (DimensionId::Character, 55.0),
        ]),
    );

    assert_close(result.overall_score, 81.25, 1e-9);
    assert_eq!(result.decision, AdmissionDecision::ConditionalAcceptance);
    assert_eq!(
        result.basis,
        DecisionBasis::BelowSoftFloor {
            dimensions: vec![DimensionId::Character],
        }
    );
    assert!(result.recommendations[0].contains("character"));
}

#[test]
fn mission_alignment_rescues_to_waitlist() {
    let result = engine().evaluate(
        &application_id("adm-waitlist"),
        &scores(&[
            (DimensionId::Academic, 55.0),
            (DimensionId::Spiritual, 80.0),
            (DimensionId::Character, 55.0),
        ]),
    );

    assert_close(result.overall_score, 65.9375, 1e-9);
    assert_eq!(result.decision, AdmissionDecision::Waitlisted);
    assert_eq!(result.basis, DecisionBasis::MissionAlignmentRescue);
}

#[test]
fn mission_rescue_applies_even_when_a_minimum_is_missed() {
    let result = engine().evaluate(
        &application_id("adm-rescue"),
        &scores(&[(DimensionId::Academic, 40.0), (DimensionId::Spiritual, 90.0)]),
    );

    assert!(result.overall_score >= 65.0);
    assert_eq!(result.decision, AdmissionDecision::Waitlisted);
}

#[test]
fn out_of_range_inputs_are_clamped() {
    let mut inflated = scores(&[]);
    inflated.insert(
        DimensionId::Academic,
        ComponentScore {
            dimension: DimensionId::Academic,
            value: 150.0,
            subscores: Default::default(),
            evidence: Vec::new(),
            available: true,
        },
    );
    inflated.insert(
        DimensionId::Spiritual,
        ComponentScore {
            dimension: DimensionId::Spiritual,
            value: f64::NAN,
            subscores: Default::default(),
            evidence: Vec::new(),
            available: true,
        },
    );

    let result = engine().evaluate(&application_id("adm-clamp"), &inflated);

    assert!((0.0..=100.0).contains(&result.overall_score));
    assert_eq!(result.component_scores[&DimensionId::Academic], 100.0);
    assert_eq!(result.component_scores[&DimensionId::Spiritual], 0.0);
}

#[test]
fn raising_one_score_never_lowers_the_overall() {
    let baseline = engine().evaluate(&application_id("adm-mono"), &weak_scores());

    let mut improved = weak_scores();
    improved.insert(
        DimensionId::Interview,
        ComponentScore::available(DimensionId::Interview, 90.0),
    );
    let raised = engine().evaluate(&application_id("adm-mono"), &improved);

    assert!(raised.overall_score >= baseline.overall_score);
}

#[test]
fn identical_inputs_produce_identical_json() {
    let engine = engine();
    let first = engine.evaluate(&application_id("adm-idem"), &strong_scores());
    let second = engine.evaluate(&application_id("adm-idem"), &strong_scores());

    assert_eq!(
        serde_json::to_string(&first).expect("serialize"),
        serde_json::to_string(&second).expect("serialize")
    );
}

#[test]
fn require_all_dimensions_rejects_incomplete_files() {
    let mut partial = strong_scores();
    partial.remove(&DimensionId::Interview);
    let criteria = DecisionCriteria {
        require_all_dimensions: true,
        ..DecisionCriteria::default()
    };

    let result =
        engine().evaluate_with(&application_id("adm-strict"), &partial, None, Some(criteria));

    assert_eq!(result.decision, AdmissionDecision::Rejected);
    assert_eq!(
        result.basis,
        DecisionBasis::MissingRequiredDimensions {
            dimensions: vec![DimensionId::Interview],
        }
    );
    assert_eq!(
        result.recommendations[0],
        "Hold the decline until required assessments are complete"
    );
}

#[test]
fn unlisted_dimensions_use_fallback_weight() {
    let weights = WeightVector::empty().with(DimensionId::Academic, 1.0);
    let result = engine().evaluate_with(
        &application_id("adm-fallback"),
        &scores(&[(DimensionId::Academic, 50.0), (DimensionId::Skills, 100.0)]),
        Some(weights),
        None,
    );

    assert_close(result.overall_score, 55.0 / 1.05, 1e-9);
}

#[test]
fn zero_total_weight_falls_back_to_unweighted_mean() {
    let weights = WeightVector::empty()
        .with(DimensionId::Academic, 0.0)
        .with(DimensionId::Spiritual, -3.0);
    let result = engine().evaluate_with(
        &application_id("adm-zero"),
        &scores(&[(DimensionId::Academic, 80.0), (DimensionId::Spiritual, 60.0)]),
        Some(weights),
        None,
    );

    assert_close(result.overall_score, 70.0, 1e-9);
}

#[test]
fn disagreement_and_borderline_penalties_stack() {
    let result = engine().evaluate(
        &application_id("adm-variance"),
        &scores(&[
            (DimensionId::Academic, 100.0),
            (DimensionId::Spiritual, 40.0),
            (DimensionId::Character, 100.0),
            (DimensionId::Interview, 100.0),
            (DimensionId::Eligibility, 100.0),
        ]),
    );

    assert_close(result.overall_score, 79.0, 1e-6);
    assert_eq!(result.confidence, 85.0);
    assert_eq!(result.decision, AdmissionDecision::Rejected);
    assert!(result.reasoning.contains("-10 score disagreement"));
    assert!(result.reasoning.contains("-5 borderline score"));
}

#[test]
fn free_function_matches_engine() {
    let config = EvaluationConfig::default();
    let direct = evaluate(
        &application_id("adm-free"),
        &strong_scores(),
        &config.weights,
        &config.criteria,
        &ConfidencePolicy::default(),
    );
    let via_engine =
        EvaluationEngine::new(config).evaluate(&application_id("adm-free"), &strong_scores());

    assert_eq!(direct, via_engine);
}

#[test]
fn confidence_stays_within_bounds_for_any_subset() {
    let engine = engine();
    let all = strong_scores();
    let dimensions: Vec<DimensionId> = all.keys().copied().collect();

    for mask in 0u32..(1 << dimensions.len()) {
        let subset: BTreeMap<DimensionId, ComponentScore> = dimensions
            .iter()
            .enumerate()
            .filter(|(index, _)| mask & (1 << index) != 0)
            .map(|(_, dimension)| (*dimension, all[dimension].clone()))
            .collect();
        let result = engine.evaluate(&application_id("adm-subset"), &subset);
        assert!((50.0..=100.0).contains(&result.confidence));
        assert!((0.0..=100.0).contains(&result.overall_score));
    }
}

#[test]
fn huge_weights_do_not_overflow_the_aggregate() {
    let weights = WeightVector::empty()
        .with(DimensionId::Academic, 1e308)
        .with(DimensionId::Spiritual, 1e308);

    let result = engine().evaluate_with(
        &application_id("adm-huge"),
        &scores(&[(DimensionId::Academic, 95.0), (DimensionId::Spiritual, 95.0)]),
        Some(weights),
        None,
    );

    assert_close(result.overall_score, 95.0, 1e-9);
    assert_eq!(result.decision, AdmissionDecision::Accepted);

    let uneven = WeightVector::empty()
        .with(DimensionId::Academic, 1e308)
        .with(DimensionId::Spiritual, 5e307);
    let result = engine().evaluate_with(
        &application_id("adm-huge-uneven"),
        &scores(&[(DimensionId::Academic, 90.0), (DimensionId::Spiritual, 60.0)]),
        Some(uneven),
        None,
    );

    assert_close(result.overall_score, 80.0, 1e-9);
}

#[test]
fn free_function_sanitizes_nan_policy_values() {
    let mut policy = ConfidencePolicy {
        variance_penalty: f64::NAN,
        borderline_penalty: f64::NAN,
        ..ConfidencePolicy::default()
    };
    policy
        .missing_penalties
        .insert(DimensionId::Character, f64::NAN);
    let criteria = DecisionCriteria {
        minimum_overall: f64::NAN,
        ..DecisionCriteria::default()
    };

    let partial = evaluate(
        &application_id("adm-nan"),
        &scores(&[(DimensionId::Spiritual, 75.0)]),
        &WeightVector::default(),
        &DecisionCriteria::default(),
        &policy,
    );
    assert!((50.0..=100.0).contains(&partial.confidence));

    let complete = evaluate(
        &application_id("adm-nan-complete"),
        &strong_scores(),
        &WeightVector::default(),
        &criteria,
        &policy,
    );
    assert_eq!(complete.confidence, 100.0);
    assert!(serde_json::to_string(&complete)
        .expect("serializes")
        .contains("\"confidence\":100.0"));
}
