//! Cutoffs shared by the classifier, the confidence estimator, and the
//! reasoning text. Changing one here keeps all three in agreement.

/// Rule 1: overall score that accepts outright.
pub const ACCEPTANCE_THRESHOLD: f64 = 85.0;

/// Default `DecisionCriteria::minimum_overall`, the rule 2 admission floor and
/// the primary acceptance/rejection boundary for confidence purposes.
pub const ADMISSION_FLOOR: f64 = 75.0;

/// Rule 3: overall score eligible for the mission alignment waitlist rescue.
pub const WAITLIST_THRESHOLD: f64 = 65.0;

/// Rule 3: mission alignment score required for the waitlist rescue.
pub const MISSION_RESCUE_THRESHOLD: f64 = 70.0;

/// Dimensions below this soft floor turn rule 2 into a conditional acceptance
/// and are reported as concerns.
pub const SOFT_FLOOR: f64 = 60.0;

/// Dimensions at or above this are reported as strengths.
pub const STRENGTH_THRESHOLD: f64 = 80.0;

pub const CONFIDENCE_CEILING: f64 = 100.0;

/// Confidence never drops below this; low certainty is signalled, never a veto.
pub const CONFIDENCE_FLOOR: f64 = 50.0;
