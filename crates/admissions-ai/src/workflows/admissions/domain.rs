use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Evaluation axes scored by the component assessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionId {
    Academic,
    Spiritual,
    Character,
    Interview,
    Eligibility,
    Credential,
    Readiness,
    Skills,
}

impl DimensionId {
    pub const ALL: [DimensionId; 8] = [
        DimensionId::Academic,
        DimensionId::Spiritual,
        DimensionId::Character,
        DimensionId::Interview,
        DimensionId::Eligibility,
        DimensionId::Credential,
        DimensionId::Readiness,
        DimensionId::Skills,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            DimensionId::Academic => "academic",
            DimensionId::Spiritual => "spiritual",
            DimensionId::Character => "character",
            DimensionId::Interview => "interview",
            DimensionId::Eligibility => "eligibility",
            DimensionId::Credential => "credential",
            DimensionId::Readiness => "readiness",
            DimensionId::Skills => "skills",
        }
    }

    /// Human readable name used in reasoning text.
    pub const fn display_name(self) -> &'static str {
        match self {
            DimensionId::Academic => "Academic record",
            DimensionId::Spiritual => "Mission alignment",
            DimensionId::Character => "Character references",
            DimensionId::Interview => "Interview",
            DimensionId::Eligibility => "Eligibility",
            DimensionId::Credential => "Credentials",
            DimensionId::Readiness => "Readiness",
            DimensionId::Skills => "Skills",
        }
    }

    /// Parses a dimension label as it appears in score sheets and policy files.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        let dimension = match normalized.as_str() {
            "academic" | "academics" => DimensionId::Academic,
            "spiritual" | "mission" | "mission_fit" | "mission_alignment" => {
                DimensionId::Spiritual
            }
            "character" => DimensionId::Character,
            "interview" | "interviews" => DimensionId::Interview,
            "eligibility" => DimensionId::Eligibility,
            "credential" | "credentials" => DimensionId::Credential,
            "readiness" => DimensionId::Readiness,
            "skills" | "skill" => DimensionId::Skills,
            _ => return None,
        };
        Some(dimension)
    }
}

impl fmt::Display for DimensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Clamp a raw score onto the shared 0-100 scale. NaN collapses to zero.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Normalized output of one assessor for one dimension.
///
/// An unavailable score keeps `value = 0` for wire compatibility, but callers
/// must go through [`ComponentScore::effective_value`] so the zero never leaks
/// into aggregation, variance, or confidence math.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentScore {
    pub dimension: DimensionId,
    pub value: f64,
    #[serde(default)]
    pub subscores: BTreeMap<String, f64>,
    #[serde(default)]
    pub evidence: Vec<String>,
    pub available: bool,
}

impl ComponentScore {
    pub fn available(dimension: DimensionId, value: f64) -> Self {
        Self {
            dimension,
            value: clamp_score(value),
            subscores: BTreeMap::new(),
            evidence: Vec::new(),
            available: true,
        }
    }

    pub fn unavailable(dimension: DimensionId, reason: impl Into<String>) -> Self {
        Self {
            dimension,
            value: 0.0,
            subscores: BTreeMap::new(),
            evidence: vec![reason.into()],
            available: false,
        }
    }

    pub fn with_subscore(mut self, name: impl Into<String>, value: f64) -> Self {
        self.subscores.insert(name.into(), clamp_score(value));
        self
    }

    pub fn with_evidence(mut self, line: impl Into<String>) -> Self {
        self.evidence.push(line.into());
        self
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Clamped value for downstream math, or `None` when the assessor did not produce one.
    pub fn effective_value(&self) -> Option<f64> {
        self.available.then(|| clamp_score(self.value))
    }
}

/// Immutable snapshot of everything the assessors may read for one applicant.
///
/// Each field is owned by exactly one assessor; an empty collection or `None`
/// means the upstream collaborator has not delivered its result yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantContext {
    /// Assigned on submission; any value sent by the client is replaced.
    #[serde(default)]
    pub application_id: ApplicationId,
    pub applicant_name: String,
    pub program: String,
    pub submitted_on: NaiveDate,
    #[serde(default)]
    pub academic: Option<AcademicSummary>,
    #[serde(default)]
    pub mission: Option<MissionAlignmentSummary>,
    #[serde(default)]
    pub character_references: Vec<CharacterReference>,
    #[serde(default)]
    pub interviews: Vec<InterviewRecord>,
    #[serde(default)]
    pub eligibility: Option<EligibilityStatus>,
    #[serde(default)]
    pub credentials: Vec<CredentialRecord>,
    #[serde(default)]
    pub readiness: Option<ReadinessSummary>,
    #[serde(default)]
    pub skills: Vec<SkillRating>,
}

/// Academic readiness summary handed over by transcript processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcademicSummary {
    #[serde(default)]
    pub gpa: Option<f64>,
    #[serde(default = "default_gpa_scale")]
    pub gpa_scale: f64,
    /// Transcript course average on a percent scale.
    #[serde(default)]
    pub transcript_average: Option<f64>,
    #[serde(default)]
    pub completed_credits: u32,
}

fn default_gpa_scale() -> f64 {
    4.0
}

/// Mission and spiritual alignment summary from the statement review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionAlignmentSummary {
    /// Reviewer rating on a 0-10 scale.
    pub alignment_rating: f64,
    #[serde(default)]
    pub ministry_experience_years: Option<f64>,
    #[serde(default)]
    pub statement_reviewed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterReference {
    pub referee: String,
    pub relationship: String,
    /// Referee rating on a 0-5 scale.
    pub rating: f64,
}

/// One completed interview with the panel's recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewRecord {
    pub interviewer: String,
    pub conducted_on: NaiveDate,
    pub recommendation: InterviewRecommendation,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterviewRecommendation {
    StronglyRecommend,
    Recommend,
    RecommendWithReservations,
    DoNotRecommend,
}

/// Outcome of the eligibility gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EligibilityStatus {
    Eligible,
    ConditionallyEligible,
    PendingReview,
    Ineligible,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub name: String,
    pub status: CredentialStatus,
    /// Authenticity probability (0-1) reported by the credential checks.
    #[serde(default)]
    pub authenticity: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CredentialStatus {
    Verified,
    PendingVerification,
    Rejected,
}

/// Program readiness estimate produced by the readiness collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessSummary {
    /// Readiness index on a 0-1 scale.
    pub readiness_index: f64,
    #[serde(default)]
    pub milestones_completed: u32,
    #[serde(default)]
    pub milestones_total: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRating {
    pub skill: String,
    pub level: SkillLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

/// High level status tracked throughout the admission workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Submitted,
    UnderReview,
    Accepted,
    ConditionallyAccepted,
    Waitlisted,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "submitted",
            ApplicationStatus::UnderReview => "under_review",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::ConditionallyAccepted => "conditionally_accepted",
            ApplicationStatus::Waitlisted => "waitlisted",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}
