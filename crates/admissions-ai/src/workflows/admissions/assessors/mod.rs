//! Component assessors and the contract they share.
//!
//! An assessor reads one slice of the [`ApplicantContext`] and returns a
//! [`ComponentScore`] on the 0-100 scale. Assessors never call each other and
//! never fail: missing input is reported as an unavailable score so the rest
//! of the pipeline keeps running.

mod academic;
mod character;
mod credential;
mod eligibility;
mod interview;
pub mod normalize;
mod readiness;
mod skills;
mod spiritual;

use std::collections::BTreeMap;
use std::sync::Arc;

use super::domain::{ApplicantContext, ComponentScore, DimensionId};

pub use academic::AcademicAssessor;
pub use character::CharacterAssessor;
pub use credential::CredentialAssessor;
pub use eligibility::EligibilityAssessor;
pub use interview::InterviewAssessor;
pub use normalize::{CategoricalScale, RawScore, ScaleKind};
pub use readiness::ReadinessAssessor;
pub use skills::SkillsAssessor;
pub use spiritual::SpiritualAssessor;

/// Contract every evaluation dimension implements.
pub trait ComponentAssessor: Send + Sync {
    fn dimension(&self) -> DimensionId;

    /// Score the applicant. Must return `available = false` instead of
    /// erroring when the context lacks the data this dimension needs.
    fn assess(&self, context: &ApplicantContext) -> ComponentScore;
}

/// One assessor per dimension, iterated in dimension order.
#[derive(Clone, Default)]
pub struct AssessorRegistry {
    assessors: BTreeMap<DimensionId, Arc<dyn ComponentAssessor>>,
}

impl AssessorRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with the built-in rule-table assessor for every dimension.
    pub fn standard() -> Self {
        Self::empty()
            .with(Arc::new(AcademicAssessor))
            .with(Arc::new(SpiritualAssessor))
            .with(Arc::new(CharacterAssessor))
            .with(Arc::new(InterviewAssessor))
            .with(Arc::new(EligibilityAssessor))
            .with(Arc::new(CredentialAssessor))
            .with(Arc::new(ReadinessAssessor))
            .with(Arc::new(SkillsAssessor))
    }

    /// Register an assessor, returning the one it replaced for the same dimension.
    pub fn register(
        &mut self,
        assessor: Arc<dyn ComponentAssessor>,
    ) -> Option<Arc<dyn ComponentAssessor>> {
        self.assessors.insert(assessor.dimension(), assessor)
    }

    pub fn with(mut self, assessor: Arc<dyn ComponentAssessor>) -> Self {
        self.register(assessor);
        self
    }

    pub fn remove(&mut self, dimension: DimensionId) -> Option<Arc<dyn ComponentAssessor>> {
        self.assessors.remove(&dimension)
    }

    pub fn dimensions(&self) -> Vec<DimensionId> {
        self.assessors.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.assessors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assessors.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (DimensionId, &Arc<dyn ComponentAssessor>)> {
        self.assessors
            .iter()
            .map(|(dimension, assessor)| (*dimension, assessor))
    }

    /// Run every assessor sequentially on the calling thread.
    pub fn assess_all(&self, context: &ApplicantContext) -> BTreeMap<DimensionId, ComponentScore> {
        self.iter()
            .map(|(dimension, assessor)| {
                let mut score = assessor.assess(context);
                score.dimension = dimension;
                (dimension, score)
            })
            .collect()
    }
}

impl std::fmt::Debug for AssessorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssessorRegistry")
            .field("dimensions", &self.dimensions())
            .finish()
    }
}
