use admissions_ai::workflows::admissions::{
    ApplicantRepository, ApplicationId, ApplicationRecord, ApplicationStatus, DecisionResult,
    DecisionStore, EvaluationEngine, RepositoryError,
};
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) engine: Arc<EvaluationEngine>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicantRepository {
    records: Arc<Mutex<HashMap<ApplicationId, ApplicationRecord>>>,
}

impl ApplicantRepository for InMemoryApplicantRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(record.application_id()) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.application_id().clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(record.application_id()) {
            guard.insert(record.application_id().clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn pending(&self, limit: usize) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut pending: Vec<ApplicationRecord> = guard
            .values()
            .filter(|record| {
                matches!(
                    record.status,
                    ApplicationStatus::Submitted | ApplicationStatus::UnderReview
                )
            })
            .cloned()
            .collect();
        pending.sort_by(|left, right| left.application_id().cmp(right.application_id()));
        pending.truncate(limit);
        Ok(pending)
    }
}

/// Decision history kept per application, newest last.
#[derive(Default, Clone)]
pub(crate) struct InMemoryDecisionStore {
    decisions: Arc<Mutex<HashMap<ApplicationId, Vec<DecisionResult>>>>,
}

impl DecisionStore for InMemoryDecisionStore {
    fn save(&self, result: &DecisionResult) -> Result<(), RepositoryError> {
        let mut guard = self.decisions.lock().expect("decision mutex poisoned");
        guard
            .entry(result.application_id.clone())
            .or_default()
            .push(result.clone());
        Ok(())
    }

    fn latest(&self, id: &ApplicationId) -> Result<Option<DecisionResult>, RepositoryError> {
        let guard = self.decisions.lock().expect("decision mutex poisoned");
        Ok(guard.get(id).and_then(|history| history.last().cloned()))
    }
}

impl InMemoryDecisionStore {
    pub(crate) fn history(&self, id: &ApplicationId) -> Vec<DecisionResult> {
        self.decisions
            .lock()
            .expect("decision mutex poisoned")
            .get(id)
            .cloned()
            .unwrap_or_default()
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
