use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ApplicantContext, ApplicationId, ComponentScore, DimensionId};
use super::evaluation::{DecisionCriteria, WeightVector};
use super::repository::{ApplicantRepository, DecisionStore, RepositoryError};
use super::service::{AdmissionService, AdmissionServiceError};

/// Request body for evaluating externally computed component scores.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DecisionRequest {
    #[serde(default)]
    pub component_scores: BTreeMap<DimensionId, f64>,
    /// Dimensions whose assessor ran but could not produce a score.
    #[serde(default)]
    pub unavailable: Vec<DimensionId>,
    #[serde(default)]
    pub weights: Option<WeightVector>,
    #[serde(default)]
    pub criteria: Option<DecisionCriteria>,
}

impl DecisionRequest {
    pub fn scores(&self) -> BTreeMap<DimensionId, ComponentScore> {
        let mut scores: BTreeMap<DimensionId, ComponentScore> = self
            .unavailable
            .iter()
            .map(|dimension| {
                (
                    *dimension,
                    ComponentScore::unavailable(*dimension, "reported unavailable"),
                )
            })
            .collect();
        for (dimension, value) in &self.component_scores {
            scores.insert(*dimension, ComponentScore::available(*dimension, *value));
        }
        scores
    }
}

/// Router builder exposing HTTP endpoints for intake and evaluation.
pub fn admission_router<R, S>(service: Arc<AdmissionService<R, S>>) -> Router
where
    R: ApplicantRepository + 'static,
    S: DecisionStore + 'static,
{
    Router::new()
        .route("/api/v1/admissions/applications", post(submit_handler::<R, S>))
        .route(
            "/api/v1/admissions/applications/:application_id",
            get(status_handler::<R, S>),
        )
        .route(
            "/api/v1/admissions/applications/:application_id/evaluate",
            post(evaluate_handler::<R, S>),
        )
        .route(
            "/api/v1/admissions/applications/:application_id/decision",
            post(decision_handler::<R, S>).get(latest_decision_handler::<R, S>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<R, S>(
    State(service): State<Arc<AdmissionService<R, S>>>,
    axum::Json(context): axum::Json<ApplicantContext>,
) -> Response
where
    R: ApplicantRepository + 'static,
    S: DecisionStore + 'static,
{
    match service.submit(context) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::ACCEPTED, axum::Json(view)).into_response()
        }
        Err(AdmissionServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "application already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => error_response(other),
    }
}

pub(crate) async fn status_handler<R, S>(
    State(service): State<Arc<AdmissionService<R, S>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicantRepository + 'static,
    S: DecisionStore + 'static,
{
    match service.get(&ApplicationId(application_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn evaluate_handler<R, S>(
    State(service): State<Arc<AdmissionService<R, S>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicantRepository + 'static,
    S: DecisionStore + 'static,
{
    match service
        .evaluate_application(&ApplicationId(application_id))
        .await
    {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn decision_handler<R, S>(
    State(service): State<Arc<AdmissionService<R, S>>>,
    Path(application_id): Path<String>,
    axum::Json(request): axum::Json<DecisionRequest>,
) -> Response
where
    R: ApplicantRepository + 'static,
    S: DecisionStore + 'static,
{
    let scores = request.scores();
    match service.evaluate_scores(
        &ApplicationId(application_id),
        &scores,
        request.weights,
        request.criteria,
    ) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn latest_decision_handler<R, S>(
    State(service): State<Arc<AdmissionService<R, S>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicantRepository + 'static,
    S: DecisionStore + 'static,
{
    let id = ApplicationId(application_id);
    match service.latest_decision(&id) {
        Ok(Some(result)) => (StatusCode::OK, axum::Json(result)).into_response(),
        Ok(None) => {
            let payload = json!({
                "application_id": id.0,
                "error": "no decision recorded",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: AdmissionServiceError) -> Response {
    let status = match &error {
        AdmissionServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        AdmissionServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
