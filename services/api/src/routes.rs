use crate::infra::AppState;
use admissions_ai::error::AppError;
use admissions_ai::workflows::admissions::{
    admission_router, AdmissionService, ApplicantRepository, DecisionCriteria, DecisionResult,
    DecisionStore, ScoreSheetImporter, WeightVector,
};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreSheetRequest {
    /// CSV with the columns `application_id,dimension,score,scale`.
    pub(crate) csv: String,
    #[serde(default)]
    pub(crate) weights: Option<WeightVector>,
    #[serde(default)]
    pub(crate) criteria: Option<DecisionCriteria>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreSheetResponse {
    pub(crate) evaluated: usize,
    pub(crate) decisions: Vec<DecisionResult>,
}

pub(crate) fn with_admission_routes<R, S>(service: Arc<AdmissionService<R, S>>) -> axum::Router
where
    R: ApplicantRepository + 'static,
    S: DecisionStore + 'static,
{
    admission_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/admissions/score-sheets",
            axum::routing::post(score_sheet_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Stateless batch evaluation of an uploaded score sheet. Nothing is persisted.
pub(crate) async fn score_sheet_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ScoreSheetRequest>,
) -> Result<Json<ScoreSheetResponse>, AppError> {
    let ScoreSheetRequest {
        csv,
        weights,
        criteria,
    } = payload;

    let sheet = ScoreSheetImporter::from_reader(Cursor::new(csv.into_bytes()))?;
    let decisions: Vec<DecisionResult> = sheet
        .iter()
        .map(|(application_id, scores)| {
            state
                .engine
                .evaluate_with(application_id, scores, weights.clone(), criteria.clone())
        })
        .collect();

    Ok(Json(ScoreSheetResponse {
        evaluated: decisions.len(),
        decisions,
    }))
}
