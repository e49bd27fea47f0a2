use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryApplicantRepository, InMemoryDecisionStore};
use crate::routes::with_admission_routes;
use admissions_ai::config::AppConfig;
use admissions_ai::error::AppError;
use admissions_ai::telemetry;
use admissions_ai::workflows::admissions::{AdmissionService, EvaluationEngine};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let evaluation_policy = config.evaluation_policy();
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        engine: Arc::new(EvaluationEngine::new(evaluation_policy.clone())),
    };

    let repository = Arc::new(InMemoryApplicantRepository::default());
    let decisions = Arc::new(InMemoryDecisionStore::default());
    let admission_service = Arc::new(AdmissionService::new(
        repository,
        decisions,
        evaluation_policy,
    ));

    let app = with_admission_routes(admission_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "admission evaluation service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
