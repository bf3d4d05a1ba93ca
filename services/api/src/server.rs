use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryAppraisalStore};
use crate::routes::with_operational_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use faculty_appraisal::config::{AppConfig, BackendConfig};
use faculty_appraisal::error::AppError;
use faculty_appraisal::telemetry;
use faculty_appraisal::workflows::appraisal::{
    AppraisalDocument, AppraisalError, AppraisalService, AppraisalStore, HttpAppraisalStore,
    Session,
};
use std::path::Path;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    match config.backend.url.clone() {
        Some(url) => {
            if args.seed.is_some() {
                warn!("--seed is ignored when a persistence backend is configured");
            }
            let session = config
                .backend
                .token
                .clone()
                .map(Session::bearer)
                .unwrap_or_else(Session::anonymous);
            let store = HttpAppraisalStore::new(url.clone(), session, config.backend.timeout)
                .map_err(AppraisalError::from)?;
            info!(backend = %url, "using REST persistence backend");
            serve(config, Arc::new(store)).await
        }
        None => {
            let documents = match args.seed.take() {
                Some(path) => load_seed(&path)?,
                None => Vec::new(),
            };
            let store = InMemoryAppraisalStore::with_documents(documents);
            info!(records = store.len(), "using in-memory appraisal store");
            serve(config, Arc::new(store)).await
        }
    }
}

fn load_seed(path: &Path) -> Result<Vec<AppraisalDocument>, AppError> {
    let raw = std::fs::read(path)?;
    Ok(serde_json::from_slice(&raw)?)
}

fn appraisal_service<S: AppraisalStore + 'static>(
    backend: &BackendConfig,
    store: Arc<S>,
) -> Arc<AppraisalService<S>> {
    Arc::new(AppraisalService::new(store).with_timeout(backend.timeout))
}

async fn serve<S>(config: AppConfig, store: Arc<S>) -> Result<(), AppError>
where
    S: AppraisalStore + 'static,
{
    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let service = appraisal_service(&config.backend, store);
    let app = with_operational_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "faculty appraisal service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
