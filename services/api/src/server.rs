use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryEsgRepository, StaticWeatherProvider};
use crate::routes::with_scoring_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use greenledger::config::AppConfig;
use greenledger::error::AppError;
use greenledger::invoice::TextInvoiceExtractor;
use greenledger::scoring::{FactorCatalog, ScoringWeights, SustainabilityService};
use greenledger::telemetry;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(config.environment, &config.telemetry)?;

    let catalog = match &config.engine.factor_catalog {
        Some(path) => FactorCatalog::from_csv_path(2, path)?,
        None => FactorCatalog::standard(),
    };
    info!(version = catalog.version, "emission factor catalog loaded");

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let service = Arc::new(SustainabilityService::new(
        Arc::new(InMemoryEsgRepository::default()),
        Arc::new(TextInvoiceExtractor),
        Arc::new(StaticWeatherProvider::default()),
        Arc::new(catalog),
        ScoringWeights::default(),
    ));

    let app = with_scoring_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "carbon accounting service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
