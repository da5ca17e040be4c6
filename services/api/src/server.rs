use crate::cli::ServeArgs;
use crate::infra::{load_roster, AppState};
use crate::routes::with_fee_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use fleet_fees::config::AppConfig;
use fleet_fees::error::AppError;
use fleet_fees::telemetry;
use fleet_fees::workflows::fees::FeeService;
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
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let roster = Arc::new(load_roster(args.roster.as_deref())?);
    let enrolled = roster.len();
    let fee_service = Arc::new(FeeService::new(roster, config.fees.clone()));

    let app = with_fee_routes(fee_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        base_fee = config.fees.default_base_fee,
        enrolled,
        "fleet fee service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
