use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_parking_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use lot_check::config::AppConfig;
use lot_check::error::AppError;
use lot_check::parking::{ParkingService, ReferenceDataLoader};
use lot_check::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let reference =
        ReferenceDataLoader::from_paths(&config.data.lots_csv, &config.data.events_csv);
    let parking_service = Arc::new(ParkingService::with_coin_flip(Arc::new(reference)));

    let app = with_parking_routes(parking_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "parking eligibility service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
