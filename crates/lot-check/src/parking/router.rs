use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::eligibility::{FallbackPolicy, ParkingRequest};
use super::service::ParkingService;

/// Router exposing the lot/permit listings and the eligibility check.
pub fn parking_router<P>(service: Arc<ParkingService<P>>) -> Router
where
    P: FallbackPolicy + 'static,
{
    Router::new()
        .route("/check_parking", post(check_handler::<P>))
        .route("/lots", get(lots_handler::<P>))
        .route("/lots/:lot_name", get(lot_handler::<P>))
        .route("/permits", get(permits_handler::<P>))
        .with_state(service)
}

pub(crate) async fn check_handler<P>(
    State(service): State<Arc<ParkingService<P>>>,
    Json(request): Json<ParkingRequest>,
) -> Response
where
    P: FallbackPolicy + 'static,
{
    let decision = service.check(&request);
    (StatusCode::OK, Json(decision)).into_response()
}

pub(crate) async fn lots_handler<P>(State(service): State<Arc<ParkingService<P>>>) -> Response
where
    P: FallbackPolicy + 'static,
{
    (StatusCode::OK, Json(service.lots())).into_response()
}

pub(crate) async fn permits_handler<P>(State(service): State<Arc<ParkingService<P>>>) -> Response
where
    P: FallbackPolicy + 'static,
{
    (StatusCode::OK, Json(service.permits())).into_response()
}

pub(crate) async fn lot_handler<P>(
    State(service): State<Arc<ParkingService<P>>>,
    Path(lot_name): Path<String>,
) -> Response
where
    P: FallbackPolicy + 'static,
{
    match service.lot(&lot_name) {
        Some(record) => (StatusCode::OK, Json(record)).into_response(),
        None => {
            let payload = json!({
                "error": format!("unknown lot '{lot_name}'"),
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}
