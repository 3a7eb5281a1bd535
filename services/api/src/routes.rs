use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use lot_check::parking::{parking_router, FallbackPolicy, ParkingService};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

pub(crate) fn with_parking_routes<P>(service: Arc<ParkingService<P>>) -> Router
where
    P: FallbackPolicy + 'static,
{
    parking_router(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
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

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use lot_check::parking::{ParkingRequest, ReferenceData};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use std::io::Cursor;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    const LOTS: &str = "Parking Lot / Zone Name,Permits Type (Category)\nLot A,Faculty\nLot B,Staff\n";
    const EVENTS: &str = "Start Date,End Date,Affected Lot/Populations\n01/01/2024,01/03/2024,Lot A\n";

    struct Deny;

    impl FallbackPolicy for Deny {
        fn permits_parking(&self, _request: &ParkingRequest) -> bool {
            false
        }
    }

    fn app(ready: bool) -> Router {
        let reference = ReferenceData::from_readers(Cursor::new(LOTS), Cursor::new(EVENTS))
            .expect("fixture loads");
        let service = Arc::new(ParkingService::new(Arc::new(reference), Deny));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_parking_routes(service).layer(Extension(state))
    }

    async fn read_json_body(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        let response = app(false)
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = app(true)
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json_body(response).await, json!({ "status": "ready" }));
    }

    #[tokio::test]
    async fn parking_routes_are_mounted_alongside_health() {
        let router = app(true);

        let response = router
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .clone()
            .oneshot(Request::get("/lots").body(Body::empty()).expect("request"))
            .await
            .expect("route executes");
        assert_eq!(read_json_body(response).await, json!(["Lot A", "Lot B"]));

        let response = router
            .oneshot(
                Request::post("/check_parking")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({
                            "license_plate_or_permit_type": "Staff",
                            "lot_name": "Lot B"
                        })
                        .to_string(),
                    ))
                    .expect("request"),
            )
            .await
            .expect("route executes");
        let payload = read_json_body(response).await;
        assert_eq!(payload["status"], json!("denied"));
        assert_eq!(payload["message"], json!("Parking not allowed"));
        assert_eq!(payload["alternatives"], json!(["Lot A", "Lot B"]));
    }

    #[tokio::test]
    async fn metrics_endpoint_serves_prometheus_text() {
        let response = app(true)
            .oneshot(Request::get("/metrics").body(Body::empty()).expect("request"))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).map(|v| v.as_bytes()),
            Some(&b"text/plain; version=0.0.4"[..])
        );
    }
}
