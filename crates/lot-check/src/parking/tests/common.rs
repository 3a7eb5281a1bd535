use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::parking::eligibility::{FallbackPolicy, ParkingRequest};
use crate::parking::reference::ReferenceData;
use crate::parking::service::ParkingService;

pub(super) const LOTS_CSV: &str = "\
Parking Lot / Zone Name,Permits Type (Category),Lot Type,Enforcement Days
Lot A,Faculty,Surface,Mon-Fri
Lot B,Staff,Garage,Mon-Sat
 Lot C ,Student,Surface,
Lot A,Visitor,Surface,Mon-Sun
Lot D,,Garage,Mon-Fri
,Reserved,,
";

pub(super) const EVENTS_CSV: &str = "\
Event,Start Date,End Date,Affected Lot/Populations
Commencement,01/01/2024,01/03/2024,Lot A
Resurfacing,2024-02-01,02/05/2024,Lot B
Concert,03/10/2024,03/10/2024,
Homecoming,13/01/2024,13/02/2024,Lot C
Football,10/05/2024,10/05/2024,Lot C
";

/// Fallback that always answers the same way and counts its invocations.
#[derive(Debug)]
pub(super) struct Fixed {
    allow: bool,
    calls: AtomicUsize,
}

impl Fixed {
    pub(super) fn allow() -> Self {
        Self {
            allow: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn deny() -> Self {
        Self {
            allow: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl FallbackPolicy for Fixed {
    fn permits_parking(&self, _request: &ParkingRequest) -> bool {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.allow
    }
}

pub(super) fn reference() -> ReferenceData {
    ReferenceData::from_readers(Cursor::new(LOTS_CSV), Cursor::new(EVENTS_CSV))
        .expect("fixture data loads")
}

pub(super) fn service(fallback: Fixed) -> Arc<ParkingService<Fixed>> {
    Arc::new(ParkingService::new(Arc::new(reference()), fallback))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
