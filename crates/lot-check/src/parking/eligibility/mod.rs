mod domain;
mod fallback;

pub use domain::{Decision, DecisionStatus, ParkingRequest, MAX_ALTERNATIVES};
pub use fallback::{CoinFlip, FallbackPolicy};

use super::reference::ReferenceData;
use chrono::NaiveDate;
use tracing::debug;

pub const SPECIAL_EVENT_MESSAGE: &str = "Special event in progress";
pub const NOT_ALLOWED_MESSAGE: &str = "Parking not allowed";

/// Request timestamps carry ISO dates, unlike the events sheet.
const REQUEST_DATE_FORMAT: &str = "%Y-%m-%d";

/// Runs the ordered checks: lot, permit, special event, then the fallback policy.
#[derive(Debug, Clone, Default)]
pub struct EligibilityEvaluator<P = CoinFlip> {
    fallback: P,
}

impl<P: FallbackPolicy> EligibilityEvaluator<P> {
    pub fn new(fallback: P) -> Self {
        Self { fallback }
    }

    pub fn fallback(&self) -> &P {
        &self.fallback
    }

    pub fn evaluate(&self, request: &ParkingRequest, reference: &ReferenceData) -> Decision {
        let lot = request.lot_name.as_str();

        if !reference.has_lot(lot) {
            return Decision::error(
                format!("Invalid lot name '{lot}'"),
                reference.lot_alternatives(),
            );
        }

        if !reference.has_permit(&request.identifier) {
            return Decision::error(
                format!("Invalid permit type '{}'", request.identifier),
                reference.permit_alternatives(),
            );
        }

        if let Some(date) = request_date(request) {
            if reference.events().is_closed(date, lot) {
                return Decision::denied(SPECIAL_EVENT_MESSAGE, reference.lot_alternatives());
            }
        }

        if self.fallback.permits_parking(request) {
            Decision::allowed(lot)
        } else {
            Decision::denied(NOT_ALLOWED_MESSAGE, reference.lot_alternatives())
        }
    }
}

fn request_date(request: &ParkingRequest) -> Option<NaiveDate> {
    let raw = request.date_part()?;
    match NaiveDate::parse_from_str(raw, REQUEST_DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(err) => {
            debug!(date_time = raw, error = %err, "request date not recognised; skipping event check");
            None
        }
    }
}
