use super::domain::ParkingRequest;
use rand::Rng;

/// Final say once a request has passed every reference-data check.
///
/// This is where a rules engine keyed on permit restrictions, enforcement
/// days and time windows would plug in. Until one exists, [`CoinFlip`] is
/// used in production.
pub trait FallbackPolicy: Send + Sync {
    fn permits_parking(&self, request: &ParkingRequest) -> bool;
}

/// Allows or denies with equal probability.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoinFlip;

impl FallbackPolicy for CoinFlip {
    fn permits_parking(&self, _request: &ParkingRequest) -> bool {
        rand::thread_rng().gen_bool(0.5)
    }
}
