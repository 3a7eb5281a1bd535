//! Lot, permit and special-event lookups plus the eligibility check built on them.

pub mod eligibility;
pub mod reference;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use eligibility::{
    CoinFlip, Decision, DecisionStatus, EligibilityEvaluator, FallbackPolicy, ParkingRequest,
    MAX_ALTERNATIVES,
};
pub use reference::{
    LotCatalog, LotRecord, ReferenceData, ReferenceDataError, ReferenceDataLoader,
    SpecialEventCalendar, SpecialEventDay, SpecialEventRecord,
};
pub use router::parking_router;
pub use service::ParkingService;
