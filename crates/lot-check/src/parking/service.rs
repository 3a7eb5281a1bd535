use std::sync::Arc;

use tracing::info;

use super::eligibility::{CoinFlip, Decision, EligibilityEvaluator, FallbackPolicy, ParkingRequest};
use super::reference::{LotRecord, ReferenceData};

/// Read-only query surface over a loaded reference snapshot.
pub struct ParkingService<P = CoinFlip> {
    reference: Arc<ReferenceData>,
    evaluator: EligibilityEvaluator<P>,
}

impl ParkingService<CoinFlip> {
    pub fn with_coin_flip(reference: Arc<ReferenceData>) -> Self {
        Self::new(reference, CoinFlip)
    }
}

impl<P: FallbackPolicy> ParkingService<P> {
    pub fn new(reference: Arc<ReferenceData>, fallback: P) -> Self {
        Self {
            reference,
            evaluator: EligibilityEvaluator::new(fallback),
        }
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Known lot names in sorted order.
    pub fn lots(&self) -> Vec<String> {
        self.reference.lots().iter().cloned().collect()
    }

    /// Known permit types in sorted order.
    pub fn permits(&self) -> Vec<String> {
        self.reference.permits().iter().cloned().collect()
    }

    pub fn lot(&self, name: &str) -> Option<LotRecord> {
        self.reference.lot(name).cloned()
    }

    pub fn check(&self, request: &ParkingRequest) -> Decision {
        let decision = self.evaluator.evaluate(request, &self.reference);
        info!(
            lot = %request.lot_name,
            permit = %request.identifier,
            date_time = request.date_time.as_deref().unwrap_or_default(),
            user_type = request.user_type.as_deref().unwrap_or_default(),
            disability_placard = request.disability_placard,
            status = decision.status.label(),
            "parking check evaluated"
        );
        decision
    }
}
