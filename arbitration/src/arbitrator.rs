//! The opaque arbitrator service consumed by the registry.

use crate::error::ArbitrationError;
use persona_types::{Party, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a dispute, scoped to one arbitrator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DisputeId(pub u64);

impl fmt::Display for DisputeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The window during which a dispute's current ruling can be appealed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppealPeriod {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl AppealPeriod {
    /// The midpoint deadline that applies to the losing side.
    pub fn half_point(&self) -> Timestamp {
        let span = self.end.as_secs().saturating_sub(self.start.as_secs());
        self.start.plus(span / 2)
    }

    pub fn contains(&self, now: Timestamp) -> bool {
        self.start <= now && now < self.end
    }
}

/// External dispute-resolution service.
///
/// Rulings are delivered back to the registry exactly once per final ruling
/// through `HumanityRegistry::rule`; this trait covers the outbound half of
/// the conversation.
pub trait Arbitrator {
    /// Open a dispute with `choices` possible rulings. `fee` must cover the
    /// arbitration cost for `extra_data`.
    fn create_dispute(
        &mut self,
        choices: u32,
        extra_data: &[u8],
        fee: u128,
    ) -> Result<DisputeId, ArbitrationError>;

    /// Cost of creating a dispute under the given arbitrator configuration.
    fn arbitration_cost(&self, extra_data: &[u8]) -> u128;

    /// Cost of appealing the dispute's current ruling.
    fn appeal_cost(&self, dispute: DisputeId) -> Result<u128, ArbitrationError>;

    /// The current appeal window, or `None` when the dispute is not
    /// appealable (no ruling yet, or already final).
    fn appeal_period(&self, dispute: DisputeId)
        -> Result<Option<AppealPeriod>, ArbitrationError>;

    /// The dispute's current (possibly not yet final) ruling.
    fn current_ruling(&self, dispute: DisputeId) -> Result<Party, ArbitrationError>;

    /// Appeal the current ruling. `fee` must cover `appeal_cost`.
    fn appeal(&mut self, dispute: DisputeId, fee: u128) -> Result<(), ArbitrationError>;
}
