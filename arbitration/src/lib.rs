//! Dispute arbitration adapter.
//!
//! The arbitrator itself is an external service: it accepts a dispute and
//! eventually returns a ruling. This crate defines the trait the registry
//! consumes it through, plus the appeal-fee and appeal-window policy shared
//! by every crowdfunded appeal round.

pub mod appeal;
pub mod arbitrator;
pub mod error;

pub use appeal::{check_funding_window, required_appeal_stake};
pub use arbitrator::{AppealPeriod, Arbitrator, DisputeId};
pub use error::ArbitrationError;
