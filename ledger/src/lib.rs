//! Crowdfunded fee-round accounting.
//!
//! A [`Round`] is one funding epoch of a challenge or of an appeal: both
//! sides collect contributions up to a per-side requirement, the collected
//! total (minus whatever the arbitrator consumes) becomes the round's fee
//! rewards, and contributors are paid back out of those rewards when the
//! request resolves.

pub mod error;
pub mod round;

pub use error::LedgerError;
pub use round::{ContributionOutcome, Round};
