//! Humanity registry.
//!
//! Addresses claim a unique, non-transferable humanity record, back the
//! claim with social vouching, and defend it through arbitrated challenges
//! with crowdfunded appeal rounds. Revocations run the same machinery in
//! reverse. The registry is a deterministic, single-writer state machine:
//! every operation runs to completion against an explicit `now` timestamp
//! and either commits fully or returns a typed error with no state change.

pub mod error;
pub mod events;
pub mod governance;
pub mod humanity;
pub mod registry;
pub mod request;
pub mod vouching;

pub use error::RegistryError;
pub use events::RegistryEvent;
pub use governance::{AdminConfig, ArbitratorData};
pub use humanity::{Humanity, HumanityInfo};
pub use registry::{
    AppealFundingOutcome, ChallengeOutcome, ClaimOutcome, DisputeRef, HumanityRegistry,
};
pub use request::{Challenge, Request, UltimateChallenger};
pub use vouching::SignedVouch;
