//! Fundamental types for the Persona protocol.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: addresses, humanity ids, hashes, timestamps, parties, challenge
//! reasons, request states, key material, and registry parameters.

pub mod address;
pub mod hash;
pub mod keys;
pub mod params;
pub mod party;
pub mod state;
pub mod time;

pub use address::{Address, HumanityId};
pub use hash::TransferHash;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use params::{RegistryParams, MULTIPLIER_DIVISOR};
pub use party::{Party, Reason, ReasonSet};
pub use state::{RequestStatus, RequestType};
pub use time::Timestamp;
