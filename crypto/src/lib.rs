//! Cryptographic primitives for the Persona protocol.
//!
//! - Blake2b-256 hashing (ids, transfer hashes)
//! - Ed25519 signatures (off-chain vouch tokens)
//! - Address derivation from public keys

pub mod address;
pub mod hash;
pub mod keys;
pub mod sign;

pub use address::derive_address;
pub use hash::{blake2b_256, blake2b_256_multi, transfer_hash};
pub use keys::{generate_keypair, keypair_from_seed, public_from_private};
pub use sign::{sign_message, verify_signature};
