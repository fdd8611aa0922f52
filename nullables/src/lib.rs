//! Nullable infrastructure for deterministic testing.
//!
//! The protocol's two external collaborators — the arbitrator service and
//! the bridge transport — are abstracted behind traits. This crate provides
//! test-friendly implementations that are controlled programmatically and
//! never leave the process: rulings are scripted, messages queue until the
//! test pumps them, and failures are injected on demand.
//!
//! Usage: swap real implementations for nullables in tests.

pub mod arbitrator;
pub mod transport;

pub use arbitrator::NullArbitrator;
pub use transport::{Delivery, NullTransport};
