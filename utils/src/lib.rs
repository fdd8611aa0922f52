//! Shared utilities for the Persona protocol.

pub mod logging;
