//! Request lifecycle enums.

use serde::{Deserialize, Serialize};

/// The lifecycle state of a request.
///
/// `Vouching -> Resolving -> {Disputed -> Resolving}* -> Resolved`.
/// Revocation requests skip `Vouching`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    /// Collecting vouches and crowdfunded deposit.
    Vouching,
    /// Fully vouched and funded; challengeable until the period lapses.
    Resolving,
    /// At least one challenge dispute is open.
    Disputed,
    /// Terminal.
    Resolved,
}

/// What a request does to its humanity when it succeeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestType {
    /// First registration or renewal by the current owner.
    Claim,
    /// Removal of a claimed humanity.
    Revocation,
}
