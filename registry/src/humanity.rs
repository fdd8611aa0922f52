//! Humanity records.

use crate::request::Request;
use persona_types::{Address, Timestamp};
use serde::{Deserialize, Serialize};

/// One humanity record.
///
/// Never deleted: a record decays to "not human" when its owner is cleared
/// or its expiration passes, and the same id can then be re-claimed.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Humanity {
    /// Current controlling address; `None` while unclaimed or revoked.
    pub owner: Option<Address>,
    /// Instant the registration lapses.
    pub expiration_time: Timestamp,
    /// Set while this humanity backs someone else's pending claim.
    pub vouching: bool,
    /// Set while a revocation request is unresolved.
    pub pending_revocation: bool,
    /// Unresolved requests against this humanity (at most one by invariant).
    pub active_request_count: u32,
    /// When the last revocation attempt failed; gates the retry cooldown.
    pub last_failed_revocation: Timestamp,
    /// Full request history, oldest first.
    pub requests: Vec<Request>,
}

impl Humanity {
    /// Claimed and not yet expired.
    pub fn is_live(&self, now: Timestamp) -> bool {
        self.owner.is_some() && now < self.expiration_time
    }
}

/// Snapshot of a humanity record for the read API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HumanityInfo {
    pub vouching: bool,
    pub pending_revocation: bool,
    pub active_request_count: u32,
    pub expiration_time: Timestamp,
    pub owner: Option<Address>,
    pub request_count: usize,
}
