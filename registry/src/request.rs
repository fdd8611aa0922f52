//! Requests and their challenges.

use persona_arbitration::DisputeId;
use persona_ledger::Round;
use persona_types::{
    Address, HumanityId, Party, Reason, ReasonSet, RequestStatus, RequestType, Timestamp,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The single challenger entitled to the requester's forfeited deposit:
/// the winner of the lowest-indexed challenge that ruled against the
/// requester.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UltimateChallenger {
    pub challenge_id: u32,
    pub challenger: Address,
}

/// One entry in a humanity's request list.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Request {
    pub status: RequestStatus,
    pub request_type: RequestType,
    pub requester: Address,
    /// Arbitrator configuration snapshot this request was created under.
    pub arbitrator_data_id: u32,
    /// Start of the current challenge window (set on entering `Resolving`).
    pub challenge_period_start: Timestamp,
    /// Reasons with a dispute still open.
    pub current_reasons: ReasonSet,
    /// Reasons ever raised against this request.
    pub used_reasons: ReasonSet,
    /// Number of challenges created so far (the next challenge id).
    pub last_challenge_id: u32,
    pub nb_parallel_disputes: u32,
    pub ultimate_challenger: Option<UltimateChallenger>,
    /// Set when the requester was discharged as a penalized voucher while
    /// this request was pending; execution then resolves without granting.
    pub punished_vouch: bool,
    pub challenges: Vec<Challenge>,
    /// Duplicate humanities already named by challenges of this request.
    pub challenged_duplicates: HashSet<HumanityId>,
    /// Humanities whose vouches were consumed for this request.
    pub vouches: Vec<HumanityId>,
    /// Resumable cursor into `vouches` for bounded-work processing.
    pub vouches_processed: u32,
}

impl Request {
    pub fn new(
        request_type: RequestType,
        requester: Address,
        arbitrator_data_id: u32,
    ) -> Self {
        Self {
            status: RequestStatus::Vouching,
            request_type,
            requester,
            arbitrator_data_id,
            challenge_period_start: Timestamp::EPOCH,
            current_reasons: ReasonSet::EMPTY,
            used_reasons: ReasonSet::EMPTY,
            last_challenge_id: 0,
            nb_parallel_disputes: 0,
            ultimate_challenger: None,
            punished_vouch: false,
            // Challenge slot 0 exists from the start so the requester's
            // deposit has a round to live in before any challenge.
            challenges: vec![Challenge::funding_slot()],
            challenged_duplicates: HashSet::new(),
            vouches: Vec::new(),
            vouches_processed: 0,
        }
    }
}

/// An adversarial contest of a request, backed by one dispute.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Challenge {
    /// `None` until an actual challenge occupies this slot (slot 0 starts
    /// out as the plain funding pot of the request).
    pub challenger: Option<Address>,
    pub reason: Reason,
    pub dispute_id: Option<DisputeId>,
    /// Final ruling; `None` while the dispute is open.
    pub ruling: Option<Party>,
    /// Only for `Reason::Duplicate` challenges.
    pub duplicate_of: Option<HumanityId>,
    pub rounds: Vec<Round>,
}

impl Challenge {
    /// A fresh challenge slot holding a single empty funding round.
    pub fn funding_slot() -> Self {
        Self {
            rounds: vec![Round::new()],
            ..Self::default()
        }
    }

    pub fn last_round_id(&self) -> u32 {
        (self.rounds.len().saturating_sub(1)) as u32
    }

    /// Dispute created and not yet finally ruled.
    pub fn is_open(&self) -> bool {
        self.dispute_id.is_some() && self.ruling.is_none()
    }
}
