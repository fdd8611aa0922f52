//! Registry event log.
//!
//! Every externally observable effect is appended to the registry's pending
//! event buffer; the embedding node drains it after each operation.

use persona_arbitration::DisputeId;
use persona_types::{Address, HumanityId, Party, Reason, Timestamp};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryEvent {
    ClaimRequest {
        requester: Address,
        humanity_id: HumanityId,
        request_id: usize,
        name: String,
    },
    RenewalRequest {
        requester: Address,
        humanity_id: HumanityId,
        request_id: usize,
    },
    RevocationRequest {
        requester: Address,
        humanity_id: HumanityId,
        request_id: usize,
    },
    Evidence {
        humanity_id: HumanityId,
        request_id: usize,
        submitter: Address,
        evidence: String,
    },
    Contribution {
        humanity_id: HumanityId,
        request_id: usize,
        challenge_id: u32,
        round_id: u32,
        contributor: Address,
        amount: u128,
        side: Party,
    },
    VouchAdded {
        voucher: Address,
        vouchee: Address,
        humanity_id: HumanityId,
    },
    VouchRemoved {
        voucher: Address,
        vouchee: Address,
        humanity_id: HumanityId,
    },
    VouchRegistered {
        voucher_humanity: HumanityId,
        target_humanity: HumanityId,
        request_id: usize,
    },
    StateAdvanced {
        humanity_id: HumanityId,
        request_id: usize,
    },
    RequestChallenged {
        humanity_id: HumanityId,
        request_id: usize,
        challenge_id: u32,
        reason: Reason,
        dispute_id: DisputeId,
    },
    AppealCreated {
        dispute_id: DisputeId,
    },
    ChallengePeriodRestart {
        humanity_id: HumanityId,
        request_id: usize,
        challenge_id: u32,
    },
    Ruling {
        dispute_id: DisputeId,
        ruling: Party,
    },
    HumanityClaimed {
        humanity_id: HumanityId,
        request_id: usize,
    },
    HumanityRevoked {
        humanity_id: HumanityId,
        request_id: usize,
    },
    HumanityGrantedDirectly {
        humanity_id: HumanityId,
        owner: Address,
        expiration_time: Timestamp,
    },
    HumanityDischargedDirectly {
        humanity_id: HumanityId,
    },
    VouchesProcessed {
        humanity_id: HumanityId,
        request_id: usize,
        end_index: u32,
    },
    FeesAndRewardsWithdrawn {
        humanity_id: HumanityId,
        request_id: usize,
        challenge_id: u32,
        round_id: u32,
        beneficiary: Address,
        amount: u128,
    },
    RequestWithdrawn {
        humanity_id: HumanityId,
        request_id: usize,
    },
    GovernorChanged(Address),
    BaseDepositChanged(u128),
    DurationsChanged {
        humanity_lifespan: u64,
        renewal_period: u64,
        challenge_period: u64,
        failed_revocation_cooldown: u64,
    },
    RequiredVouchesChanged(u32),
    StakeMultipliersChanged {
        shared: u128,
        winner: u128,
        loser: u128,
    },
    MetaEvidenceChanged {
        updates: u32,
        registration_uri: String,
        clearing_uri: String,
    },
    ArbitratorDataChanged {
        snapshot_id: u32,
    },
    CrossChainProxyChanged(Address),
}
