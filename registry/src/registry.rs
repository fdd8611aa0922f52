//! The humanity registry engine.
//!
//! One instance owns all humanity records of a chain and is the only writer
//! to them. Operations are transactional: they validate first and mutate
//! only once nothing can fail, so an `Err` return means no state change.

use std::collections::{HashMap, HashSet};

use persona_arbitration::{
    check_funding_window, required_appeal_stake, ArbitrationError, Arbitrator, DisputeId,
};
use persona_ledger::Round;
use persona_types::{
    Address, HumanityId, Party, Reason, RegistryParams, RequestStatus, RequestType, Timestamp,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::RegistryError;
use crate::events::RegistryEvent;
use crate::governance::AdminConfig;
use crate::humanity::{Humanity, HumanityInfo};
use crate::request::{Challenge, Request, UltimateChallenger};
use crate::vouching::SignedVouch;

/// Vouches auto-processed when a request executes; the rest is paginated
/// through `process_vouches`.
const AUTO_PROCESSED_VOUCHES: u32 = 10;

/// What a ruling does to the request once challenge bookkeeping is done.
#[derive(Clone, Copy, Debug)]
enum Resolution {
    /// Revocation request settled (either way).
    Revocation,
    /// Claim finally lost to a challenger or an inconclusive ruling.
    ClaimDenied,
    /// Claim won with every reason exhausted; grant immediately.
    ClaimGranted { punished_vouch: bool },
    /// Requester won a dispute with reasons left; challenge period restarts.
    PeriodRestart,
    /// A sibling dispute already settled the request.
    AlreadySettled,
}

/// Where a dispute points back into the registry.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DisputeRef {
    pub humanity_id: HumanityId,
    pub request_id: usize,
    pub challenge_id: u32,
}

/// Result of creating or funding a request.
#[derive(Clone, Copy, Debug)]
pub struct ClaimOutcome {
    pub request_id: usize,
    /// Overpayment returned to the sender.
    pub refunded: u128,
}

/// Result of challenging a request.
#[derive(Clone, Copy, Debug)]
pub struct ChallengeOutcome {
    pub challenge_id: u32,
    pub dispute_id: DisputeId,
    pub refunded: u128,
}

/// Result of funding an appeal side.
#[derive(Clone, Copy, Debug)]
pub struct AppealFundingOutcome {
    pub refunded: u128,
    pub appeal_created: bool,
}

/// The humanity registry state machine.
pub struct HumanityRegistry {
    config: AdminConfig,
    humanities: HashMap<HumanityId, Humanity>,
    /// Live ownership index: owner address -> humanity id. Liveness is
    /// still checked on read; entries go away when ownership is cleared.
    bindings: HashMap<Address, HumanityId>,
    /// Unresolved claim per claimer: claimer -> (humanity, request index).
    active_claims: HashMap<Address, (HumanityId, usize)>,
    /// Stored vouch relation `(voucher, claimer, humanity)`.
    vouches: HashSet<(Address, Address, HumanityId)>,
    dispute_index: HashMap<DisputeId, DisputeRef>,
    events: Vec<RegistryEvent>,
}

impl HumanityRegistry {
    pub fn new(governor: Address, params: RegistryParams, arbitrator_extra_data: Vec<u8>) -> Self {
        Self {
            config: AdminConfig::new(governor, params, arbitrator_extra_data),
            humanities: HashMap::new(),
            bindings: HashMap::new(),
            active_claims: HashMap::new(),
            vouches: HashSet::new(),
            dispute_index: HashMap::new(),
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &AdminConfig {
        &self.config
    }

    pub fn params(&self) -> &RegistryParams {
        &self.config.params
    }

    /// Drain pending events for the node to process.
    pub fn drain_events(&mut self) -> Vec<RegistryEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Requests ─────────────────────────────────────────────────────────

    /// Claim an unclaimed (or lapsed) humanity for `caller`.
    ///
    /// The request starts in `Vouching`; `value` is credited toward the
    /// total cost `base_deposit + arbitration_cost` and any excess refunded.
    #[allow(clippy::too_many_arguments)]
    pub fn claim_humanity(
        &mut self,
        caller: Address,
        humanity_id: HumanityId,
        evidence: &str,
        name: &str,
        value: u128,
        now: Timestamp,
        arbitrator: &dyn Arbitrator,
    ) -> Result<ClaimOutcome, RegistryError> {
        if humanity_id.is_zero() || caller.is_zero() {
            return Err(RegistryError::ZeroAddress);
        }
        if self.humanity_of(caller, now).is_some() {
            return Err(RegistryError::AlreadyBound);
        }
        if self.active_claims.contains_key(&caller) {
            return Err(RegistryError::ClaimPending);
        }
        if let Some(humanity) = self.humanities.get(&humanity_id) {
            if humanity.is_live(now) {
                return Err(RegistryError::HumanityAlreadyClaimed);
            }
            if humanity.active_request_count > 0 {
                return Err(RegistryError::RequestUnresolved);
            }
        }

        let (request_id, refunded, taken) =
            self.create_claim_request(caller, humanity_id, value, arbitrator);

        info!(%caller, %humanity_id, request_id, "claim request created");
        self.events.push(RegistryEvent::ClaimRequest {
            requester: caller,
            humanity_id,
            request_id,
            name: name.to_string(),
        });
        self.push_evidence_event(humanity_id, request_id, caller, evidence);
        self.push_contribution_event(humanity_id, request_id, 0, 0, caller, taken, Party::Requester);
        Ok(ClaimOutcome { request_id, refunded })
    }

    /// Renew the caller's own humanity. Only open during the renewal window
    /// at the end of the registration.
    pub fn renew_humanity(
        &mut self,
        caller: Address,
        evidence: &str,
        value: u128,
        now: Timestamp,
        arbitrator: &dyn Arbitrator,
    ) -> Result<ClaimOutcome, RegistryError> {
        let humanity_id = *self.bindings.get(&caller).ok_or(RegistryError::NotOwner)?;
        {
            let humanity = self
                .humanities
                .get(&humanity_id)
                .ok_or(RegistryError::HumanityNotFound)?;
            if humanity.owner != Some(caller) {
                return Err(RegistryError::NotOwner);
            }
            if now.plus(self.config.params.renewal_period) < humanity.expiration_time {
                return Err(RegistryError::RenewalNotOpen);
            }
            if humanity.active_request_count > 0 {
                return Err(RegistryError::RequestUnresolved);
            }
        }
        if self.active_claims.contains_key(&caller) {
            return Err(RegistryError::ClaimPending);
        }

        let (request_id, refunded, taken) =
            self.create_claim_request(caller, humanity_id, value, arbitrator);

        info!(%caller, %humanity_id, request_id, "renewal request created");
        self.events.push(RegistryEvent::RenewalRequest {
            requester: caller,
            humanity_id,
            request_id,
        });
        self.push_evidence_event(humanity_id, request_id, caller, evidence);
        self.push_contribution_event(humanity_id, request_id, 0, 0, caller, taken, Party::Requester);
        Ok(ClaimOutcome { request_id, refunded })
    }

    /// Request removal of a live humanity. Must be fully funded in one call
    /// and goes straight to `Resolving`.
    #[allow(clippy::too_many_arguments)]
    pub fn revoke_humanity(
        &mut self,
        caller: Address,
        humanity_id: HumanityId,
        evidence: &str,
        value: u128,
        now: Timestamp,
        arbitrator: &dyn Arbitrator,
    ) -> Result<ClaimOutcome, RegistryError> {
        let snapshot_id = self.config.latest_arbitrator_data_id();
        let total_cost = self.claim_total_cost(snapshot_id, arbitrator);
        {
            let humanity = self
                .humanities
                .get(&humanity_id)
                .ok_or(RegistryError::HumanityNotClaimed)?;
            if humanity.owner.is_none() {
                return Err(RegistryError::HumanityNotClaimed);
            }
            if !humanity.is_live(now) {
                return Err(RegistryError::HumanityExpired);
            }
            if humanity.active_request_count > 0 {
                return Err(RegistryError::RequestUnresolved);
            }
            let cooldown = self.config.params.failed_revocation_cooldown;
            if humanity.last_failed_revocation != Timestamp::EPOCH
                && !humanity.last_failed_revocation.has_expired(cooldown, now)
            {
                return Err(RegistryError::RevocationCooldown);
            }
        }
        if value < total_cost {
            return Err(RegistryError::UnderFunded {
                needed: total_cost,
                provided: value,
            });
        }

        let mut request = Request::new(RequestType::Revocation, caller, snapshot_id);
        request.status = RequestStatus::Resolving;
        request.challenge_period_start = now;
        let outcome = request.challenges[0].rounds[0]
            .contribute(caller, Party::Requester, value, total_cost)?;

        let humanity = self.humanities.entry(humanity_id).or_default();
        let request_id = humanity.requests.len();
        humanity.requests.push(request);
        humanity.active_request_count += 1;
        humanity.pending_revocation = true;

        info!(%caller, %humanity_id, request_id, "revocation request created");
        self.events.push(RegistryEvent::RevocationRequest {
            requester: caller,
            humanity_id,
            request_id,
        });
        self.push_evidence_event(humanity_id, request_id, caller, evidence);
        self.push_contribution_event(
            humanity_id,
            request_id,
            0,
            0,
            caller,
            outcome.taken,
            Party::Requester,
        );
        Ok(ClaimOutcome {
            request_id,
            refunded: outcome.returned,
        })
    }

    /// Crowdfund a request still collecting its deposit.
    pub fn fund_request(
        &mut self,
        funder: Address,
        humanity_id: HumanityId,
        request_id: usize,
        value: u128,
        arbitrator: &dyn Arbitrator,
    ) -> Result<u128, RegistryError> {
        let snapshot_id = {
            let request = self.request(humanity_id, request_id)?;
            if request.status != RequestStatus::Vouching {
                return Err(RegistryError::WrongStatus {
                    actual: request.status,
                });
            }
            request.arbitrator_data_id
        };
        let total_cost = self.claim_total_cost(snapshot_id, arbitrator);

        let request = self.request_mut(humanity_id, request_id)?;
        let outcome =
            request.challenges[0].rounds[0].contribute(funder, Party::Requester, value, total_cost)?;

        self.push_contribution_event(
            humanity_id,
            request_id,
            0,
            0,
            funder,
            outcome.taken,
            Party::Requester,
        );
        Ok(outcome.returned)
    }

    /// Abandon the caller's own claim while it is still vouching. Refunds
    /// the caller's round-0 contribution; other crowdfunders withdraw
    /// normally afterwards.
    pub fn withdraw_request(&mut self, caller: Address) -> Result<u128, RegistryError> {
        let (humanity_id, request_id) = *self
            .active_claims
            .get(&caller)
            .ok_or(RegistryError::NoPendingClaim)?;
        {
            let request = self.request(humanity_id, request_id)?;
            if request.status != RequestStatus::Vouching {
                return Err(RegistryError::WrongStatus {
                    actual: request.status,
                });
            }
        }

        let humanity = self
            .humanities
            .get_mut(&humanity_id)
            .ok_or(RegistryError::HumanityNotFound)?;
        humanity.requests[request_id].status = RequestStatus::Resolved;
        humanity.active_request_count = humanity.active_request_count.saturating_sub(1);
        self.active_claims.remove(&caller);

        self.events.push(RegistryEvent::RequestWithdrawn {
            humanity_id,
            request_id,
        });
        self.withdraw_fees_and_rewards(caller, humanity_id, request_id, 0, 0)
    }

    // ── Vouching ─────────────────────────────────────────────────────────

    /// Record a vouch. Validity is judged when the vouch is consumed, so no
    /// checks happen here.
    pub fn add_vouch(&mut self, voucher: Address, vouchee: Address, humanity_id: HumanityId) {
        self.vouches.insert((voucher, vouchee, humanity_id));
        self.events.push(RegistryEvent::VouchAdded {
            voucher,
            vouchee,
            humanity_id,
        });
    }

    pub fn remove_vouch(&mut self, voucher: Address, vouchee: Address, humanity_id: HumanityId) {
        self.vouches.remove(&(voucher, vouchee, humanity_id));
        self.events.push(RegistryEvent::VouchRemoved {
            voucher,
            vouchee,
            humanity_id,
        });
    }

    pub fn has_vouch(&self, voucher: Address, vouchee: Address, humanity_id: HumanityId) -> bool {
        self.vouches.contains(&(voucher, vouchee, humanity_id))
    }

    /// Move a fully funded claim out of `Vouching` by consuming vouches.
    ///
    /// Candidates are filtered at consumption time: the voucher must hold a
    /// live humanity other than the target, not be flagged as vouching
    /// elsewhere, and the stored relation (or signed token) must check out.
    /// Exactly `required_vouches` are consumed; surplus candidates stay
    /// untouched.
    pub fn advance_state(
        &mut self,
        humanity_id: HumanityId,
        stored_vouchers: &[Address],
        signed_vouchers: &[SignedVouch],
        now: Timestamp,
    ) -> Result<(), RegistryError> {
        let (request_id, requester) = {
            let humanity = self
                .humanities
                .get(&humanity_id)
                .ok_or(RegistryError::HumanityNotFound)?;
            let request_id = humanity
                .requests
                .iter()
                .rposition(|r| r.status == RequestStatus::Vouching)
                .ok_or(RegistryError::RequestNotFound)?;
            let request = &humanity.requests[request_id];
            if request.challenges[0].rounds[0].side_funded() != Party::Requester {
                return Err(RegistryError::RequesterNotFullyFunded);
            }
            (request_id, request.requester)
        };

        let mut candidates: Vec<Address> = Vec::new();
        for voucher in stored_vouchers {
            if self.vouches.contains(&(*voucher, requester, humanity_id)) {
                candidates.push(*voucher);
            }
        }
        for token in signed_vouchers {
            if token.is_valid_for(requester, humanity_id, now) {
                candidates.push(token.voucher_address());
            }
        }

        let needed = self.config.params.required_vouches as usize;
        let mut selected: Vec<HumanityId> = Vec::new();
        let mut seen: HashSet<HumanityId> = HashSet::new();
        for voucher in candidates {
            if selected.len() == needed {
                break;
            }
            let Some(voucher_humanity) = self.humanity_of(voucher, now) else {
                continue;
            };
            if voucher_humanity == humanity_id || seen.contains(&voucher_humanity) {
                continue;
            }
            let Some(humanity) = self.humanities.get(&voucher_humanity) else {
                continue;
            };
            if humanity.vouching {
                continue;
            }
            seen.insert(voucher_humanity);
            selected.push(voucher_humanity);
        }

        if selected.len() < needed {
            return Err(RegistryError::NotEnoughVouches {
                have: selected.len() as u32,
                need: needed as u32,
            });
        }

        for voucher_humanity in &selected {
            if let Some(humanity) = self.humanities.get_mut(voucher_humanity) {
                humanity.vouching = true;
            }
            self.events.push(RegistryEvent::VouchRegistered {
                voucher_humanity: *voucher_humanity,
                target_humanity: humanity_id,
                request_id,
            });
        }

        let humanity = self
            .humanities
            .get_mut(&humanity_id)
            .ok_or(RegistryError::HumanityNotFound)?;
        let request = &mut humanity.requests[request_id];
        request.vouches = selected;
        request.status = RequestStatus::Resolving;
        request.challenge_period_start = now;

        info!(%humanity_id, request_id, "request advanced to resolving");
        self.events.push(RegistryEvent::StateAdvanced {
            humanity_id,
            request_id,
        });
        Ok(())
    }

    // ── Challenges ───────────────────────────────────────────────────────

    /// Contest a resolving request, opening a dispute with the arbitrator.
    ///
    /// Claim requests take one challenge per unused reason, plus any number
    /// of parallel `Duplicate` challenges naming distinct duplicates.
    /// Revocation requests take exactly one reasonless challenge.
    #[allow(clippy::too_many_arguments)]
    pub fn challenge_request(
        &mut self,
        challenger: Address,
        humanity_id: HumanityId,
        request_id: usize,
        reason: Reason,
        duplicate: Option<HumanityId>,
        evidence: &str,
        value: u128,
        now: Timestamp,
        arbitrator: &mut dyn Arbitrator,
    ) -> Result<ChallengeOutcome, RegistryError> {
        let (snapshot_id, duplicate_named) = {
            let request = self.request(humanity_id, request_id)?;
            match (request.status, request.request_type) {
                (RequestStatus::Resolving, _) => {}
                (RequestStatus::Disputed, RequestType::Claim) => {}
                (RequestStatus::Disputed, RequestType::Revocation) => {
                    return Err(RegistryError::AlreadyChallenged)
                }
                (actual, _) => return Err(RegistryError::WrongStatus { actual }),
            }
            if request
                .challenge_period_start
                .has_expired(self.config.params.challenge_period, now)
            {
                return Err(RegistryError::ChallengePeriodOver);
            }

            let mut duplicate_named = None;
            match request.request_type {
                RequestType::Revocation => {
                    if reason != Reason::None {
                        return Err(RegistryError::ReasonForbidden);
                    }
                }
                RequestType::Claim => match reason {
                    Reason::None => return Err(RegistryError::ReasonRequired),
                    Reason::Duplicate => {
                        let duplicate = duplicate.ok_or(RegistryError::DuplicateRequired)?;
                        if duplicate == humanity_id {
                            return Err(RegistryError::SelfDuplicate);
                        }
                        if request.challenged_duplicates.contains(&duplicate) {
                            return Err(RegistryError::DuplicateAlreadyUsed);
                        }
                        duplicate_named = Some(duplicate);
                    }
                    _ => {
                        if request.used_reasons.contains(reason) {
                            return Err(RegistryError::ReasonAlreadyUsed(reason));
                        }
                    }
                },
            }
            (request.arbitrator_data_id, duplicate_named)
        };

        if let Some(duplicate) = duplicate_named {
            let claimed_or_claiming = self
                .humanities
                .get(&duplicate)
                .map(|h| h.owner.is_some() || h.active_request_count > 0)
                .unwrap_or(false);
            if !claimed_or_claiming {
                return Err(RegistryError::WrongDuplicateStatus);
            }
        }

        let cost = self.arbitration_cost_for(snapshot_id, arbitrator);
        if value < cost {
            return Err(RegistryError::UnderFunded {
                needed: cost,
                provided: value,
            });
        }
        let extra_data = self
            .config
            .arbitrator_data(snapshot_id)
            .map(|data| data.extra_data.clone())
            .unwrap_or_default();
        let dispute_id = arbitrator.create_dispute(2, &extra_data, cost)?;

        let humanity = self
            .humanities
            .get_mut(&humanity_id)
            .ok_or(RegistryError::HumanityNotFound)?;
        let request = &mut humanity.requests[request_id];
        let challenge_id = request.last_challenge_id;
        if challenge_id as usize >= request.challenges.len() {
            request.challenges.push(Challenge::funding_slot());
        }
        let challenge = &mut request.challenges[challenge_id as usize];
        challenge.challenger = Some(challenger);
        challenge.reason = reason;
        challenge.dispute_id = Some(dispute_id);
        challenge.duplicate_of = duplicate_named;
        let outcome = challenge.rounds[0].contribute(challenger, Party::Challenger, value, cost)?;
        challenge.rounds[0].consume_cost(cost);
        challenge.rounds[0].set_appealed();
        challenge.rounds.push(Round::new());

        request.status = RequestStatus::Disputed;
        request.nb_parallel_disputes += 1;
        request.last_challenge_id += 1;
        request.used_reasons.insert(reason);
        request.current_reasons.insert(reason);
        if let Some(duplicate) = duplicate_named {
            request.challenged_duplicates.insert(duplicate);
        }
        self.dispute_index.insert(
            dispute_id,
            DisputeRef {
                humanity_id,
                request_id,
                challenge_id,
            },
        );

        info!(%challenger, %humanity_id, request_id, challenge_id, %dispute_id, ?reason, "request challenged");
        self.events.push(RegistryEvent::RequestChallenged {
            humanity_id,
            request_id,
            challenge_id,
            reason,
            dispute_id,
        });
        self.push_evidence_event(humanity_id, request_id, challenger, evidence);
        self.push_contribution_event(
            humanity_id,
            request_id,
            challenge_id,
            0,
            challenger,
            outcome.taken,
            Party::Challenger,
        );
        Ok(ChallengeOutcome {
            challenge_id,
            dispute_id,
            refunded: outcome.returned,
        })
    }

    /// Crowdfund one side of an appeal round.
    ///
    /// The required stake depends on the current ruling (winner, loser or
    /// shared multiplier); the loser can only fund during the first half of
    /// the appeal window. When both sides are fully funded the appeal is
    /// created and a new round opens.
    #[allow(clippy::too_many_arguments)]
    pub fn fund_appeal(
        &mut self,
        funder: Address,
        dispute_id: DisputeId,
        side: Party,
        value: u128,
        now: Timestamp,
        arbitrator: &mut dyn Arbitrator,
    ) -> Result<AppealFundingOutcome, RegistryError> {
        if side == Party::None {
            return Err(ArbitrationError::InvalidSide.into());
        }
        let dispute_ref = *self
            .dispute_index
            .get(&dispute_id)
            .ok_or(ArbitrationError::DisputeNotFound(dispute_id))?;
        let period = arbitrator
            .appeal_period(dispute_id)?
            .ok_or(ArbitrationError::NotAppealable(dispute_id))?;
        let current_ruling = arbitrator.current_ruling(dispute_id)?;
        check_funding_window(period, now, current_ruling, side)?;

        let appeal_cost = arbitrator.appeal_cost(dispute_id)?;
        let required = required_appeal_stake(appeal_cost, &self.config.params, current_ruling, side);
        let required_opponent = required_appeal_stake(
            appeal_cost,
            &self.config.params,
            current_ruling,
            side.opponent(),
        );

        let humanity = self
            .humanities
            .get_mut(&dispute_ref.humanity_id)
            .ok_or(RegistryError::HumanityNotFound)?;
        let request = humanity
            .requests
            .get_mut(dispute_ref.request_id)
            .ok_or(RegistryError::RequestNotFound)?;
        let challenge = request
            .challenges
            .get_mut(dispute_ref.challenge_id as usize)
            .ok_or(RegistryError::ChallengeNotFound)?;
        let round_id = challenge.last_round_id();
        let round = challenge
            .rounds
            .last_mut()
            .ok_or(RegistryError::RoundNotFound)?;
        if round.side_funded() == side {
            return Err(RegistryError::SideAlreadyFunded);
        }

        let outcome = round.contribute(funder, side, value, required)?;
        let appeal_created =
            outcome.paid_in_full && round.paid_fees(side.opponent()) >= required_opponent;
        if appeal_created {
            arbitrator.appeal(dispute_id, appeal_cost)?;
            round.consume_cost(appeal_cost);
            round.set_appealed();
            challenge.rounds.push(Round::new());
        }

        self.push_contribution_event(
            dispute_ref.humanity_id,
            dispute_ref.request_id,
            dispute_ref.challenge_id,
            round_id,
            funder,
            outcome.taken,
            side,
        );
        if appeal_created {
            debug!(%dispute_id, "appeal fully funded");
            self.events.push(RegistryEvent::AppealCreated { dispute_id });
        }
        Ok(AppealFundingOutcome {
            refunded: outcome.returned,
            appeal_created,
        })
    }

    // ── Rulings & resolution ─────────────────────────────────────────────

    /// Apply a dispute's final ruling. Called exactly once per dispute.
    ///
    /// If only one side fully funded the last appeal round, that side wins
    /// regardless of the delivered ruling.
    pub fn rule(
        &mut self,
        dispute_id: DisputeId,
        ruling: Party,
        now: Timestamp,
    ) -> Result<(), RegistryError> {
        let dispute_ref = self
            .dispute_index
            .remove(&dispute_id)
            .ok_or(ArbitrationError::DisputeNotFound(dispute_id))?;
        let humanity_id = dispute_ref.humanity_id;
        let request_id = dispute_ref.request_id;
        let challenge_id = dispute_ref.challenge_id;

        let humanity = self
            .humanities
            .get_mut(&humanity_id)
            .ok_or(RegistryError::HumanityNotFound)?;

        // Challenge- and request-level bookkeeping first; copy out what the
        // resolution logic needs.
        let (result, requester, resolution) = {
            let request = humanity
                .requests
                .get_mut(request_id)
                .ok_or(RegistryError::RequestNotFound)?;
            let challenge = request
                .challenges
                .get_mut(challenge_id as usize)
                .ok_or(RegistryError::ChallengeNotFound)?;

            // Silent winner default: a side alone in funding the last
            // appeal round wins, whatever the arbitrator said.
            let result = match challenge.rounds.last().map(|round| round.side_funded()) {
                Some(Party::Requester) => Party::Requester,
                Some(Party::Challenger) => Party::Challenger,
                _ => ruling,
            };
            challenge.ruling = Some(result);
            let reason = challenge.reason;
            let challenger = challenge.challenger;

            request.nb_parallel_disputes = request.nb_parallel_disputes.saturating_sub(1);
            if !request
                .challenges
                .iter()
                .any(|c| c.is_open() && c.reason == reason)
            {
                request.current_reasons.remove(reason);
            }

            let resolution = match (request.request_type, result) {
                (RequestType::Revocation, _) => {
                    request.status = RequestStatus::Resolved;
                    Resolution::Revocation
                }
                (RequestType::Claim, Party::Challenger) => {
                    // The ultimate challenger is always the winner of the
                    // lowest-indexed adverse challenge, so a later ruling on
                    // an earlier challenge re-targets it.
                    let retarget = match request.ultimate_challenger {
                        None => true,
                        Some(current) => challenge_id < current.challenge_id,
                    };
                    if retarget {
                        if let Some(challenger) = challenger {
                            request.ultimate_challenger = Some(UltimateChallenger {
                                challenge_id,
                                challenger,
                            });
                        }
                    }
                    if request.status != RequestStatus::Resolved {
                        request.status = RequestStatus::Resolved;
                        Resolution::ClaimDenied
                    } else {
                        Resolution::AlreadySettled
                    }
                }
                (RequestType::Claim, Party::None) => {
                    if request.status != RequestStatus::Resolved
                        && request.nb_parallel_disputes == 0
                    {
                        request.status = RequestStatus::Resolved;
                        Resolution::ClaimDenied
                    } else {
                        Resolution::AlreadySettled
                    }
                }
                (RequestType::Claim, Party::Requester) => {
                    if request.status != RequestStatus::Resolved
                        && request.nb_parallel_disputes == 0
                    {
                        if request.used_reasons.is_full() {
                            // Nothing left to challenge with; execute now.
                            request.status = RequestStatus::Resolved;
                            Resolution::ClaimGranted {
                                punished_vouch: request.punished_vouch,
                            }
                        } else {
                            request.status = RequestStatus::Resolving;
                            request.challenge_period_start = now;
                            Resolution::PeriodRestart
                        }
                    } else {
                        Resolution::AlreadySettled
                    }
                }
            };
            (result, request.requester, resolution)
        };

        info!(%dispute_id, %humanity_id, request_id, ?result, "ruling applied");
        self.events.push(RegistryEvent::Ruling {
            dispute_id,
            ruling: result,
        });

        match resolution {
            Resolution::Revocation => {
                humanity.active_request_count = humanity.active_request_count.saturating_sub(1);
                humanity.pending_revocation = false;
                if result == Party::Requester {
                    if let Some(owner) = humanity.owner.take() {
                        self.bindings.remove(&owner);
                    }
                    self.events.push(RegistryEvent::HumanityRevoked {
                        humanity_id,
                        request_id,
                    });
                } else {
                    humanity.last_failed_revocation = now;
                }
            }
            Resolution::ClaimDenied => {
                humanity.active_request_count = humanity.active_request_count.saturating_sub(1);
                self.active_claims.remove(&requester);
            }
            Resolution::ClaimGranted { punished_vouch } => {
                humanity.active_request_count = humanity.active_request_count.saturating_sub(1);
                self.active_claims.remove(&requester);
                if Self::grant_claim(
                    humanity,
                    humanity_id,
                    requester,
                    punished_vouch,
                    self.config.params.humanity_lifespan,
                    now,
                    &mut self.bindings,
                ) {
                    self.events.push(RegistryEvent::HumanityClaimed {
                        humanity_id,
                        request_id,
                    });
                }
            }
            Resolution::PeriodRestart => {
                self.events.push(RegistryEvent::ChallengePeriodRestart {
                    humanity_id,
                    request_id,
                    challenge_id,
                });
            }
            Resolution::AlreadySettled => {}
        }
        Ok(())
    }

    /// Execute a request whose challenge period lapsed uncontested.
    ///
    /// Applies the request's effect, refunds the requester's own round-0
    /// contribution and auto-processes a bounded batch of vouches. Returns
    /// the refunded amount.
    pub fn execute_request(
        &mut self,
        humanity_id: HumanityId,
        request_id: usize,
        now: Timestamp,
    ) -> Result<u128, RegistryError> {
        {
            let request = self.request(humanity_id, request_id)?;
            if request.status != RequestStatus::Resolving {
                return Err(RegistryError::WrongStatus {
                    actual: request.status,
                });
            }
            if !request
                .challenge_period_start
                .has_expired(self.config.params.challenge_period, now)
            {
                return Err(RegistryError::ChallengePeriodNotOver);
            }
        }

        let humanity = self
            .humanities
            .get_mut(&humanity_id)
            .ok_or(RegistryError::HumanityNotFound)?;
        let request = &mut humanity.requests[request_id];
        request.status = RequestStatus::Resolved;
        let requester = request.requester;
        let request_type = request.request_type;
        let punished = request.punished_vouch;
        humanity.active_request_count = humanity.active_request_count.saturating_sub(1);

        match request_type {
            RequestType::Revocation => {
                humanity.pending_revocation = false;
                if let Some(owner) = humanity.owner.take() {
                    self.bindings.remove(&owner);
                }
                info!(%humanity_id, request_id, "humanity revoked");
                self.events.push(RegistryEvent::HumanityRevoked {
                    humanity_id,
                    request_id,
                });
            }
            RequestType::Claim => {
                if Self::grant_claim(
                    humanity,
                    humanity_id,
                    requester,
                    punished,
                    self.config.params.humanity_lifespan,
                    now,
                    &mut self.bindings,
                ) {
                    info!(%humanity_id, request_id, "humanity claimed");
                    self.events.push(RegistryEvent::HumanityClaimed {
                        humanity_id,
                        request_id,
                    });
                }
            }
        }
        self.active_claims.remove(&requester);

        let refund = self.withdraw_fees_and_rewards(requester, humanity_id, request_id, 0, 0)?;
        self.process_vouches(humanity_id, request_id, AUTO_PROCESSED_VOUCHES)?;
        Ok(refund)
    }

    /// Grant or renew ownership if the requester is still eligible.
    fn grant_claim(
        humanity: &mut Humanity,
        humanity_id: HumanityId,
        requester: Address,
        punished_vouch: bool,
        lifespan: u64,
        now: Timestamp,
        bindings: &mut HashMap<Address, HumanityId>,
    ) -> bool {
        if punished_vouch {
            return false;
        }
        let eligible = match humanity.owner {
            None => true,
            Some(owner) => owner == requester || !humanity.is_live(now),
        };
        if !eligible {
            return false;
        }
        if let Some(previous) = humanity.owner.take() {
            if previous != requester {
                bindings.remove(&previous);
            }
        }
        humanity.owner = Some(requester);
        humanity.expiration_time = now.plus(lifespan);
        bindings.insert(requester, humanity_id);
        true
    }

    /// Release (and possibly penalize) the vouches consumed by a resolved
    /// request. Paginated by `count`; call again to continue.
    ///
    /// When the request was lost for an identity-fraud reason, each
    /// voucher's humanity is discharged directly — no separate dispute —
    /// and any pending claim of that voucher is barred from granting.
    pub fn process_vouches(
        &mut self,
        humanity_id: HumanityId,
        request_id: usize,
        count: u32,
    ) -> Result<(), RegistryError> {
        let (to_process, penalize, end) = {
            let request = self.request(humanity_id, request_id)?;
            if request.status != RequestStatus::Resolved {
                return Err(RegistryError::WrongStatus {
                    actual: request.status,
                });
            }
            let start = request.vouches_processed as usize;
            let end = (start + count as usize).min(request.vouches.len());
            let penalize = request.ultimate_challenger.is_some()
                && (request.used_reasons.contains(Reason::Duplicate)
                    || request.used_reasons.contains(Reason::DoesNotExist));
            (request.vouches[start..end].to_vec(), penalize, end)
        };

        for voucher_humanity in to_process {
            let discharged_owner = match self.humanities.get_mut(&voucher_humanity) {
                Some(humanity) => {
                    humanity.vouching = false;
                    if penalize {
                        humanity.owner.take()
                    } else {
                        None
                    }
                }
                None => None,
            };
            if let Some(owner) = discharged_owner {
                self.bindings.remove(&owner);
                info!(voucher = %voucher_humanity, "voucher humanity discharged");
                self.events.push(RegistryEvent::HumanityDischargedDirectly {
                    humanity_id: voucher_humanity,
                });
                // A pending claim by the discharged voucher must not end in
                // a grant when it executes.
                if let Some(&(claim_humanity, claim_request)) = self.active_claims.get(&owner) {
                    if let Some(humanity) = self.humanities.get_mut(&claim_humanity) {
                        if let Some(request) = humanity.requests.get_mut(claim_request) {
                            if request.status != RequestStatus::Resolved {
                                request.punished_vouch = true;
                            }
                        }
                    }
                }
            }
        }

        let request = self.request_mut(humanity_id, request_id)?;
        request.vouches_processed = end as u32;
        self.events.push(RegistryEvent::VouchesProcessed {
            humanity_id,
            request_id,
            end_index: end as u32,
        });
        Ok(())
    }

    /// Pay out a contributor's share of a resolved round.
    ///
    /// Idempotent: the stored contribution is zeroed on payout, so a second
    /// call pays zero. Returns the amount owed to the beneficiary.
    pub fn withdraw_fees_and_rewards(
        &mut self,
        beneficiary: Address,
        humanity_id: HumanityId,
        request_id: usize,
        challenge_id: u32,
        round_id: u32,
    ) -> Result<u128, RegistryError> {
        if beneficiary.is_zero() {
            return Err(RegistryError::ZeroAddress);
        }
        let humanity = self
            .humanities
            .get_mut(&humanity_id)
            .ok_or(RegistryError::HumanityNotFound)?;
        let request = humanity
            .requests
            .get_mut(request_id)
            .ok_or(RegistryError::RequestNotFound)?;
        if request.status != RequestStatus::Resolved {
            return Err(RegistryError::WrongStatus {
                actual: request.status,
            });
        }
        let ultimate = request.ultimate_challenger;
        let challenge = request
            .challenges
            .get_mut(challenge_id as usize)
            .ok_or(RegistryError::ChallengeNotFound)?;
        let last_round_id = challenge.last_round_id();
        let ruling = challenge.ruling.unwrap_or(Party::None);
        let round = challenge
            .rounds
            .get_mut(round_id as usize)
            .ok_or(RegistryError::RoundNotFound)?;

        let (contributed_requester, contributed_challenger) =
            round.take_contribution(&beneficiary);
        let reward = if round_id != 0 && round_id == last_round_id {
            // Unappealed last round: reimburse own contributions as-is.
            contributed_requester + contributed_challenger
        } else if ruling == Party::None {
            // No winner: split pro rata over everything paid in.
            let total_paid =
                round.paid_fees(Party::Requester) + round.paid_fees(Party::Challenger);
            if total_paid > 0 {
                (contributed_requester + contributed_challenger) * round.fee_rewards() / total_paid
            } else {
                0
            }
        } else if challenge_id == 0 && round_id == 0 && ultimate.is_some() {
            // The requester's forfeited deposit: reserved in full for the
            // ultimate challenger.
            match ultimate {
                Some(winner) if winner.challenger == beneficiary => round.drain_rewards(),
                _ => 0,
            }
        } else {
            let winner_contribution = match ruling {
                Party::Requester => contributed_requester,
                Party::Challenger => contributed_challenger,
                Party::None => 0,
            };
            let winner_paid = round.paid_fees(ruling);
            if winner_paid > 0 {
                winner_contribution * round.fee_rewards() / winner_paid
            } else {
                0
            }
        };

        if reward > 0 {
            self.events.push(RegistryEvent::FeesAndRewardsWithdrawn {
                humanity_id,
                request_id,
                challenge_id,
                round_id,
                beneficiary,
                amount: reward,
            });
        }
        Ok(reward)
    }

    /// Attach evidence to an existing request.
    pub fn submit_evidence(
        &mut self,
        submitter: Address,
        humanity_id: HumanityId,
        request_id: usize,
        evidence: &str,
    ) -> Result<(), RegistryError> {
        self.request(humanity_id, request_id)?;
        self.push_evidence_event(humanity_id, request_id, submitter, evidence);
        Ok(())
    }

    // ── Cross-chain entry points ─────────────────────────────────────────

    /// Grant a humanity directly on behalf of the cross-chain proxy.
    ///
    /// Returns `false` (a no-op, not an error) when the humanity is already
    /// live; rejects while any request is unresolved.
    pub fn cc_grant_humanity(
        &mut self,
        caller: Address,
        humanity_id: HumanityId,
        owner: Address,
        expiration_time: Timestamp,
        now: Timestamp,
    ) -> Result<bool, RegistryError> {
        self.config.require_cross_chain(caller)?;
        if let Some(bound) = self.humanity_of(owner, now) {
            if bound != humanity_id {
                return Err(RegistryError::AlreadyBound);
            }
        }
        if let Some(humanity) = self.humanities.get(&humanity_id) {
            if humanity.is_live(now) {
                return Ok(false);
            }
            if humanity.active_request_count > 0 {
                return Err(RegistryError::RequestUnresolved);
            }
        }
        let humanity = self.humanities.entry(humanity_id).or_default();
        if let Some(previous) = humanity.owner.take() {
            self.bindings.remove(&previous);
        }
        humanity.owner = Some(owner);
        humanity.expiration_time = expiration_time;
        self.bindings.insert(owner, humanity_id);

        info!(%humanity_id, %owner, "humanity granted directly");
        self.events.push(RegistryEvent::HumanityGrantedDirectly {
            humanity_id,
            owner,
            expiration_time,
        });
        Ok(true)
    }

    /// Validate that a humanity could be discharged right now, without
    /// mutating. Returns its expiration time.
    ///
    /// Lets the proxy sequence a fallible bridge send before the
    /// irreversible discharge.
    pub fn cc_check_discharge(
        &self,
        caller: Address,
        humanity_id: HumanityId,
        now: Timestamp,
    ) -> Result<Timestamp, RegistryError> {
        self.config.require_cross_chain(caller)?;
        let humanity = self
            .humanities
            .get(&humanity_id)
            .ok_or(RegistryError::HumanityNotClaimed)?;
        if humanity.owner.is_none() {
            return Err(RegistryError::HumanityNotClaimed);
        }
        if !humanity.is_live(now) {
            return Err(RegistryError::HumanityExpired);
        }
        if humanity.vouching {
            return Err(RegistryError::HumanityVouching);
        }
        if humanity.active_request_count > 0 || humanity.pending_revocation {
            return Err(RegistryError::RequestUnresolved);
        }
        Ok(humanity.expiration_time)
    }

    /// Clear a humanity's registry-visible claim on behalf of the
    /// cross-chain proxy (the record itself stays). Returns the expiration
    /// time the claim had.
    pub fn cc_discharge_humanity(
        &mut self,
        caller: Address,
        humanity_id: HumanityId,
        now: Timestamp,
    ) -> Result<Timestamp, RegistryError> {
        let expiration_time = self.cc_check_discharge(caller, humanity_id, now)?;
        if let Some(humanity) = self.humanities.get_mut(&humanity_id) {
            if let Some(owner) = humanity.owner.take() {
                self.bindings.remove(&owner);
            }
        }
        info!(%humanity_id, "humanity discharged directly");
        self.events.push(RegistryEvent::HumanityDischargedDirectly { humanity_id });
        Ok(expiration_time)
    }

    // ── Read API ─────────────────────────────────────────────────────────

    /// Whether `account` currently owns a live humanity.
    pub fn is_human(&self, account: Address, now: Timestamp) -> bool {
        self.humanity_of(account, now).is_some()
    }

    /// Whether `account` is bound to a claimed, unexpired humanity.
    pub fn is_claimed(&self, account: Address, now: Timestamp) -> bool {
        self.humanity_of(account, now).is_some()
    }

    /// The owner a humanity is bound to, while live.
    pub fn bound_to(&self, humanity_id: HumanityId, now: Timestamp) -> Option<Address> {
        let humanity = self.humanities.get(&humanity_id)?;
        if humanity.is_live(now) {
            humanity.owner
        } else {
            None
        }
    }

    /// The humanity an account owns, while live.
    pub fn humanity_of(&self, account: Address, now: Timestamp) -> Option<HumanityId> {
        let humanity_id = *self.bindings.get(&account)?;
        let humanity = self.humanities.get(&humanity_id)?;
        if humanity.owner == Some(account) && humanity.is_live(now) {
            Some(humanity_id)
        } else {
            None
        }
    }

    /// Whether the registry holds a record (live or lapsed) for the id.
    pub fn has_record(&self, humanity_id: HumanityId) -> bool {
        self.humanities.contains_key(&humanity_id)
    }

    pub fn get_humanity_info(&self, humanity_id: HumanityId) -> Option<HumanityInfo> {
        self.humanities.get(&humanity_id).map(|h| HumanityInfo {
            vouching: h.vouching,
            pending_revocation: h.pending_revocation,
            active_request_count: h.active_request_count,
            expiration_time: h.expiration_time,
            owner: h.owner,
            request_count: h.requests.len(),
        })
    }

    pub fn get_request_info(
        &self,
        humanity_id: HumanityId,
        request_id: usize,
    ) -> Option<&Request> {
        self.humanities
            .get(&humanity_id)
            .and_then(|h| h.requests.get(request_id))
    }

    pub fn get_challenge_info(
        &self,
        humanity_id: HumanityId,
        request_id: usize,
        challenge_id: u32,
    ) -> Option<&Challenge> {
        self.get_request_info(humanity_id, request_id)
            .and_then(|r| r.challenges.get(challenge_id as usize))
    }

    pub fn get_round_info(
        &self,
        humanity_id: HumanityId,
        request_id: usize,
        challenge_id: u32,
        round_id: u32,
    ) -> Option<&Round> {
        self.get_challenge_info(humanity_id, request_id, challenge_id)
            .and_then(|c| c.rounds.get(round_id as usize))
    }

    /// A contributor's amounts in a round as `(requester, challenger)`.
    pub fn get_contributions(
        &self,
        humanity_id: HumanityId,
        request_id: usize,
        challenge_id: u32,
        round_id: u32,
        contributor: Address,
    ) -> (u128, u128) {
        self.get_round_info(humanity_id, request_id, challenge_id, round_id)
            .map(|round| round.contribution_of(&contributor))
            .unwrap_or((0, 0))
    }

    pub fn get_vouch_count(&self, humanity_id: HumanityId, request_id: usize) -> usize {
        self.get_request_info(humanity_id, request_id)
            .map(|r| r.vouches.len())
            .unwrap_or(0)
    }

    /// The caller's unresolved claim, if any.
    pub fn claim_of(&self, claimer: Address) -> Option<(HumanityId, usize)> {
        self.active_claims.get(&claimer).copied()
    }

    pub fn dispute_ref(&self, dispute_id: DisputeId) -> Option<&DisputeRef> {
        self.dispute_index.get(&dispute_id)
    }

    // ── Governance ───────────────────────────────────────────────────────

    pub fn change_governor(
        &mut self,
        caller: Address,
        new_governor: Address,
    ) -> Result<(), RegistryError> {
        self.config.require_governor(caller)?;
        self.config.set_governor(new_governor);
        self.events.push(RegistryEvent::GovernorChanged(new_governor));
        Ok(())
    }

    pub fn change_base_deposit(
        &mut self,
        caller: Address,
        base_deposit: u128,
    ) -> Result<(), RegistryError> {
        self.config.require_governor(caller)?;
        self.config.params.base_deposit = base_deposit;
        self.events
            .push(RegistryEvent::BaseDepositChanged(base_deposit));
        Ok(())
    }

    pub fn change_durations(
        &mut self,
        caller: Address,
        humanity_lifespan: u64,
        renewal_period: u64,
        challenge_period: u64,
        failed_revocation_cooldown: u64,
    ) -> Result<(), RegistryError> {
        self.config.require_governor(caller)?;
        self.config.params.humanity_lifespan = humanity_lifespan;
        self.config.params.renewal_period = renewal_period;
        self.config.params.challenge_period = challenge_period;
        self.config.params.failed_revocation_cooldown = failed_revocation_cooldown;
        self.events.push(RegistryEvent::DurationsChanged {
            humanity_lifespan,
            renewal_period,
            challenge_period,
            failed_revocation_cooldown,
        });
        Ok(())
    }

    pub fn change_required_vouches(
        &mut self,
        caller: Address,
        required_vouches: u32,
    ) -> Result<(), RegistryError> {
        self.config.require_governor(caller)?;
        self.config.params.required_vouches = required_vouches;
        self.events
            .push(RegistryEvent::RequiredVouchesChanged(required_vouches));
        Ok(())
    }

    pub fn change_stake_multipliers(
        &mut self,
        caller: Address,
        shared: u128,
        winner: u128,
        loser: u128,
    ) -> Result<(), RegistryError> {
        self.config.require_governor(caller)?;
        self.config.params.shared_stake_multiplier = shared;
        self.config.params.winner_stake_multiplier = winner;
        self.config.params.loser_stake_multiplier = loser;
        self.events.push(RegistryEvent::StakeMultipliersChanged {
            shared,
            winner,
            loser,
        });
        Ok(())
    }

    /// Point new requests at fresh policy documents (takes an arbitrator
    /// data snapshot so in-flight requests keep the old pairing).
    pub fn change_meta_evidence(
        &mut self,
        caller: Address,
        registration_uri: &str,
        clearing_uri: &str,
    ) -> Result<(), RegistryError> {
        self.config.require_governor(caller)?;
        let updates = self.config.bump_meta_evidence();
        self.events.push(RegistryEvent::MetaEvidenceChanged {
            updates,
            registration_uri: registration_uri.to_string(),
            clearing_uri: clearing_uri.to_string(),
        });
        Ok(())
    }

    /// Snapshot a new arbitrator extra-data configuration.
    pub fn change_arbitrator_data(
        &mut self,
        caller: Address,
        extra_data: Vec<u8>,
    ) -> Result<(), RegistryError> {
        self.config.require_governor(caller)?;
        let snapshot_id = self.config.push_arbitrator_data(extra_data);
        self.events
            .push(RegistryEvent::ArbitratorDataChanged { snapshot_id });
        Ok(())
    }

    pub fn change_cross_chain_proxy(
        &mut self,
        caller: Address,
        proxy: Address,
    ) -> Result<(), RegistryError> {
        self.config.require_governor(caller)?;
        self.config.set_cross_chain_proxy(proxy);
        self.events.push(RegistryEvent::CrossChainProxyChanged(proxy));
        Ok(())
    }

    // ── Internals ────────────────────────────────────────────────────────

    fn request(
        &self,
        humanity_id: HumanityId,
        request_id: usize,
    ) -> Result<&Request, RegistryError> {
        self.humanities
            .get(&humanity_id)
            .ok_or(RegistryError::HumanityNotFound)?
            .requests
            .get(request_id)
            .ok_or(RegistryError::RequestNotFound)
    }

    fn request_mut(
        &mut self,
        humanity_id: HumanityId,
        request_id: usize,
    ) -> Result<&mut Request, RegistryError> {
        self.humanities
            .get_mut(&humanity_id)
            .ok_or(RegistryError::HumanityNotFound)?
            .requests
            .get_mut(request_id)
            .ok_or(RegistryError::RequestNotFound)
    }

    fn claim_total_cost(&self, snapshot_id: u32, arbitrator: &dyn Arbitrator) -> u128 {
        self.config.params.base_deposit + self.arbitration_cost_for(snapshot_id, arbitrator)
    }

    fn arbitration_cost_for(&self, snapshot_id: u32, arbitrator: &dyn Arbitrator) -> u128 {
        let extra_data = self
            .config
            .arbitrator_data(snapshot_id)
            .map(|data| data.extra_data.as_slice())
            .unwrap_or(&[]);
        arbitrator.arbitration_cost(extra_data)
    }

    /// Shared tail of claim/renewal creation. Returns
    /// `(request_id, refunded, taken)`.
    fn create_claim_request(
        &mut self,
        requester: Address,
        humanity_id: HumanityId,
        value: u128,
        arbitrator: &dyn Arbitrator,
    ) -> (usize, u128, u128) {
        let snapshot_id = self.config.latest_arbitrator_data_id();
        let total_cost = self.claim_total_cost(snapshot_id, arbitrator);
        let mut request = Request::new(RequestType::Claim, requester, snapshot_id);
        let outcome = match request.challenges[0].rounds[0].contribute(
            requester,
            Party::Requester,
            value,
            total_cost,
        ) {
            Ok(outcome) => outcome,
            // Requester side is never `Party::None`; keep the zero shape.
            Err(_) => persona_ledger::ContributionOutcome {
                taken: 0,
                returned: value,
                paid_in_full: false,
            },
        };

        let humanity = self.humanities.entry(humanity_id).or_default();
        let request_id = humanity.requests.len();
        humanity.requests.push(request);
        humanity.active_request_count += 1;
        self.active_claims.insert(requester, (humanity_id, request_id));
        (request_id, outcome.returned, outcome.taken)
    }

    fn push_evidence_event(
        &mut self,
        humanity_id: HumanityId,
        request_id: usize,
        submitter: Address,
        evidence: &str,
    ) {
        if !evidence.is_empty() {
            self.events.push(RegistryEvent::Evidence {
                humanity_id,
                request_id,
                submitter,
                evidence: evidence.to_string(),
            });
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn push_contribution_event(
        &mut self,
        humanity_id: HumanityId,
        request_id: usize,
        challenge_id: u32,
        round_id: u32,
        contributor: Address,
        amount: u128,
        side: Party,
    ) {
        if amount > 0 {
            self.events.push(RegistryEvent::Contribution {
                humanity_id,
                request_id,
                challenge_id,
                round_id,
                contributor,
                amount,
                side,
            });
        }
    }
}
