//! One funding epoch of a challenge or appeal.

use crate::error::LedgerError;
use persona_types::{Address, Party};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Result of a single contribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContributionOutcome {
    /// Amount actually taken from the sender.
    pub taken: u128,
    /// Overpayment returned to the sender immediately.
    pub returned: u128,
    /// The contributed side reached its requirement with this contribution.
    pub paid_in_full: bool,
}

/// Crowdfunded contribution state for one round.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Round {
    /// Total paid per party (`None` is unused but keeps `Party` indexing
    /// uniform with rulings).
    paid_fees: [u128; 3],
    /// The single side currently fully funded, or `Party::None`.
    side_funded: Party,
    /// Collected value still owed back to contributors. Reduced when a
    /// dispute or appeal consumes the arbitration cost, and when rewards
    /// are withdrawn.
    fee_rewards: u128,
    /// Whether this round's dispute was appealed (or, for round 0, whether
    /// the challenge consumed it).
    appealed: bool,
    /// Per-contributor amounts, per side.
    contributions: HashMap<Address, [u128; 3]>,
}

fn side_index(side: Party) -> usize {
    match side {
        Party::None => 0,
        Party::Requester => 1,
        Party::Challenger => 2,
    }
}

impl Round {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a contribution of `amount` toward `side`, capped at the
    /// side's outstanding requirement. Overpayment is returned, never held.
    ///
    /// Once a side's requirement is met the side-funded flag is re-evaluated
    /// with the historical rule: an already-funded side flips the flag back
    /// to `None`, and a later contribution to that side flips it to the side
    /// again. Callers that must reject double funding check `side_funded()`
    /// before contributing.
    // TODO: the flag flip on repeated full funding is a known quirk kept
    // bit-for-bit until a product decision retires it (see DESIGN.md).
    pub fn contribute(
        &mut self,
        contributor: Address,
        side: Party,
        amount: u128,
        total_required: u128,
    ) -> Result<ContributionOutcome, LedgerError> {
        if side == Party::None {
            return Err(LedgerError::InvalidSide);
        }
        let idx = side_index(side);
        let outstanding = total_required.saturating_sub(self.paid_fees[idx]);
        let taken = amount.min(outstanding);

        self.paid_fees[idx] += taken;
        self.contributions.entry(contributor).or_default()[idx] += taken;
        self.fee_rewards += taken;

        let mut paid_in_full = false;
        if self.paid_fees[idx] >= total_required {
            self.side_funded = if self.side_funded == Party::None {
                side
            } else {
                Party::None
            };
            paid_in_full = true;
        }

        Ok(ContributionOutcome {
            taken,
            returned: amount - taken,
            paid_in_full,
        })
    }

    /// Total paid toward a side.
    pub fn paid_fees(&self, side: Party) -> u128 {
        self.paid_fees[side_index(side)]
    }

    /// The side currently flagged as fully funded.
    pub fn side_funded(&self) -> Party {
        self.side_funded
    }

    pub fn fee_rewards(&self) -> u128 {
        self.fee_rewards
    }

    /// Consume `cost` from the rewards pool (dispute or appeal creation).
    pub fn consume_cost(&mut self, cost: u128) {
        self.fee_rewards = self.fee_rewards.saturating_sub(cost);
    }

    /// Drain the whole rewards pool (ultimate-challenger payout).
    pub fn drain_rewards(&mut self) -> u128 {
        std::mem::take(&mut self.fee_rewards)
    }

    /// Reduce the rewards pool by a withdrawn amount.
    pub fn deduct_rewards(&mut self, amount: u128) {
        self.fee_rewards = self.fee_rewards.saturating_sub(amount);
    }

    pub fn appealed(&self) -> bool {
        self.appealed
    }

    pub fn set_appealed(&mut self) {
        self.appealed = true;
    }

    /// A contributor's amounts as `(requester side, challenger side)`.
    pub fn contribution_of(&self, contributor: &Address) -> (u128, u128) {
        match self.contributions.get(contributor) {
            Some(amounts) => (amounts[1], amounts[2]),
            None => (0, 0),
        }
    }

    /// Zero out a contributor's stored amounts, returning what they were.
    /// Withdrawals call this to stay idempotent.
    pub fn take_contribution(&mut self, contributor: &Address) -> (u128, u128) {
        match self.contributions.get_mut(contributor) {
            Some(amounts) => {
                let taken = (amounts[1], amounts[2]);
                amounts[1] = 0;
                amounts[2] = 0;
                taken
            }
            None => (0, 0),
        }
    }
}
