//! Appeal fee and window policy.

use crate::arbitrator::AppealPeriod;
use crate::error::ArbitrationError;
use persona_types::{Party, RegistryParams, Timestamp, MULTIPLIER_DIVISOR};

/// Total stake a side must raise to fund an appeal round:
/// `appeal_cost + appeal_cost * multiplier / MULTIPLIER_DIVISOR`.
///
/// The side the current ruling favors stakes at the winner multiplier, the
/// other side at the loser multiplier; with no winner both sides share the
/// same multiplier.
pub fn required_appeal_stake(
    appeal_cost: u128,
    params: &RegistryParams,
    current_ruling: Party,
    side: Party,
) -> u128 {
    let multiplier = match current_ruling {
        Party::None => params.shared_stake_multiplier,
        winner if side == winner => params.winner_stake_multiplier,
        _ => params.loser_stake_multiplier,
    };
    appeal_cost + appeal_cost * multiplier / MULTIPLIER_DIVISOR
}

/// Check that `side` may still fund at `now`.
///
/// The winner may fund during the whole window; the loser only during its
/// first half, so a defaulting winner can still be overturned in the second
/// half without a race.
pub fn check_funding_window(
    period: AppealPeriod,
    now: Timestamp,
    current_ruling: Party,
    side: Party,
) -> Result<(), ArbitrationError> {
    if !period.contains(now) {
        return Err(ArbitrationError::AppealPeriodOver);
    }
    let side_is_loser = current_ruling != Party::None && side != current_ruling;
    if side_is_loser && now >= period.half_point() {
        return Err(ArbitrationError::LoserDeadlinePassed);
    }
    Ok(())
}
