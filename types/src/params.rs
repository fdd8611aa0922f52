//! Registry parameters — every governance-tunable value of the protocol.

use serde::{Deserialize, Serialize};

/// Divisor shared by all stake multipliers (basis points).
pub const MULTIPLIER_DIVISOR: u128 = 10_000;

/// All governable parameters of a humanity registry.
///
/// Durations are seconds, deposits are raw units. Mutated only through the
/// registry's governance setters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegistryParams {
    /// Base deposit a requester must put up on top of the arbitration cost.
    pub base_deposit: u128,

    /// How long a granted humanity stays valid.
    pub humanity_lifespan: u64,

    /// Window before expiration during which the owner may renew.
    pub renewal_period: u64,

    /// How long a resolving request stays open to challenges.
    pub challenge_period: u64,

    /// Cooldown after a failed revocation before the humanity can be
    /// targeted by another one.
    pub failed_revocation_cooldown: u64,

    /// Number of valid vouches a claim needs to advance out of `Vouching`.
    pub required_vouches: u32,

    /// Appeal stake multiplier when the previous ruling had no winner
    /// (basis points).
    pub shared_stake_multiplier: u128,

    /// Appeal stake multiplier for the side the previous ruling favored
    /// (basis points).
    pub winner_stake_multiplier: u128,

    /// Appeal stake multiplier for the side the previous ruling went
    /// against (basis points).
    pub loser_stake_multiplier: u128,
}

impl RegistryParams {
    /// Intended live-network configuration.
    pub fn mainnet_defaults() -> Self {
        Self {
            base_deposit: 5_000,
            humanity_lifespan: 365 * 24 * 3600, // 1 year
            renewal_period: 90 * 24 * 3600,     // 90 days
            challenge_period: 7 * 24 * 3600,    // 1 week
            failed_revocation_cooldown: 14 * 24 * 3600, // 2 weeks
            required_vouches: 2,
            shared_stake_multiplier: 5_000, // 50%
            winner_stake_multiplier: 2_000, // 20%
            loser_stake_multiplier: 8_000,  // 80%
        }
    }
}

impl Default for RegistryParams {
    fn default() -> Self {
        Self::mainnet_defaults()
    }
}
