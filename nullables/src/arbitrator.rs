//! Nullable arbitrator — scriptable rulings for deterministic tests.

use std::collections::HashMap;

use persona_arbitration::{AppealPeriod, ArbitrationError, Arbitrator, DisputeId};
use persona_types::{Party, Timestamp};

struct NullDispute {
    choices: u32,
    ruling: Party,
    appeal_cost: u128,
    /// `Some` while the current ruling is appealable.
    period: Option<AppealPeriod>,
    solved: bool,
    appeal_count: u32,
}

/// An arbitrator whose rulings the test scripts.
///
/// Disputes start with no ruling. `give_appealable_ruling` opens an appeal
/// window; an appeal resets the dispute to "awaiting ruling" so the test
/// scripts the next one. `give_ruling` (or `execute_ruling` once the window
/// lapsed) finalizes; the test then feeds the final ruling to
/// `HumanityRegistry::rule`.
pub struct NullArbitrator {
    fee: u128,
    next_dispute: u64,
    disputes: HashMap<DisputeId, NullDispute>,
}

impl NullArbitrator {
    pub fn new(arbitration_fee: u128) -> Self {
        Self {
            fee: arbitration_fee,
            next_dispute: 0,
            disputes: HashMap::new(),
        }
    }

    /// Script an appealable ruling with the given appeal cost and window.
    pub fn give_appealable_ruling(
        &mut self,
        dispute: DisputeId,
        ruling: Party,
        appeal_cost: u128,
        window: AppealPeriod,
    ) -> Result<(), ArbitrationError> {
        let state = self
            .disputes
            .get_mut(&dispute)
            .ok_or(ArbitrationError::DisputeNotFound(dispute))?;
        state.ruling = ruling;
        state.appeal_cost = appeal_cost;
        state.period = Some(window);
        Ok(())
    }

    /// Script a final ruling immediately (no appeal window).
    pub fn give_ruling(
        &mut self,
        dispute: DisputeId,
        ruling: Party,
    ) -> Result<(), ArbitrationError> {
        let state = self
            .disputes
            .get_mut(&dispute)
            .ok_or(ArbitrationError::DisputeNotFound(dispute))?;
        state.ruling = ruling;
        state.period = None;
        state.solved = true;
        Ok(())
    }

    /// Finalize the current appealable ruling after its window lapsed.
    /// Returns the now-final ruling.
    pub fn execute_ruling(
        &mut self,
        dispute: DisputeId,
        now: Timestamp,
    ) -> Result<Party, ArbitrationError> {
        let state = self
            .disputes
            .get_mut(&dispute)
            .ok_or(ArbitrationError::DisputeNotFound(dispute))?;
        let period = state.period.ok_or(ArbitrationError::NotAppealable(dispute))?;
        if now < period.end {
            return Err(ArbitrationError::NotAppealable(dispute));
        }
        state.period = None;
        state.solved = true;
        Ok(state.ruling)
    }

    pub fn is_solved(&self, dispute: DisputeId) -> bool {
        self.disputes
            .get(&dispute)
            .map(|state| state.solved)
            .unwrap_or(false)
    }

    pub fn appeal_count(&self, dispute: DisputeId) -> u32 {
        self.disputes
            .get(&dispute)
            .map(|state| state.appeal_count)
            .unwrap_or(0)
    }

    pub fn choices(&self, dispute: DisputeId) -> Option<u32> {
        self.disputes.get(&dispute).map(|state| state.choices)
    }

    pub fn dispute_count(&self) -> usize {
        self.disputes.len()
    }
}

impl Arbitrator for NullArbitrator {
    fn create_dispute(
        &mut self,
        choices: u32,
        _extra_data: &[u8],
        fee: u128,
    ) -> Result<DisputeId, ArbitrationError> {
        if fee < self.fee {
            return Err(ArbitrationError::InsufficientFee {
                needed: self.fee,
                provided: fee,
            });
        }
        let id = DisputeId(self.next_dispute);
        self.next_dispute += 1;
        self.disputes.insert(
            id,
            NullDispute {
                choices,
                ruling: Party::None,
                appeal_cost: self.fee,
                period: None,
                solved: false,
                appeal_count: 0,
            },
        );
        Ok(id)
    }

    fn arbitration_cost(&self, _extra_data: &[u8]) -> u128 {
        self.fee
    }

    fn appeal_cost(&self, dispute: DisputeId) -> Result<u128, ArbitrationError> {
        self.disputes
            .get(&dispute)
            .map(|state| state.appeal_cost)
            .ok_or(ArbitrationError::DisputeNotFound(dispute))
    }

    fn appeal_period(
        &self,
        dispute: DisputeId,
    ) -> Result<Option<AppealPeriod>, ArbitrationError> {
        self.disputes
            .get(&dispute)
            .map(|state| state.period)
            .ok_or(ArbitrationError::DisputeNotFound(dispute))
    }

    fn current_ruling(&self, dispute: DisputeId) -> Result<Party, ArbitrationError> {
        self.disputes
            .get(&dispute)
            .map(|state| state.ruling)
            .ok_or(ArbitrationError::DisputeNotFound(dispute))
    }

    fn appeal(&mut self, dispute: DisputeId, fee: u128) -> Result<(), ArbitrationError> {
        let state = self
            .disputes
            .get_mut(&dispute)
            .ok_or(ArbitrationError::DisputeNotFound(dispute))?;
        if state.period.is_none() {
            return Err(ArbitrationError::NotAppealable(dispute));
        }
        if fee < state.appeal_cost {
            return Err(ArbitrationError::InsufficientFee {
                needed: state.appeal_cost,
                provided: fee,
            });
        }
        // A fresh ruling round: the previous one no longer stands.
        state.appeal_count += 1;
        state.period = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(start: u64, end: u64) -> AppealPeriod {
        AppealPeriod {
            start: Timestamp::new(start),
            end: Timestamp::new(end),
        }
    }

    #[test]
    fn dispute_creation_checks_fee() {
        let mut arbitrator = NullArbitrator::new(1000);
        assert!(matches!(
            arbitrator.create_dispute(2, &[], 999),
            Err(ArbitrationError::InsufficientFee { .. })
        ));
        let id = arbitrator.create_dispute(2, &[], 1000).unwrap();
        assert_eq!(arbitrator.current_ruling(id).unwrap(), Party::None);
        assert_eq!(arbitrator.appeal_period(id).unwrap(), None);
    }

    #[test]
    fn appealable_ruling_then_execute() {
        let mut arbitrator = NullArbitrator::new(1000);
        let id = arbitrator.create_dispute(2, &[], 1000).unwrap();
        arbitrator
            .give_appealable_ruling(id, Party::Challenger, 1000, window(100, 280))
            .unwrap();
        assert_eq!(arbitrator.appeal_period(id).unwrap(), Some(window(100, 280)));

        // Window still open
        assert!(arbitrator.execute_ruling(id, Timestamp::new(200)).is_err());
        let ruling = arbitrator.execute_ruling(id, Timestamp::new(280)).unwrap();
        assert_eq!(ruling, Party::Challenger);
        assert!(arbitrator.is_solved(id));
    }

    #[test]
    fn appeal_resets_the_round() {
        let mut arbitrator = NullArbitrator::new(1000);
        let id = arbitrator.create_dispute(2, &[], 1000).unwrap();
        arbitrator
            .give_appealable_ruling(id, Party::Requester, 1000, window(100, 280))
            .unwrap();
        arbitrator.appeal(id, 1000).unwrap();
        assert_eq!(arbitrator.appeal_count(id), 1);
        assert_eq!(arbitrator.appeal_period(id).unwrap(), None);
        // No longer appealable until the next scripted ruling.
        assert!(matches!(
            arbitrator.appeal(id, 1000),
            Err(ArbitrationError::NotAppealable(_))
        ));
    }
}
