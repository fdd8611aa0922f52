//! Privileged mutable configuration.
//!
//! All governable state lives in one aggregate mutated only through setters
//! that validate the caller's credential — no ambient globals. Arbitrator
//! configuration is snapshotted: in-flight requests keep the snapshot they
//! were created under.

use crate::error::RegistryError;
use persona_types::{Address, RegistryParams};
use serde::{Deserialize, Serialize};

/// One arbitrator configuration snapshot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArbitratorData {
    /// How many times the meta-evidence was updated when this snapshot was
    /// taken (pairs rulings with the right policy documents).
    pub meta_evidence_updates: u32,
    /// Opaque arbitrator extra data (court/jury configuration).
    pub extra_data: Vec<u8>,
}

/// Governor-controlled configuration of one registry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdminConfig {
    governor: Address,
    pub params: RegistryParams,
    /// The only caller allowed into the `cc_*` entry points.
    cross_chain_proxy: Option<Address>,
    meta_evidence_updates: u32,
    arbitrator_data_history: Vec<ArbitratorData>,
}

impl AdminConfig {
    pub fn new(governor: Address, params: RegistryParams, arbitrator_extra_data: Vec<u8>) -> Self {
        Self {
            governor,
            params,
            cross_chain_proxy: None,
            meta_evidence_updates: 0,
            arbitrator_data_history: vec![ArbitratorData {
                meta_evidence_updates: 0,
                extra_data: arbitrator_extra_data,
            }],
        }
    }

    pub fn governor(&self) -> Address {
        self.governor
    }

    pub fn cross_chain_proxy(&self) -> Option<Address> {
        self.cross_chain_proxy
    }

    pub fn require_governor(&self, caller: Address) -> Result<(), RegistryError> {
        if caller != self.governor {
            return Err(RegistryError::UnauthorizedCaller);
        }
        Ok(())
    }

    pub fn require_cross_chain(&self, caller: Address) -> Result<(), RegistryError> {
        if self.cross_chain_proxy != Some(caller) {
            return Err(RegistryError::UnauthorizedCaller);
        }
        Ok(())
    }

    pub fn set_governor(&mut self, new_governor: Address) {
        self.governor = new_governor;
    }

    pub fn set_cross_chain_proxy(&mut self, proxy: Address) {
        self.cross_chain_proxy = Some(proxy);
    }

    /// Latest snapshot id (what new requests are created under).
    pub fn latest_arbitrator_data_id(&self) -> u32 {
        (self.arbitrator_data_history.len() - 1) as u32
    }

    pub fn arbitrator_data(&self, id: u32) -> Option<&ArbitratorData> {
        self.arbitrator_data_history.get(id as usize)
    }

    pub fn arbitrator_data_count(&self) -> usize {
        self.arbitrator_data_history.len()
    }

    /// Record a meta-evidence update; takes a fresh snapshot so new requests
    /// pair with the new documents. Returns the new update counter.
    pub fn bump_meta_evidence(&mut self) -> u32 {
        self.meta_evidence_updates += 1;
        let extra_data = self
            .arbitrator_data_history
            .last()
            .map(|d| d.extra_data.clone())
            .unwrap_or_default();
        self.arbitrator_data_history.push(ArbitratorData {
            meta_evidence_updates: self.meta_evidence_updates,
            extra_data,
        });
        self.meta_evidence_updates
    }

    /// Snapshot a new arbitrator extra-data configuration. Returns the new
    /// snapshot id.
    pub fn push_arbitrator_data(&mut self, extra_data: Vec<u8>) -> u32 {
        self.arbitrator_data_history.push(ArbitratorData {
            meta_evidence_updates: self.meta_evidence_updates,
            extra_data,
        });
        self.latest_arbitrator_data_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> Address {
        Address::new([n; 20])
    }

    fn config() -> AdminConfig {
        AdminConfig::new(addr(1), RegistryParams::mainnet_defaults(), vec![0x85])
    }

    #[test]
    fn governor_credential_enforced() {
        let config = config();
        config.require_governor(addr(1)).unwrap();
        assert!(config.require_governor(addr(2)).is_err());
    }

    #[test]
    fn cross_chain_credential_requires_configuration() {
        let mut config = config();
        assert!(config.require_cross_chain(addr(3)).is_err());
        config.set_cross_chain_proxy(addr(3));
        config.require_cross_chain(addr(3)).unwrap();
        assert!(config.require_cross_chain(addr(4)).is_err());
    }

    #[test]
    fn meta_evidence_bump_snapshots_current_extra_data() {
        let mut config = config();
        assert_eq!(config.latest_arbitrator_data_id(), 0);
        config.bump_meta_evidence();
        assert_eq!(config.latest_arbitrator_data_id(), 1);
        let data = config.arbitrator_data(1).unwrap();
        assert_eq!(data.meta_evidence_updates, 1);
        assert_eq!(data.extra_data, vec![0x85]);
    }

    #[test]
    fn arbitrator_data_push_keeps_meta_counter() {
        let mut config = config();
        config.bump_meta_evidence();
        let id = config.push_arbitrator_data(vec![0xFA]);
        assert_eq!(id, 2);
        let data = config.arbitrator_data(2).unwrap();
        assert_eq!(data.meta_evidence_updates, 1);
        assert_eq!(data.extra_data, vec![0xFA]);
    }
}
