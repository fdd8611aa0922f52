//! The cross-chain proxy engine.
//!
//! One proxy per chain mirrors that chain's humanity registry to remote
//! chains and applies inbound updates and transfers. The registry stays the
//! single writer of its own records: the proxy only goes through the
//! registry's dedicated cross-chain entry points, under the proxy credential
//! configured in the registry.

use std::collections::{HashMap, HashSet};

use persona_crypto::transfer_hash;
use persona_registry::HumanityRegistry;
use persona_types::{Address, HumanityId, Timestamp, TransferHash};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::CrossChainError;
use crate::events::CrossChainEvent;
use crate::gateway::BridgeGateway;
use crate::message::BridgeMessage;
use crate::transport::Transport;

/// One chain's view of a humanity.
///
/// On the humanity's home chain the registry is authoritative and this is a
/// shadow; everywhere else it is the advisory mirror external consumers
/// read. `is_home_chain` tells the two apart.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HumanityData {
    pub owner: Option<Address>,
    pub expiration_time: Timestamp,
    /// When this chain last received the humanity by transfer; gates the
    /// next outgoing transfer.
    pub last_transfer_time: Timestamp,
    pub is_home_chain: bool,
}

/// Record of the latest outgoing transfer of a humanity from this chain.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransferRecord {
    pub humanity_id: HumanityId,
    pub expiration_time: Timestamp,
    pub transfer_hash: TransferHash,
    pub destination_proxy: Address,
}

/// The cross-chain proxy of one chain.
pub struct CrossChainProxy {
    /// This proxy's credential, as configured in the paired registry.
    address: Address,
    governor: Address,
    transfer_cooldown: u64,
    /// Approved gateways: gateway address -> foreign proxy address.
    gateways: HashMap<Address, Address>,
    humanity_data: HashMap<HumanityId, HumanityData>,
    /// Live inverse of mirror ownership for address-keyed reads.
    mirror_bindings: HashMap<Address, HumanityId>,
    transfers: HashMap<HumanityId, TransferRecord>,
    received_transfer_hashes: HashSet<TransferHash>,
    events: Vec<CrossChainEvent>,
}

impl CrossChainProxy {
    pub fn new(address: Address, governor: Address, transfer_cooldown: u64) -> Self {
        Self {
            address,
            governor,
            transfer_cooldown,
            gateways: HashMap::new(),
            humanity_data: HashMap::new(),
            mirror_bindings: HashMap::new(),
            transfers: HashMap::new(),
            received_transfer_hashes: HashSet::new(),
            events: Vec::new(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn governor(&self) -> Address {
        self.governor
    }

    pub fn transfer_cooldown(&self) -> u64 {
        self.transfer_cooldown
    }

    /// Drain pending events for the node to process.
    pub fn drain_events(&mut self) -> Vec<CrossChainEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Outbound ─────────────────────────────────────────────────────────

    /// Push this chain's registry state for a humanity to the paired chain.
    ///
    /// Only a chain whose registry holds a record for the id (the chain
    /// that is, or last was, home) may originate an update; a chain holding
    /// nothing but a received mirror cannot. The local shadow is refreshed
    /// from the registry before sending, so a discharged or expired
    /// humanity propagates as inactive.
    pub fn update_humanity(
        &mut self,
        gateway: &BridgeGateway,
        humanity_id: HumanityId,
        registry: &HumanityRegistry,
        transport: &mut dyn Transport,
        now: Timestamp,
    ) -> Result<(), CrossChainError> {
        self.require_gateway(gateway)?;
        if !registry.has_record(humanity_id) {
            return Err(CrossChainError::NotHomeChain);
        }
        let owner = registry.bound_to(humanity_id, now);
        let expiration_time = registry
            .get_humanity_info(humanity_id)
            .map(|info| info.expiration_time)
            .unwrap_or(Timestamp::EPOCH);
        let is_active = owner.is_some();

        let payload = BridgeMessage::Update {
            humanity_id,
            owner,
            expiration_time,
            is_active,
        }
        .encode()?;
        gateway.send_message(self.address, payload, transport)?;

        // Send succeeded; refresh the local shadow to match the registry.
        self.set_mirror_owner(humanity_id, owner);
        let data = self.humanity_data.entry(humanity_id).or_default();
        data.expiration_time = expiration_time;
        data.is_home_chain = is_active;

        info!(%humanity_id, is_active, "humanity update sent");
        self.events.push(CrossChainEvent::UpdateInitiated {
            humanity_id,
            owner,
            expiration_time,
            is_active,
            gateway: gateway.address(),
        });
        Ok(())
    }

    /// Move the caller's humanity to the paired chain.
    ///
    /// The registry discharge is committed only after the bridge send
    /// succeeded, so a synchronous transport failure aborts the whole
    /// operation with no state change on either side.
    pub fn transfer_humanity(
        &mut self,
        caller: Address,
        gateway: &BridgeGateway,
        registry: &mut HumanityRegistry,
        transport: &mut dyn Transport,
        now: Timestamp,
    ) -> Result<TransferHash, CrossChainError> {
        let foreign_proxy = self.require_gateway(gateway)?;
        let humanity_id = registry
            .humanity_of(caller, now)
            .ok_or(CrossChainError::NotHuman)?;
        if let Some(data) = self.humanity_data.get(&humanity_id) {
            if !data
                .last_transfer_time
                .has_expired(self.transfer_cooldown, now)
            {
                return Err(CrossChainError::TransferCooldown);
            }
        }

        // Read-only discharge validation, then the fallible send, then the
        // irreversible registry write.
        let expiration_time = registry.cc_check_discharge(self.address, humanity_id, now)?;
        let tx_hash = transfer_hash(humanity_id, now, self.address, foreign_proxy);
        let payload = BridgeMessage::Transfer {
            humanity_id,
            owner: caller,
            expiration_time,
            transfer_hash: tx_hash,
        }
        .encode()?;
        gateway.send_message(self.address, payload, transport)?;
        registry.cc_discharge_humanity(self.address, humanity_id, now)?;

        // Keep a mirror of the departed humanity so this chain's consumers
        // still see it until an update says otherwise.
        self.set_mirror_owner(humanity_id, Some(caller));
        let data = self.humanity_data.entry(humanity_id).or_default();
        data.expiration_time = expiration_time;
        data.is_home_chain = false;
        self.transfers.insert(
            humanity_id,
            TransferRecord {
                humanity_id,
                expiration_time,
                transfer_hash: tx_hash,
                destination_proxy: foreign_proxy,
            },
        );

        info!(%humanity_id, %tx_hash, "humanity transfer sent");
        self.events.push(CrossChainEvent::TransferInitiated {
            humanity_id,
            owner: caller,
            expiration_time,
            gateway: gateway.address(),
            transfer_hash: tx_hash,
        });
        Ok(tx_hash)
    }

    // ── Inbound ──────────────────────────────────────────────────────────

    /// Apply a payload delivered by the transport through `gateway`.
    ///
    /// The gateway must be approved by this proxy and the origin must be
    /// its paired counterpart. Updates overwrite the mirror last-write-wins;
    /// transfers are applied exactly once (a replayed hash is a successful
    /// no-op, since the transport is free to redeliver).
    pub fn receive_message(
        &mut self,
        gateway: &BridgeGateway,
        origin_gateway: Address,
        payload: &[u8],
        registry: &mut HumanityRegistry,
        now: Timestamp,
    ) -> Result<(), CrossChainError> {
        self.require_gateway(gateway)?;
        gateway.authenticate(origin_gateway)?;

        match BridgeMessage::decode(payload)? {
            BridgeMessage::Update {
                humanity_id,
                owner,
                expiration_time,
                is_active,
            } => {
                let owner = if is_active { owner } else { None };
                self.set_mirror_owner(humanity_id, owner);
                let data = self.humanity_data.entry(humanity_id).or_default();
                data.expiration_time = expiration_time;
                data.is_home_chain = false;

                debug!(%humanity_id, is_active, "humanity update received");
                self.events.push(CrossChainEvent::UpdateReceived {
                    humanity_id,
                    owner,
                    expiration_time,
                    is_active,
                });
            }
            BridgeMessage::Transfer {
                humanity_id,
                owner,
                expiration_time,
                transfer_hash,
            } => {
                if self.received_transfer_hashes.contains(&transfer_hash) {
                    debug!(%transfer_hash, "replayed transfer ignored");
                    return Ok(());
                }
                let granted = registry.cc_grant_humanity(
                    self.address,
                    humanity_id,
                    owner,
                    expiration_time,
                    now,
                )?;
                self.received_transfer_hashes.insert(transfer_hash);
                if granted {
                    self.set_mirror_owner(humanity_id, Some(owner));
                    let data = self.humanity_data.entry(humanity_id).or_default();
                    data.expiration_time = expiration_time;
                    data.last_transfer_time = now;
                    data.is_home_chain = true;
                }

                info!(%humanity_id, %transfer_hash, "humanity transfer received");
                self.events.push(CrossChainEvent::TransferReceived {
                    humanity_id,
                    owner,
                    expiration_time,
                    transfer_hash,
                });
            }
        }
        Ok(())
    }

    // ── Read API ─────────────────────────────────────────────────────────

    /// Whether `account` owns a live humanity, per this chain's registry or
    /// its trusted mirror.
    pub fn is_human(
        &self,
        registry: &HumanityRegistry,
        account: Address,
        now: Timestamp,
    ) -> bool {
        self.humanity_of(registry, account, now).is_some()
    }

    pub fn is_claimed(
        &self,
        registry: &HumanityRegistry,
        account: Address,
        now: Timestamp,
    ) -> bool {
        self.humanity_of(registry, account, now).is_some()
    }

    /// The owner a humanity is bound to: the local registry first, the
    /// mirror as fallback. A mirror is only trusted where it is not
    /// shadowing the authoritative registry (`is_home_chain == false`).
    pub fn bound_to(
        &self,
        registry: &HumanityRegistry,
        humanity_id: HumanityId,
        now: Timestamp,
    ) -> Option<Address> {
        if let Some(owner) = registry.bound_to(humanity_id, now) {
            return Some(owner);
        }
        let data = self.humanity_data.get(&humanity_id)?;
        if !data.is_home_chain && data.owner.is_some() && now < data.expiration_time {
            data.owner
        } else {
            None
        }
    }

    /// The humanity an account owns, per registry or mirror.
    pub fn humanity_of(
        &self,
        registry: &HumanityRegistry,
        account: Address,
        now: Timestamp,
    ) -> Option<HumanityId> {
        if let Some(humanity_id) = registry.humanity_of(account, now) {
            return Some(humanity_id);
        }
        let humanity_id = *self.mirror_bindings.get(&account)?;
        let data = self.humanity_data.get(&humanity_id)?;
        if !data.is_home_chain && data.owner == Some(account) && now < data.expiration_time {
            Some(humanity_id)
        } else {
            None
        }
    }

    pub fn humanity_data(&self, humanity_id: HumanityId) -> Option<&HumanityData> {
        self.humanity_data.get(&humanity_id)
    }

    pub fn transfer_record(&self, humanity_id: HumanityId) -> Option<&TransferRecord> {
        self.transfers.get(&humanity_id)
    }

    pub fn has_received_transfer(&self, transfer_hash: TransferHash) -> bool {
        self.received_transfer_hashes.contains(&transfer_hash)
    }

    /// The foreign proxy an approved gateway points at.
    pub fn bridge_gateway(&self, gateway: Address) -> Option<Address> {
        self.gateways.get(&gateway).copied()
    }

    // ── Governance ───────────────────────────────────────────────────────

    pub fn change_governor(
        &mut self,
        caller: Address,
        new_governor: Address,
    ) -> Result<(), CrossChainError> {
        self.require_governor(caller)?;
        self.governor = new_governor;
        self.events.push(CrossChainEvent::GovernorChanged(new_governor));
        Ok(())
    }

    pub fn set_transfer_cooldown(
        &mut self,
        caller: Address,
        cooldown_secs: u64,
    ) -> Result<(), CrossChainError> {
        self.require_governor(caller)?;
        self.transfer_cooldown = cooldown_secs;
        self.events
            .push(CrossChainEvent::TransferCooldownChanged(cooldown_secs));
        Ok(())
    }

    pub fn add_bridge_gateway(
        &mut self,
        caller: Address,
        gateway: Address,
        foreign_proxy: Address,
    ) -> Result<(), CrossChainError> {
        self.require_governor(caller)?;
        if gateway.is_zero() {
            return Err(CrossChainError::ZeroAddress);
        }
        if self.gateways.contains_key(&gateway) {
            return Err(CrossChainError::GatewayAlreadyApproved(gateway));
        }
        self.gateways.insert(gateway, foreign_proxy);
        self.events.push(CrossChainEvent::GatewayAdded {
            gateway,
            foreign_proxy,
        });
        Ok(())
    }

    /// Revoke a gateway. Removing one that is not approved fails loudly.
    pub fn remove_bridge_gateway(
        &mut self,
        caller: Address,
        gateway: Address,
    ) -> Result<(), CrossChainError> {
        self.require_governor(caller)?;
        if self.gateways.remove(&gateway).is_none() {
            return Err(CrossChainError::GatewayNotApproved(gateway));
        }
        self.events.push(CrossChainEvent::GatewayRemoved { gateway });
        Ok(())
    }

    // ── Internals ────────────────────────────────────────────────────────

    fn require_governor(&self, caller: Address) -> Result<(), CrossChainError> {
        if caller != self.governor {
            return Err(CrossChainError::UnauthorizedCaller);
        }
        Ok(())
    }

    /// The gateway must be approved by this proxy and anchored to it.
    /// Returns the foreign proxy it points at.
    fn require_gateway(&self, gateway: &BridgeGateway) -> Result<Address, CrossChainError> {
        if gateway.home_proxy() != self.address {
            return Err(CrossChainError::GatewayNotApproved(gateway.address()));
        }
        self.gateways
            .get(&gateway.address())
            .copied()
            .ok_or(CrossChainError::GatewayNotApproved(gateway.address()))
    }

    /// Point the mirror's owner field (and the address index) at `owner`.
    fn set_mirror_owner(&mut self, humanity_id: HumanityId, owner: Option<Address>) {
        let data = self.humanity_data.entry(humanity_id).or_default();
        if let Some(previous) = data.owner.take() {
            if self.mirror_bindings.get(&previous) == Some(&humanity_id) {
                self.mirror_bindings.remove(&previous);
            }
        }
        data.owner = owner;
        if let Some(owner) = owner {
            self.mirror_bindings.insert(owner, humanity_id);
        }
    }
}
