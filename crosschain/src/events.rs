//! Cross-chain event log.

use persona_types::{Address, HumanityId, Timestamp, TransferHash};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CrossChainEvent {
    GatewayAdded {
        gateway: Address,
        foreign_proxy: Address,
    },
    GatewayRemoved {
        gateway: Address,
    },
    GovernorChanged(Address),
    TransferCooldownChanged(u64),
    UpdateInitiated {
        humanity_id: HumanityId,
        owner: Option<Address>,
        expiration_time: Timestamp,
        is_active: bool,
        gateway: Address,
    },
    UpdateReceived {
        humanity_id: HumanityId,
        owner: Option<Address>,
        expiration_time: Timestamp,
        is_active: bool,
    },
    TransferInitiated {
        humanity_id: HumanityId,
        owner: Address,
        expiration_time: Timestamp,
        gateway: Address,
        transfer_hash: TransferHash,
    },
    TransferReceived {
        humanity_id: HumanityId,
        owner: Address,
        expiration_time: Timestamp,
        transfer_hash: TransferHash,
    },
}
