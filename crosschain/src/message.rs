//! Bridge wire format.
//!
//! Messages travel between paired gateways as opaque bincode payloads; the
//! receiving proxy decodes and applies them.

use crate::error::CrossChainError;
use persona_types::{Address, HumanityId, Timestamp, TransferHash};
use serde::{Deserialize, Serialize};

/// A message between two chains' proxies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BridgeMessage {
    /// Refresh the receiver's cached mirror of a humanity. Applied
    /// last-write-wins; naturally idempotent under redelivery.
    Update {
        humanity_id: HumanityId,
        owner: Option<Address>,
        expiration_time: Timestamp,
        is_active: bool,
    },
    /// Move a humanity to the receiving chain. The transfer hash makes the
    /// application exactly-once despite at-least-once delivery.
    Transfer {
        humanity_id: HumanityId,
        owner: Address,
        expiration_time: Timestamp,
        transfer_hash: TransferHash,
    },
}

impl BridgeMessage {
    pub fn encode(&self) -> Result<Vec<u8>, CrossChainError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn decode(payload: &[u8]) -> Result<Self, CrossChainError> {
        Ok(bincode::deserialize(payload)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_roundtrip() {
        let message = BridgeMessage::Update {
            humanity_id: HumanityId::new([1u8; 20]),
            owner: Some(Address::new([2u8; 20])),
            expiration_time: Timestamp::new(1000),
            is_active: true,
        };
        let encoded = message.encode().unwrap();
        assert_eq!(BridgeMessage::decode(&encoded).unwrap(), message);
    }

    #[test]
    fn transfer_roundtrip() {
        let message = BridgeMessage::Transfer {
            humanity_id: HumanityId::new([1u8; 20]),
            owner: Address::new([2u8; 20]),
            expiration_time: Timestamp::new(1000),
            transfer_hash: TransferHash::new([9u8; 32]),
        };
        let encoded = message.encode().unwrap();
        assert_eq!(BridgeMessage::decode(&encoded).unwrap(), message);
    }

    #[test]
    fn garbage_fails_to_decode() {
        assert!(BridgeMessage::decode(&[0xFF; 3]).is_err());
    }
}
