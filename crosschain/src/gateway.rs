//! Bridge gateways — paired relays between two chains' proxies.
//!
//! A gateway is bound to exactly one home proxy at construction and to
//! exactly one foreign counterpart afterwards; the pairing is static and the
//! foreign side cannot be re-set. Outbound messages are accepted only from
//! the home proxy, inbound ones only from the paired counterpart.

use crate::error::CrossChainError;
use crate::transport::Transport;
use persona_types::Address;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BridgeGateway {
    address: Address,
    governor: Address,
    home_proxy: Address,
    foreign_gateway: Option<Address>,
}

impl BridgeGateway {
    pub fn new(address: Address, governor: Address, home_proxy: Address) -> Self {
        Self {
            address,
            governor,
            home_proxy,
            foreign_gateway: None,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn governor(&self) -> Address {
        self.governor
    }

    pub fn home_proxy(&self) -> Address {
        self.home_proxy
    }

    pub fn foreign_gateway(&self) -> Option<Address> {
        self.foreign_gateway
    }

    pub fn change_governor(
        &mut self,
        caller: Address,
        new_governor: Address,
    ) -> Result<(), CrossChainError> {
        if caller != self.governor {
            return Err(CrossChainError::UnauthorizedCaller);
        }
        self.governor = new_governor;
        Ok(())
    }

    /// Pair this gateway with its counterpart on the other chain. One-shot.
    pub fn set_foreign_gateway(
        &mut self,
        caller: Address,
        foreign_gateway: Address,
    ) -> Result<(), CrossChainError> {
        if caller != self.governor {
            return Err(CrossChainError::UnauthorizedCaller);
        }
        if foreign_gateway.is_zero() {
            return Err(CrossChainError::ZeroAddress);
        }
        if self.foreign_gateway.is_some() {
            return Err(CrossChainError::ForeignGatewayAlreadySet);
        }
        self.foreign_gateway = Some(foreign_gateway);
        Ok(())
    }

    /// Relay a payload to the paired counterpart. Only the home proxy may
    /// send; a transport failure propagates so the caller aborts.
    pub fn send_message(
        &self,
        caller: Address,
        payload: Vec<u8>,
        transport: &mut dyn Transport,
    ) -> Result<(), CrossChainError> {
        if caller != self.home_proxy {
            return Err(CrossChainError::WrongSender);
        }
        let foreign = self
            .foreign_gateway
            .ok_or(CrossChainError::ForeignGatewayNotSet)?;
        transport.send(self.address, foreign, payload)?;
        Ok(())
    }

    /// Check that an inbound message originates from the paired counterpart.
    pub fn authenticate(&self, origin_gateway: Address) -> Result<(), CrossChainError> {
        if self.foreign_gateway != Some(origin_gateway) {
            return Err(CrossChainError::WrongOrigin(origin_gateway));
        }
        Ok(())
    }
}
