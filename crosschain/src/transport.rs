//! The external message channel abstraction.

use crate::error::TransportError;
use persona_types::Address;

/// An at-least-once, asynchronous message channel between gateways.
///
/// `send` may fail synchronously (unreachable peer); the caller must then
/// abort its whole transaction. Delivery happens later, out of band, and may
/// repeat — receivers tolerate redelivery via hash/overwrite semantics.
pub trait Transport {
    fn send(
        &mut self,
        from_gateway: Address,
        to_gateway: Address,
        payload: Vec<u8>,
    ) -> Result<(), TransportError>;
}
