//! Nullable bridge transport — queue messages instead of sending them.

use std::collections::{HashSet, VecDeque};

use persona_crosschain::{Transport, TransportError};
use persona_types::Address;

/// One queued message between two gateways.
#[derive(Clone, Debug)]
pub struct Delivery {
    pub from_gateway: Address,
    pub to_gateway: Address,
    pub payload: Vec<u8>,
}

/// A transport that queues messages for explicit pumping.
///
/// Tests drain the queue with [`deliver_next`](Self::deliver_next) and feed
/// each delivery to the receiving proxy. Redelivery is simulated by
/// re-queueing a cloned delivery; synchronous send failure by marking the
/// destination gateway unreachable.
#[derive(Default)]
pub struct NullTransport {
    queue: VecDeque<Delivery>,
    unreachable: HashSet<Address>,
}

impl NullTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sends toward `gateway` fail synchronously.
    pub fn make_unreachable(&mut self, gateway: Address) {
        self.unreachable.insert(gateway);
    }

    pub fn make_reachable(&mut self, gateway: Address) {
        self.unreachable.remove(&gateway);
    }

    /// Pop the oldest undelivered message.
    pub fn deliver_next(&mut self) -> Option<Delivery> {
        self.queue.pop_front()
    }

    /// Queue a delivery again (the transport is at-least-once).
    pub fn requeue(&mut self, delivery: Delivery) {
        self.queue.push_back(delivery);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Transport for NullTransport {
    fn send(
        &mut self,
        from_gateway: Address,
        to_gateway: Address,
        payload: Vec<u8>,
    ) -> Result<(), TransportError> {
        if self.unreachable.contains(&to_gateway) {
            return Err(TransportError::Unreachable(to_gateway));
        }
        self.queue.push_back(Delivery {
            from_gateway,
            to_gateway,
            payload,
        });
        Ok(())
    }
}
