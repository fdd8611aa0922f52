//! Cross-chain humanity replication.
//!
//! A humanity lives on exactly one home chain, where its registry is
//! authoritative; every other chain holds an advisory mirror. Proxies
//! exchange two kinds of messages through statically paired bridge
//! gateways: updates (last-write-wins mirror refresh) and transfers (move
//! the humanity itself, exactly-once despite at-least-once delivery).

pub mod error;
pub mod events;
pub mod gateway;
pub mod message;
pub mod proxy;
pub mod transport;

pub use error::{CrossChainError, TransportError};
pub use events::CrossChainEvent;
pub use gateway::BridgeGateway;
pub use message::BridgeMessage;
pub use proxy::{CrossChainProxy, HumanityData, TransferRecord};
pub use transport::Transport;
