use persona_registry::RegistryError;
use persona_types::Address;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrossChainError {
    #[error("caller is not authorized for this operation")]
    UnauthorizedCaller,

    #[error("the zero address is not allowed here")]
    ZeroAddress,

    #[error("gateway {0} is not approved by this proxy")]
    GatewayNotApproved(Address),

    #[error("gateway {0} is already approved")]
    GatewayAlreadyApproved(Address),

    #[error("the foreign gateway is already set")]
    ForeignGatewayAlreadySet,

    #[error("the foreign gateway is not set yet")]
    ForeignGatewayNotSet,

    #[error("only the home proxy may send through this gateway")]
    WrongSender,

    #[error("message origin {0} is not the paired foreign gateway")]
    WrongOrigin(Address),

    #[error("humanity must be updated from its home chain")]
    NotHomeChain,

    #[error("caller does not own a live humanity")]
    NotHuman,

    #[error("transfer cooldown has not elapsed")]
    TransferCooldown,

    #[error("malformed bridge payload: {0}")]
    Codec(#[from] bincode::Error),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Failure of the external message channel. The transport may also drop or
/// redeliver messages asynchronously; only synchronous failures surface
/// here, and they must abort the sending transaction.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("gateway {0} is unreachable")]
    Unreachable(Address),
}
