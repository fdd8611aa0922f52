use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("contributions must fund the requester or challenger side")]
    InvalidSide,

    #[error("round {0} does not exist")]
    RoundNotFound(u32),
}
