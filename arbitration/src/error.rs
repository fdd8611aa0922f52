use crate::arbitrator::DisputeId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArbitrationError {
    #[error("dispute {0} does not exist")]
    DisputeNotFound(DisputeId),

    #[error("dispute {0} is not in an appealable state")]
    NotAppealable(DisputeId),

    #[error("the appeal period is over")]
    AppealPeriodOver,

    #[error("the losing side may only fund during the first half of the appeal period")]
    LoserDeadlinePassed,

    #[error("appeals must fund the requester or challenger side")]
    InvalidSide,

    #[error("insufficient fee: needed {needed}, provided {provided}")]
    InsufficientFee { needed: u128, provided: u128 },
}
