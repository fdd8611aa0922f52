use persona_arbitration::ArbitrationError;
use persona_ledger::LedgerError;
use persona_types::{Reason, RequestStatus};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("caller is not authorized for this operation")]
    UnauthorizedCaller,

    #[error("the zero address/id is not allowed here")]
    ZeroAddress,

    #[error("humanity is already claimed")]
    HumanityAlreadyClaimed,

    #[error("humanity is not claimed")]
    HumanityNotClaimed,

    #[error("humanity has expired")]
    HumanityExpired,

    #[error("humanity does not exist")]
    HumanityNotFound,

    #[error("humanity is currently vouching for a pending request")]
    HumanityVouching,

    #[error("address is already bound to a live humanity")]
    AlreadyBound,

    #[error("caller already has a pending claim")]
    ClaimPending,

    #[error("caller has no pending claim")]
    NoPendingClaim,

    #[error("humanity has an unresolved request")]
    RequestUnresolved,

    #[error("request does not exist")]
    RequestNotFound,

    #[error("challenge does not exist")]
    ChallengeNotFound,

    #[error("round does not exist")]
    RoundNotFound,

    #[error("request is {actual:?}, which does not permit this operation")]
    WrongStatus { actual: RequestStatus },

    #[error("renewal period is not open yet")]
    RenewalNotOpen,

    #[error("only the owner may do this")]
    NotOwner,

    #[error("failed-revocation cooldown has not elapsed")]
    RevocationCooldown,

    #[error("insufficient funding: needed {needed}, provided {provided}")]
    UnderFunded { needed: u128, provided: u128 },

    #[error("requester side is not fully funded")]
    RequesterNotFullyFunded,

    #[error("not enough valid vouches: have {have}, need {need}")]
    NotEnoughVouches { have: u32, need: u32 },

    #[error("challenge period is over")]
    ChallengePeriodOver,

    #[error("challenge period has not elapsed yet")]
    ChallengePeriodNotOver,

    #[error("a challenge of a claim request must state a reason")]
    ReasonRequired,

    #[error("a challenge of a revocation request must not state a reason")]
    ReasonForbidden,

    #[error("reason {0:?} was already used for this request")]
    ReasonAlreadyUsed(Reason),

    #[error("revocation requests take a single challenge")]
    AlreadyChallenged,

    #[error("a duplicate challenge must name the duplicate humanity")]
    DuplicateRequired,

    #[error("a humanity cannot be a duplicate of itself")]
    SelfDuplicate,

    #[error("this duplicate was already named in another challenge")]
    DuplicateAlreadyUsed,

    #[error("the named duplicate is neither claimed nor being claimed")]
    WrongDuplicateStatus,

    #[error("this side already funded the round")]
    SideAlreadyFunded,

    #[error(transparent)]
    Arbitration(#[from] ArbitrationError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
