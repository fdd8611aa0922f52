//! Parties to a request and the reasons a request can be challenged for.

use serde::{Deserialize, Serialize};

/// A side of a request, used both for funding and for rulings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Party {
    /// Default when there is no requester or challenger. Also the
    /// inconclusive ruling ("refused to arbitrate").
    #[default]
    None,
    /// The party that made the request.
    Requester,
    /// The party that challenged the request.
    Challenger,
}

impl Party {
    /// The opposing side. `None` has no opponent.
    pub fn opponent(&self) -> Party {
        match self {
            Party::None => Party::None,
            Party::Requester => Party::Challenger,
            Party::Challenger => Party::Requester,
        }
    }
}

/// Reason for challenging a claim request.
///
/// `None` is reserved for challenges of revocation requests, which carry no
/// reason of their own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reason {
    #[default]
    None,
    /// The submission does not comply with the submission rules.
    IncorrectSubmission,
    /// The submitter has existed but does not exist anymore.
    Deceased,
    /// The submitter is already registered under another humanity. The
    /// challenger must point at the duplicate.
    Duplicate,
    /// The submitter is not a real, existing person.
    DoesNotExist,
}

/// The set of concrete reasons already raised against a request.
///
/// A small tagged set over the four concrete reasons; `Reason::None` is
/// never a member.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasonSet(u8);

impl ReasonSet {
    pub const EMPTY: Self = Self(0);

    fn bit(reason: Reason) -> u8 {
        match reason {
            Reason::None => 0,
            Reason::IncorrectSubmission => 1 << 0,
            Reason::Deceased => 1 << 1,
            Reason::Duplicate => 1 << 2,
            Reason::DoesNotExist => 1 << 3,
        }
    }

    pub fn insert(&mut self, reason: Reason) {
        self.0 |= Self::bit(reason);
    }

    pub fn remove(&mut self, reason: Reason) {
        self.0 &= !Self::bit(reason);
    }

    pub fn contains(&self, reason: Reason) -> bool {
        let bit = Self::bit(reason);
        bit != 0 && self.0 & bit == bit
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// All four concrete reasons have been raised.
    pub fn is_full(&self) -> bool {
        self.0 == 0b1111
    }
}
