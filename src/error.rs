//! Error taxonomy.
//!
//! Two tiers:
//!
//! - [`InvalidCommand`]: a command that does not fit the current phase or
//!   turn owner. Rejected as a no-op, reported through
//!   [`Ack::Rejected`], never raised as a fault.
//! - [`BattleError`]: faults that must surface loudly. A bookkeeping error
//!   means the slot-identity invariant was broken somewhere else.
//!
//! Empty choices are `Option::None` and cancellation is a silent return;
//! neither is an error.

use thiserror::Error;

use crate::cards::InstanceId;
use crate::core::{Phase, Side};

/// Faults that abort the current operation.
#[derive(Debug, Error)]
pub enum BattleError {
    /// A refill did not find the recorded consumed card at its slot.
    #[error(
        "bookkeeping mismatch on {side} slot {slot}: expected spent {expected}, found {found}"
    )]
    Bookkeeping {
        side: Side,
        slot: usize,
        expected: InstanceId,
        found: String,
    },

    /// A refill had nothing to draw from.
    #[error("{0} catalog is empty")]
    EmptyCatalog(Side),

    /// Two templates in one catalog share a name.
    #[error("duplicate card template {0:?}")]
    DuplicateTemplate(String),

    /// Configuration or catalog JSON failed to parse.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Why a command was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvalidCommand {
    #[error("no battle in progress")]
    NoBattle,

    #[error("not allowed during {0}")]
    WrongPhase(Phase),

    #[error("it is not {0}'s turn to choose")]
    NotYourTurn(Side),

    #[error("{0} is not human-controlled")]
    NotHuman(Side),

    #[error("slot {0} does not exist")]
    UnknownSlot(usize),

    #[error("slot {0} is spent")]
    EmptySlot(usize),

    #[error("card in slot {0} is not usable in this phase")]
    NotUsable(usize),

    #[error("slot {0} is already selected")]
    AlreadySelected(usize),

    #[error("slot {0} is not selected")]
    NotSelected(usize),

    #[error("nothing is selected")]
    NothingSelected,

    #[error("economy action cooling down for {0} more turns")]
    CoolingDown(u32),

    #[error("no card available to trade")]
    NothingToTrade,

    #[error("deal count must be at least 1")]
    InvalidDealCount,

    #[error("the selection wait was abandoned")]
    StaleWait,

    #[error("both sides are policy-controlled and no turn limit is set")]
    UnboundedBattle,
}

/// Outcome of a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Ack {
    Accepted,
    Rejected(InvalidCommand),
}

impl Ack {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Ack::Accepted)
    }

    /// The rejection reason, if any.
    #[must_use]
    pub fn rejection(&self) -> Option<&InvalidCommand> {
        match self {
            Ack::Accepted => None,
            Ack::Rejected(reason) => Some(reason),
        }
    }
}

impl From<InvalidCommand> for Ack {
    fn from(reason: InvalidCommand) -> Self {
        Ack::Rejected(reason)
    }
}
