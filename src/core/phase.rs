//! Battle phases.
//!
//! The turn cycle is a closed set of phases:
//!
//! ```text
//! Intro -> TurnStart -> AttackSelect -> AttackConfirm -> DefenseSelect
//!       -> DefenseConfirm -> TurnEnd -> TurnStart ...
//! ```
//!
//! `BattleEnd` is terminal. Immediate actions (recovery) jump from
//! `AttackSelect` straight to `TurnEnd`.

use serde::{Deserialize, Serialize};

/// A named step of the turn cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Hands dealt, nothing has happened yet.
    #[default]
    Intro,
    /// Status effects and cooldowns tick for the turn owner.
    TurnStart,
    /// The turn owner picks attack cards or an immediate action.
    AttackSelect,
    /// The committed attack is revealed.
    AttackConfirm,
    /// The defender picks 0..N defense cards.
    DefenseSelect,
    /// Defense revealed and the exchange resolved.
    DefenseConfirm,
    /// Spent slots refilled, turn ownership flips.
    TurnEnd,
    /// Terminal.
    BattleEnd,
}

impl Phase {
    /// Phases in which a side waits on a selection.
    #[must_use]
    pub const fn is_selection(self) -> bool {
        matches!(self, Phase::AttackSelect | Phase::DefenseSelect)
    }

    /// Check if this is the terminal phase.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Phase::BattleEnd)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Intro => "Intro",
            Phase::TurnStart => "TurnStart",
            Phase::AttackSelect => "AttackSelect",
            Phase::AttackConfirm => "AttackConfirm",
            Phase::DefenseSelect => "DefenseSelect",
            Phase::DefenseConfirm => "DefenseConfirm",
            Phase::TurnEnd => "TurnEnd",
            Phase::BattleEnd => "BattleEnd",
        };
        f.write_str(name)
    }
}
