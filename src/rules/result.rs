//! Battle outcome.

use serde::{Deserialize, Serialize};

use crate::core::Side;

/// Result of a finished battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleResult {
    /// The other side's HP reached 0.
    Winner(Side),
    /// Both sides fell together, or the turn limit ran out.
    Draw,
}

impl BattleResult {
    /// Check if a side won.
    #[must_use]
    pub fn is_winner(&self, side: Side) -> bool {
        matches!(self, BattleResult::Winner(s) if *s == side)
    }

    /// Decide the result from which sides are still standing.
    ///
    /// Returns `None` while both sides are alive.
    #[must_use]
    pub fn from_alive(player_alive: bool, opponent_alive: bool) -> Option<Self> {
        match (player_alive, opponent_alive) {
            (true, true) => None,
            (true, false) => Some(BattleResult::Winner(Side::Player)),
            (false, true) => Some(BattleResult::Winner(Side::Opponent)),
            (false, false) => Some(BattleResult::Draw),
        }
    }
}
