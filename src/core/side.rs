//! Battle sides and per-side data storage.
//!
//! ## Side
//!
//! A battle always has exactly two sides. `Side::Player` is the side a host
//! usually drives with input; `Side::Opponent` is usually driven by an
//! [`OpponentPolicy`](crate::ai::OpponentPolicy). Which side is human is a
//! configuration choice (see [`Controller`](crate::core::Controller)).
//!
//! ## SideMap
//!
//! Per-side data storage with O(1) access by `Side`, plus a split borrow for
//! the attacker/defender pairs that combat needs.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two sides of a battle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[default]
    Player,
    Opponent,
}

impl Side {
    /// Both sides, in refill/processing order.
    pub const ALL: [Side; 2] = [Side::Player, Side::Opponent];

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    /// Get the raw side index (0 = player, 1 = opponent).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Opponent => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Player => write!(f, "Player"),
            Side::Opponent => write!(f, "Opponent"),
        }
    }
}

/// Per-side data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use battle_ccg::core::{Side, SideMap};
///
/// let mut hp: SideMap<u32> = SideMap::new(|_| 50);
/// hp[Side::Opponent] = 20;
///
/// assert_eq!(hp[Side::Player], 50);
/// assert_eq!(hp[Side::Opponent], 20);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    pub player: T,
    pub opponent: T,
}

impl<T> SideMap<T> {
    /// Create a new SideMap with values from a factory function.
    pub fn new(factory: impl Fn(Side) -> T) -> Self {
        Self {
            player: factory(Side::Player),
            opponent: factory(Side::Opponent),
        }
    }

    /// Create a new SideMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            player: value.clone(),
            opponent: value,
        }
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }

    /// Borrow both entries mutably, `first` side first.
    ///
    /// Used for attacker/defender pairs.
    pub fn split_mut(&mut self, first: Side) -> (&mut T, &mut T) {
        match first {
            Side::Player => (&mut self.player, &mut self.opponent),
            Side::Opponent => (&mut self.opponent, &mut self.player),
        }
    }

    /// Iterate over (Side, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        [(Side::Player, &self.player), (Side::Opponent, &self.opponent)].into_iter()
    }

    /// Iterate over (Side, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Side, &mut T)> {
        [
            (Side::Player, &mut self.player),
            (Side::Opponent, &mut self.opponent),
        ]
        .into_iter()
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}
