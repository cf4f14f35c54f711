//! HP/MP/GP resource pools.
//!
//! Every pool keeps `current` in `[0, max]`. Arithmetic saturates rather
//! than wrapping, and each operation reports how much actually moved.

use serde::{Deserialize, Serialize};

/// Which pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoolKind {
    Hp,
    Mp,
    Gp,
}

impl PoolKind {
    pub const ALL: [PoolKind; 3] = [PoolKind::Hp, PoolKind::Mp, PoolKind::Gp];

    /// Order in which trade prices are paid: gold first, life last.
    pub const PAYMENT_ORDER: [PoolKind; 3] = [PoolKind::Gp, PoolKind::Mp, PoolKind::Hp];
}

impl std::fmt::Display for PoolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoolKind::Hp => write!(f, "HP"),
            PoolKind::Mp => write!(f, "MP"),
            PoolKind::Gp => write!(f, "GP"),
        }
    }
}

/// A bounded resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PoolFields")]
pub struct Pool {
    current: u32,
    max: u32,
}

/// Wire shape of a `Pool`; deserializing goes through the clamp.
#[derive(Deserialize)]
struct PoolFields {
    current: u32,
    max: u32,
}

impl From<PoolFields> for Pool {
    fn from(fields: PoolFields) -> Self {
        Pool::new(fields.current, fields.max)
    }
}

impl Pool {
    /// Create a pool; `current` is clamped to `max`.
    #[must_use]
    pub fn new(current: u32, max: u32) -> Self {
        Self {
            current: current.min(max),
            max,
        }
    }

    /// A pool at its maximum.
    #[must_use]
    pub fn full(max: u32) -> Self {
        Self::new(max, max)
    }

    #[must_use]
    pub fn current(&self) -> u32 {
        self.current
    }

    #[must_use]
    pub fn max(&self) -> u32 {
        self.max
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Add up to `amount`, stopping at max. Returns the amount added.
    pub fn add(&mut self, amount: u32) -> u32 {
        let added = amount.min(self.max.saturating_sub(self.current));
        self.current += added;
        added
    }

    /// Remove up to `amount`, stopping at 0. Returns the amount removed.
    pub fn sub(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.current);
        self.current -= removed;
        removed
    }
}

/// The three pools of one combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pools {
    pub hp: Pool,
    pub mp: Pool,
    pub gp: Pool,
}

impl Pools {
    #[must_use]
    pub fn new(hp: Pool, mp: Pool, gp: Pool) -> Self {
        Self { hp, mp, gp }
    }

    #[must_use]
    pub fn get(&self, kind: PoolKind) -> &Pool {
        match kind {
            PoolKind::Hp => &self.hp,
            PoolKind::Mp => &self.mp,
            PoolKind::Gp => &self.gp,
        }
    }

    pub fn get_mut(&mut self, kind: PoolKind) -> &mut Pool {
        match kind {
            PoolKind::Hp => &mut self.hp,
            PoolKind::Mp => &mut self.mp,
            PoolKind::Gp => &mut self.gp,
        }
    }
}
