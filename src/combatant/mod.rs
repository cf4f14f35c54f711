//! Combatant state: resource pools and status effects per side.
//!
//! ## Key Types
//!
//! - `Pool` / `Pools`: HP, MP and GP, each clamped to `[0, max]`
//! - `StatusEffect`: an active effect of a `StatusEffectKind`
//! - `CombatantState`: one side's pools, effects and display identity

pub mod pools;
pub mod state;
pub mod status;

pub use pools::{Pool, PoolKind, Pools};
pub use state::CombatantState;
pub use status::{StatusEffect, StatusEffectKind};
