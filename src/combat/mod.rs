//! Combat resolver: hit rolls, power aggregation, damage, heals and status
//! effect rolls.

pub mod resolver;

pub use resolver::{
    resolve_combat, resolve_immediate_effect, total_attack, total_defense, CombatOutcome,
    Restored,
};
