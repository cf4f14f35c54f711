//! Core battle types: sides, phases, cancellation scopes, RNG, configuration.
//!
//! This module contains the building blocks every other component uses.
//! Nothing in here knows about cards or combat.

pub mod config;
pub mod phase;
pub mod rng;
pub mod scope;
pub mod side;

pub use config::{BattleConfig, CombatantSetup, Controller, Pacing};
pub use phase::Phase;
pub use rng::{GameRng, RollSource, ScriptedRolls};
pub use scope::{PhaseScope, ScopeToken};
pub use side::{Side, SideMap};
