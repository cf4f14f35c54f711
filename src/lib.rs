//! # battle-ccg
//!
//! A two-sided, turn-based card battle engine.
//!
//! Two combatants hold fixed-size hands dealt from per-side catalogs. The
//! turn owner commits an attack, the other side answers with a defense, and
//! the exchange resolves against a hit roll. Spent cards keep their slot
//! until turn end, when each one is refilled in place.
//!
//! ## Design Principles
//!
//! 1. **One Authoritative Phase**: every phase change opens a new
//!    cancellation scope. Routines suspended for pacing re-check their token
//!    after each pause and return without effect once their phase is gone.
//!
//! 2. **Slot Identity**: a hand never shrinks or reorders during a turn.
//!    Only the explicit draw of a bought or sold card adds a slot.
//!
//! 3. **Rejection Over Faults**: a command that does not fit the current
//!    phase is a no-op reported through [`Ack`]. Only broken bookkeeping and
//!    bad data surface as [`BattleError`].
//!
//! 4. **Deterministic Core**: deals, trades and combat rolls come from
//!    seeded ChaCha streams; tests script rolls through [`ScriptedRolls`].
//!
//! ## Modules
//!
//! - `core`: sides, phases, scopes, RNG and configuration
//! - `cards`: templates, instances and catalogs
//! - `rules`: card usability, selection sets and battle results
//! - `combatant`: HP/MP/GP pools and status effects
//! - `combat`: attack/defense resolution
//! - `hand`: slot-stable hands and the back-slot refill lifecycle
//! - `economy`: buying and selling cards between hands
//! - `ai`: opponent policies
//! - `events`: outbound notifications
//! - `session`: battle state and the async `BattleEngine`

pub mod ai;
pub mod cards;
pub mod combat;
pub mod combatant;
pub mod core;
pub mod economy;
pub mod error;
pub mod events;
pub mod hand;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    BattleConfig, CombatantSetup, Controller, GameRng, Pacing, Phase, PhaseScope, RollSource,
    ScopeToken, ScriptedRolls, Side, SideMap,
};

pub use crate::cards::{CardCatalog, CardInstance, CardTemplate, CardType, Element, InstanceId};

pub use crate::rules::{BattleResult, SelectionSet};

pub use crate::combatant::{CombatantState, PoolKind, StatusEffect, StatusEffectKind};

pub use crate::combat::{resolve_combat, resolve_immediate_effect, CombatOutcome};

pub use crate::hand::{Hand, HandLifecycle, Slot};

pub use crate::economy::{Cooldowns, EconomyAction};

pub use crate::ai::{HeuristicPolicy, OpponentPolicy, PassivePolicy};

pub use crate::events::{BattleEvent, EventSink};

pub use crate::error::{Ack, BattleError, InvalidCommand};

pub use crate::session::{BattleEngine, BattleSession, SelectionWait};
