//! Battle configuration.
//!
//! Hosts configure a battle at startup by providing:
//! - `Controller`: who drives each side (human input or the opponent policy)
//! - `CombatantSetup`: starting pools and identity per side
//! - `Pacing`: reveal/settle/refill suspension lengths
//! - `BattleConfig`: combines all configuration
//!
//! Every field has a default, so a partial JSON document is enough:
//!
//! ```
//! use battle_ccg::core::{BattleConfig, Controller, Side};
//!
//! let config = BattleConfig::from_json(r#"{ "seed": 7, "max_turns": 40 }"#).unwrap();
//! assert_eq!(config.seed, 7);
//! assert_eq!(config.max_turns, Some(40));
//! assert_eq!(config.controllers[Side::Player], Controller::Human);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{Side, SideMap};
use crate::error::BattleError;

/// Who drives a side's choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Controller {
    /// Choices arrive as commands; selection phases suspend for them.
    Human,
    /// Choices come from the engine's `OpponentPolicy`.
    Policy,
}

impl Controller {
    #[must_use]
    pub fn is_human(self) -> bool {
        matches!(self, Controller::Human)
    }
}

/// Starting identity and pools for one combatant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatantSetup {
    /// Human-readable name (for display).
    pub display_name: String,

    /// Opaque affinity reference (e.g. a summon). Never interpreted.
    pub affinity: Option<String>,

    pub max_hp: u32,
    pub max_mp: u32,
    pub max_gp: u32,
    pub hp: u32,
    pub mp: u32,
    pub gp: u32,
}

impl CombatantSetup {
    /// Default maximum for every pool.
    pub const DEFAULT_MAX: u32 = 99;

    /// Default starting value for every pool.
    pub const DEFAULT_CURRENT: u32 = 50;

    /// Create a setup with default pools.
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            ..Self::default()
        }
    }

    /// Set the affinity reference.
    #[must_use]
    pub fn with_affinity(mut self, affinity: impl Into<String>) -> Self {
        self.affinity = Some(affinity.into());
        self
    }

    /// Set current HP/MP/GP.
    #[must_use]
    pub fn with_pools(mut self, hp: u32, mp: u32, gp: u32) -> Self {
        self.hp = hp;
        self.mp = mp;
        self.gp = gp;
        self
    }

    /// Set max HP/MP/GP.
    #[must_use]
    pub fn with_max_pools(mut self, max_hp: u32, max_mp: u32, max_gp: u32) -> Self {
        self.max_hp = max_hp;
        self.max_mp = max_mp;
        self.max_gp = max_gp;
        self
    }
}

impl Default for CombatantSetup {
    fn default() -> Self {
        Self {
            display_name: String::new(),
            affinity: None,
            max_hp: Self::DEFAULT_MAX,
            max_mp: Self::DEFAULT_MAX,
            max_gp: Self::DEFAULT_MAX,
            hp: Self::DEFAULT_CURRENT,
            mp: Self::DEFAULT_CURRENT,
            gp: Self::DEFAULT_CURRENT,
        }
    }
}

/// Suspension lengths for the phase routines, in milliseconds.
///
/// These are logical suspension points only. Zero means "yield and carry on".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pacing {
    /// Between revealed cards.
    pub reveal_ms: u64,
    /// After a combat resolution.
    pub settle_ms: u64,
    /// Per refilled slot.
    pub refill_ms: u64,
}

impl Pacing {
    /// No delays at all. Used by tests and unattended runs.
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            reveal_ms: 0,
            settle_ms: 0,
            refill_ms: 0,
        }
    }

    #[must_use]
    pub fn reveal(&self) -> Duration {
        Duration::from_millis(self.reveal_ms)
    }

    #[must_use]
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    #[must_use]
    pub fn refill(&self) -> Duration {
        Duration::from_millis(self.refill_ms)
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            reveal_ms: 500,
            settle_ms: 800,
            refill_ms: 150,
        }
    }
}

/// Complete battle configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Root seed. Dealing, combat and economy each get their own stream.
    pub seed: u64,

    /// Side that takes the first turn.
    pub first_turn: Side,

    /// Who drives each side.
    pub controllers: SideMap<Controller>,

    /// Starting pools and identity.
    pub combatants: SideMap<CombatantSetup>,

    pub pacing: Pacing,

    /// Turns an economy action stays locked after use.
    pub economy_cooldown_turns: u32,

    /// Turn limit; reaching it ends the battle as a draw.
    pub max_turns: Option<u32>,
}

impl BattleConfig {
    /// Create a configuration with the given seed and defaults elsewhere.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, BattleError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set who moves first.
    #[must_use]
    pub fn with_first_turn(mut self, side: Side) -> Self {
        self.first_turn = side;
        self
    }

    /// Set a side's controller.
    #[must_use]
    pub fn with_controller(mut self, side: Side, controller: Controller) -> Self {
        self.controllers[side] = controller;
        self
    }

    /// Set a side's combatant setup.
    #[must_use]
    pub fn with_combatant(mut self, side: Side, setup: CombatantSetup) -> Self {
        self.combatants[side] = setup;
        self
    }

    #[must_use]
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    #[must_use]
    pub fn with_economy_cooldown(mut self, turns: u32) -> Self {
        self.economy_cooldown_turns = turns;
        self
    }

    #[must_use]
    pub fn with_max_turns(mut self, turns: u32) -> Self {
        self.max_turns = Some(turns);
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            first_turn: Side::Player,
            controllers: SideMap::new(|side| match side {
                Side::Player => Controller::Human,
                Side::Opponent => Controller::Policy,
            }),
            combatants: SideMap::new(|side| CombatantSetup::new(side.to_string())),
            pacing: Pacing::default(),
            economy_cooldown_turns: 5,
            max_turns: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BattleConfig::default();

        assert_eq!(config.first_turn, Side::Player);
        assert!(config.controllers[Side::Player].is_human());
        assert!(!config.controllers[Side::Opponent].is_human());
        assert_eq!(config.combatants[Side::Player].max_hp, 99);
        assert_eq!(config.combatants[Side::Player].hp, 50);
        assert_eq!(config.combatants[Side::Opponent].display_name, "Opponent");
        assert_eq!(config.pacing.reveal_ms, 500);
        assert_eq!(config.economy_cooldown_turns, 5);
        assert_eq!(config.max_turns, None);
    }

    #[test]
    fn test_builder() {
        let config = BattleConfig::new(3)
            .with_first_turn(Side::Opponent)
            .with_controller(Side::Player, Controller::Policy)
            .with_combatant(
                Side::Player,
                CombatantSetup::new("Hero").with_affinity("ifrit").with_pools(40, 10, 5),
            )
            .with_pacing(Pacing::instant())
            .with_max_turns(12);

        assert_eq!(config.seed, 3);
        assert_eq!(config.first_turn, Side::Opponent);
        assert_eq!(config.controllers[Side::Player], Controller::Policy);
        assert_eq!(config.combatants[Side::Player].affinity.as_deref(), Some("ifrit"));
        assert_eq!(config.combatants[Side::Player].hp, 40);
        assert_eq!(config.pacing.settle(), Duration::ZERO);
        assert_eq!(config.max_turns, Some(12));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{
            "seed": 11,
            "pacing": { "reveal_ms": 0 },
            "combatants": { "player": { "display_name": "Hero", "hp": 40 },
                            "opponent": { "display_name": "Slime" } }
        }"#;
        let config = BattleConfig::from_json(json).unwrap();

        assert_eq!(config.seed, 11);
        assert_eq!(config.pacing.reveal_ms, 0);
        assert_eq!(config.pacing.settle_ms, 800);
        assert_eq!(config.combatants[Side::Player].hp, 40);
        assert_eq!(config.combatants[Side::Player].max_hp, 99);
        assert_eq!(config.combatants[Side::Opponent].display_name, "Slime");
    }

    #[test]
    fn test_json_round_trip() {
        let config = BattleConfig::new(5).with_max_turns(9);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(BattleConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_bad_json_is_config_error() {
        let err = BattleConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, BattleError::Config(_)));
    }
}
