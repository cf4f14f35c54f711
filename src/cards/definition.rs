//! Card templates - static card data.
//!
//! `CardTemplate` holds the immutable properties of a card. "Fire Fist"
//! has ATK 12 and an 80% hit rate; these are part of the template.
//!
//! Per-deal identity is stored separately in `CardInstance`.

use serde::{Deserialize, Serialize};

use crate::combatant::StatusEffectKind;

/// Price used when a template carries no trade value.
pub const DEFAULT_TRADE_VALUE: u32 = 0;

/// Broad card category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Attack,
    Defense,
    Magic,
    Recovery,
    Special,
}

/// Element tag. Carried for display; combat does not read it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    #[default]
    None,
    Fire,
    Water,
    Wind,
    Thunder,
    Steel,
    Ice,
    Poison,
    Dark,
    Light,
}

/// Role flags used by the selection rules and the opponent policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CardRoles {
    pub primary_attack: bool,
    pub additional_attack: bool,
    pub primary_defense: bool,
    pub counter_attack: bool,
    pub recovery: bool,
    pub special_effect: bool,
}

/// Which pools a recovery amount is applied to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolTargets {
    pub hp: bool,
    pub mp: bool,
    pub gp: bool,
}

impl PoolTargets {
    pub const HP: PoolTargets = PoolTargets {
        hp: true,
        mp: false,
        gp: false,
    };

    /// Check if no pool is targeted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.hp || self.mp || self.gp)
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use battle_ccg::cards::{CardTemplate, CardType};
///
/// let fist = CardTemplate::new("Fire Fist", CardType::Attack)
///     .with_attack(12)
///     .with_hit_rate(80)
///     .primary_attack();
///
/// assert_eq!(fist.attack_power, 12);
/// assert!(fist.roles.primary_attack);
/// assert_eq!(fist.trade_value(), 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTemplate {
    /// Card name. Unique within a catalog.
    pub name: String,

    pub card_type: CardType,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub attack_power: u32,

    #[serde(default)]
    pub defense_power: u32,

    /// Chance to hit, in percent. Values above 100 act as 100.
    #[serde(default = "default_hit_rate")]
    pub hit_rate: u32,

    #[serde(default)]
    pub element: Element,

    /// Amount restored to each pool in `heals`.
    #[serde(default)]
    pub recovery_amount: u32,

    #[serde(default)]
    pub heals: PoolTargets,

    /// Explicit override: usable while attacking regardless of type/roles.
    #[serde(default)]
    pub usable_in_attack: bool,

    /// Explicit override: usable while defending regardless of type/roles.
    #[serde(default)]
    pub usable_in_defense: bool,

    #[serde(default)]
    pub roles: CardRoles,

    /// Several copies may be combined in one selection.
    #[serde(default)]
    pub multi_use: bool,

    /// May stack onto a primary attack.
    #[serde(default)]
    pub stacks_with_primary: bool,

    /// Effect the card may inflict on a hit.
    #[serde(default)]
    pub status_effect: Option<StatusEffectKind>,

    /// Chance in percent that `status_effect` is applied on a hit.
    #[serde(default)]
    pub status_effect_chance: u32,

    /// Buy/sell price in GP. `None` falls back to `DEFAULT_TRADE_VALUE`.
    #[serde(default)]
    pub trade_value: Option<u32>,
}

fn default_hit_rate() -> u32 {
    100
}

impl CardTemplate {
    /// Create a template with zero power and a 100% hit rate.
    #[must_use]
    pub fn new(name: impl Into<String>, card_type: CardType) -> Self {
        Self {
            name: name.into(),
            card_type,
            description: String::new(),
            attack_power: 0,
            defense_power: 0,
            hit_rate: default_hit_rate(),
            element: Element::None,
            recovery_amount: 0,
            heals: PoolTargets::default(),
            usable_in_attack: false,
            usable_in_defense: false,
            roles: CardRoles::default(),
            multi_use: false,
            stacks_with_primary: false,
            status_effect: None,
            status_effect_chance: 0,
            trade_value: None,
        }
    }

    #[must_use]
    pub fn with_attack(mut self, power: u32) -> Self {
        self.attack_power = power;
        self
    }

    #[must_use]
    pub fn with_defense(mut self, power: u32) -> Self {
        self.defense_power = power;
        self
    }

    #[must_use]
    pub fn with_hit_rate(mut self, rate: u32) -> Self {
        self.hit_rate = rate;
        self
    }

    #[must_use]
    pub fn with_element(mut self, element: Element) -> Self {
        self.element = element;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Restore `amount` to each of the given pools when used.
    #[must_use]
    pub fn with_recovery(mut self, amount: u32, heals: PoolTargets) -> Self {
        self.recovery_amount = amount;
        self.heals = heals;
        self
    }

    #[must_use]
    pub fn with_roles(mut self, roles: CardRoles) -> Self {
        self.roles = roles;
        self
    }

    #[must_use]
    pub fn primary_attack(mut self) -> Self {
        self.roles.primary_attack = true;
        self
    }

    #[must_use]
    pub fn additional_attack(mut self) -> Self {
        self.roles.additional_attack = true;
        self
    }

    #[must_use]
    pub fn primary_defense(mut self) -> Self {
        self.roles.primary_defense = true;
        self
    }

    #[must_use]
    pub fn counter_attack(mut self) -> Self {
        self.roles.counter_attack = true;
        self
    }

    /// Override phase usability.
    #[must_use]
    pub fn usable_in(mut self, attack: bool, defense: bool) -> Self {
        self.usable_in_attack = attack;
        self.usable_in_defense = defense;
        self
    }

    #[must_use]
    pub fn with_status_effect(mut self, kind: StatusEffectKind, chance: u32) -> Self {
        self.status_effect = Some(kind);
        self.status_effect_chance = chance;
        self
    }

    #[must_use]
    pub fn with_trade_value(mut self, value: u32) -> Self {
        self.trade_value = Some(value);
        self
    }

    /// Hit rate clamped to `[0, 100]`.
    #[must_use]
    pub fn effective_hit_rate(&self) -> u32 {
        self.hit_rate.min(100)
    }

    /// Buy/sell price in GP.
    #[must_use]
    pub fn trade_value(&self) -> u32 {
        self.trade_value.unwrap_or(DEFAULT_TRADE_VALUE)
    }
}
