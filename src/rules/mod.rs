//! Card rules, selection policy, and battle outcome.
//!
//! Everything in here is a pure function of card templates and selections.
//! The session calls into these rules but never re-derives them.

pub mod card_rules;
pub mod result;
pub mod selection;

pub use card_rules::{
    has_conflict, is_immediate_action, is_usable_in_attack_phase, is_usable_in_defense_phase,
};
pub use result::BattleResult;
pub use selection::{SelectOutcome, SelectionSet};
