//! Opponent policies.
//!
//! The engine asks an `OpponentPolicy` for every choice a policy-controlled
//! side makes. `HeuristicPolicy` is the default.

pub mod policy;

pub use policy::{HeuristicPolicy, OpponentPolicy, PassivePolicy};
