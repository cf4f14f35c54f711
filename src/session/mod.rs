//! Battle sessions and the async phase driver.
//!
//! - `state`: the synchronous battle state and its transitions
//! - `engine`: `BattleEngine`, the handle hosts issue commands through

pub mod engine;
pub mod state;

pub use engine::BattleEngine;
pub use state::{BattleSession, Entry, SelectionWait};
