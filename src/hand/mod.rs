//! Hands and the hand lifecycle.
//!
//! ## Key Types
//!
//! - `Hand`: fixed-length sequence of `Slot`s; slot index is a stable identity
//! - `HandLifecycle`: records used slots as `BackSlot`s and refills them in
//!   place at turn end

pub mod lifecycle;
pub mod slots;

pub use lifecycle::{BackSlot, HandLifecycle, RefillStep};
pub use slots::{Hand, Slot};
