//! Deterministic random number generation.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Context streams**: Independent sequences for dealing, combat rolls
//!   and economy targeting, so forcing one stream never shifts another
//! - **Roll sources**: Combat consumes percentile rolls through the
//!   `RollSource` trait, which tests replace with `ScriptedRolls`
//!
//! ```
//! use battle_ccg::core::{GameRng, RollSource};
//!
//! let root = GameRng::new(42);
//! let mut combat = root.for_context("combat");
//! let mut again = GameRng::new(42).for_context("combat");
//!
//! assert_eq!(combat.roll_percent(), again.roll_percent());
//! ```

use std::collections::VecDeque;
use std::hash::{Hash, Hasher};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG.
///
/// Uses ChaCha8 for speed while keeping streams reproducible across
/// platforms.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        let context_seed = hasher.finish();

        Self::new(context_seed)
    }

    /// Seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random integer in the given range.
    pub fn gen_range(&mut self, range: std::ops::Range<u32>) -> u32 {
        self.inner.gen_range(range)
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }
}

/// Source of percentile rolls in `[0, 100)`.
///
/// Hit checks and status-effect chances draw from this. Combat outcomes are
/// reproducible given a fixed hand and a fixed roll stream.
pub trait RollSource: Send {
    /// Draw one roll in `[0, 100)`.
    fn roll_percent(&mut self) -> u32;
}

impl RollSource for GameRng {
    fn roll_percent(&mut self) -> u32 {
        self.gen_range(0..100)
    }
}

/// A forced roll stream.
///
/// Yields queued rolls in order, then `fallback` forever. Values are
/// clamped into `[0, 99]`.
///
/// ```
/// use battle_ccg::core::{RollSource, ScriptedRolls};
///
/// let mut rolls = ScriptedRolls::new([80, 5]).with_fallback(0);
/// assert_eq!(rolls.roll_percent(), 80);
/// assert_eq!(rolls.roll_percent(), 5);
/// assert_eq!(rolls.roll_percent(), 0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScriptedRolls {
    queue: VecDeque<u32>,
    fallback: u32,
}

impl ScriptedRolls {
    /// Queue the given rolls; the fallback defaults to 0 (always hits).
    pub fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        Self {
            queue: rolls.into_iter().collect(),
            fallback: 0,
        }
    }

    /// A stream that always rolls `value`.
    #[must_use]
    pub fn always(value: u32) -> Self {
        Self::new([]).with_fallback(value)
    }

    /// Set the roll returned once the queue runs dry.
    #[must_use]
    pub fn with_fallback(mut self, value: u32) -> Self {
        self.fallback = value;
        self
    }

    /// Rolls still queued.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl RollSource for ScriptedRolls {
    fn roll_percent(&mut self) -> u32 {
        self.queue.pop_front().unwrap_or(self.fallback).min(99)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_range(0..1000), rng2.gen_range(0..1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.gen_range(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.gen_range(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_context_produces_different_sequence() {
        let rng = GameRng::new(42);
        let mut deal = rng.for_context("deal");
        let mut combat = rng.for_context("combat");

        let seq1: Vec<_> = (0..10).map(|_| deal.gen_range(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| combat.gen_range(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_context_is_deterministic() {
        let mut ctx1 = GameRng::new(42).for_context("combat");
        let mut ctx2 = GameRng::new(42).for_context("combat");

        for _ in 0..10 {
            assert_eq!(ctx1.roll_percent(), ctx2.roll_percent());
        }
    }

    #[test]
    fn test_roll_percent_in_range() {
        let mut rng = GameRng::new(7);
        for _ in 0..1000 {
            assert!(rng.roll_percent() < 100);
        }
    }

    #[test]
    fn test_choose() {
        let mut rng = GameRng::new(42);
        let items = vec![1, 2, 3, 4, 5];

        let chosen = rng.choose(&items);
        assert!(items.contains(chosen.unwrap()));

        let empty: Vec<i32> = vec![];
        assert!(rng.choose(&empty).is_none());
    }

    #[test]
    fn test_scripted_rolls_queue_then_fallback() {
        let mut rolls = ScriptedRolls::new([10, 20]).with_fallback(99);
        assert_eq!(rolls.remaining(), 2);
        assert_eq!(rolls.roll_percent(), 10);
        assert_eq!(rolls.roll_percent(), 20);
        assert_eq!(rolls.roll_percent(), 99);
        assert_eq!(rolls.roll_percent(), 99);
    }

    #[test]
    fn test_scripted_rolls_clamped() {
        let mut rolls = ScriptedRolls::always(250);
        assert_eq!(rolls.roll_percent(), 99);
    }
}
