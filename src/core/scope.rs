//! Phase cancellation scopes.
//!
//! Every phase change opens a new scope by bumping a shared monotonic
//! counter. A `ScopeToken` remembers the generation it was issued for; once
//! the counter moves on, the token reports itself cancelled.
//!
//! Phase routines capture a token on entry and re-check it after every
//! suspension point, before touching hands or combatants. Cancellation is
//! cooperative: nothing is preempted.
//!
//! ```
//! use battle_ccg::core::PhaseScope;
//!
//! let scope = PhaseScope::new();
//! let first = scope.open();
//! assert!(first.is_live());
//!
//! let second = scope.open();
//! assert!(first.is_cancelled());
//! assert!(second.is_live());
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Issues scope tokens. Cloning shares the counter.
#[derive(Clone, Debug, Default)]
pub struct PhaseScope {
    counter: Arc<AtomicU64>,
}

impl PhaseScope {
    /// Create a scope at generation 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidate every outstanding token and issue one for the new scope.
    pub fn open(&self) -> ScopeToken {
        let generation = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        ScopeToken {
            generation,
            counter: Arc::clone(&self.counter),
        }
    }

    /// A token for the scope that is live right now.
    #[must_use]
    pub fn current(&self) -> ScopeToken {
        ScopeToken {
            generation: self.generation(),
            counter: Arc::clone(&self.counter),
        }
    }

    /// Current generation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }
}

/// Validity handle for one phase scope.
#[derive(Clone, Debug)]
pub struct ScopeToken {
    generation: u64,
    counter: Arc<AtomicU64>,
}

impl ScopeToken {
    /// Generation this token was issued for.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True once a newer scope has been opened.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.counter.load(Ordering::SeqCst) != self.generation
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        !self.is_cancelled()
    }
}
