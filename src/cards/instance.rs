//! Card instances - per-deal card identity.
//!
//! A `CardInstance` is one dealt copy of a template. Identity is the
//! `InstanceId`, never the template: two instances of "Sword" are different
//! cards, and no two hands ever hold the same instance.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::definition::CardTemplate;

/// Unique identifier for a dealt card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub u64);

impl InstanceId {
    /// Create a new instance ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card#{}", self.0)
    }
}

/// Hands out fresh instance IDs for one battle.
#[derive(Clone, Debug, Default)]
pub struct InstanceAllocator {
    next: u64,
}

impl InstanceAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next unused ID.
    pub fn allocate(&mut self) -> InstanceId {
        let id = InstanceId(self.next);
        self.next += 1;
        id
    }

    /// Number of IDs handed out so far.
    #[must_use]
    pub fn allocated(&self) -> u64 {
        self.next
    }
}

/// A dealt card.
///
/// Cloning shares the template. Equality is by instance ID only.
#[derive(Clone, Debug)]
pub struct CardInstance {
    id: InstanceId,
    template: Arc<CardTemplate>,
}

impl CardInstance {
    #[must_use]
    pub fn new(id: InstanceId, template: Arc<CardTemplate>) -> Self {
        Self { id, template }
    }

    #[must_use]
    pub fn id(&self) -> InstanceId {
        self.id
    }

    #[must_use]
    pub fn template(&self) -> &CardTemplate {
        &self.template
    }

    /// Shared handle to the template.
    #[must_use]
    pub fn template_arc(&self) -> &Arc<CardTemplate> {
        &self.template
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.template.name
    }
}

impl PartialEq for CardInstance {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CardInstance {}

impl std::hash::Hash for CardInstance {
    fn hash<H: std::hash::Hasher>(&self, hasher: &mut H) {
        self.id.hash(hasher);
    }
}

impl std::fmt::Display for CardInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.template.name, self.id)
    }
}
