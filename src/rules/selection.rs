//! Selection sets.
//!
//! The engine owns the authoritative selection for each phase. A selection
//! is a list of hand slot indices in the order they were picked; the first
//! entry is the lead card.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card_rules::has_conflict;
use crate::cards::CardTemplate;
use crate::error::InvalidCommand;

/// What happened when a slot was added.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Added alongside the existing selection.
    Added,
    /// The existing selection conflicted and was cleared first.
    Replaced,
}

/// Ordered set of selected hand slots.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSet {
    slots: SmallVec<[usize; 4]>,
}

impl SelectionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `slot`, applying the conflict policy.
    ///
    /// `lookup` resolves already-selected slots to their templates.
    pub fn select<'a>(
        &mut self,
        slot: usize,
        card: &CardTemplate,
        lookup: impl Fn(usize) -> Option<&'a CardTemplate>,
    ) -> Result<SelectOutcome, InvalidCommand> {
        if self.contains(slot) {
            return Err(InvalidCommand::AlreadySelected(slot));
        }

        let conflict = {
            let existing: Vec<&CardTemplate> =
                self.slots.iter().filter_map(|&s| lookup(s)).collect();
            has_conflict(&existing, card)
        };

        let outcome = if conflict {
            self.slots.clear();
            SelectOutcome::Replaced
        } else {
            SelectOutcome::Added
        };
        self.slots.push(slot);
        Ok(outcome)
    }

    /// Remove `slot` from the selection.
    pub fn deselect(&mut self, slot: usize) -> Result<(), InvalidCommand> {
        let index = self
            .slots
            .iter()
            .position(|&s| s == slot)
            .ok_or(InvalidCommand::NotSelected(slot))?;
        self.slots.remove(index);
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, slot: usize) -> bool {
        self.slots.contains(&slot)
    }

    /// The lead (first-picked) slot.
    #[must_use]
    pub fn lead(&self) -> Option<usize> {
        self.slots.first().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.slots
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.iter().copied()
    }
}

impl FromIterator<usize> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().collect(),
        }
    }
}
