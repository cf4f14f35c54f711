//! Fixed-length hands with stable slot identity.
//!
//! A slot index names the same position for the whole battle. Using a card
//! turns its slot into an inert `Spent` placeholder instead of removing it,
//! so no other slot ever shifts. The only operation that changes a hand's
//! length is an explicit draw (`push`).

use im::Vector;

use crate::cards::{CardInstance, CardTemplate, InstanceId};

/// One hand position: a card, or the placeholder left by a used card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Slot {
    Card(CardInstance),
    /// Awaiting turn-end replacement; remembers what was used here.
    Spent { consumed: InstanceId },
}

impl Slot {
    #[must_use]
    pub fn card(&self) -> Option<&CardInstance> {
        match self {
            Slot::Card(card) => Some(card),
            Slot::Spent { .. } => None,
        }
    }

    #[must_use]
    pub fn is_spent(&self) -> bool {
        matches!(self, Slot::Spent { .. })
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Slot::Card(card) => write!(f, "{}", card),
            Slot::Spent { consumed } => write!(f, "spent {}", consumed),
        }
    }
}

/// A side's hand.
///
/// Backed by a persistent vector: cloning for a query snapshot is O(1).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Hand {
    slots: Vector<Slot>,
}

impl Hand {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a hand from dealt cards, in slot order.
    pub fn from_cards(cards: impl IntoIterator<Item = CardInstance>) -> Self {
        Self {
            slots: cards.into_iter().map(Slot::Card).collect(),
        }
    }

    /// Number of slots, spent ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// The card in a slot, or `None` if the slot is spent or missing.
    #[must_use]
    pub fn card(&self, index: usize) -> Option<&CardInstance> {
        self.slots.get(index).and_then(Slot::card)
    }

    #[must_use]
    pub fn template(&self, index: usize) -> Option<&CardTemplate> {
        self.card(index).map(CardInstance::template)
    }

    /// Iterate over all slots.
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    /// Iterate over (slot index, card) for occupied slots.
    pub fn cards(&self) -> impl Iterator<Item = (usize, &CardInstance)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.card().map(|card| (i, card)))
    }

    /// Iterate over (slot index, template) for occupied slots.
    pub fn templates(&self) -> impl Iterator<Item = (usize, &CardTemplate)> {
        self.cards().map(|(i, card)| (i, card.template()))
    }

    /// Indices of occupied slots.
    #[must_use]
    pub fn occupied(&self) -> Vec<usize> {
        self.cards().map(|(i, _)| i).collect()
    }

    #[must_use]
    pub fn spent_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_spent()).count()
    }

    /// Check if any slot holds the given instance.
    #[must_use]
    pub fn contains(&self, id: InstanceId) -> bool {
        self.cards().any(|(_, card)| card.id() == id)
    }

    /// Take the card out of a slot, leaving a `Spent` placeholder.
    ///
    /// Returns `None` if the slot is missing or already spent.
    pub fn take(&mut self, index: usize) -> Option<CardInstance> {
        let card = self.card(index)?.clone();
        self.slots.set(
            index,
            Slot::Spent {
                consumed: card.id(),
            },
        );
        Some(card)
    }

    /// Overwrite a slot in place. Returns the previous slot.
    ///
    /// Returns `None` (and changes nothing) if the index is out of range.
    pub fn replace(&mut self, index: usize, card: CardInstance) -> Option<Slot> {
        if index >= self.slots.len() {
            return None;
        }
        Some(self.slots.set(index, Slot::Card(card)))
    }

    /// Explicit draw: append a card in a new slot. Returns its index.
    pub fn push(&mut self, card: CardInstance) -> usize {
        self.slots.push_back(Slot::Card(card));
        self.slots.len() - 1
    }
}
