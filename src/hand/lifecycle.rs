//! Hand lifecycle: consumed-slot bookkeeping and turn-end refill.
//!
//! ## Flow
//!
//! 1. `record_use` takes the card out of its slot and queues a `BackSlot`
//! 2. the slot stays inert (not selectable) for the rest of the turn
//! 3. at turn end each `BackSlot` is replaced in place with a fresh draw
//!
//! Before replacing, the slot must still hold the `Spent` placeholder for the
//! recorded card. Anything else means slot identity was broken elsewhere and
//! is reported as [`BattleError::Bookkeeping`]; the hand is never grown or
//! shrunk to paper over it.
//!
//! Refill is sequential and not transactional. A cancelled refill leaves the
//! slots it already replaced as they are.

use std::collections::VecDeque;

use tracing::{debug, error};

use super::slots::{Hand, Slot};
use crate::cards::{CardCatalog, CardInstance, InstanceAllocator};
use crate::core::{GameRng, ScopeToken, Side};
use crate::error::{BattleError, InvalidCommand};

/// A used card awaiting turn-end replacement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackSlot {
    pub slot_index: usize,
    pub consumed: CardInstance,
}

/// One completed replacement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefillStep {
    pub slot_index: usize,
    pub consumed: CardInstance,
    pub drawn: CardInstance,
}

/// Per-side pending-replacement queue.
#[derive(Clone, Debug)]
pub struct HandLifecycle {
    side: Side,
    pending: VecDeque<BackSlot>,
}

impl HandLifecycle {
    #[must_use]
    pub fn new(side: Side) -> Self {
        Self {
            side,
            pending: VecDeque::new(),
        }
    }

    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Consume the card in `slot_index`, queueing it for replacement.
    pub fn record_use(
        &mut self,
        hand: &mut Hand,
        slot_index: usize,
    ) -> Result<CardInstance, InvalidCommand> {
        if slot_index >= hand.len() {
            return Err(InvalidCommand::UnknownSlot(slot_index));
        }
        let consumed = hand
            .take(slot_index)
            .ok_or(InvalidCommand::EmptySlot(slot_index))?;
        debug!(side = %self.side, slot = slot_index, card = %consumed, "card used");
        self.pending.push_back(BackSlot {
            slot_index,
            consumed: consumed.clone(),
        });
        Ok(consumed)
    }

    /// Pending replacements, oldest first.
    pub fn pending(&self) -> impl Iterator<Item = &BackSlot> {
        self.pending.iter()
    }

    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Replace the oldest pending slot with a fresh draw.
    ///
    /// Returns `Ok(None)` when nothing is pending.
    pub fn refill_one(
        &mut self,
        hand: &mut Hand,
        catalog: &CardCatalog,
        rng: &mut GameRng,
        alloc: &mut InstanceAllocator,
    ) -> Result<Option<RefillStep>, BattleError> {
        let Some(back) = self.pending.front() else {
            return Ok(None);
        };

        match hand.slot(back.slot_index) {
            Some(Slot::Spent { consumed }) if *consumed == back.consumed.id() => {}
            other => {
                let found = other.map_or_else(|| "no slot".to_string(), ToString::to_string);
                error!(
                    side = %self.side,
                    slot = back.slot_index,
                    expected = %back.consumed.id(),
                    found = %found,
                    "refill bookkeeping mismatch"
                );
                return Err(BattleError::Bookkeeping {
                    side: self.side,
                    slot: back.slot_index,
                    expected: back.consumed.id(),
                    found,
                });
            }
        }

        let drawn = catalog
            .draw(rng, alloc)
            .ok_or(BattleError::EmptyCatalog(self.side))?;

        let Some(back) = self.pending.pop_front() else {
            return Ok(None);
        };
        hand.replace(back.slot_index, drawn.clone());
        debug!(
            side = %self.side,
            slot = back.slot_index,
            consumed = %back.consumed,
            drawn = %drawn,
            "slot refilled"
        );

        Ok(Some(RefillStep {
            slot_index: back.slot_index,
            consumed: back.consumed,
            drawn,
        }))
    }

    /// Refill every pending slot, stopping early if `token` is cancelled.
    ///
    /// Returns the number of slots replaced.
    pub fn refill_at_turn_end(
        &mut self,
        hand: &mut Hand,
        catalog: &CardCatalog,
        rng: &mut GameRng,
        alloc: &mut InstanceAllocator,
        token: &ScopeToken,
    ) -> Result<usize, BattleError> {
        let mut replaced = 0;
        while token.is_live() {
            match self.refill_one(hand, catalog, rng, alloc)? {
                Some(_) => replaced += 1,
                None => break,
            }
        }
        Ok(replaced)
    }
}
