//! Economy actions: buying and selling cards between hands.
//!
//! ## Actions
//!
//! - `Buy`: take a random card from the opponent's hand. The buyer pays its
//!   trade value from GP, then MP, then HP; the opponent receives the full
//!   price in GP.
//! - `Sell { slot }`: give one of your cards to the opponent and take its
//!   trade value from the opponent's GP, then MP, then HP, each amount going
//!   into the same pool of yours.
//!
//! The side losing a card gets a `BackSlot` (refilled at turn end); the side
//! gaining it draws it into a new slot, the one sanctioned hand-length change.
//! Each action has a per-side cooldown that ticks at that side's turn start.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::CardInstance;
use crate::combatant::{CombatantState, PoolKind};
use crate::core::{GameRng, Side, SideMap};
use crate::error::InvalidCommand;
use crate::hand::{Hand, HandLifecycle};

/// An economy command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EconomyAction {
    Buy,
    Sell { slot: usize },
}

impl EconomyAction {
    #[must_use]
    pub fn kind(&self) -> EconomyKind {
        match self {
            EconomyAction::Buy => EconomyKind::Buy,
            EconomyAction::Sell { .. } => EconomyKind::Sell,
        }
    }
}

/// Cooldown bucket of an economy action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EconomyKind {
    Buy,
    Sell,
}

/// Remaining lockout turns per action for one side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cooldowns {
    buy: u32,
    sell: u32,
}

impl Cooldowns {
    #[must_use]
    pub fn remaining(&self, kind: EconomyKind) -> u32 {
        match kind {
            EconomyKind::Buy => self.buy,
            EconomyKind::Sell => self.sell,
        }
    }

    #[must_use]
    pub fn is_ready(&self, kind: EconomyKind) -> bool {
        self.remaining(kind) == 0
    }

    /// Lock an action for `turns` of this side's turn starts.
    pub fn arm(&mut self, kind: EconomyKind, turns: u32) {
        match kind {
            EconomyKind::Buy => self.buy = turns,
            EconomyKind::Sell => self.sell = turns,
        }
    }

    /// Count down one turn.
    pub fn tick(&mut self) {
        self.buy = self.buy.saturating_sub(1);
        self.sell = self.sell.saturating_sub(1);
    }
}

/// Amounts moved per pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub gp: u32,
    pub mp: u32,
    pub hp: u32,
}

impl Payment {
    #[must_use]
    pub fn total(&self) -> u32 {
        self.gp + self.mp + self.hp
    }

    fn record(&mut self, kind: PoolKind, amount: u32) {
        match kind {
            PoolKind::Gp => self.gp += amount,
            PoolKind::Mp => self.mp += amount,
            PoolKind::Hp => self.hp += amount,
        }
    }
}

/// A completed trade.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trade {
    pub action: EconomyAction,
    /// Side that issued the action.
    pub actor: Side,
    pub card: CardInstance,
    pub price: u32,
    /// What the paying side lost, per pool.
    pub paid: Payment,
    /// Slot the card left (now a `BackSlot`).
    pub from_slot: usize,
    /// Slot the card was drawn into.
    pub to_slot: usize,
}

/// Drain `price` from `payer` in payment order, never below 0.
pub fn pay(payer: &mut CombatantState, price: u32) -> Payment {
    let mut paid = Payment::default();
    let mut remaining = price;
    for kind in PoolKind::PAYMENT_ORDER {
        if remaining == 0 {
            break;
        }
        let taken = payer.drain(kind, remaining);
        paid.record(kind, taken);
        remaining -= taken;
    }
    paid
}

/// Check the action's cooldown.
pub fn check_ready(cooldowns: &Cooldowns, action: EconomyAction) -> Result<(), InvalidCommand> {
    let remaining = cooldowns.remaining(action.kind());
    if remaining > 0 {
        return Err(InvalidCommand::CoolingDown(remaining));
    }
    Ok(())
}

/// Run an economy action for `actor`.
///
/// Validates first; on rejection nothing has changed.
pub fn execute(
    action: EconomyAction,
    actor: Side,
    hands: &mut SideMap<Hand>,
    lifecycles: &mut SideMap<HandLifecycle>,
    combatants: &mut SideMap<CombatantState>,
    rng: &mut GameRng,
) -> Result<Trade, InvalidCommand> {
    let other = actor.opponent();
    match action {
        EconomyAction::Buy => {
            let occupied = hands[other].occupied();
            let from_slot = *rng
                .choose(&occupied)
                .ok_or(InvalidCommand::NothingToTrade)?;

            let card = lifecycles[other].record_use(&mut hands[other], from_slot)?;
            let price = card.template().trade_value();
            let to_slot = hands[actor].push(card.clone());

            let (buyer, seller) = combatants.split_mut(actor);
            let paid = pay(buyer, price);
            seller.restore(PoolKind::Gp, price);

            debug!(%actor, card = %card, price, gp = paid.gp, mp = paid.mp, hp = paid.hp, "card bought");
            Ok(Trade {
                action,
                actor,
                card,
                price,
                paid,
                from_slot,
                to_slot,
            })
        }
        EconomyAction::Sell { slot } => {
            let card = lifecycles[actor].record_use(&mut hands[actor], slot)?;
            let price = card.template().trade_value();
            let to_slot = hands[other].push(card.clone());

            let (seller, buyer) = combatants.split_mut(actor);
            let paid = pay(buyer, price);
            seller.restore(PoolKind::Gp, paid.gp);
            seller.restore(PoolKind::Mp, paid.mp);
            seller.restore(PoolKind::Hp, paid.hp);

            debug!(%actor, card = %card, price, gp = paid.gp, mp = paid.mp, hp = paid.hp, "card sold");
            Ok(Trade {
                action,
                actor,
                card,
                price,
                paid,
                from_slot: slot,
                to_slot,
            })
        }
    }
}
