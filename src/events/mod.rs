//! Outbound notifications.
//!
//! The engine reports what happened through an [`EventSink`]. Delivery is
//! fire-and-forget: the engine never waits for a sink, and a sink that has
//! gone away is ignored.
//!
//! ```
//! use battle_ccg::core::{Phase, Side};
//! use battle_ccg::events::{BattleEvent, EventSink};
//!
//! let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
//! tx.emit(BattleEvent::Missed { target: Side::Opponent });
//!
//! assert_eq!(rx.try_recv().unwrap(), BattleEvent::Missed { target: Side::Opponent });
//! ```

use tokio::sync::mpsc::UnboundedSender;

use crate::cards::CardInstance;
use crate::core::{Phase, Side};

/// Something the presentation layer may want to show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BattleEvent {
    PhaseChanged { from: Phase, to: Phase },
    CardRevealed { side: Side, card: CardInstance },
    DamageApplied { amount: u32, target: Side },
    Missed { target: Side },
    StatusUpdated { side: Side },
}

/// Receiver of battle events.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: BattleEvent);
}

impl EventSink for UnboundedSender<BattleEvent> {
    fn emit(&self, event: BattleEvent) {
        // A closed channel means nobody is listening any more.
        let _ = self.send(event);
    }
}

/// Discards every event.
impl EventSink for () {
    fn emit(&self, _event: BattleEvent) {}
}
