//! Async battle driver.
//!
//! `BattleEngine` is a cheap-to-clone handle around one battle slot. All
//! commands and queries lock the same `tokio::sync::Mutex`; the lock is
//! never held across an `.await`. Phase routines release it to pace, then
//! re-lock and check their scope token before touching anything, so a
//! routine whose phase was left while it slept returns without effect.
//!
//! ## Example
//!
//! ```
//! use battle_ccg::cards::{CardCatalog, CardTemplate, CardType};
//! use battle_ccg::core::{BattleConfig, Pacing, Phase, Side};
//! use battle_ccg::session::BattleEngine;
//!
//! # tokio_test_block(async {
//! let catalog = CardCatalog::from_templates([
//!     CardTemplate::new("Sword", CardType::Attack).with_attack(10).primary_attack(),
//!     CardTemplate::new("Shield", CardType::Defense).with_defense(4),
//! ]);
//! let engine = BattleEngine::new(BattleConfig::new(7).with_pacing(Pacing::instant()));
//!
//! let ack = engine.start_battle(catalog.clone(), catalog, 5).await.unwrap();
//! assert!(ack.is_accepted());
//! assert_eq!(engine.current_phase().await, Some(Phase::AttackSelect));
//! assert_eq!(engine.current_turn_owner().await, Some(Side::Player));
//! # });
//! # fn tokio_test_block(f: impl std::future::Future<Output = ()>) {
//! #     tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(f)
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, info};

use super::state::{BattleSession, Entry, SelectionWait};
use crate::ai::{HeuristicPolicy, OpponentPolicy};
use crate::cards::CardCatalog;
use crate::combatant::CombatantState;
use crate::core::{BattleConfig, Controller, Phase, PhaseScope, RollSource, ScopeToken, Side, SideMap};
use crate::economy::{Cooldowns, EconomyAction};
use crate::error::{Ack, BattleError, InvalidCommand};
use crate::events::EventSink;
use crate::hand::Hand;
use crate::rules::{BattleResult, SelectionSet};

#[derive(Default)]
struct Slot {
    session: Option<BattleSession>,
    /// Roll source for the next battle started.
    next_rolls: Option<Box<dyn RollSource>>,
}

struct Shared {
    slot: Mutex<Slot>,
    scope: PhaseScope,
    config: BattleConfig,
    sink: Arc<dyn EventSink>,
    policy: Arc<dyn OpponentPolicy>,
}

/// Handle to a battle. Clones share the same battle.
#[derive(Clone)]
pub struct BattleEngine {
    shared: Arc<Shared>,
}

impl std::fmt::Debug for BattleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BattleEngine")
            .field("config", &self.shared.config)
            .field("generation", &self.shared.scope.generation())
            .finish_non_exhaustive()
    }
}

impl BattleEngine {
    /// Engine with no event sink and the heuristic policy.
    #[must_use]
    pub fn new(config: BattleConfig) -> Self {
        Self::with_parts(config, Arc::new(()), Arc::new(HeuristicPolicy))
    }

    /// Engine reporting to `sink` and choosing for policy sides with `policy`.
    #[must_use]
    pub fn with_parts(
        config: BattleConfig,
        sink: Arc<dyn EventSink>,
        policy: Arc<dyn OpponentPolicy>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                slot: Mutex::new(Slot::default()),
                scope: PhaseScope::new(),
                config,
                sink,
                policy,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &BattleConfig {
        &self.shared.config
    }

    /// Replace the combat roll source.
    ///
    /// Applies to the running battle, or to the next one started if none is
    /// running.
    pub async fn set_roll_source(&self, rolls: impl RollSource + 'static) {
        let mut slot = self.shared.slot.lock().await;
        match slot.session.as_mut() {
            Some(session) => session.set_rolls(Box::new(rolls)),
            None => slot.next_rolls = Some(Box::new(rolls)),
        }
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Start a new battle, replacing any battle in progress.
    ///
    /// Every routine still running for the old battle is invalidated.
    pub async fn start_battle(
        &self,
        player_catalog: CardCatalog,
        opponent_catalog: CardCatalog,
        deal_count: usize,
    ) -> Result<Ack, BattleError> {
        if deal_count == 0 {
            return Ok(InvalidCommand::InvalidDealCount.into());
        }
        let config = &self.shared.config;
        let unattended = Side::ALL
            .iter()
            .all(|&side| config.controllers[side] == Controller::Policy);
        if unattended && config.max_turns.is_none() {
            return Ok(InvalidCommand::UnboundedBattle.into());
        }
        let entry = {
            let mut slot = self.shared.slot.lock().await;
            let catalogs = SideMap {
                player: player_catalog,
                opponent: opponent_catalog,
            };
            let rolls = slot.next_rolls.take();
            let mut session = BattleSession::new(
                &self.shared.config,
                self.shared.scope.clone(),
                Arc::clone(&self.shared.sink),
                catalogs,
                deal_count,
                rolls,
            )?;
            let entry = session.set_phase(Phase::TurnStart);
            slot.session = Some(session);
            entry
        };
        self.drive(entry).await?;
        Ok(Ack::Accepted)
    }

    /// Add a card to the waiting side's selection.
    pub async fn select_card(&self, side: Side, slot: usize) -> Result<Ack, BattleError> {
        Ok(self
            .command(|session| session.select_card(side, slot).map(drop))
            .await)
    }

    /// Remove a card from the waiting side's selection.
    pub async fn deselect_card(&self, side: Side, slot: usize) -> Result<Ack, BattleError> {
        Ok(self.command(|session| session.deselect_card(side, slot)).await)
    }

    /// Confirm the open selection and run the battle forward.
    pub async fn confirm_selection(&self) -> Result<Ack, BattleError> {
        self.advance(BattleSession::confirm_selection).await
    }

    /// Pass in `AttackSelect`; accept full damage in `DefenseSelect`.
    pub async fn decline_selection(&self) -> Result<Ack, BattleError> {
        self.advance(BattleSession::decline_selection).await
    }

    /// Buy or sell for the side with the open wait.
    ///
    /// Abandons that wait and moves to turn end, or to battle end if the
    /// payment emptied someone's HP.
    pub async fn trigger_economy_action(&self, action: EconomyAction) -> Result<Ack, BattleError> {
        self.advance(|session| {
            let (trade, entry) = session.economy_action(action)?;
            info!(
                actor = %trade.actor,
                action = ?trade.action,
                card = %trade.card,
                price = trade.price,
                "economy action"
            );
            Ok(entry)
        })
        .await
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub async fn current_phase(&self) -> Option<Phase> {
        self.query(BattleSession::phase).await
    }

    pub async fn current_turn_owner(&self) -> Option<Side> {
        self.query(BattleSession::turn_owner).await
    }

    pub async fn turn_number(&self) -> Option<u32> {
        self.query(BattleSession::turn).await
    }

    /// Snapshot of a side's hand.
    pub async fn hand_of(&self, side: Side) -> Option<Hand> {
        self.query(|s| s.hand(side).clone()).await
    }

    pub async fn combatant_state_of(&self, side: Side) -> Option<CombatantState> {
        self.query(|s| s.combatant(side).clone()).await
    }

    pub async fn cooldowns_of(&self, side: Side) -> Option<Cooldowns> {
        self.query(|s| s.cooldowns(side)).await
    }

    /// Cards consumed and awaiting refill for `side`.
    pub async fn pending_refills(&self, side: Side) -> Option<usize> {
        self.query(|s| s.lifecycle(side).pending_len()).await
    }

    /// The open selection wait, if any.
    ///
    /// The returned handle keeps reporting whether it was abandoned after the
    /// battle moves on.
    pub async fn pending_wait(&self) -> Option<SelectionWait> {
        self.query(|s| s.pending_wait().cloned()).await.flatten()
    }

    pub async fn attack_selection(&self) -> Option<SelectionSet> {
        self.query(|s| s.attack_selection().clone()).await
    }

    pub async fn defense_selection(&self) -> Option<SelectionSet> {
        self.query(|s| s.defense_selection().clone()).await
    }

    pub async fn result(&self) -> Option<BattleResult> {
        self.query(BattleSession::result).await.flatten()
    }

    // =========================================================================
    // Driver
    // =========================================================================

    async fn query<R>(&self, f: impl FnOnce(&BattleSession) -> R) -> Option<R> {
        let slot = self.shared.slot.lock().await;
        slot.session.as_ref().map(f)
    }

    async fn command(
        &self,
        f: impl FnOnce(&mut BattleSession) -> Result<(), InvalidCommand>,
    ) -> Ack {
        let mut slot = self.shared.slot.lock().await;
        let Some(session) = slot.session.as_mut() else {
            return InvalidCommand::NoBattle.into();
        };
        match f(session) {
            Ok(()) => Ack::Accepted,
            Err(reason) => {
                debug!(%reason, "command rejected");
                reason.into()
            }
        }
    }

    /// Run a phase-moving command, then drive from the phase it entered.
    async fn advance(
        &self,
        f: impl FnOnce(&mut BattleSession) -> Result<Option<Entry>, InvalidCommand>,
    ) -> Result<Ack, BattleError> {
        let entry = {
            let mut slot = self.shared.slot.lock().await;
            let Some(session) = slot.session.as_mut() else {
                return Ok(InvalidCommand::NoBattle.into());
            };
            match f(session) {
                Ok(entry) => entry,
                Err(reason) => {
                    debug!(%reason, "command rejected");
                    return Ok(reason.into());
                }
            }
        };
        self.drive(entry).await?;
        Ok(Ack::Accepted)
    }

    /// Run phase entries until one waits for input or the battle ends.
    async fn drive(&self, mut next: Option<Entry>) -> Result<(), BattleError> {
        while let Some((phase, token)) = next {
            next = match phase {
                Phase::TurnStart => self.turn_start(&token).await,
                Phase::AttackSelect | Phase::DefenseSelect => self.selection(&token).await,
                Phase::AttackConfirm => self.attack_confirm(&token).await,
                Phase::DefenseConfirm => self.defense_confirm(&token).await,
                Phase::TurnEnd => self.turn_end(&token).await?,
                Phase::BattleEnd => {
                    self.locked(&token, BattleSession::enter_battle_end).await;
                    None
                }
                Phase::Intro => None,
            };
        }
        Ok(())
    }

    /// Run `f` under the lock if `token` is still live.
    async fn locked<R>(
        &self,
        token: &ScopeToken,
        f: impl FnOnce(&mut BattleSession) -> R,
    ) -> Option<R> {
        let mut slot = self.shared.slot.lock().await;
        if token.is_cancelled() {
            debug!(generation = token.generation(), "phase routine abandoned");
            return None;
        }
        slot.session.as_mut().map(f)
    }

    async fn pace(&self, delay: Duration) {
        if delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(delay).await;
        }
    }

    async fn turn_start(&self, token: &ScopeToken) -> Option<Entry> {
        // Policy turns chain without any other await point.
        tokio::task::yield_now().await;
        let policy = Arc::clone(&self.shared.policy);
        self.locked(token, |s| s.enter_turn_start(policy.as_ref()))
            .await
            .flatten()
    }

    async fn selection(&self, token: &ScopeToken) -> Option<Entry> {
        let policy = Arc::clone(&self.shared.policy);
        let chosen = self
            .locked(token, |s| {
                let side = match s.phase() {
                    Phase::AttackSelect => s.turn_owner(),
                    _ => s.turn_owner().opponent(),
                };
                match s.controller(side) {
                    Controller::Human => {
                        s.open_wait(side, token.clone());
                        false
                    }
                    Controller::Policy => {
                        s.choose_policy_defense(policy.as_ref());
                        true
                    }
                }
            })
            .await?;
        if !chosen {
            return None;
        }
        self.locked(token, |s| s.set_phase(Phase::DefenseConfirm))
            .await
            .flatten()
    }

    async fn attack_confirm(&self, token: &ScopeToken) -> Option<Entry> {
        let (attacker, cards) = self
            .locked(token, |s| (s.turn_owner(), s.committed_attack().to_vec()))
            .await?;
        for card in cards {
            self.locked(token, |s| s.reveal(attacker, card)).await?;
            self.pace(self.shared.config.pacing.reveal()).await;
        }
        self.locked(token, |s| s.set_phase(Phase::DefenseSelect))
            .await
            .flatten()
    }

    async fn defense_confirm(&self, token: &ScopeToken) -> Option<Entry> {
        let (defender, cards) = self
            .locked(token, |s| (s.turn_owner().opponent(), s.selected_defense_cards()))
            .await?;
        for card in cards {
            self.locked(token, |s| s.reveal(defender, card)).await?;
            self.pace(self.shared.config.pacing.reveal()).await;
        }
        let outcome = self.locked(token, BattleSession::resolve_exchange).await?;
        debug!(?outcome, "exchange resolved");
        self.pace(self.shared.config.pacing.settle()).await;
        self.locked(token, BattleSession::after_exchange)
            .await
            .flatten()
    }

    async fn turn_end(&self, token: &ScopeToken) -> Result<Option<Entry>, BattleError> {
        let Some(replaced) = self.locked(token, |s| s.refill_hands(token)).await else {
            return Ok(None);
        };
        let steps = u32::try_from(replaced?).unwrap_or(u32::MAX);
        self.pace(self.shared.config.pacing.refill().saturating_mul(steps))
            .await;
        Ok(self
            .locked(token, BattleSession::finish_turn)
            .await
            .flatten())
    }
}
