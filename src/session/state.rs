//! Battle session state.
//!
//! `BattleSession` owns everything one battle mutates: phase, turn owner,
//! hands, combatants, selections and the open selection wait. Every method
//! here is synchronous; the async driver in `engine` calls them under its
//! single lock and handles the pacing between them.
//!
//! ## Phase changes
//!
//! `set_phase` is the only way the phase moves. Changing phase opens a new
//! scope on the shared `PhaseScope`, which cancels every token issued for
//! the previous phase, and returns the `(phase, token)` entry the driver
//! runs next. Setting the current phase again does nothing.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::ai::OpponentPolicy;
use crate::cards::{CardCatalog, CardInstance, CardTemplate, InstanceAllocator};
use crate::combat::{resolve_combat, resolve_immediate_effect, CombatOutcome, Restored};
use crate::combatant::CombatantState;
use crate::core::{
    BattleConfig, Controller, GameRng, Phase, PhaseScope, RollSource, ScopeToken, Side, SideMap,
};
use crate::economy::{self, Cooldowns, EconomyAction, Trade};
use crate::error::{BattleError, InvalidCommand};
use crate::events::{BattleEvent, EventSink};
use crate::hand::{Hand, HandLifecycle};
use crate::rules::{
    is_immediate_action, is_usable_in_attack_phase, is_usable_in_defense_phase, BattleResult,
    SelectOutcome, SelectionSet,
};

/// A phase to run, with the token that keeps it authoritative.
pub type Entry = (Phase, ScopeToken);

/// An open wait for a human side's selection.
///
/// Holds the scope token of the phase that opened it. Once that phase is
/// left for any reason the wait is abandoned and can no longer be
/// confirmed.
#[derive(Clone, Debug)]
pub struct SelectionWait {
    side: Side,
    phase: Phase,
    token: ScopeToken,
}

impl SelectionWait {
    /// Side whose choice is awaited.
    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    /// `AttackSelect` or `DefenseSelect`.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True once the phase that opened this wait has been left.
    #[must_use]
    pub fn is_abandoned(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// State of one battle.
pub struct BattleSession {
    config: BattleConfig,
    scope: PhaseScope,
    sink: Arc<dyn EventSink>,

    phase: Phase,
    turn_owner: Side,
    turn: u32,
    result: Option<BattleResult>,

    catalogs: SideMap<CardCatalog>,
    hands: SideMap<Hand>,
    lifecycles: SideMap<HandLifecycle>,
    combatants: SideMap<CombatantState>,
    cooldowns: SideMap<Cooldowns>,

    attack_selection: SelectionSet,
    defense_selection: SelectionSet,
    /// Attack cards consumed at confirmation, lead first.
    committed_attack: Vec<CardInstance>,
    wait: Option<SelectionWait>,

    alloc: InstanceAllocator,
    deal_rng: GameRng,
    economy_rng: GameRng,
    rolls: Box<dyn RollSource>,
}

impl std::fmt::Debug for BattleSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BattleSession")
            .field("phase", &self.phase)
            .field("turn_owner", &self.turn_owner)
            .field("turn", &self.turn)
            .field("result", &self.result)
            .field("combatants", &self.combatants)
            .finish_non_exhaustive()
    }
}

impl BattleSession {
    /// Build a fresh battle in `Intro`, dealing `deal_count` cards per side.
    ///
    /// Each side deals from its own catalog. `rolls` overrides the
    /// seeded combat roll stream.
    pub fn new(
        config: &BattleConfig,
        scope: PhaseScope,
        sink: Arc<dyn EventSink>,
        catalogs: SideMap<CardCatalog>,
        deal_count: usize,
        rolls: Option<Box<dyn RollSource>>,
    ) -> Result<Self, BattleError> {
        let root = GameRng::new(config.seed);
        let mut deal_rng = root.for_context("deal");
        let mut alloc = InstanceAllocator::new();

        let mut hands = SideMap::with_value(Hand::new());
        for side in Side::ALL {
            let catalog = &catalogs[side];
            if catalog.is_empty() {
                return Err(BattleError::EmptyCatalog(side));
            }
            let cards = (0..deal_count).filter_map(|_| catalog.draw(&mut deal_rng, &mut alloc));
            hands[side] = Hand::from_cards(cards.collect::<Vec<_>>());
        }

        info!(seed = config.seed, deal_count, first = %config.first_turn, "battle created");

        Ok(Self {
            config: config.clone(),
            scope,
            sink,
            phase: Phase::Intro,
            turn_owner: config.first_turn,
            turn: 0,
            result: None,
            catalogs,
            hands,
            lifecycles: SideMap::new(HandLifecycle::new),
            combatants: SideMap::new(|side| CombatantState::from_setup(&config.combatants[side])),
            cooldowns: SideMap::default(),
            attack_selection: SelectionSet::new(),
            defense_selection: SelectionSet::new(),
            committed_attack: Vec::new(),
            wait: None,
            alloc,
            deal_rng,
            economy_rng: root.for_context("economy"),
            rolls: rolls.unwrap_or_else(|| Box::new(root.for_context("combat"))),
        })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn turn_owner(&self) -> Side {
        self.turn_owner
    }

    /// Turns started so far.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn result(&self) -> Option<BattleResult> {
        self.result
    }

    #[must_use]
    pub fn hand(&self, side: Side) -> &Hand {
        &self.hands[side]
    }

    #[must_use]
    pub fn lifecycle(&self, side: Side) -> &HandLifecycle {
        &self.lifecycles[side]
    }

    #[must_use]
    pub fn combatant(&self, side: Side) -> &CombatantState {
        &self.combatants[side]
    }

    #[must_use]
    pub fn cooldowns(&self, side: Side) -> Cooldowns {
        self.cooldowns[side]
    }

    #[must_use]
    pub fn controller(&self, side: Side) -> Controller {
        self.config.controllers[side]
    }

    #[must_use]
    pub fn attack_selection(&self) -> &SelectionSet {
        &self.attack_selection
    }

    #[must_use]
    pub fn defense_selection(&self) -> &SelectionSet {
        &self.defense_selection
    }

    /// Attack cards consumed for the exchange in progress.
    #[must_use]
    pub fn committed_attack(&self) -> &[CardInstance] {
        &self.committed_attack
    }

    #[must_use]
    pub fn pending_wait(&self) -> Option<&SelectionWait> {
        self.wait.as_ref()
    }

    pub fn set_rolls(&mut self, rolls: Box<dyn RollSource>) {
        self.rolls = rolls;
    }

    // =========================================================================
    // Phase transitions
    // =========================================================================

    /// Move to `new`, cancelling the current phase scope.
    ///
    /// Returns `None` and emits nothing if `new` is already current.
    pub fn set_phase(&mut self, new: Phase) -> Option<Entry> {
        if new == self.phase {
            return None;
        }
        let token = self.scope.open();
        let old = self.phase;
        self.phase = new;
        self.wait = None;
        info!(from = %old, to = %new, turn = self.turn, owner = %self.turn_owner, "phase changed");
        self.sink.emit(BattleEvent::PhaseChanged { from: old, to: new });
        Some((new, token))
    }

    /// Tick the turn owner, then route to selection or the policy's attack.
    pub(crate) fn enter_turn_start(&mut self, policy: &dyn OpponentPolicy) -> Option<Entry> {
        let owner = self.turn_owner;
        self.turn += 1;
        self.combatants[owner].on_turn_start();
        self.cooldowns[owner].tick();
        self.emit_status(owner);

        if self.controller(owner) == Controller::Human {
            return self.set_phase(Phase::AttackSelect);
        }

        let Some(slot) = policy.select_attack(&self.hands[owner]) else {
            debug!(side = %owner, "policy passes");
            return self.set_phase(Phase::TurnEnd);
        };
        let immediate = self.hands[owner]
            .template(slot)
            .is_some_and(is_immediate_action);
        if immediate {
            self.use_immediate(owner, slot);
            return self.set_phase(Phase::TurnEnd);
        }
        self.commit_attack(owner, &[slot]);
        self.set_phase(Phase::AttackConfirm)
    }

    /// Open the human selection wait for the current phase.
    pub(crate) fn open_wait(&mut self, side: Side, token: ScopeToken) {
        debug!(%side, phase = %self.phase, "awaiting selection");
        self.wait = Some(SelectionWait {
            side,
            phase: self.phase,
            token,
        });
    }

    /// Let the policy pick the defender's card.
    pub(crate) fn choose_policy_defense(&mut self, policy: &dyn OpponentPolicy) {
        let defender = self.turn_owner.opponent();
        self.defense_selection.clear();
        if let Some(slot) = policy.select_defense(&self.hands[defender]) {
            self.defense_selection = std::iter::once(slot).collect();
        } else {
            debug!(side = %defender, "policy accepts full damage");
        }
    }

    /// Defense cards currently selected, lead first.
    pub(crate) fn selected_defense_cards(&self) -> Vec<CardInstance> {
        let hand = &self.hands[self.turn_owner.opponent()];
        self.defense_selection
            .iter()
            .filter_map(|slot| hand.card(slot).cloned())
            .collect()
    }

    pub(crate) fn reveal(&self, side: Side, card: CardInstance) {
        self.sink.emit(BattleEvent::CardRevealed { side, card });
    }

    /// Resolve the committed attack against the selected defense.
    ///
    /// Defense cards are consumed only once resolution has completed.
    pub(crate) fn resolve_exchange(&mut self) -> CombatOutcome {
        let attacker_side = self.turn_owner;
        let defender_side = attacker_side.opponent();

        let outcome = {
            let attack: Vec<&CardTemplate> =
                self.committed_attack.iter().map(CardInstance::template).collect();
            let defense_hand = &self.hands[defender_side];
            let defense: Vec<&CardTemplate> = self
                .defense_selection
                .iter()
                .filter_map(|slot| defense_hand.template(slot))
                .collect();
            let (attacker, defender) = self.combatants.split_mut(attacker_side);
            resolve_combat(&attack, &defense, attacker, defender, self.rolls.as_mut())
        };

        match outcome {
            CombatOutcome::Miss => {
                self.sink.emit(BattleEvent::Missed {
                    target: defender_side,
                });
            }
            CombatOutcome::Hit { hp_lost, .. } => {
                self.sink.emit(BattleEvent::DamageApplied {
                    amount: hp_lost,
                    target: defender_side,
                });
            }
        }
        self.emit_status(defender_side);

        let slots: Vec<usize> = self.defense_selection.iter().collect();
        for slot in slots {
            if let Err(reason) =
                self.lifecycles[defender_side].record_use(&mut self.hands[defender_side], slot)
            {
                warn!(side = %defender_side, slot, %reason, "defense card could not be consumed");
            }
        }
        self.attack_selection.clear();
        self.defense_selection.clear();
        self.committed_attack.clear();
        outcome
    }

    /// After the settle pause: end the battle or move to turn end.
    pub(crate) fn after_exchange(&mut self) -> Option<Entry> {
        if self.check_battle_over() {
            return self.set_phase(Phase::BattleEnd);
        }
        self.set_phase(Phase::TurnEnd)
    }

    /// Refill both sides' pending slots in place, Player first.
    ///
    /// Returns the number of slots replaced.
    pub(crate) fn refill_hands(&mut self, token: &ScopeToken) -> Result<usize, BattleError> {
        let mut replaced = 0;
        for side in Side::ALL {
            replaced += self.lifecycles[side].refill_at_turn_end(
                &mut self.hands[side],
                &self.catalogs[side],
                &mut self.deal_rng,
                &mut self.alloc,
                token,
            )?;
        }
        Ok(replaced)
    }

    /// Clear the turn's selections and hand the turn over.
    pub(crate) fn finish_turn(&mut self) -> Option<Entry> {
        self.attack_selection.clear();
        self.defense_selection.clear();
        self.committed_attack.clear();

        if self.config.max_turns.is_some_and(|max| self.turn >= max) {
            info!(turn = self.turn, "turn limit reached");
            self.result = Some(BattleResult::Draw);
            return self.set_phase(Phase::BattleEnd);
        }

        self.turn_owner = self.turn_owner.opponent();
        self.set_phase(Phase::TurnStart)
    }

    pub(crate) fn enter_battle_end(&mut self) {
        self.wait = None;
        info!(result = ?self.result, turn = self.turn, "battle ended");
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// The open wait, checked for `side` when given.
    fn live_wait(&self, side: Option<Side>) -> Result<&SelectionWait, InvalidCommand> {
        if let Some(side) = side {
            if self.controller(side) != Controller::Human {
                return Err(InvalidCommand::NotHuman(side));
            }
        }
        let Some(wait) = self.wait.as_ref() else {
            return Err(InvalidCommand::WrongPhase(self.phase));
        };
        if wait.is_abandoned() {
            return Err(InvalidCommand::StaleWait);
        }
        match side {
            Some(side) if side != wait.side => Err(InvalidCommand::NotYourTurn(side)),
            _ => Ok(wait),
        }
    }

    pub(crate) fn select_card(
        &mut self,
        side: Side,
        slot: usize,
    ) -> Result<SelectOutcome, InvalidCommand> {
        let phase = self.live_wait(Some(side))?.phase;
        let hand = &self.hands[side];
        if slot >= hand.len() {
            return Err(InvalidCommand::UnknownSlot(slot));
        }
        let card = hand.template(slot).ok_or(InvalidCommand::EmptySlot(slot))?;

        let (usable, selection) = match phase {
            Phase::AttackSelect => (is_usable_in_attack_phase(card), &mut self.attack_selection),
            _ => (is_usable_in_defense_phase(card), &mut self.defense_selection),
        };
        if !usable {
            return Err(InvalidCommand::NotUsable(slot));
        }
        let outcome = selection.select(slot, card, |s| hand.template(s))?;
        debug!(%side, slot, card = %card.name, ?outcome, "card selected");
        Ok(outcome)
    }

    pub(crate) fn deselect_card(&mut self, side: Side, slot: usize) -> Result<(), InvalidCommand> {
        let phase = self.live_wait(Some(side))?.phase;
        let selection = match phase {
            Phase::AttackSelect => &mut self.attack_selection,
            _ => &mut self.defense_selection,
        };
        selection.deselect(slot)?;
        debug!(%side, slot, "card deselected");
        Ok(())
    }

    pub(crate) fn confirm_selection(&mut self) -> Result<Option<Entry>, InvalidCommand> {
        let wait = self.live_wait(None)?;
        let (side, phase) = (wait.side, wait.phase);

        if phase == Phase::DefenseSelect {
            return Ok(self.set_phase(Phase::DefenseConfirm));
        }

        let slots: Vec<usize> = self.attack_selection.iter().collect();
        let Some(&lead) = slots.first() else {
            return Err(InvalidCommand::NothingSelected);
        };
        let immediate = self.hands[side]
            .template(lead)
            .is_some_and(is_immediate_action);
        if immediate {
            self.use_immediate(side, lead);
            self.attack_selection.clear();
            return Ok(self.set_phase(Phase::TurnEnd));
        }
        self.commit_attack(side, &slots);
        Ok(self.set_phase(Phase::AttackConfirm))
    }

    pub(crate) fn decline_selection(&mut self) -> Result<Option<Entry>, InvalidCommand> {
        let wait = self.live_wait(None)?;
        let (side, phase) = (wait.side, wait.phase);

        if phase == Phase::DefenseSelect {
            debug!(%side, "defense declined");
            self.defense_selection.clear();
            return Ok(self.set_phase(Phase::DefenseConfirm));
        }
        debug!(%side, "turn passed");
        self.attack_selection.clear();
        Ok(self.set_phase(Phase::TurnEnd))
    }

    /// Run an economy action for the side with the open wait.
    ///
    /// Abandons the live phase: a pending defense is never resolved and no
    /// defense card is consumed.
    pub(crate) fn economy_action(
        &mut self,
        action: EconomyAction,
    ) -> Result<(Trade, Option<Entry>), InvalidCommand> {
        let actor = self.live_wait(None)?.side;
        economy::check_ready(&self.cooldowns[actor], action)?;

        let trade = economy::execute(
            action,
            actor,
            &mut self.hands,
            &mut self.lifecycles,
            &mut self.combatants,
            &mut self.economy_rng,
        )?;
        self.cooldowns[actor].arm(action.kind(), self.config.economy_cooldown_turns);
        for side in Side::ALL {
            self.emit_status(side);
        }

        self.attack_selection.clear();
        self.defense_selection.clear();
        self.committed_attack.clear();

        let next = if self.check_battle_over() {
            self.set_phase(Phase::BattleEnd)
        } else {
            self.set_phase(Phase::TurnEnd)
        };
        Ok((trade, next))
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn use_immediate(&mut self, side: Side, slot: usize) -> Option<Restored> {
        let card = match self.lifecycles[side].record_use(&mut self.hands[side], slot) {
            Ok(card) => card,
            Err(reason) => {
                warn!(%side, slot, %reason, "immediate card could not be used");
                return None;
            }
        };
        self.reveal(side, card.clone());
        let restored = resolve_immediate_effect(card.template(), &mut self.combatants[side]);
        self.emit_status(side);
        Some(restored)
    }

    fn commit_attack(&mut self, side: Side, slots: &[usize]) {
        self.committed_attack.clear();
        for &slot in slots {
            match self.lifecycles[side].record_use(&mut self.hands[side], slot) {
                Ok(card) => self.committed_attack.push(card),
                Err(reason) => warn!(%side, slot, %reason, "attack card could not be committed"),
            }
        }
        self.attack_selection.clear();
        debug!(%side, cards = self.committed_attack.len(), "attack committed");
    }

    fn check_battle_over(&mut self) -> bool {
        let alive = |side: Side| !self.combatants[side].is_dead();
        match BattleResult::from_alive(alive(Side::Player), alive(Side::Opponent)) {
            Some(result) => {
                self.result = Some(result);
                true
            }
            None => false,
        }
    }

    fn emit_status(&self, side: Side) {
        self.sink.emit(BattleEvent::StatusUpdated { side });
    }
}
