//! End-to-end battle tests through `BattleEngine`.
//!
//! Every test runs with `Pacing::instant()` unless it is about pacing, and
//! forces combat rolls with `ScriptedRolls` where the outcome matters.

use std::sync::Arc;
use std::time::Duration;

use battle_ccg::ai::{HeuristicPolicy, OpponentPolicy, PassivePolicy};
use battle_ccg::cards::{CardCatalog, CardTemplate, CardType, PoolTargets};
use battle_ccg::core::{
    BattleConfig, CombatantSetup, Controller, Pacing, Phase, ScriptedRolls, Side,
};
use battle_ccg::economy::{EconomyAction, EconomyKind};
use battle_ccg::error::{Ack, BattleError, InvalidCommand};
use battle_ccg::events::BattleEvent;
use battle_ccg::hand::Hand;
use battle_ccg::rules::BattleResult;
use battle_ccg::session::BattleEngine;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

// =============================================================================
// Fixtures
// =============================================================================

fn sword() -> CardTemplate {
    CardTemplate::new("Sword", CardType::Attack)
        .with_attack(12)
        .primary_attack()
}

fn dagger() -> CardTemplate {
    CardTemplate::new("Dagger", CardType::Attack)
        .with_attack(3)
        .additional_attack()
}

fn shield() -> CardTemplate {
    CardTemplate::new("Shield", CardType::Defense).with_defense(5)
}

fn herb() -> CardTemplate {
    CardTemplate::new("Herb", CardType::Recovery).with_recovery(15, PoolTargets::HP)
}

fn catalog(templates: impl IntoIterator<Item = CardTemplate>) -> CardCatalog {
    CardCatalog::from_templates(templates)
}

fn config() -> BattleConfig {
    BattleConfig::new(42).with_pacing(Pacing::instant())
}

fn slot_of(hand: &Hand, name: &str) -> Option<usize> {
    hand.cards()
        .find(|(_, card)| card.name() == name)
        .map(|(slot, _)| slot)
}

fn count_of(hand: &Hand, name: &str) -> usize {
    hand.cards().filter(|(_, card)| card.name() == name).count()
}

struct Harness {
    engine: BattleEngine,
    events: UnboundedReceiver<BattleEvent>,
}

impl Harness {
    fn new(config: BattleConfig) -> Self {
        Self::with_policy(config, Arc::new(HeuristicPolicy))
    }

    fn with_policy(config: BattleConfig, policy: Arc<dyn OpponentPolicy>) -> Self {
        let (tx, events) = unbounded_channel();
        Self {
            engine: BattleEngine::with_parts(config, Arc::new(tx), policy),
            events,
        }
    }

    fn drain(&mut self) -> Vec<BattleEvent> {
        std::iter::from_fn(|| self.events.try_recv().ok()).collect()
    }

    async fn start(&self, player: CardCatalog, opponent: CardCatalog) {
        let ack = self.engine.start_battle(player, opponent, 5).await.unwrap();
        assert_eq!(ack, Ack::Accepted);
    }

    async fn hand(&self, side: Side) -> Hand {
        self.engine.hand_of(side).await.unwrap()
    }

    async fn hp(&self, side: Side) -> u32 {
        self.engine.combatant_state_of(side).await.unwrap().hp()
    }
}

fn transitions(events: &[BattleEvent]) -> Vec<(Phase, Phase)> {
    events
        .iter()
        .filter_map(|event| match event {
            BattleEvent::PhaseChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect()
}

fn entered(events: &[BattleEvent], phase: Phase) -> bool {
    transitions(events).iter().any(|(_, to)| *to == phase)
}

/// Start battles over successive seeds until the player's hand holds every
/// named card.
async fn start_holding(
    player: &CardCatalog,
    opponent: &CardCatalog,
    names: &[&str],
) -> Harness {
    for seed in 0..64 {
        let h = Harness::new(BattleConfig::new(seed).with_pacing(Pacing::instant()));
        h.engine.set_roll_source(ScriptedRolls::always(0)).await;
        h.start(player.clone(), opponent.clone()).await;
        let hand = h.hand(Side::Player).await;
        if names.iter().all(|name| slot_of(&hand, name).is_some()) {
            return h;
        }
    }
    panic!("no seed dealt {names:?}");
}

// =============================================================================
// Battle Flow Scenarios
// =============================================================================

#[tokio::test]
async fn test_combo_attack_against_defense() {
    let player = catalog([sword(), dagger()]);
    let opponent = catalog([shield()]);
    let mut h = start_holding(&player, &opponent, &["Sword", "Dagger"]).await;
    h.drain();

    let hand = h.hand(Side::Player).await;
    let sword_slot = slot_of(&hand, "Sword").unwrap();
    let dagger_slot = slot_of(&hand, "Dagger").unwrap();

    assert!(h.engine.select_card(Side::Player, sword_slot).await.unwrap().is_accepted());
    assert!(h.engine.select_card(Side::Player, dagger_slot).await.unwrap().is_accepted());
    assert_eq!(
        h.engine.attack_selection().await.unwrap().as_slice(),
        &[sword_slot, dagger_slot]
    );
    assert!(h.engine.confirm_selection().await.unwrap().is_accepted());

    let events = h.drain();
    assert!(events.contains(&BattleEvent::DamageApplied {
        amount: 10,
        target: Side::Opponent
    }));
    assert_eq!(h.hp(Side::Opponent).await, 40);

    // Opponent holds only shields, so its turn passes straight back.
    assert_eq!(h.engine.current_phase().await, Some(Phase::AttackSelect));
    assert_eq!(h.engine.current_turn_owner().await, Some(Side::Player));
    assert_eq!(h.engine.turn_number().await, Some(3));
}

#[tokio::test]
async fn test_forced_miss_leaves_defender_untouched() {
    let mut h = Harness::new(config());
    h.start(
        catalog([sword().with_hit_rate(50)]),
        catalog([shield()]),
    )
    .await;
    h.engine.set_roll_source(ScriptedRolls::always(80)).await;
    h.drain();

    h.engine.select_card(Side::Player, 0).await.unwrap();
    h.engine.confirm_selection().await.unwrap();

    let events = h.drain();
    assert!(events.contains(&BattleEvent::Missed {
        target: Side::Opponent
    }));
    assert!(!events
        .iter()
        .any(|e| matches!(e, BattleEvent::DamageApplied { .. })));
    assert_eq!(h.hp(Side::Opponent).await, 50);
}

#[tokio::test]
async fn test_recovery_skips_defense() {
    let config = config().with_combatant(Side::Player, CombatantSetup::new("Hero").with_pools(40, 50, 50));
    let mut h = Harness::new(config);
    h.start(catalog([herb()]), catalog([shield()])).await;
    h.drain();

    h.engine.select_card(Side::Player, 0).await.unwrap();
    h.engine.confirm_selection().await.unwrap();

    let events = h.drain();
    let moves = transitions(&events);
    assert_eq!(moves[0], (Phase::AttackSelect, Phase::TurnEnd));
    assert!(!entered(&events, Phase::AttackConfirm));
    assert!(!entered(&events, Phase::DefenseSelect));
    assert_eq!(h.hp(Side::Player).await, 55);

    // The herb was consumed and refilled in place.
    let hand = h.hand(Side::Player).await;
    assert_eq!(hand.len(), 5);
    assert_eq!(hand.spent_count(), 0);
}

#[tokio::test]
async fn test_policy_without_usable_attack_skips_turn() {
    let mut h = Harness::new(config().with_first_turn(Side::Opponent));
    h.start(catalog([sword()]), catalog([shield()])).await;

    let events = h.drain();
    assert_eq!(
        transitions(&events),
        vec![
            (Phase::Intro, Phase::TurnStart),
            (Phase::TurnStart, Phase::TurnEnd),
            (Phase::TurnEnd, Phase::TurnStart),
            (Phase::TurnStart, Phase::AttackSelect),
        ]
    );
    assert_eq!(h.engine.current_turn_owner().await, Some(Side::Player));
}

#[tokio::test]
async fn test_economy_action_abandons_defense_wait() {
    let mut h = Harness::new(config().with_first_turn(Side::Opponent));
    h.start(catalog([shield()]), catalog([sword()])).await;

    assert_eq!(h.engine.current_phase().await, Some(Phase::DefenseSelect));
    let wait = h.engine.pending_wait().await.unwrap();
    assert_eq!(wait.side(), Side::Player);
    assert_eq!(wait.phase(), Phase::DefenseSelect);
    assert!(!wait.is_abandoned());
    h.drain();

    let ack = h.engine.trigger_economy_action(EconomyAction::Buy).await.unwrap();
    assert!(ack.is_accepted());
    assert!(wait.is_abandoned());

    let events = h.drain();
    assert!(!events.iter().any(|e| matches!(
        e,
        BattleEvent::DamageApplied { .. } | BattleEvent::Missed { .. }
    )));
    assert!(!entered(&events, Phase::DefenseConfirm));
    assert_eq!(h.hp(Side::Player).await, 50);

    // No defense card was consumed; the bought sword was drawn into a new slot.
    let hand = h.hand(Side::Player).await;
    assert_eq!(hand.len(), 6);
    assert_eq!(count_of(&hand, "Shield"), 5);
    assert_eq!(slot_of(&hand, "Sword"), Some(5));

    let current = h.engine.pending_wait().await.unwrap();
    assert_eq!(current.phase(), Phase::AttackSelect);
    assert!(!current.is_abandoned());
}

#[tokio::test]
async fn test_lethal_hit_ends_battle() {
    let config = config().with_combatant(
        Side::Opponent,
        CombatantSetup::new("Opponent").with_pools(10, 50, 50),
    );
    let mut h = Harness::new(config);
    h.engine.set_roll_source(ScriptedRolls::always(0)).await;
    // Herb is not usable in defense, so the policy takes the full hit.
    h.start(catalog([sword()]), catalog([herb()])).await;
    h.drain();

    h.engine.select_card(Side::Player, 0).await.unwrap();
    assert!(h.engine.confirm_selection().await.unwrap().is_accepted());

    assert_eq!(h.engine.current_phase().await, Some(Phase::BattleEnd));
    assert_eq!(h.engine.result().await, Some(BattleResult::Winner(Side::Player)));
    assert_eq!(h.hp(Side::Opponent).await, 0);
    assert!(h.engine.pending_wait().await.is_none());

    let moves = transitions(&h.drain());
    assert_eq!(moves.last(), Some(&(Phase::DefenseConfirm, Phase::BattleEnd)));
    assert!(moves.iter().all(|(from, _)| *from != Phase::BattleEnd));
    assert_eq!(
        h.engine.select_card(Side::Player, 1).await.unwrap(),
        Ack::Rejected(InvalidCommand::WrongPhase(Phase::BattleEnd))
    );
}

// =============================================================================
// Selection Commands
// =============================================================================

#[tokio::test]
async fn test_decline_defense_takes_full_damage() {
    let h = Harness::new(config().with_first_turn(Side::Opponent));
    h.engine.set_roll_source(ScriptedRolls::always(0)).await;
    h.start(catalog([shield()]), catalog([sword()])).await;

    assert!(h.engine.decline_selection().await.unwrap().is_accepted());

    assert_eq!(h.hp(Side::Player).await, 38);
    let hand = h.hand(Side::Player).await;
    assert_eq!(count_of(&hand, "Shield"), 5);
    assert_eq!(h.engine.current_phase().await, Some(Phase::AttackSelect));
}

#[tokio::test]
async fn test_defense_card_consumed_after_resolution() {
    let h = Harness::new(config().with_first_turn(Side::Opponent));
    h.engine.set_roll_source(ScriptedRolls::always(0)).await;
    h.start(catalog([shield()]), catalog([sword()])).await;

    let used = h.hand(Side::Player).await.card(2).unwrap().id();
    h.engine.select_card(Side::Player, 2).await.unwrap();
    h.engine.confirm_selection().await.unwrap();

    assert_eq!(h.hp(Side::Player).await, 43);
    let hand = h.hand(Side::Player).await;
    assert_eq!(hand.len(), 5);
    assert!(!hand.contains(used));
    assert_eq!(hand.spent_count(), 0);
}

#[tokio::test]
async fn test_decline_attack_passes_turn() {
    let mut h = Harness::new(config());
    h.start(catalog([sword()]), catalog([shield()])).await;
    let before = h.hand(Side::Player).await;
    h.drain();

    assert!(h.engine.decline_selection().await.unwrap().is_accepted());

    let events = h.drain();
    assert_eq!(transitions(&events)[0], (Phase::AttackSelect, Phase::TurnEnd));
    assert_eq!(h.engine.turn_number().await, Some(3));
    assert_eq!(h.hand(Side::Player).await, before);
}

#[tokio::test]
async fn test_selection_conflicts() {
    let h = start_holding(&catalog([sword(), herb()]), &catalog([shield()]), &["Sword", "Herb"]).await;
    let hand = h.hand(Side::Player).await;
    let sword_slot = slot_of(&hand, "Sword").unwrap();
    let herb_slot = slot_of(&hand, "Herb").unwrap();

    h.engine.select_card(Side::Player, sword_slot).await.unwrap();
    h.engine.select_card(Side::Player, herb_slot).await.unwrap();
    assert_eq!(h.engine.attack_selection().await.unwrap().as_slice(), &[herb_slot]);

    h.engine.select_card(Side::Player, sword_slot).await.unwrap();
    assert_eq!(h.engine.attack_selection().await.unwrap().as_slice(), &[sword_slot]);
}

#[tokio::test]
async fn test_duplicate_and_second_primary() {
    let h = Harness::new(config());
    h.start(catalog([sword()]), catalog([shield()])).await;

    assert!(h.engine.select_card(Side::Player, 0).await.unwrap().is_accepted());
    assert_eq!(
        h.engine.select_card(Side::Player, 0).await.unwrap(),
        Ack::Rejected(InvalidCommand::AlreadySelected(0))
    );

    h.engine.select_card(Side::Player, 1).await.unwrap();
    assert_eq!(h.engine.attack_selection().await.unwrap().as_slice(), &[1]);

    assert!(h.engine.deselect_card(Side::Player, 1).await.unwrap().is_accepted());
    assert!(h.engine.attack_selection().await.unwrap().is_empty());
    assert_eq!(
        h.engine.deselect_card(Side::Player, 1).await.unwrap(),
        Ack::Rejected(InvalidCommand::NotSelected(1))
    );
}

#[tokio::test]
async fn test_human_defender() {
    let config = config().with_controller(Side::Opponent, Controller::Human);
    let h = Harness::new(config);
    h.engine.set_roll_source(ScriptedRolls::always(0)).await;
    h.start(catalog([sword()]), catalog([shield()])).await;

    assert_eq!(
        h.engine.select_card(Side::Opponent, 0).await.unwrap(),
        Ack::Rejected(InvalidCommand::NotYourTurn(Side::Opponent))
    );

    h.engine.select_card(Side::Player, 0).await.unwrap();
    h.engine.confirm_selection().await.unwrap();

    let wait = h.engine.pending_wait().await.unwrap();
    assert_eq!((wait.side(), wait.phase()), (Side::Opponent, Phase::DefenseSelect));

    h.engine.select_card(Side::Opponent, 0).await.unwrap();
    assert_eq!(h.engine.defense_selection().await.unwrap().as_slice(), &[0]);
    h.engine.confirm_selection().await.unwrap();

    assert_eq!(h.hp(Side::Opponent).await, 43);
    let wait = h.engine.pending_wait().await.unwrap();
    assert_eq!((wait.side(), wait.phase()), (Side::Opponent, Phase::AttackSelect));
}

// =============================================================================
// Rejections
// =============================================================================

#[tokio::test]
async fn test_commands_without_battle() {
    let engine = BattleEngine::new(config());

    assert_eq!(
        engine.select_card(Side::Player, 0).await.unwrap(),
        Ack::Rejected(InvalidCommand::NoBattle)
    );
    assert_eq!(
        engine.confirm_selection().await.unwrap(),
        Ack::Rejected(InvalidCommand::NoBattle)
    );
    assert_eq!(
        engine
            .trigger_economy_action(EconomyAction::Buy)
            .await
            .unwrap(),
        Ack::Rejected(InvalidCommand::NoBattle)
    );
    assert_eq!(engine.current_phase().await, None);
    assert_eq!(engine.result().await, None);
}

#[tokio::test]
async fn test_start_battle_rejections() {
    let engine = BattleEngine::new(config());

    let ack = engine
        .start_battle(catalog([sword()]), catalog([shield()]), 0)
        .await
        .unwrap();
    assert_eq!(ack, Ack::Rejected(InvalidCommand::InvalidDealCount));
    assert_eq!(engine.current_phase().await, None);

    let err = engine
        .start_battle(catalog([sword()]), CardCatalog::new(), 5)
        .await
        .unwrap_err();
    assert!(matches!(err, BattleError::EmptyCatalog(Side::Opponent)));
}

#[tokio::test]
async fn test_invalid_selections_are_noops() {
    let h = Harness::new(config());
    h.start(catalog([shield()]), catalog([shield()])).await;
    let before = h.hand(Side::Player).await;

    let rejected = |ack: Ack| ack.rejection().cloned();
    assert_eq!(
        rejected(h.engine.select_card(Side::Player, 0).await.unwrap()),
        Some(InvalidCommand::NotUsable(0))
    );
    assert_eq!(
        rejected(h.engine.select_card(Side::Player, 9).await.unwrap()),
        Some(InvalidCommand::UnknownSlot(9))
    );
    assert_eq!(
        rejected(h.engine.select_card(Side::Opponent, 0).await.unwrap()),
        Some(InvalidCommand::NotHuman(Side::Opponent))
    );
    assert_eq!(
        rejected(h.engine.confirm_selection().await.unwrap()),
        Some(InvalidCommand::NothingSelected)
    );

    assert_eq!(h.engine.current_phase().await, Some(Phase::AttackSelect));
    assert_eq!(h.hand(Side::Player).await, before);
}

// =============================================================================
// Economy
// =============================================================================

#[tokio::test]
async fn test_buy_pays_and_cools_down() {
    let h = Harness::new(config());
    h.start(catalog([sword()]), catalog([shield().with_trade_value(20)]))
        .await;

    h.engine.trigger_economy_action(EconomyAction::Buy).await.unwrap();

    let player = h.engine.combatant_state_of(Side::Player).await.unwrap();
    let opponent = h.engine.combatant_state_of(Side::Opponent).await.unwrap();
    assert_eq!(player.gp(), 30);
    assert_eq!(opponent.gp(), 70);

    // Back at the player's next turn start the cooldown has ticked once.
    assert_eq!(h.engine.current_turn_owner().await, Some(Side::Player));
    let cooldowns = h.engine.cooldowns_of(Side::Player).await.unwrap();
    assert_eq!(cooldowns.remaining(EconomyKind::Buy), 4);
    assert_eq!(
        h.engine.trigger_economy_action(EconomyAction::Buy).await.unwrap(),
        Ack::Rejected(InvalidCommand::CoolingDown(4))
    );

    assert!(h
        .engine
        .trigger_economy_action(EconomyAction::Sell { slot: 0 })
        .await
        .unwrap()
        .is_accepted());
    assert_eq!(h.hand(Side::Opponent).await.len(), 6);
}

#[tokio::test]
async fn test_unaffordable_buy_ends_battle() {
    let config = config().with_combatant(Side::Player, CombatantSetup::new("Hero").with_pools(5, 5, 5));
    let mut h = Harness::new(config);
    h.start(catalog([sword()]), catalog([shield().with_trade_value(20)]))
        .await;
    h.drain();

    assert!(h
        .engine
        .trigger_economy_action(EconomyAction::Buy)
        .await
        .unwrap()
        .is_accepted());

    assert_eq!(h.engine.current_phase().await, Some(Phase::BattleEnd));
    assert_eq!(h.engine.result().await, Some(BattleResult::Winner(Side::Opponent)));
    let player = h.engine.combatant_state_of(Side::Player).await.unwrap();
    assert_eq!((player.gp(), player.mp(), player.hp()), (0, 0, 0));

    let moves = transitions(&h.drain());
    assert_eq!(moves, vec![(Phase::AttackSelect, Phase::BattleEnd)]);
}

// =============================================================================
// Cancellation
// =============================================================================

#[tokio::test]
async fn test_restart_invalidates_suspended_routine() {
    let pacing = Pacing {
        reveal_ms: 200,
        settle_ms: 0,
        refill_ms: 0,
    };
    let h = Harness::new(BattleConfig::new(3).with_pacing(pacing));
    h.start(catalog([sword()]), catalog([shield()])).await;
    h.engine.select_card(Side::Player, 0).await.unwrap();

    let engine = h.engine.clone();
    let confirm = tokio::spawn(async move { engine.confirm_selection().await });

    // Let the confirm reach its reveal pause, then replace the battle.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(h.engine.current_phase().await, Some(Phase::AttackConfirm));
    h.start(catalog([sword()]), catalog([shield()])).await;

    let ack = confirm.await.unwrap().unwrap();
    assert!(ack.is_accepted());

    assert_eq!(h.engine.current_phase().await, Some(Phase::AttackSelect));
    assert_eq!(h.engine.turn_number().await, Some(1));
    assert_eq!(h.hp(Side::Opponent).await, 50);
    assert_eq!(h.engine.pending_refills(Side::Player).await, Some(0));
    assert_eq!(h.hand(Side::Player).await.spent_count(), 0);
}

// =============================================================================
// Pacing
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_policy_defense_paces_only_its_reveals() {
    let pacing = Pacing {
        reveal_ms: 150,
        settle_ms: 0,
        refill_ms: 0,
    };
    let mut h = Harness::new(config().with_pacing(pacing));
    h.start(catalog([sword()]), catalog([shield()])).await;
    h.drain();

    h.engine.select_card(Side::Player, 0).await.unwrap();
    let started = tokio::time::Instant::now();
    h.engine.confirm_selection().await.unwrap();
    let elapsed = started.elapsed();

    let events = h.drain();
    let defended = events
        .iter()
        .filter(|e| matches!(e, BattleEvent::CardRevealed { side: Side::Opponent, .. }))
        .count();
    assert_eq!(defended, 1);
    // One pause for the sword, one for the shield.
    assert_eq!(elapsed, Duration::from_millis(300));

    let confirm_at = events
        .iter()
        .position(|e| {
            *e == BattleEvent::PhaseChanged {
                from: Phase::DefenseSelect,
                to: Phase::DefenseConfirm,
            }
        })
        .unwrap();
    assert!(matches!(
        events[confirm_at + 1],
        BattleEvent::CardRevealed { side: Side::Opponent, .. }
    ));
}

// =============================================================================
// Unattended Battles
// =============================================================================

#[tokio::test]
async fn test_turn_limit_ends_in_draw() {
    let config = config()
        .with_controller(Side::Player, Controller::Policy)
        .with_max_turns(4);
    let h = Harness::with_policy(config, Arc::new(PassivePolicy));
    h.start(catalog([sword()]), catalog([sword()])).await;

    assert_eq!(h.engine.current_phase().await, Some(Phase::BattleEnd));
    assert_eq!(h.engine.result().await, Some(BattleResult::Draw));
    assert_eq!(h.engine.turn_number().await, Some(4));
    assert!(h.engine.pending_wait().await.is_none());
}

#[tokio::test]
async fn test_policy_battles_preserve_hand_size() {
    let cards = || catalog([sword(), shield(), herb(), dagger()]);
    for seed in 0..8 {
        let config = BattleConfig::new(seed)
            .with_pacing(Pacing::instant())
            .with_controller(Side::Player, Controller::Policy)
            .with_max_turns(60);
        let h = Harness::new(config);
        h.start(cards(), cards()).await;

        assert_eq!(h.engine.current_phase().await, Some(Phase::BattleEnd));
        let result = h.engine.result().await.unwrap();
        if let BattleResult::Winner(side) = result {
            assert_eq!(h.hp(side.opponent()).await, 0);
        }
        for side in Side::ALL {
            assert_eq!(h.hand(side).await.len(), 5, "seed {seed} {side}");
        }
    }
}

#[tokio::test]
async fn test_unattended_battle_needs_turn_limit() {
    let config = config().with_controller(Side::Player, Controller::Policy);
    let engine = BattleEngine::new(config);

    let ack = engine
        .start_battle(catalog([shield()]), catalog([shield()]), 5)
        .await
        .unwrap();
    assert_eq!(ack, Ack::Rejected(InvalidCommand::UnboundedBattle));
    assert_eq!(engine.current_phase().await, None);
}

#[tokio::test]
async fn test_harmless_unattended_battle_reaches_limit() {
    let config = config()
        .with_controller(Side::Player, Controller::Policy)
        .with_max_turns(6);
    let h = Harness::new(config);
    tokio::time::timeout(Duration::from_secs(5), h.start(catalog([shield()]), catalog([shield()])))
        .await
        .unwrap();

    assert_eq!(h.engine.current_phase().await, Some(Phase::BattleEnd));
    assert_eq!(h.engine.result().await, Some(BattleResult::Draw));
    assert_eq!(h.engine.turn_number().await, Some(6));
}
