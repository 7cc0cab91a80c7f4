//! Turn machine integration tests.
//!
//! These tests verify turn alternation, hook ordering, the stock turn cycle
//! and that a finished battle ignores further commands.

use std::cell::RefCell;
use std::rc::Rc;

use card_battle::battle::{BattleEngine, BattleHooks, PlayOutcome, Turn, TurnContext};
use card_battle::cards::{CardInstance, CardRecipe};
use card_battle::combat::Combatant;
use card_battle::core::config::{BattleConfig, CombatantConfig};
use card_battle::core::rng::GameRng;
use card_battle::events::BattleEvent;
use card_battle::piles::Deck;

fn deck() -> Deck {
    Deck::with_cards(
        "Starter",
        [(CardRecipe::new("Strike", 1), 6), (CardRecipe::new("Bolt", 2), 4)],
    )
}

/// Records hook calls by name.
#[derive(Default)]
struct Recorder {
    calls: Vec<&'static str>,
}

impl BattleHooks for Recorder {
    fn start_player_turn(&mut self, _ctx: &mut TurnContext<'_>) {
        self.calls.push("start_player");
    }

    fn end_player_turn(&mut self, _ctx: &mut TurnContext<'_>) {
        self.calls.push("end_player");
    }

    fn start_enemy_turn(&mut self, _ctx: &mut TurnContext<'_>) {
        self.calls.push("start_enemy");
    }

    fn end_enemy_turn(&mut self, _ctx: &mut TurnContext<'_>) {
        self.calls.push("end_enemy");
    }

    fn card_played(&mut self, _card: &CardInstance, _ctx: &mut TurnContext<'_>) {
        self.calls.push("card_played");
    }
}

/// Each played card deals its cost times ten to the first enemy.
struct DamageByCost;

impl BattleHooks for DamageByCost {
    fn card_played(&mut self, card: &CardInstance, ctx: &mut TurnContext<'_>) {
        if let Some(enemy) = ctx.enemies.first_mut() {
            enemy.take_damage(i64::from(card.cost()) * 10);
        }
    }
}

fn standard_config() -> BattleConfig {
    BattleConfig::new()
        .with_seed(77)
        .with_opening_hand(3)
        .with_draws_per_turn(2)
        .with_player(CombatantConfig::new("Hero", 30).with_mana(0, 5))
        .with_enemy(CombatantConfig::new("Orc", 50).with_attack(4))
        .with_enemy(CombatantConfig::new("Goblin", 20).with_attack(2))
}

/// Two flips return control to the player and advance the turn number.
#[test]
fn test_turn_alternation() {
    let mut b = BattleEngine::new(
        Combatant::default_player(),
        vec![Combatant::enemy("Slime", 10, 10, 1)],
        &deck(),
        GameRng::new(1),
    );

    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    b.subscribe_battle(move |e| sink.borrow_mut().push(*e));

    for _ in 0..4 {
        b.next_turn();
    }

    assert_eq!(b.turn(), Turn::Player);
    assert_eq!(b.turn_number(), 3);
    assert_eq!(
        *log.borrow(),
        vec![
            BattleEvent::TurnChanged { turn: Turn::Enemy, turn_number: 1 },
            BattleEvent::TurnChanged { turn: Turn::Player, turn_number: 2 },
            BattleEvent::TurnChanged { turn: Turn::Enemy, turn_number: 2 },
            BattleEvent::TurnChanged { turn: Turn::Player, turn_number: 3 },
        ]
    );
}

/// Hooks run end-of-turn first, then start-of-turn for the other side.
#[test]
fn test_hook_order() {
    let mut b = BattleEngine::with_hooks(
        Combatant::player("P", 10, 10, 5, 5),
        vec![Combatant::enemy("Slime", 10, 10, 1)],
        &deck(),
        GameRng::new(2),
        BattleConfig::default(),
        Recorder::default(),
    );

    b.draw();
    let id = b.hand().cards()[0].id;
    assert!(b.play_card(id).is_played());
    b.next_turn();
    b.next_turn();

    assert_eq!(
        b.hooks().calls,
        vec!["card_played", "end_player", "start_enemy", "end_enemy", "start_player"]
    );
}

/// A hook that kills the last enemy ends the battle with a win.
#[test]
fn test_lethal_card_hook() {
    let mut b = BattleEngine::with_hooks(
        Combatant::player("P", 10, 10, 10, 10),
        vec![Combatant::enemy("Slime", 35, 35, 1)],
        &deck(),
        GameRng::new(3),
        BattleConfig::default(),
        DamageByCost,
    );

    b.draw_cards(10);
    let bolts: Vec<_> = b
        .hand()
        .cards()
        .iter()
        .filter(|c| c.cost() == 2)
        .map(|c| c.id)
        .collect();

    assert!(b.play_card(bolts[0]).is_played());
    assert!(!b.is_over());
    assert!(b.play_card(bolts[1]).is_played());
    assert_eq!(b.player_won(), Some(true));
    assert_eq!(b.play_card(bolts[2]), PlayOutcome::BattleOver);
    assert_eq!(b.player().mana(), 6);
}

/// The stock cycle: opening hand, enemies attack, mana and draws on return.
#[test]
fn test_standard_turn_cycle() {
    let mut b = BattleEngine::from_config(standard_config(), &deck()).unwrap();

    assert_eq!(b.deal_opening_hand().len(), 3);
    assert_eq!(b.draw_pile().remaining(), 7);

    // Player -> enemy: both enemies attack
    b.next_turn();
    assert_eq!(b.player().hp(), 24);

    // Enemy -> player: one mana, two cards
    b.next_turn();
    assert_eq!(b.player().mana(), 1);
    assert_eq!(b.hand().len(), 5);
    assert_eq!(b.draw_pile().remaining(), 5);
    assert_eq!(b.total_cards(), 10);
}

/// Dead enemies do not attack.
#[test]
fn test_dead_enemy_skips_attack() {
    let mut b = BattleEngine::from_config(standard_config(), &deck()).unwrap();

    assert_eq!(b.damage_enemy(0, 50), Some(0));
    b.next_turn();

    assert_eq!(b.player().hp(), 28);
}

/// Enemy attacks can end the battle during the enemy turn.
#[test]
fn test_enemy_turn_kills_player() {
    let config = standard_config().with_player(CombatantConfig::new("Hero", 30).with_hp(5));
    let mut b = BattleEngine::from_config(config, &deck()).unwrap();

    b.next_turn();

    assert_eq!(b.player().hp(), 0);
    assert_eq!(b.player_won(), Some(false));

    b.next_turn();
    assert_eq!(b.turn(), Turn::Enemy);
    assert_eq!(b.turn_number(), 1);
}

/// Refill mode restores full mana each player turn.
#[test]
fn test_refill_mana_cycle() {
    let config = standard_config().refilling_mana();
    let mut b = BattleEngine::from_config(config, &deck()).unwrap();

    b.next_turn();
    b.next_turn();

    assert_eq!(b.player().mana(), 5);
}

/// The hand limit discards overflow when the player turn ends.
#[test]
fn test_hand_limit_on_turn_end() {
    let config = standard_config().with_hand_limit(2);
    let mut b = BattleEngine::from_config(config, &deck()).unwrap();

    b.deal_opening_hand();
    b.next_turn();

    assert_eq!(b.hand().len(), 2);
    assert_eq!(b.discard().len(), 1);
}

/// An empty draw pile is rebuilt before the turn's draws.
#[test]
fn test_reset_when_pile_runs_out() {
    let mut b = BattleEngine::from_config(standard_config(), &deck()).unwrap();

    b.draw_cards(10);
    assert!(b.draw_pile().is_empty());

    b.next_turn();
    b.next_turn();

    assert_eq!(b.hand().len(), 2);
    assert_eq!(b.draw_pile().remaining(), 8);
    assert!(b.discard().is_empty());
}

/// Same seed, same opening hand.
#[test]
fn test_seeded_config_is_deterministic() {
    let mut a = BattleEngine::from_config(standard_config(), &deck()).unwrap();
    let mut b = BattleEngine::from_config(standard_config(), &deck()).unwrap();

    let left: Vec<_> = a.deal_opening_hand().iter().map(|c| c.recipe.clone()).collect();
    let right: Vec<_> = b.deal_opening_hand().iter().map(|c| c.recipe.clone()).collect();

    assert_eq!(left, right);
}
