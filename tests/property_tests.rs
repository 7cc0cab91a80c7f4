//! Property-based tests over random command sequences.
//!
//! These tests verify invariants that must hold after any sequence of
//! battle commands: card conservation, stat clamping and sticky
//! termination.

use std::cell::RefCell;
use std::rc::Rc;

use card_battle::battle::{BattleEngine, StandardTurn};
use card_battle::cards::CardRecipe;
use card_battle::combat::Combatant;
use card_battle::core::config::{BattleConfig, CombatantConfig};
use card_battle::events::BattleEvent;
use card_battle::piles::Deck;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Command {
    Draw,
    DrawMany(usize),
    PlayFirst,
    DiscardFirst,
    NextTurn,
    Reset,
    DamagePlayer(i64),
    HealPlayer(i64),
    DamageEnemy(usize, i64),
    Mana(i64),
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::Draw),
        (0usize..8).prop_map(Command::DrawMany),
        Just(Command::PlayFirst),
        Just(Command::DiscardFirst),
        Just(Command::NextTurn),
        Just(Command::Reset),
        (-50i64..50).prop_map(Command::DamagePlayer),
        (-50i64..50).prop_map(Command::HealPlayer),
        ((0usize..4), (-30i64..60)).prop_map(|(i, n)| Command::DamageEnemy(i, n)),
        (-3i64..6).prop_map(Command::Mana),
    ]
}

fn deck(strikes: u32, bolts: u32) -> Deck {
    Deck::with_cards(
        "Random",
        [(CardRecipe::new("Strike", 1), strikes), (CardRecipe::new("Bolt", 2), bolts)],
    )
}

fn engine(seed: u64, deck: &Deck) -> BattleEngine<StandardTurn> {
    let config = BattleConfig::new()
        .with_seed(seed)
        .with_hand_limit(6)
        .with_player(CombatantConfig::new("Hero", 80).with_mana(2, 6))
        .with_enemy(CombatantConfig::new("Orc", 60).with_attack(5))
        .with_enemy(CombatantConfig::new("Bat", 15).with_attack(1));
    match BattleEngine::from_config(config, deck) {
        Ok(engine) => engine,
        Err(e) => panic!("valid config rejected: {e}"),
    }
}

fn apply(b: &mut BattleEngine<StandardTurn>, cmd: &Command) {
    match cmd {
        Command::Draw => {
            b.draw();
        }
        Command::DrawMany(n) => {
            b.draw_cards(*n);
        }
        Command::PlayFirst => {
            if let Some(id) = b.hand().cards().front().map(|c| c.id) {
                b.play_card(id);
            }
        }
        Command::DiscardFirst => {
            if let Some(id) = b.hand().cards().front().map(|c| c.id) {
                b.discard_card(id);
            }
        }
        Command::NextTurn => b.next_turn(),
        Command::Reset => b.reset_piles(),
        Command::DamagePlayer(n) => {
            b.damage_player(*n);
        }
        Command::HealPlayer(n) => {
            b.heal_player(*n);
        }
        Command::DamageEnemy(i, n) => {
            b.damage_enemy(*i, *n);
        }
        Command::Mana(n) => {
            b.consume_mana(*n);
        }
    }
}

proptest! {
    /// The number of cards never changes.
    #[test]
    fn proptest_card_conservation(
        seed in any::<u64>(),
        strikes in 0u32..12,
        bolts in 0u32..6,
        cmds in prop::collection::vec(command(), 0..60)
    ) {
        let deck = deck(strikes, bolts);
        let total = deck.total_count();
        let mut b = engine(seed, &deck);

        for cmd in &cmds {
            apply(&mut b, cmd);
            prop_assert_eq!(b.total_cards(), total);
        }
    }

    /// HP and mana stay inside their bounds.
    #[test]
    fn proptest_stats_clamped(
        seed in any::<u64>(),
        cmds in prop::collection::vec(command(), 0..60)
    ) {
        let deck = deck(8, 4);
        let mut b = engine(seed, &deck);

        for cmd in &cmds {
            apply(&mut b, cmd);
            let p = b.player();
            prop_assert!((0..=p.max_hp()).contains(&p.hp()));
            prop_assert!((0..=p.max_mana()).contains(&p.mana()));
            for e in b.enemies() {
                prop_assert!((0..=e.max_hp()).contains(&e.hp()));
            }
        }
    }

    /// Once over, the battle stays over with the same result and `Ended`
    /// was emitted exactly once.
    #[test]
    fn proptest_termination_sticky(
        seed in any::<u64>(),
        cmds in prop::collection::vec(command(), 0..80)
    ) {
        let deck = deck(8, 4);
        let mut b = engine(seed, &deck);

        let ended = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&ended);
        b.subscribe_battle(move |e| {
            if let BattleEvent::Ended { player_won } = e {
                sink.borrow_mut().push(*player_won);
            }
        });

        let mut first_result = None;
        for cmd in &cmds {
            apply(&mut b, cmd);
            match (first_result, b.player_won()) {
                (None, Some(won)) => first_result = Some(won),
                (Some(before), after) => prop_assert_eq!(Some(before), after),
                (None, None) => {}
            }
        }

        let ended = ended.borrow();
        match first_result {
            Some(won) => prop_assert_eq!(&*ended, &vec![won]),
            None => prop_assert!(ended.is_empty()),
        }
    }

    /// Once over, no command changes combatants or piles.
    #[test]
    fn proptest_commands_inert_after_end(
        seed in any::<u64>(),
        cmds in prop::collection::vec(command(), 0..40)
    ) {
        let deck = deck(8, 4);
        let mut b = engine(seed, &deck);
        b.damage_player(1_000);
        prop_assert_eq!(b.player_won(), Some(false));

        let hp: Vec<i64> = b.enemies().iter().map(Combatant::hp).collect();
        let hand = b.hand().len();
        let pile = b.draw_pile().remaining();
        let turn = b.turn();

        for cmd in &cmds {
            apply(&mut b, cmd);
        }

        prop_assert_eq!(b.player().hp(), 0);
        prop_assert_eq!(b.enemies().iter().map(Combatant::hp).collect::<Vec<_>>(), hp);
        prop_assert_eq!(b.hand().len(), hand);
        prop_assert_eq!(b.draw_pile().remaining(), pile);
        prop_assert_eq!(b.turn(), turn);
    }
}
