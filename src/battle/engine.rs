//! Battle engine: the turn machine and the commands that drive it.
//!
//! Every command is total. Commands issued after the battle has ended are
//! ignored and return an inert value; nothing here panics or returns an
//! error. The termination predicate runs after every command that can
//! change HP or card flow, and the first terminal result sticks.

use smallvec::SmallVec;
use tracing::{debug, info, trace};

use crate::cards::CardInstance;
use crate::combat::{Combatant, CombatantKind};
use crate::core::config::{BattleConfig, ConfigError};
use crate::core::entity::InstanceId;
use crate::core::rng::GameRng;
use crate::events::{BattleEvent, CombatantEvent, DrawPileEvent, ListenerId, Listeners, PileEvent};
use crate::piles::{CardPiles, Deck, Discard, DrawPile, DrawnCards, Hand};

use super::hooks::{BattleHooks, NoHooks, StandardTurn, TurnContext};
use super::state::{BattleState, BattleStatus, Turn};

/// Result of `BattleEngine::play_card`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Mana was paid and the card moved to the discard pile.
    Played(CardInstance),
    /// No card with that id is in the hand.
    NotInHand,
    /// Cards can only be played on the player's turn.
    NotPlayerTurn,
    /// The player cannot pay for the card.
    InsufficientMana { cost: u32, available: i64 },
    /// The battle has ended.
    BattleOver,
}

impl PlayOutcome {
    /// Check if the card was played.
    #[must_use]
    pub fn is_played(&self) -> bool {
        matches!(self, PlayOutcome::Played(_))
    }
}

/// A running battle.
///
/// Owns the combatants, the three card piles and the hooks that give the
/// turn cycle its rules. The deck is only read: piles are built from a
/// snapshot taken at construction or at `rebind_deck`.
///
/// ## Example
///
/// ```
/// use card_battle::battle::{BattleEngine, Turn};
/// use card_battle::cards::CardRecipe;
/// use card_battle::combat::Combatant;
/// use card_battle::core::rng::GameRng;
/// use card_battle::piles::Deck;
///
/// let deck = Deck::with_cards("Starter", [(CardRecipe::new("Strike", 1), 10)]);
/// let mut battle = BattleEngine::new(
///     Combatant::default_player(),
///     vec![Combatant::enemy("Slime", 20, 20, 3)],
///     &deck,
///     GameRng::new(7),
/// );
///
/// battle.draw_cards(3);
/// assert_eq!(battle.hand().len(), 3);
///
/// battle.next_turn();
/// assert_eq!(battle.turn(), Turn::Enemy);
/// ```
pub struct BattleEngine<H: BattleHooks = NoHooks> {
    state: BattleState,
    piles: CardPiles,
    config: BattleConfig,
    hooks: H,
    listeners: Listeners<BattleEvent>,
}

impl BattleEngine<NoHooks> {
    /// Bare turn machine with default configuration and no hooks.
    pub fn new(player: Combatant, enemies: Vec<Combatant>, deck: &Deck, rng: GameRng) -> Self {
        Self::with_hooks(player, enemies, deck, rng, BattleConfig::default(), NoHooks)
    }
}

impl BattleEngine<StandardTurn> {
    /// Build a battle with the stock turn cycle from a validated config.
    ///
    /// The draw pile uses `config.seed` when set, entropy otherwise.
    pub fn from_config(config: BattleConfig, deck: &Deck) -> Result<Self, ConfigError> {
        config.validate()?;

        let player = Combatant::from_config(CombatantKind::Player, &config.player);
        let enemies = config
            .enemies
            .iter()
            .map(|c| Combatant::from_config(CombatantKind::Enemy, c))
            .collect();
        let rng = GameRng::from_seed_or_entropy(config.seed).for_context("draw_pile");

        Ok(Self::with_hooks(player, enemies, deck, rng, config, StandardTurn))
    }
}

impl<H: BattleHooks> BattleEngine<H> {
    /// Build a battle with custom hooks.
    ///
    /// The draw pile is built and shuffled immediately. No cards are dealt;
    /// call `deal_opening_hand` or `draw_cards` for that.
    pub fn with_hooks(
        player: Combatant,
        enemies: Vec<Combatant>,
        deck: &Deck,
        rng: GameRng,
        config: BattleConfig,
        hooks: H,
    ) -> Self {
        let piles = CardPiles::new(deck, rng);
        debug!(
            enemies = enemies.len(),
            cards = piles.total_cards(),
            "battle created"
        );

        Self {
            state: BattleState::new(player, enemies),
            piles,
            config,
            hooks,
            listeners: Listeners::new(),
        }
    }

    // === Commands ===

    /// Draw one card into the hand. `None` when the pile is empty or the
    /// battle is over.
    pub fn draw(&mut self) -> Option<CardInstance> {
        if self.is_over() {
            return None;
        }
        let card = self.piles.draw_to_hand();
        self.update_battle_state();
        card
    }

    /// Draw up to `count` cards into the hand, stopping early if the pile
    /// runs out.
    pub fn draw_cards(&mut self, count: usize) -> DrawnCards {
        if self.is_over() {
            return SmallVec::new();
        }
        let drawn = self.piles.draw_many_to_hand(count);
        self.update_battle_state();
        drawn
    }

    /// Draw `opening_hand` cards.
    pub fn deal_opening_hand(&mut self) -> DrawnCards {
        self.draw_cards(self.config.opening_hand)
    }

    /// Pass control to the other side.
    ///
    /// Runs the outgoing side's end hook, flips the turn, emits
    /// `TurnChanged`, runs the incoming side's start hook and then checks
    /// for battle end.
    pub fn next_turn(&mut self) {
        if self.is_over() {
            return;
        }

        match self.state.turn {
            Turn::Player => self.run_hooks(|h, ctx| h.end_player_turn(ctx)),
            Turn::Enemy => self.run_hooks(|h, ctx| h.end_enemy_turn(ctx)),
        }

        let turn = self.state.turn.other();
        self.state.turn = turn;
        if turn == Turn::Player {
            self.state.turn_number = self.state.turn_number.saturating_add(1);
        }
        let turn_number = self.state.turn_number;
        debug!(%turn, turn_number, "turn changed");
        self.listeners.emit(&BattleEvent::TurnChanged { turn, turn_number });

        match turn {
            Turn::Player => self.run_hooks(|h, ctx| h.start_player_turn(ctx)),
            Turn::Enemy => self.run_hooks(|h, ctx| h.start_enemy_turn(ctx)),
        }

        self.update_battle_state();
    }

    /// Play a card from the hand.
    ///
    /// Pays the card's cost, moves it to the discard pile and runs the
    /// `card_played` hook. Nothing changes unless the result is `Played`.
    pub fn play_card(&mut self, id: InstanceId) -> PlayOutcome {
        if self.is_over() {
            return PlayOutcome::BattleOver;
        }
        if self.state.turn != Turn::Player {
            debug!(%id, "play rejected: not the player's turn");
            return PlayOutcome::NotPlayerTurn;
        }
        let Some(cost) = self.piles.hand().get(id).map(CardInstance::cost) else {
            debug!(%id, "play rejected: card not in hand");
            return PlayOutcome::NotInHand;
        };
        if !self.state.player.consume_mana(i64::from(cost)) {
            let available = self.state.player.mana();
            debug!(%id, cost, available, "play rejected: insufficient mana");
            return PlayOutcome::InsufficientMana { cost, available };
        }

        let Some(card) = self.piles.discard_from_hand(id) else {
            return PlayOutcome::NotInHand;
        };
        trace!(%id, card = %card.recipe, "card played");
        self.run_hooks(|h, ctx| h.card_played(&card, ctx));
        self.update_battle_state();
        PlayOutcome::Played(card)
    }

    /// Move a card from the hand to the discard pile without playing it.
    pub fn discard_card(&mut self, id: InstanceId) -> Option<CardInstance> {
        if self.is_over() {
            return None;
        }
        self.piles.discard_from_hand(id)
    }

    /// Spend player mana outside of a card play. `false` if the player
    /// cannot pay or the battle is over.
    pub fn consume_mana(&mut self, cost: i64) -> bool {
        if self.is_over() {
            return false;
        }
        self.state.player.consume_mana(cost)
    }

    /// Damage the player. Returns the player's HP afterwards.
    pub fn damage_player(&mut self, amount: i64) -> i64 {
        if !self.is_over() {
            self.state.player.take_damage(amount);
            self.update_battle_state();
        }
        self.state.player.hp()
    }

    /// Heal the player. Returns the player's HP afterwards.
    pub fn heal_player(&mut self, amount: i64) -> i64 {
        if !self.is_over() {
            self.state.player.heal(amount);
            self.update_battle_state();
        }
        self.state.player.hp()
    }

    /// Damage one enemy. `None` if there is no enemy at `index`.
    pub fn damage_enemy(&mut self, index: usize, amount: i64) -> Option<i64> {
        let over = self.is_over();
        let enemy = self.state.enemies.get_mut(index)?;
        if over {
            return Some(enemy.hp());
        }
        let hp = enemy.take_damage(amount);
        self.update_battle_state();
        Some(hp)
    }

    /// Heal one enemy. `None` if there is no enemy at `index`.
    pub fn heal_enemy(&mut self, index: usize, amount: i64) -> Option<i64> {
        let over = self.is_over();
        let enemy = self.state.enemies.get_mut(index)?;
        if over {
            return Some(enemy.hp());
        }
        let hp = enemy.heal(amount);
        self.update_battle_state();
        Some(hp)
    }

    /// Return every card to a freshly shuffled draw pile.
    pub fn reset_piles(&mut self) {
        if self.is_over() {
            return;
        }
        self.piles.reset();
    }

    /// Take a new snapshot of `deck` and rebuild the piles from it.
    pub fn rebind_deck(&mut self, deck: &Deck) {
        if self.is_over() {
            return;
        }
        self.piles.rebind(deck);
    }

    /// Evaluate the termination predicate.
    ///
    /// Returns `Some(player_won)` once the battle is over. The first
    /// terminal result is final and `Ended` is emitted only for it.
    pub fn check_battle_end(&mut self) -> Option<bool> {
        self.update_battle_state();
        self.state.status.player_won()
    }

    fn update_battle_state(&mut self) {
        if self.is_over() {
            return;
        }
        if let Some(player_won) = self.state.outcome() {
            self.end_battle(player_won);
        }
    }

    fn end_battle(&mut self, player_won: bool) {
        self.state.status = BattleStatus::Over { player_won };
        info!(player_won, turn_number = self.state.turn_number, "battle ended");
        self.listeners.emit(&BattleEvent::Ended { player_won });
    }

    fn run_hooks(&mut self, f: impl FnOnce(&mut H, &mut TurnContext<'_>)) {
        let mut ctx = TurnContext {
            player: &mut self.state.player,
            enemies: &mut self.state.enemies,
            piles: &mut self.piles,
            config: &self.config,
            turn_number: self.state.turn_number,
        };
        f(&mut self.hooks, &mut ctx);
    }

    // === Views ===

    #[must_use]
    pub fn state(&self) -> &BattleState {
        &self.state
    }

    #[must_use]
    pub fn player(&self) -> &Combatant {
        &self.state.player
    }

    #[must_use]
    pub fn enemies(&self) -> &[Combatant] {
        &self.state.enemies
    }

    #[must_use]
    pub fn enemy(&self, index: usize) -> Option<&Combatant> {
        self.state.enemies.get(index)
    }

    #[must_use]
    pub fn piles(&self) -> &CardPiles {
        &self.piles
    }

    #[must_use]
    pub fn draw_pile(&self) -> &DrawPile {
        self.piles.draw_pile()
    }

    #[must_use]
    pub fn hand(&self) -> &Hand {
        self.piles.hand()
    }

    #[must_use]
    pub fn discard(&self) -> &Discard {
        self.piles.discard()
    }

    /// Cards across draw pile, hand and discard.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.piles.total_cards()
    }

    #[must_use]
    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    #[must_use]
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    #[must_use]
    pub fn turn(&self) -> Turn {
        self.state.turn
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.state.turn_number
    }

    #[must_use]
    pub fn status(&self) -> BattleStatus {
        self.state.status
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.status.is_over()
    }

    /// `Some(player_won)` once the battle has ended.
    #[must_use]
    pub fn player_won(&self) -> Option<bool> {
        self.state.status.player_won()
    }

    // === Subscriptions ===

    pub fn subscribe_battle(&mut self, callback: impl FnMut(&BattleEvent) + 'static) -> ListenerId {
        self.listeners.subscribe(callback)
    }

    pub fn unsubscribe_battle(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub fn subscribe_player(&mut self, callback: impl FnMut(&CombatantEvent) + 'static) -> ListenerId {
        self.state.player.subscribe(callback)
    }

    pub fn unsubscribe_player(&mut self, id: ListenerId) -> bool {
        self.state.player.unsubscribe(id)
    }

    /// `None` if there is no enemy at `index`.
    pub fn subscribe_enemy(
        &mut self,
        index: usize,
        callback: impl FnMut(&CombatantEvent) + 'static,
    ) -> Option<ListenerId> {
        self.state
            .enemies
            .get_mut(index)
            .map(|enemy| enemy.subscribe(callback))
    }

    pub fn unsubscribe_enemy(&mut self, index: usize, id: ListenerId) -> bool {
        self.state
            .enemies
            .get_mut(index)
            .is_some_and(|enemy| enemy.unsubscribe(id))
    }

    pub fn subscribe_draw_pile(&mut self, callback: impl FnMut(&DrawPileEvent) + 'static) -> ListenerId {
        self.piles.draw_pile_mut().subscribe(callback)
    }

    pub fn unsubscribe_draw_pile(&mut self, id: ListenerId) -> bool {
        self.piles.draw_pile_mut().unsubscribe(id)
    }

    pub fn subscribe_hand(&mut self, callback: impl FnMut(&PileEvent) + 'static) -> ListenerId {
        self.piles.hand_mut().subscribe(callback)
    }

    pub fn unsubscribe_hand(&mut self, id: ListenerId) -> bool {
        self.piles.hand_mut().unsubscribe(id)
    }

    pub fn subscribe_discard(&mut self, callback: impl FnMut(&PileEvent) + 'static) -> ListenerId {
        self.piles.discard_mut().subscribe(callback)
    }

    pub fn unsubscribe_discard(&mut self, id: ListenerId) -> bool {
        self.piles.discard_mut().unsubscribe(id)
    }
}

impl<H: BattleHooks> std::fmt::Debug for BattleEngine<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BattleEngine")
            .field("state", &self.state)
            .field("piles", &self.piles)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
