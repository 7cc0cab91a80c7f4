//! Turn hooks: the extension points of the turn cycle.
//!
//! The engine calls these around every turn flip and after each played
//! card:
//!
//! ```text
//! next_turn (player -> enemy): end_player_turn, flip, start_enemy_turn
//! next_turn (enemy -> player): end_enemy_turn,  flip, start_player_turn
//! play_card:                   mana spent, card discarded, card_played
//! ```
//!
//! The engine re-evaluates the termination predicate after each hook run,
//! so a hook that deals lethal damage ends the battle.
//!
//! ## Implementation Notes
//!
//! - Every method defaults to a no-op
//! - Hooks move cards only through `CardPiles`, so card counts stay constant

use tracing::debug;

use crate::cards::CardInstance;
use crate::combat::Combatant;
use crate::core::config::BattleConfig;
use crate::piles::CardPiles;

/// Mutable view of a battle handed to hooks.
pub struct TurnContext<'a> {
    pub player: &'a mut Combatant,
    pub enemies: &'a mut [Combatant],
    pub piles: &'a mut CardPiles,
    pub config: &'a BattleConfig,
    pub turn_number: u32,
}

/// Turn-cycle extension points.
pub trait BattleHooks {
    /// Control just passed to the player.
    fn start_player_turn(&mut self, _ctx: &mut TurnContext<'_>) {}

    /// The player is about to pass control.
    fn end_player_turn(&mut self, _ctx: &mut TurnContext<'_>) {}

    /// Control just passed to the enemies.
    fn start_enemy_turn(&mut self, _ctx: &mut TurnContext<'_>) {}

    /// The enemies are about to pass control.
    fn end_enemy_turn(&mut self, _ctx: &mut TurnContext<'_>) {}

    /// A card was paid for and moved to the discard pile.
    fn card_played(&mut self, _card: &CardInstance, _ctx: &mut TurnContext<'_>) {}
}

/// Hooks that do nothing. The bare turn machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoHooks;

impl BattleHooks for NoHooks {}

/// The stock turn cycle.
///
/// - Player turn start: gain mana (or refill), reset piles if the draw pile
///   is low, draw `draws_per_turn`
/// - Player turn end: discard down to `hand_limit`
/// - Enemy turn start: each living enemy hits the player for its `attack`
/// - Enemy turn end: status effects tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StandardTurn;

impl BattleHooks for StandardTurn {
    fn start_player_turn(&mut self, ctx: &mut TurnContext<'_>) {
        if ctx.config.refill_mana {
            let max = ctx.player.max_mana();
            ctx.player.set_mana(max);
        } else {
            let mana = ctx.player.mana().saturating_add(ctx.config.mana_per_turn);
            ctx.player.set_mana(mana);
        }

        if ctx.config.draws_per_turn == 0 {
            return;
        }
        if ctx
            .piles
            .draw_pile()
            .is_low_on_cards(ctx.config.low_pile_threshold)
        {
            ctx.piles.reset();
        }
        ctx.piles.draw_many_to_hand(ctx.config.draws_per_turn);
    }

    fn end_player_turn(&mut self, ctx: &mut TurnContext<'_>) {
        if let Some(limit) = ctx.config.hand_limit {
            let discarded = ctx.piles.discard_down_to(limit);
            if discarded > 0 {
                debug!(discarded, limit, "hand limit enforced");
            }
        }
    }

    fn start_enemy_turn(&mut self, ctx: &mut TurnContext<'_>) {
        for enemy in ctx.enemies.iter().filter(|e| e.is_alive()) {
            ctx.player.take_damage(enemy.attack());
        }
    }

    fn end_enemy_turn(&mut self, ctx: &mut TurnContext<'_>) {
        ctx.player.tick_effects();
        for enemy in ctx.enemies.iter_mut() {
            enemy.tick_effects();
        }
    }
}
