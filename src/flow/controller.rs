//! Turn-flow controller: the only place permissions are granted.
//!
//! Every seat, human or agent, goes through the same entry points:
//!
//! 1. [`TurnFlow::start_turn`] builds the seat's [`TurnContext`]
//! 2. [`TurnFlow::play`], [`TurnFlow::draw`], [`TurnFlow::end_sequence`]
//!    and [`TurnFlow::choose_color`] validate against it and mutate state
//! 3. [`TurnFlow::end_turn`] hands the turn on
//!
//! A rejected request returns a [`RuleError`] before anything is mutated.

use log::{debug, info};

use crate::cards::{Card, Color, Hand};
use crate::core::{Action, GameState, InteractionMode, RuleError, Seat, Status};
use crate::effects::{Effect, EffectResolver, Resolution, ResolverContext};
use crate::zones::Deck;

use super::context::{Obligation, TurnContext};
use super::scheduler::TurnScheduler;

/// Everything one turn-flow step may touch.
pub struct FlowEnv<'a> {
    pub state: &'a mut GameState,
    pub scheduler: &'a mut TurnScheduler,
    pub deck: &'a mut dyn Deck,
    /// Hand of the seat whose turn it is.
    pub hand: &'a mut Hand,
}

impl<'a> FlowEnv<'a> {
    pub fn new(
        state: &'a mut GameState,
        scheduler: &'a mut TurnScheduler,
        deck: &'a mut dyn Deck,
        hand: &'a mut Hand,
    ) -> Self {
        Self {
            state,
            scheduler,
            deck,
            hand,
        }
    }

    fn legal_move_count(&self) -> usize {
        self.state
            .legal_moves(self.hand.cards(), self.deck.top_of_discard())
            .len()
    }

    fn resolver(&mut self) -> ResolverContext<'_> {
        ResolverContext::new(&mut *self.state, &mut *self.scheduler)
    }
}

/// Turn-flow entry points.
pub struct TurnFlow;

impl TurnFlow {
    /// Start `seat`'s turn and compute what it may do. The caller resolves
    /// Stop skips first (see [`TurnScheduler::resolve_start`]) so that
    /// `env.hand` belongs to the seat actually starting.
    ///
    /// Returns `None` while the game is paused or over.
    pub fn start_turn(env: &mut FlowEnv, seat: Seat) -> Option<TurnContext> {
        if env.state.status() != Status::Active {
            debug!("flow: start_turn({seat}) ignored, status {:?}", env.state.status());
            return None;
        }
        env.state.change_turn(seat);

        let mut ctx = TurnContext::new(seat);
        ctx.legal_move_count = env.legal_move_count();
        ctx.can_draw = true;
        ctx.can_play = ctx.legal_move_count > 0;
        if env.state.chain().is_some() {
            ctx.obligation = Obligation::ChainResponse;
        }
        Self::apply_stalemate(env, &mut ctx);

        debug!("flow: {seat} starts turn {} with {ctx:?}", env.state.turn_number());
        Some(ctx)
    }

    /// Play `card` from the acting seat's hand.
    pub fn play(
        env: &mut FlowEnv,
        ctx: &mut TurnContext,
        seat: Seat,
        card: Card,
    ) -> Result<Resolution, RuleError> {
        Self::ensure_turn(env.state, ctx, seat)?;
        if !ctx.can_play {
            return Err(RuleError::phase(seat, "no play is available"));
        }
        if !env.hand.contains(&card) {
            return Err(RuleError::illegal(card, "card is not in hand"));
        }
        env.state
            .check_play(&card, env.deck.top_of_discard())
            .map_err(|reason| RuleError::illegal(card, reason))?;

        env.hand.remove(&card);
        env.hand.clear_selection();
        env.deck.discard(card);
        env.state.update_active_color_from_card(&card);
        env.state.record(seat, Action::Play(card));
        ctx.action_taken = true;

        // Membership first: whether the effect is deferred depends on
        // whether this card closes the sequence.
        let in_sequence = env.state.sequence().is_some();
        if in_sequence {
            env.state.add_card_to_sequence(card);
        }
        let closing = in_sequence && env.hand.is_empty();
        let mut resolution = EffectResolver::resolve(&mut env.resolver(), seat, card, closing);

        // An opener that empties the hand is also the closing card.
        if !in_sequence && env.state.sequence().is_some() && env.hand.is_empty() {
            resolution = EffectResolver::close_sequence(&mut env.resolver(), seat);
        }

        Self::after_play(env, ctx, &resolution);
        Self::check_winner(env, ctx, seat);
        Ok(resolution)
    }

    /// Draw one card, or break the open chain by drawing its total.
    pub fn draw(
        env: &mut FlowEnv,
        ctx: &mut TurnContext,
        seat: Seat,
    ) -> Result<Vec<Card>, RuleError> {
        Self::ensure_turn(env.state, ctx, seat)?;
        if env.state.sequence().is_some() {
            return Err(RuleError::phase(seat, "cannot draw while a sequence is open"));
        }
        if !ctx.can_draw {
            return Err(RuleError::phase(seat, "no draw is available"));
        }

        let drawn = match env.state.chain().copied() {
            Some(chain) => {
                let drawn = env.deck.draw_cards(chain.total as usize);
                if drawn.is_empty() {
                    return Err(RuleError::ResourceExhausted);
                }
                env.state.break_chain();
                debug!("flow: {seat} breaks a chain of {} and draws {}", chain.stack, drawn.len());
                drawn
            }
            None => {
                let Some(card) = env.deck.draw_card() else {
                    return Err(RuleError::ResourceExhausted);
                };
                if ctx.obligation == Obligation::AdditionalAction {
                    debug!("flow: {seat} fulfils the additional action by drawing");
                }
                vec![card]
            }
        };

        env.hand.extend(drawn.iter().copied());
        env.state.record(seat, Action::Draw);
        ctx.action_taken = true;
        ctx.force_end();
        Ok(drawn)
    }

    /// End the acting seat's turn. Returns the seat nominally due next.
    pub fn end_turn(
        env: &mut FlowEnv,
        ctx: &mut TurnContext,
        seat: Seat,
    ) -> Result<Seat, RuleError> {
        Self::ensure_turn(env.state, ctx, seat)?;
        if !ctx.obligation.is_none() {
            return Err(RuleError::pending(seat, ctx.obligation.describe()));
        }
        if !ctx.can_end_turn {
            return Err(RuleError::pending(seat, "one action must be taken first"));
        }

        if env.state.mode() == InteractionMode::ColorSelection {
            env.state.change_interaction(InteractionMode::Normal);
        }
        env.state.record(seat, Action::EndTurn);
        ctx.close();
        Ok(env.scheduler.next_turn(seat))
    }

    /// Close the sequence the acting seat opened and fire its last card.
    pub fn end_sequence(
        env: &mut FlowEnv,
        ctx: &mut TurnContext,
        seat: Seat,
    ) -> Result<Resolution, RuleError> {
        Self::ensure_turn(env.state, ctx, seat)?;
        let Some(sequence) = env.state.sequence() else {
            return Err(RuleError::phase(seat, "no sequence is open"));
        };
        if sequence.initiator != seat {
            return Err(RuleError::phase(
                seat,
                "only the seat that opened the sequence may close it",
            ));
        }

        env.state.record(seat, Action::EndSequence);
        let resolution = EffectResolver::close_sequence(&mut env.resolver(), seat);
        Self::after_play(env, ctx, &resolution);
        Self::check_winner(env, ctx, seat);
        Ok(resolution)
    }

    /// Pick the active color. May be repeated until the turn ends.
    pub fn choose_color(
        env: &mut FlowEnv,
        ctx: &mut TurnContext,
        seat: Seat,
        color: Color,
    ) -> Result<(), RuleError> {
        Self::ensure_turn(env.state, ctx, seat)?;
        if env.state.mode() != InteractionMode::ColorSelection {
            return Err(RuleError::phase(seat, "no color choice is pending"));
        }
        env.state.change_active_color(color);
        env.state.record(seat, Action::ChooseColor(color));
        Ok(())
    }

    // === Post-play decision table ===

    fn after_play(env: &mut FlowEnv, ctx: &mut TurnContext, resolution: &Resolution) {
        let seat = ctx.seat;

        // Open sequence: keep playing or close it.
        if env.state.sequence().is_some() {
            ctx.legal_move_count = env.legal_move_count();
            ctx.can_play = ctx.legal_move_count > 0;
            ctx.can_draw = false;
            ctx.can_end_turn = false;
            ctx.can_end_sequence = true;
            ctx.obligation = Obligation::EndSequence;
            debug!("flow: {seat} continues the sequence ({} legal)", ctx.legal_move_count);
            return;
        }

        let owed_additional = ctx.obligation == Obligation::AdditionalAction;
        match resolution.effect {
            Effect::AdditionalAction => {
                ctx.legal_move_count = env.legal_move_count();
                ctx.can_play = ctx.legal_move_count > 0;
                ctx.can_draw = true;
                ctx.can_end_turn = false;
                ctx.can_end_sequence = false;
                ctx.obligation = Obligation::AdditionalAction;
                Self::apply_stalemate(env, ctx);
                debug!("flow: {seat} owes an additional action");
            }
            Effect::SelectColor => {
                ctx.can_play = false;
                ctx.can_draw = false;
                ctx.can_end_sequence = false;
                ctx.can_end_turn = true;
                ctx.obligation = Obligation::None;
                debug!("flow: {seat} may choose a color");
            }
            _ => {
                if resolution.closed() {
                    debug!("flow: {seat} closed the sequence, turn must end");
                } else if owed_additional {
                    debug!("flow: {seat} fulfilled the additional action");
                }
                ctx.force_end();
            }
        }
    }

    /// No legal play and nothing left to draw: let the turn end.
    ///
    /// A chain that can be neither answered nor drawn is broken first; its
    /// draw is forfeited and plays are re-evaluated against Normal rules.
    fn apply_stalemate(env: &mut FlowEnv, ctx: &mut TurnContext) {
        if ctx.legal_move_count > 0 || env.deck.can_draw() {
            return;
        }
        if env.state.chain().is_some() {
            let chain = env.state.break_chain();
            debug!(
                "flow: {} cannot answer or draw, chain of {} dropped",
                ctx.seat, chain.total
            );
            ctx.obligation = Obligation::None;
            ctx.legal_move_count = env.legal_move_count();
            ctx.can_play = ctx.legal_move_count > 0;
            if ctx.can_play {
                return;
            }
        }
        debug!("flow: {} is stalemated, end turn allowed", ctx.seat);
        ctx.can_play = false;
        ctx.can_end_turn = true;
        ctx.obligation = Obligation::None;
    }

    fn check_winner(env: &mut FlowEnv, ctx: &mut TurnContext, seat: Seat) {
        if env.hand.is_empty()
            && ctx.obligation != Obligation::AdditionalAction
            && env.state.sequence().is_none()
        {
            info!("{seat} emptied their hand and wins");
            env.state.declare_winner(seat);
            ctx.close();
        }
    }

    fn ensure_turn(state: &GameState, ctx: &TurnContext, seat: Seat) -> Result<(), RuleError> {
        match state.status() {
            Status::Active => {}
            Status::Paused => return Err(RuleError::phase(seat, "the game is paused")),
            Status::Concluded => return Err(RuleError::phase(seat, "the game is over")),
        }
        if !state.turn_owner().is(seat) || ctx.seat != seat {
            return Err(RuleError::phase(seat, "it is not this seat's turn"));
        }
        Ok(())
    }
}
