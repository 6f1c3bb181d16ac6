//! Effect resolution - applying a played card to game state.
//!
//! The `EffectResolver` owns the chain and sequence accumulation
//! algorithms. Turn-flow consequences (who may act next) are decided by
//! the caller from the returned [`Resolution`].

use log::debug;

use crate::cards::{Card, CardKind};
use crate::core::{GameState, InteractionMode, Seat};
use crate::flow::TurnScheduler;

use super::{Activation, Effect, Resolution};

/// Mutable borrows the resolver needs while applying one card.
pub struct ResolverContext<'a> {
    pub state: &'a mut GameState,
    pub scheduler: &'a mut TurnScheduler,
}

impl<'a> ResolverContext<'a> {
    pub fn new(state: &'a mut GameState, scheduler: &'a mut TurnScheduler) -> Self {
        Self { state, scheduler }
    }
}

/// Resolves played cards against game state.
pub struct EffectResolver;

impl EffectResolver {
    /// Resolve `card`, just played by `seat`.
    ///
    /// When a sequence is open the card must already have been added to it.
    /// With `closing` set, the sequence is closed first and the card's
    /// effect then fires as if played outside any sequence.
    pub fn resolve(ctx: &mut ResolverContext, seat: Seat, card: Card, closing: bool) -> Resolution {
        let in_sequence = ctx.state.sequence().is_some();
        assert!(
            !closing || in_sequence,
            "{card} marked as closing card with no open sequence"
        );
        let activation = Activation::evaluate(card.kind(), in_sequence, closing);

        let closed_sequence = closing.then(|| ctx.state.end_sequence());

        let effect = if in_sequence && !closing {
            if activation.would_fire {
                Effect::Deferred(card.kind())
            } else {
                Effect::SequenceJoined
            }
        } else if activation.fires_now {
            Self::fire(ctx, seat, card)
        } else if card.kind().is_sequence() && !in_sequence {
            Self::open_sequence(ctx, seat, card)
        } else {
            Effect::None
        };

        debug!("resolver: {seat} {card} -> {effect:?} ({activation:?})");
        Resolution {
            card,
            activation,
            effect,
            closed_sequence,
        }
    }

    /// Close the open sequence and fire its last card's deferred effect.
    pub fn close_sequence(ctx: &mut ResolverContext, seat: Seat) -> Resolution {
        let Some(sequence) = ctx.state.sequence().copied() else {
            panic!("close_sequence without an open sequence");
        };
        let Some(last) = sequence.last_card else {
            panic!("open sequence has no cards");
        };
        Self::resolve(ctx, seat, last, true)
    }

    fn fire(ctx: &mut ResolverContext, seat: Seat, card: Card) -> Effect {
        match card.kind() {
            CardKind::Plus => Effect::AdditionalAction,
            CardKind::Stop => {
                ctx.scheduler.arm_skip(seat);
                Effect::Skip { beneficiary: seat }
            }
            CardKind::ReverseDirection => {
                ctx.state.flip_direction();
                Effect::Reverse
            }
            CardKind::ChangeColor => {
                ctx.state.change_interaction(InteractionMode::ColorSelection);
                Effect::SelectColor
            }
            CardKind::PlusTwo => {
                if ctx.state.chain().is_some() {
                    ctx.state.continue_chain();
                } else {
                    ctx.state.start_chain(seat);
                }
                let total = ctx.state.chain().map_or(0, |chain| chain.total);
                if total > 2 {
                    Effect::ChainContinued { total }
                } else {
                    Effect::ChainStarted { total }
                }
            }
            CardKind::Number | CardKind::Sequence | CardKind::WildSequence => Effect::None,
        }
    }

    fn open_sequence(ctx: &mut ResolverContext, seat: Seat, card: Card) -> Effect {
        let Some(color) = card.suit().or(ctx.state.active_color()) else {
            panic!("{card} opened a sequence with no active color");
        };
        ctx.state.start_sequence(color, seat);
        ctx.state.add_card_to_sequence(card);
        Effect::SequenceOpened { color }
    }
}
