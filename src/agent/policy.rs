//! Decision policies for the computer-controlled seat.
//!
//! Policies are trait-based so a different strategy can be swapped in
//! without touching the agent's scheduling:
//! - `DecisionPolicy`: Pick the next action and a color after ChangeColor
//! - `WeightedPolicy`: Special-card bias with a high-rank number fallback

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardKind, Color, Hand};
use crate::core::{AgentConfig, GameRng, InteractionMode, LegalMoves, Seat};

/// Snapshot of everything a decision depends on.
///
/// Taken when the agent starts thinking and kept across a pause, so a
/// resumed decision is made against exactly the same situation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionContext {
    pub seat: Seat,
    pub turn: u32,
    pub top: Option<Card>,
    pub active_color: Option<Color>,
    pub mode: InteractionMode,
    /// Cards in hand that may legally be played.
    pub legal: LegalMoves,
    pub can_draw: bool,
    pub can_end_turn: bool,
    pub can_end_sequence: bool,
}

impl DecisionContext {
    /// Nothing is left to do but end the turn.
    #[must_use]
    pub fn must_end_turn(&self) -> bool {
        self.can_end_turn && self.legal.is_empty() && !self.can_draw
    }
}

/// A committed decision, mapped one-to-one onto turn-flow entry points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Play(Card),
    Draw,
    EndSequence,
    ChooseColor(Color),
    EndTurn,
}

// =============================================================================
// Decision Policy
// =============================================================================

/// Strategy for the computer-controlled seat.
pub trait DecisionPolicy: Send + Sync {
    /// Choose the next action.
    fn decide(&self, context: &DecisionContext, hand: &Hand, rng: &mut GameRng) -> Decision;

    /// Choose the active color after a ChangeColor.
    fn choose_color(&self, hand: &Hand, rng: &mut GameRng) -> Color;
}

/// Default strategy.
///
/// - Open chain: always continue with a PlusTwo if possible, else draw
/// - Open sequence: keep playing while a legal card remains, then close it
/// - Otherwise: with probability `special_bias` play a random legal special;
///   else a high-ranked number picked with a small random offset
#[derive(Clone, Debug)]
pub struct WeightedPolicy {
    special_bias: f64,
    rank_offset: usize,
}

impl Default for WeightedPolicy {
    fn default() -> Self {
        Self::new(&AgentConfig::default())
    }
}

impl WeightedPolicy {
    #[must_use]
    pub fn new(config: &AgentConfig) -> Self {
        Self {
            special_bias: config.special_bias,
            rank_offset: config.rank_offset,
        }
    }

    /// Pick a card from a non-empty legal set.
    fn pick_card(&self, legal: &[Card], rng: &mut GameRng) -> Option<Card> {
        let specials: Vec<Card> = legal.iter().filter(|c| c.is_special()).copied().collect();
        if !specials.is_empty() && rng.gen_bool(self.special_bias) {
            return rng.choose(&specials).copied();
        }

        let mut numbers: Vec<Card> = legal
            .iter()
            .filter(|c| c.kind() == CardKind::Number)
            .copied()
            .collect();
        if numbers.is_empty() {
            return rng.choose(legal).copied();
        }

        // Highest ranks first; offset stays within the top half.
        numbers.sort_by(|a, b| b.rank().cmp(&a.rank()));
        let half = numbers.len().div_ceil(2);
        let window = half.min(self.rank_offset + 1).max(1);
        Some(numbers[rng.gen_range_usize(0..window)])
    }
}

impl DecisionPolicy for WeightedPolicy {
    fn decide(&self, context: &DecisionContext, hand: &Hand, rng: &mut GameRng) -> Decision {
        match context.mode {
            InteractionMode::ColorSelection => Decision::ChooseColor(self.choose_color(hand, rng)),
            InteractionMode::PlusTwoChain => {
                match context.legal.iter().find(|c| c.kind() == CardKind::PlusTwo) {
                    Some(card) => Decision::Play(*card),
                    None if context.can_draw => Decision::Draw,
                    None => Decision::EndTurn,
                }
            }
            InteractionMode::CardSequence => match self.pick_card(&context.legal, rng) {
                Some(card) => Decision::Play(card),
                None => Decision::EndSequence,
            },
            InteractionMode::Normal => {
                if context.must_end_turn() {
                    return Decision::EndTurn;
                }
                match self.pick_card(&context.legal, rng) {
                    Some(card) => Decision::Play(card),
                    None if context.can_draw => Decision::Draw,
                    None => Decision::EndTurn,
                }
            }
        }
    }

    fn choose_color(&self, hand: &Hand, rng: &mut GameRng) -> Color {
        let counts = Color::ALL.map(|color| hand.count_suit(color));
        let best = counts.iter().copied().max().unwrap_or(0);
        let leaders: Vec<Color> = Color::ALL
            .into_iter()
            .zip(counts)
            .filter(|&(_, count)| best > 0 && count == best)
            .map(|(color, _)| color)
            .collect();

        match leaders.as_slice() {
            [only] => *only,
            _ => Color::ALL[rng.gen_range_usize(0..Color::ALL.len())],
        }
    }
}
