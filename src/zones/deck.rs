//! Draw pile and discard pile.
//!
//! The draw pile is ordered bottom to top (the last element is drawn
//! first), matching the discard pile where the last element is the visible
//! top card. When the draw pile runs dry, every discard except the top card
//! is shuffled back in.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardKind, Color};
use crate::core::rng::GameRng;

/// Ranks printed on number cards. There is no 2; the PlusTwo takes its place.
pub const NUMBER_RANKS: [u8; 8] = [1, 3, 4, 5, 6, 7, 8, 9];

/// Colored specials printed in every suit.
pub const SUITED_SPECIALS: [CardKind; 5] = [
    CardKind::Plus,
    CardKind::Stop,
    CardKind::ReverseDirection,
    CardKind::PlusTwo,
    CardKind::Sequence,
];

/// Draw/discard operations the turn flow needs from the shared piles.
pub trait Deck {
    /// Draw one card, reshuffling the discard pile if needed.
    fn draw_card(&mut self) -> Option<Card>;

    /// Draw up to `count` cards. Returns fewer when both piles run out.
    fn draw_cards(&mut self, count: usize) -> Vec<Card> {
        let mut drawn = Vec::with_capacity(count);
        for _ in 0..count {
            match self.draw_card() {
                Some(card) => drawn.push(card),
                None => break,
            }
        }
        drawn
    }

    /// Put `card` on top of the discard pile.
    fn discard(&mut self, card: Card);

    /// The visible top of the discard pile.
    fn top_of_discard(&self) -> Option<&Card>;

    /// Check whether at least one card can still be drawn.
    fn can_draw(&self) -> bool;
}

/// The standard shared deck.
#[derive(Clone, Debug)]
pub struct PileDeck {
    draw_pile: Vec<Card>,
    discard_pile: Vec<Card>,
    rng: GameRng,
}

/// Pile contents without the RNG, for inspection and snapshots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PileSnapshot {
    pub draw_pile: Vec<Card>,
    pub discard_pile: Vec<Card>,
}

impl PileDeck {
    /// The full 110-card deck, shuffled.
    ///
    /// ```
    /// use taki_engine::core::GameRng;
    /// use taki_engine::zones::{Deck, PileDeck};
    ///
    /// let deck = PileDeck::standard(GameRng::new(7));
    /// assert_eq!(deck.draw_len(), 110);
    /// assert!(deck.top_of_discard().is_none());
    /// ```
    #[must_use]
    pub fn standard(mut rng: GameRng) -> Self {
        let mut cards = Self::standard_cards();
        rng.shuffle(&mut cards);
        Self {
            draw_pile: cards,
            discard_pile: Vec::new(),
            rng,
        }
    }

    /// An unshuffled deck; `cards[0]` is drawn first.
    ///
    /// Reshuffles still use a fixed seed, so stacked games stay reproducible.
    #[must_use]
    pub fn stacked(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut draw_pile: Vec<Card> = cards.into_iter().collect();
        draw_pile.reverse();
        Self {
            draw_pile,
            discard_pile: Vec::new(),
            rng: GameRng::new(0),
        }
    }

    /// Every card in a standard deck, in printing order.
    #[must_use]
    pub fn standard_cards() -> Vec<Card> {
        let mut cards = Vec::with_capacity(110);
        for color in Color::ALL {
            for rank in NUMBER_RANKS {
                cards.push(Card::number(rank, color));
                cards.push(Card::number(rank, color));
            }
            for kind in SUITED_SPECIALS {
                cards.push(Card::special(kind, color));
                cards.push(Card::special(kind, color));
            }
        }
        cards.extend(std::iter::repeat(Card::change_color()).take(4));
        cards.extend(std::iter::repeat(Card::wild_sequence()).take(2));
        cards
    }

    #[must_use]
    pub fn draw_len(&self) -> usize {
        self.draw_pile.len()
    }

    #[must_use]
    pub fn discard_len(&self) -> usize {
        self.discard_pile.len()
    }

    /// Cards still reachable by drawing: the draw pile plus every discard
    /// under the top card.
    #[must_use]
    pub fn drawable(&self) -> usize {
        self.draw_pile.len() + self.discard_pile.len().saturating_sub(1)
    }

    #[must_use]
    pub fn snapshot(&self) -> PileSnapshot {
        PileSnapshot {
            draw_pile: self.draw_pile.clone(),
            discard_pile: self.discard_pile.clone(),
        }
    }

    /// Move all discards except the top back into the draw pile.
    fn reshuffle(&mut self) -> bool {
        if self.discard_pile.len() < 2 {
            return false;
        }
        let top = self.discard_pile.pop();
        let mut recycled = std::mem::take(&mut self.discard_pile);
        self.rng.shuffle(&mut recycled);
        debug!("reshuffling {} discards into the draw pile", recycled.len());
        self.draw_pile.splice(0..0, recycled);
        self.discard_pile.extend(top);
        true
    }
}

impl Deck for PileDeck {
    fn draw_card(&mut self) -> Option<Card> {
        if self.draw_pile.is_empty() && !self.reshuffle() {
            return None;
        }
        self.draw_pile.pop()
    }

    fn discard(&mut self, card: Card) {
        self.discard_pile.push(card);
    }

    fn top_of_discard(&self) -> Option<&Card> {
        self.discard_pile.last()
    }

    fn can_draw(&self) -> bool {
        self.drawable() > 0
    }
}
