//! Hand collaborator - the cards a seat holds.
//!
//! The engine adds and removes cards and reads the selection a display
//! layer made; it keeps no rendering state of its own.

use serde::{Deserialize, Serialize};

use super::card::{Card, Color};

/// Ordered collection of cards held by one seat.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
    selected: Option<usize>,
}

impl Hand {
    /// Create an empty hand.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hand holding `cards`, in order.
    #[must_use]
    pub fn with_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
            selected: None,
        }
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    /// Number of cards of each suit held, wild cards excluded.
    #[must_use]
    pub fn count_suit(&self, color: Color) -> usize {
        self.cards.iter().filter(|c| c.suit() == Some(color)).count()
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    /// Remove one copy of `card`.
    ///
    /// Returns true if the card was found and removed. Clears the selection
    /// when the selected card is the one removed.
    pub fn remove(&mut self, card: &Card) -> bool {
        let Some(pos) = self.cards.iter().position(|c| c == card) else {
            return false;
        };
        self.cards.remove(pos);
        self.selected = match self.selected {
            Some(sel) if sel == pos => None,
            Some(sel) if sel > pos => Some(sel - 1),
            other => other,
        };
        true
    }

    /// Select the card at `index`. Out-of-range indices clear the selection.
    pub fn select(&mut self, index: usize) {
        self.selected = (index < self.cards.len()).then_some(index);
    }

    #[must_use]
    pub fn selected(&self) -> Option<Card> {
        self.selected.and_then(|i| self.cards.get(i).copied())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Drop every card (used between games).
    pub fn clear(&mut self) {
        self.cards.clear();
        self.selected = None;
    }
}
