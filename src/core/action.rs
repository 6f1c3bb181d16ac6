//! Player actions and the history record kept for them.
//!
//! `Action` is the complete outward action surface. A replay or mirroring
//! layer serializes these and feeds them back through `Game::apply`.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Color};

use super::Seat;

/// A single action a seat may request.
///
/// ```
/// use taki_engine::cards::{Card, Color};
/// use taki_engine::core::Action;
///
/// let play = Action::Play(Card::number(5, Color::Red));
/// assert!(play.is_card_action());
/// assert!(!Action::EndTurn.is_card_action());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Play a card from hand onto the discard pile.
    Play(Card),
    /// Draw one card, or the whole chain total while a PlusTwo chain is open.
    Draw,
    /// Pass the turn to the other seat.
    EndTurn,
    /// Close the sequence this seat opened.
    EndSequence,
    /// Pick the active color after a ChangeColor card.
    ChooseColor(Color),
}

impl Action {
    /// Actions that move a card out of a hand or into one.
    #[must_use]
    pub fn is_card_action(&self) -> bool {
        matches!(self, Action::Play(_) | Action::Draw)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Play(card) => write!(f, "play {card}"),
            Action::Draw => write!(f, "draw"),
            Action::EndTurn => write!(f, "end turn"),
            Action::EndSequence => write!(f, "end sequence"),
            Action::ChooseColor(color) => write!(f, "choose {color}"),
        }
    }
}

/// An accepted action, as stored in the game history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The seat that took this action.
    pub seat: Seat,

    /// The action taken.
    pub action: Action,

    /// Turn number when the action was taken.
    pub turn: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(seat: Seat, action: Action, turn: u32) -> Self {
        Self { seat, action, turn }
    }
}
