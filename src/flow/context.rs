//! Per-turn permissions and obligations.
//!
//! A fresh `TurnContext` is built each time a turn starts and threaded
//! through every turn-flow entry point; nothing needs resetting between
//! turns. Pausing captures it verbatim.

use serde::{Deserialize, Serialize};

use crate::core::Seat;

/// Something the acting seat still owes before the turn may end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Obligation {
    #[default]
    None,
    /// A Plus was played; one more play or draw is required.
    AdditionalAction,
    /// A PlusTwo chain is open; continue it or draw to break it.
    ChainResponse,
    /// This seat opened a sequence and must close it.
    EndSequence,
}

impl Obligation {
    #[must_use]
    pub fn is_none(self) -> bool {
        self == Obligation::None
    }

    pub(crate) fn describe(self) -> &'static str {
        match self {
            Obligation::None => "nothing",
            Obligation::AdditionalAction => "an additional action after Plus",
            Obligation::ChainResponse => "a response to the open PlusTwo chain",
            Obligation::EndSequence => "closing the open sequence",
        }
    }
}

/// What the seat whose turn it is may do right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnContext {
    pub seat: Seat,
    pub action_taken: bool,
    pub can_play: bool,
    pub can_draw: bool,
    pub can_end_turn: bool,
    pub can_end_sequence: bool,
    pub obligation: Obligation,
    /// Legal plays when the permissions were last computed.
    pub legal_move_count: usize,
}

impl TurnContext {
    /// A context with every permission withheld.
    #[must_use]
    pub fn new(seat: Seat) -> Self {
        Self {
            seat,
            action_taken: false,
            can_play: false,
            can_draw: false,
            can_end_turn: false,
            can_end_sequence: false,
            obligation: Obligation::None,
            legal_move_count: 0,
        }
    }

    /// The single action is used up: only ending the turn remains.
    pub fn force_end(&mut self) {
        self.can_play = false;
        self.can_draw = false;
        self.can_end_sequence = false;
        self.can_end_turn = true;
        self.obligation = Obligation::None;
    }

    /// Withhold everything; used once the game has concluded.
    pub fn close(&mut self) {
        self.can_play = false;
        self.can_draw = false;
        self.can_end_sequence = false;
        self.can_end_turn = false;
        self.obligation = Obligation::None;
    }

    /// Nothing is left to do but end the turn.
    #[must_use]
    pub fn must_end_turn(&self) -> bool {
        self.can_end_turn && !self.can_play && !self.can_draw
    }
}
