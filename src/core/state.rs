//! Game state: the single source of truth for turn flow.
//!
//! ## Axes
//!
//! - Turn owner: Seat A, Seat B or neutral
//! - Interaction: Normal, ColorSelection, a PlusTwo chain or a card
//!   sequence. Chain and sequence counters live *inside* the interaction
//!   value, so counters for an inactive mode cannot exist.
//! - Status: Active, Paused or Concluded
//! - Active color and direction
//!
//! ## Transitions
//!
//! State is mutated only through the named transitions below. Each one
//! pushes a `StateChange` and panics when called in a state it cannot
//! apply to: callers validate requests first, so a bad transition is a
//! bug in the engine, not a player mistake.

use im::Vector;
use log::debug;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::{Action, ActionRecord};
use super::event::StateChange;
use super::seat::{Seat, TurnOwner};
use crate::cards::{Card, Color};
use crate::rules;

/// Overall game status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Active,
    Paused,
    Concluded,
}

/// Direction of play. Cosmetic with two seats, tracked for fidelity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl Direction {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Counters of an open PlusTwo chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    /// PlusTwo cards stacked so far.
    pub stack: u32,
    /// Cards the breaking seat must draw; always `2 * stack`.
    pub total: u32,
    /// Seat that played the first PlusTwo.
    pub started_by: Seat,
}

/// Counters of an open card sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    /// Color every card in the sequence must carry (wild cards excepted).
    pub color: Color,
    /// The only seat allowed to close the sequence.
    pub initiator: Seat,
    /// Cards played into the sequence, opener included.
    pub count: u32,
    /// Most recent card; its effect fires when the sequence closes.
    pub last_card: Option<Card>,
}

/// The special interaction in progress, carrying its own counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interaction {
    #[default]
    Normal,
    ColorSelection,
    Chain(Chain),
    Sequence(Sequence),
}

/// Counter-free tag of an [`Interaction`], for queries and notifications.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionMode {
    #[default]
    Normal,
    ColorSelection,
    PlusTwoChain,
    CardSequence,
}

impl Interaction {
    #[must_use]
    pub const fn mode(&self) -> InteractionMode {
        match self {
            Interaction::Normal => InteractionMode::Normal,
            Interaction::ColorSelection => InteractionMode::ColorSelection,
            Interaction::Chain(_) => InteractionMode::PlusTwoChain,
            Interaction::Sequence(_) => InteractionMode::CardSequence,
        }
    }
}

/// Legal plays for one hand; hands rarely hold more than eight matches.
pub type LegalMoves = SmallVec<[Card; 8]>;

/// The multi-axis game state aggregate.
///
/// Created once per session and reset in place between games.
#[derive(Clone, Debug, Default)]
pub struct GameState {
    turn: TurnOwner,
    interaction: Interaction,
    status: Status,
    active_color: Option<Color>,
    direction: Direction,
    winner: Option<Seat>,

    /// Turn counter; advances each time a seat's turn starts.
    turn_number: u32,

    /// Accepted actions, oldest first.
    history: Vector<ActionRecord>,

    /// Notifications not yet drained.
    changes: Vec<StateChange>,
}

impl GameState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Queries ===

    #[must_use]
    pub fn turn_owner(&self) -> TurnOwner {
        self.turn
    }

    #[must_use]
    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn active_color(&self) -> Option<Color> {
        self.active_color
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn winner(&self) -> Option<Seat> {
        self.winner
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// The open chain, if any.
    #[must_use]
    pub fn chain(&self) -> Option<&Chain> {
        match &self.interaction {
            Interaction::Chain(chain) => Some(chain),
            _ => None,
        }
    }

    /// The open sequence, if any.
    #[must_use]
    pub fn sequence(&self) -> Option<&Sequence> {
        match &self.interaction {
            Interaction::Sequence(sequence) => Some(sequence),
            _ => None,
        }
    }

    /// Check whether actions may be accepted at all.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.status == Status::Active
    }

    // === Move Rules ===

    /// Basic validity against the active color and the top discard.
    #[must_use]
    pub fn is_valid_move(&self, card: &Card, top: Option<&Card>) -> bool {
        rules::is_valid_move(card, top, self.active_color)
    }

    /// Full play check, layering chain and sequence restrictions on top
    /// of [`Self::is_valid_move`]. Returns the rejection reason on failure.
    pub fn check_play(&self, card: &Card, top: Option<&Card>) -> Result<(), &'static str> {
        match &self.interaction {
            Interaction::ColorSelection => return Err("a color must be chosen first"),
            Interaction::Chain(_) if !rules::answers_chain(card) => {
                return Err("only a PlusTwo may answer an open chain");
            }
            Interaction::Sequence(sequence) if !rules::follows_sequence(card, sequence.color) => {
                return Err("card does not follow the open sequence's color");
            }
            _ => {}
        }
        if self.is_valid_move(card, top) {
            Ok(())
        } else {
            Err("card matches neither the active color nor the top of the discard pile")
        }
    }

    /// The subset of `cards` that may legally be played right now.
    #[must_use]
    pub fn legal_moves(&self, cards: &[Card], top: Option<&Card>) -> LegalMoves {
        cards
            .iter()
            .filter(|card| self.check_play(card, top).is_ok())
            .copied()
            .collect()
    }

    // === Turn, Status, Color ===

    /// Hand the turn to `owner`. Passing a seat starts a new turn number.
    pub fn change_turn(&mut self, owner: impl Into<TurnOwner>) {
        self.assert_not_concluded("change_turn");
        let owner = owner.into();
        self.turn = owner;
        if owner.seat().is_some() {
            self.turn_number += 1;
        }
        self.emit(StateChange::TurnChanged {
            owner,
            turn: self.turn_number,
        });
    }

    /// Switch between the counter-free interaction modes.
    ///
    /// Chains and sequences carry counters and are opened only through
    /// [`Self::start_chain`] and [`Self::start_sequence`].
    pub fn change_interaction(&mut self, mode: InteractionMode) {
        self.assert_not_concluded("change_interaction");
        let next = match mode {
            InteractionMode::Normal => Interaction::Normal,
            InteractionMode::ColorSelection => Interaction::ColorSelection,
            InteractionMode::PlusTwoChain | InteractionMode::CardSequence => {
                panic!(
                    "change_interaction({mode:?}): open chains and sequences \
                     through their own transitions"
                )
            }
        };
        self.set_interaction(next);
    }

    pub fn change_status(&mut self, status: Status) {
        self.assert_not_concluded("change_status");
        let from = self.status;
        self.status = status;
        self.emit(StateChange::StatusChanged { from, to: status });
    }

    pub fn change_active_color(&mut self, color: Color) {
        self.assert_not_concluded("change_active_color");
        self.active_color = Some(color);
        self.emit(StateChange::ActiveColorChanged { color });
    }

    /// Adopt a played card's suit. Wild cards leave the color unchanged
    /// until a color is chosen.
    pub fn update_active_color_from_card(&mut self, card: &Card) {
        if let Some(color) = card.suit() {
            self.change_active_color(color);
        }
    }

    pub fn flip_direction(&mut self) {
        self.assert_not_concluded("flip_direction");
        self.direction = self.direction.flipped();
        self.emit(StateChange::DirectionChanged {
            direction: self.direction,
        });
    }

    // === PlusTwo Chain ===

    /// Open a chain with a single PlusTwo (draw total 2).
    pub fn start_chain(&mut self, seat: Seat) {
        self.assert_not_concluded("start_chain");
        assert_eq!(
            self.mode(),
            InteractionMode::Normal,
            "start_chain requires Normal interaction"
        );
        self.set_interaction(Interaction::Chain(Chain {
            stack: 1,
            total: 2,
            started_by: seat,
        }));
        self.emit(StateChange::ChainChanged { stack: 1, total: 2 });
    }

    /// Stack one more PlusTwo onto the open chain.
    pub fn continue_chain(&mut self) {
        self.assert_not_concluded("continue_chain");
        let Interaction::Chain(chain) = &mut self.interaction else {
            panic!("continue_chain without an open chain");
        };
        chain.stack += 1;
        chain.total = 2 * chain.stack;
        let (stack, total) = (chain.stack, chain.total);
        self.emit(StateChange::ChainChanged { stack, total });
    }

    /// Close the open chain and return to Normal. Returns the closed chain
    /// so the caller knows how many cards to draw.
    pub fn break_chain(&mut self) -> Chain {
        self.assert_not_concluded("break_chain");
        let Interaction::Chain(chain) = self.interaction else {
            panic!("break_chain without an open chain");
        };
        self.set_interaction(Interaction::Normal);
        self.emit(StateChange::ChainChanged { stack: 0, total: 0 });
        chain
    }

    // === Card Sequence ===

    /// Open an empty sequence fixed to `color`.
    pub fn start_sequence(&mut self, color: Color, seat: Seat) {
        self.assert_not_concluded("start_sequence");
        assert_eq!(
            self.mode(),
            InteractionMode::Normal,
            "start_sequence requires Normal interaction"
        );
        self.set_interaction(Interaction::Sequence(Sequence {
            color,
            initiator: seat,
            count: 0,
            last_card: None,
        }));
        self.emit(StateChange::SequenceChanged { color, count: 0 });
    }

    /// Record `card` as the newest member of the open sequence.
    pub fn add_card_to_sequence(&mut self, card: Card) {
        self.assert_not_concluded("add_card_to_sequence");
        let Interaction::Sequence(sequence) = &mut self.interaction else {
            panic!("add_card_to_sequence without an open sequence");
        };
        assert!(
            rules::follows_sequence(&card, sequence.color),
            "{card} does not follow a {} sequence",
            sequence.color
        );
        sequence.count += 1;
        sequence.last_card = Some(card);
        let (color, count) = (sequence.color, sequence.count);
        self.emit(StateChange::SequenceChanged { color, count });
    }

    /// Close the open sequence and return to Normal. Returns the closed
    /// sequence so its last card can be resolved.
    pub fn end_sequence(&mut self) -> Sequence {
        self.assert_not_concluded("end_sequence");
        let Interaction::Sequence(sequence) = self.interaction else {
            panic!("end_sequence without an open sequence");
        };
        self.set_interaction(Interaction::Normal);
        self.emit(StateChange::SequenceChanged {
            color: sequence.color,
            count: 0,
        });
        sequence
    }

    // === Game Lifecycle ===

    /// Conclude the game in `seat`'s favour.
    pub fn declare_winner(&mut self, seat: Seat) {
        self.assert_not_concluded("declare_winner");
        self.winner = Some(seat);
        let from = self.status;
        self.status = Status::Concluded;
        self.emit(StateChange::StatusChanged {
            from,
            to: Status::Concluded,
        });
        self.emit(StateChange::WinnerDeclared { seat });
    }

    /// Return every axis to its initial value. History is cleared;
    /// undrained notifications are kept, followed by `Reset`.
    pub fn reset(&mut self) {
        let changes = std::mem::take(&mut self.changes);
        *self = Self {
            changes,
            ..Self::default()
        };
        self.emit(StateChange::Reset);
    }

    /// Append an accepted action to the history.
    pub fn record(&mut self, seat: Seat, action: Action) {
        self.history
            .push_back(ActionRecord::new(seat, action, self.turn_number));
    }

    /// Take every notification emitted since the last drain.
    pub fn take_changes(&mut self) -> Vec<StateChange> {
        std::mem::take(&mut self.changes)
    }

    // === Internals ===

    fn set_interaction(&mut self, next: Interaction) {
        let from = self.interaction.mode();
        self.interaction = next;
        let to = next.mode();
        if from != to {
            self.emit(StateChange::InteractionChanged { from, to });
        }
    }

    fn emit(&mut self, change: StateChange) {
        debug!("state: {change}");
        self.changes.push(change);
    }

    fn assert_not_concluded(&self, op: &str) {
        assert!(
            self.status != Status::Concluded,
            "{op} called after the game concluded"
        );
    }
}
