//! Change notifications emitted by Game State transitions.
//!
//! Every named transition on `GameState` pushes exactly one
//! `StateChange`. Dependent components (a display layer, a mirroring
//! layer, logging) drain them after each action instead of diffing state.

use serde::{Deserialize, Serialize};

use crate::cards::Color;

use super::state::{Direction, InteractionMode, Status};
use super::{Seat, TurnOwner};

/// A single Game State change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateChange {
    TurnChanged { owner: TurnOwner, turn: u32 },
    InteractionChanged { from: InteractionMode, to: InteractionMode },
    StatusChanged { from: Status, to: Status },
    ActiveColorChanged { color: Color },
    DirectionChanged { direction: Direction },
    /// A chain was opened, extended or broken. `total` is zero once broken.
    ChainChanged { stack: u32, total: u32 },
    /// A sequence was opened, extended or closed. `count` is zero once closed.
    SequenceChanged { color: Color, count: u32 },
    WinnerDeclared { seat: Seat },
    Reset,
}

impl StateChange {
    /// The interaction mode this change moves into, if it is a mode change.
    #[must_use]
    pub fn entered_mode(&self) -> Option<InteractionMode> {
        match self {
            StateChange::InteractionChanged { to, .. } => Some(*to),
            _ => None,
        }
    }
}

impl std::fmt::Display for StateChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateChange::TurnChanged { owner: TurnOwner::Seat(seat), turn } => {
                write!(f, "turn {turn}: {seat}")
            }
            StateChange::TurnChanged { owner: TurnOwner::Neutral, .. } => {
                write!(f, "turn: neutral")
            }
            StateChange::InteractionChanged { from, to } => {
                write!(f, "interaction {from:?} -> {to:?}")
            }
            StateChange::StatusChanged { from, to } => write!(f, "status {from:?} -> {to:?}"),
            StateChange::ActiveColorChanged { color } => write!(f, "active color {color}"),
            StateChange::DirectionChanged { direction } => write!(f, "direction {direction:?}"),
            StateChange::ChainChanged { stack, total } => {
                write!(f, "chain x{stack} (draw {total})")
            }
            StateChange::SequenceChanged { color, count } => {
                write!(f, "{color} sequence of {count}")
            }
            StateChange::WinnerDeclared { seat } => write!(f, "{seat} wins"),
            StateChange::Reset => write!(f, "reset"),
        }
    }
}
