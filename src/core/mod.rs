//! Core engine types: seats, state, actions, errors, RNG, configuration.
//!
//! Everything the turn-flow layer mutates lives in `GameState`; the rest of
//! this module is plain data shared across the engine.

pub mod seat;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;
pub mod event;
pub mod state;

pub use seat::{Seat, SeatMap, TurnOwner};
pub use rng::GameRng;
pub use config::{AgentConfig, ConfigError, GameConfig};
pub use action::{Action, ActionRecord};
pub use error::RuleError;
pub use event::StateChange;
pub use state::{
    Chain, Direction, GameState, Interaction, InteractionMode, LegalMoves, Sequence, Status,
};
