//! # taki-engine
//!
//! Rules engine and turn-flow controller for two-seat TAKI.
//!
//! ## Design Principles
//!
//! 1. **One Source of Truth**: `GameState` holds turn owner, interaction
//!    mode, status, active color and direction, and changes only through
//!    named transitions that emit `StateChange` notifications.
//!
//! 2. **Counters Live in the Mode**: a PlusTwo chain or a card sequence is
//!    an `Interaction` variant carrying its own counters, so counters of
//!    an inactive mode cannot exist.
//!
//! 3. **One Code Path per Action**: the human seat and the computer seat
//!    both act through `TurnFlow`; deferred effects replay through the same
//!    `EffectResolver::resolve` call that handles immediate ones.
//!
//! ## Architecture
//!
//! - **Cooperative Scheduling**: the computer's thinking time and the
//!   pause before its turn are cancellable timers on a virtual clock,
//!   advanced explicitly with `Game::tick`. Nothing runs on a thread.
//!
//! - **Persistent History**: accepted actions are kept in an `im::Vector`
//!   so snapshots are O(1) to clone.
//!
//! ## Modules
//!
//! - `core`: Seats, state, actions, errors, notifications, RNG, configuration
//! - `cards`: Card values and hands
//! - `zones`: Draw and discard piles
//! - `rules`: Card-against-card matching predicates
//! - `effects`: Special-card effect resolution
//! - `flow`: Turn permissions, turn alternation and timers
//! - `agent`: The computer-controlled seat
//! - `game`: Session facade with the outward action surface

pub mod core;
pub mod cards;
pub mod zones;
pub mod rules;
pub mod effects;
pub mod flow;
pub mod agent;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    Seat, SeatMap, TurnOwner,
    GameRng,
    AgentConfig, ConfigError, GameConfig,
    Action, ActionRecord,
    RuleError, StateChange,
    GameState, Interaction, InteractionMode, Status, Direction,
};

pub use crate::cards::{Card, CardColor, CardKind, Color, Hand};

pub use crate::zones::{Deck, PileDeck};

pub use crate::effects::{Activation, Effect, EffectResolver, Resolution};

pub use crate::flow::{Obligation, TurnContext, TurnFlow, TurnScheduler};

pub use crate::agent::{Decision, DecisionAgent, DecisionPolicy, WeightedPolicy};

pub use crate::game::Game;
