//! Card and move rules.
//!
//! The leaf of the engine: pure predicates deciding whether one card may
//! follow another. No state lives here; `GameState` supplies the active
//! color and the interaction-mode restrictions.

pub mod moves;

pub use moves::{answers_chain, follows_sequence, is_valid_move, matches_top};
