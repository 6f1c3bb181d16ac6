//! Card piles shared by both seats.
//!
//! ## Key Types
//!
//! - `Deck`: Draw and discard operations the turn flow depends on
//! - `PileDeck`: Shuffled draw pile plus discard pile, with reshuffling
//!
//! Hands are per-seat and live in `cards::Hand`.

pub mod deck;

pub use deck::{Deck, PileDeck};
