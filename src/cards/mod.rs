//! Card system: card values and the hand collaborator.
//!
//! ## Key Types
//!
//! - `Card`: Immutable rank / color / kind value
//! - `Color`: One of the four suits
//! - `CardColor`: A suit or wild
//! - `CardKind`: Number or one of the special kinds
//! - `InvalidCard`: Decoded fields that match no printed card
//! - `Hand`: Cards held by one seat, with a display selection

pub mod card;
pub mod hand;

pub use card::{Card, CardColor, CardKind, Color, InvalidCard};
pub use hand::Hand;
