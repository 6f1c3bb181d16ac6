//! Game sessions.
//!
//! `Game` ties the engine together for one table: it deals, owns both
//! seats, runs the computer seat on cooperative timers and exposes the
//! action surface a UI or a mirroring layer calls into.

mod session;

pub use session::{Game, Occupant};
