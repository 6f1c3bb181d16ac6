//! Turn flow: permissions, turn alternation and cooperative delays.
//!
//! ## Key Types
//!
//! - `TurnFlow`: Entry points for play, draw, end-turn, end-sequence and color choice
//! - `TurnContext`: Per-turn permissions and the pending `Obligation`
//! - `TurnScheduler`: Turn alternation and the Stop skip flag
//! - `Timers`: Cancellable deferred tasks on a virtual clock

pub mod context;
pub mod controller;
pub mod scheduler;
pub mod timer;

pub use context::{Obligation, TurnContext};
pub use controller::{FlowEnv, TurnFlow};
pub use scheduler::TurnScheduler;
pub use timer::{Task, TimerId, Timers};
