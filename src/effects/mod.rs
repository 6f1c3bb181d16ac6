//! Special-card effect resolution.
//!
//! - `Activation`: whether a card's effect would fire, and whether it fires now
//! - `Effect`: what resolving a card did to the game
//! - `EffectResolver`: applies a played card to Game State and the scheduler
//!
//! ## Deferred effects
//!
//! Inside an open sequence every card's effect is recorded but held back.
//! Closing the sequence feeds its last card through the same
//! `EffectResolver::resolve` call with `closing = true`; there is no second
//! per-kind code path.

mod effect;
mod resolver;

pub use effect::{Activation, Effect, Resolution};
pub use resolver::{EffectResolver, ResolverContext};
