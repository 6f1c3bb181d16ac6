//! The computer-controlled seat.
//!
//! - `DecisionAgent`: Owns its hand and runs the pausable think/commit cycle
//! - `DecisionPolicy`: Strategy trait; `WeightedPolicy` is the default
//! - `DecisionContext`: The snapshot a decision is made against

mod decision_agent;
mod policy;

pub use decision_agent::{AgentPhase, DecisionAgent};
pub use policy::{Decision, DecisionContext, DecisionPolicy, WeightedPolicy};
