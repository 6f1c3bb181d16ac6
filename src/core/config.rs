//! Session configuration.
//!
//! `GameConfig` fixes everything a session needs before the first deal:
//! hand size, seed, which seat (if any) the computer plays, and the
//! cooperative delays used to pace the computer opponent.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::Seat;

/// Errors reported by [`GameConfig::validate`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("hand size must be between 1 and {max}, got {got}")]
    HandSize { got: usize, max: usize },
    #[error("special-card bias must lie in [0, 1], got {0}")]
    SpecialBias(f64),
    #[error("minimum resume delay {min:?} exceeds think delay {think:?}")]
    ResumeDelay { min: Duration, think: Duration },
}

/// Tuning for the computer opponent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Probability of preferring a legal special card over a number.
    pub special_bias: f64,

    /// How far below the highest legal rank a numeric choice may land.
    pub rank_offset: usize,

    /// Simulated thinking time before each decision commits.
    pub think_delay: Duration,

    /// Lower bound on the thinking time re-armed after a resume.
    pub min_resume_delay: Duration,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            special_bias: 0.7,
            rank_offset: 2,
            think_delay: Duration::from_millis(1200),
            min_resume_delay: Duration::from_millis(400),
        }
    }
}

impl AgentConfig {
    #[must_use]
    pub fn with_special_bias(mut self, bias: f64) -> Self {
        self.special_bias = bias;
        self
    }

    #[must_use]
    pub fn with_rank_offset(mut self, offset: usize) -> Self {
        self.rank_offset = offset;
        self
    }

    #[must_use]
    pub fn with_think_delay(mut self, delay: Duration) -> Self {
        self.think_delay = delay;
        self
    }

    #[must_use]
    pub fn with_min_resume_delay(mut self, delay: Duration) -> Self {
        self.min_resume_delay = delay;
        self
    }
}

/// Complete session configuration.
///
/// ## Example
///
/// ```
/// use std::time::Duration;
/// use taki_engine::core::{GameConfig, Seat};
///
/// let config = GameConfig::default()
///     .with_hand_size(6)
///     .with_seed(7)
///     .with_turn_delay(Duration::from_millis(100));
///
/// assert_eq!(config.agent_seat, Some(Seat::B));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Cards dealt to each seat at the start of a game.
    pub hand_size: usize,

    /// Seed for the deck shuffle and the computer opponent.
    pub seed: u64,

    /// Seat played by the computer. `None` when both seats are driven
    /// from outside (two local players, or a mirrored remote peer).
    pub agent_seat: Option<Seat>,

    /// Natural pause between a turn passing to the computer and the
    /// computer starting to think.
    pub turn_delay: Duration,

    pub agent: AgentConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            hand_size: 8,
            seed: 42,
            agent_seat: Some(Seat::B),
            turn_delay: Duration::from_millis(800),
            agent: AgentConfig::default(),
        }
    }
}

impl GameConfig {
    /// Largest deal that still leaves a playable draw pile.
    pub const MAX_HAND_SIZE: usize = 40;

    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_agent_seat(mut self, seat: Option<Seat>) -> Self {
        self.agent_seat = seat;
        self
    }

    #[must_use]
    pub fn with_turn_delay(mut self, delay: Duration) -> Self {
        self.turn_delay = delay;
        self
    }

    #[must_use]
    pub fn with_agent(mut self, agent: AgentConfig) -> Self {
        self.agent = agent;
        self
    }

    /// Check the configuration for values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hand_size == 0 || self.hand_size > Self::MAX_HAND_SIZE {
            return Err(ConfigError::HandSize {
                got: self.hand_size,
                max: Self::MAX_HAND_SIZE,
            });
        }
        if !(0.0..=1.0).contains(&self.agent.special_bias) {
            return Err(ConfigError::SpecialBias(self.agent.special_bias));
        }
        if self.agent.min_resume_delay > self.agent.think_delay {
            return Err(ConfigError::ResumeDelay {
                min: self.agent.min_resume_delay,
                think: self.agent.think_delay,
            });
        }
        Ok(())
    }
}
