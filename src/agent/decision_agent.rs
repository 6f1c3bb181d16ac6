//! The computer-controlled seat.
//!
//! ## Decision lifecycle
//!
//! ```text
//! Idle --request--> Thinking --delay elapses--> Committed --finish--> Idle
//!                      |  ^
//!                pause |  | resume (at least min_resume_delay)
//!                      v  |
//!                   Suspended
//! ```
//!
//! Thinking is a cancellable timer, never a thread. The decision itself
//! is only computed at commit time, so cancelling a pending think has no
//! side effects to undo.

use std::time::Duration;

use log::debug;

use crate::cards::{Color, Hand};
use crate::core::{AgentConfig, GameRng, Seat};
use crate::flow::{Task, TimerId, Timers};

use super::policy::{Decision, DecisionContext, DecisionPolicy, WeightedPolicy};

/// Where the agent is in its current decision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AgentPhase {
    Idle,
    Thinking { timer: TimerId, context: DecisionContext },
    Suspended { context: DecisionContext, remaining: Duration },
    Committed,
}

/// A seat driven by a [`DecisionPolicy`] under cooperative scheduling.
pub struct DecisionAgent {
    seat: Seat,
    hand: Hand,
    policy: Box<dyn DecisionPolicy>,
    rng: GameRng,
    config: AgentConfig,
    phase: AgentPhase,
    paused: bool,
}

impl std::fmt::Debug for DecisionAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionAgent")
            .field("seat", &self.seat)
            .field("hand", &self.hand)
            .field("phase", &self.phase)
            .field("paused", &self.paused)
            .finish_non_exhaustive()
    }
}

impl DecisionAgent {
    /// Create an agent using the [`WeightedPolicy`].
    #[must_use]
    pub fn new(seat: Seat, config: AgentConfig, rng: GameRng) -> Self {
        let policy = Box::new(WeightedPolicy::new(&config));
        Self {
            seat,
            hand: Hand::new(),
            policy,
            rng,
            config,
            phase: AgentPhase::Idle,
            paused: false,
        }
    }

    #[must_use]
    pub fn seat(&self) -> Seat {
        self.seat
    }

    #[must_use]
    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    #[must_use]
    pub fn phase(&self) -> &AgentPhase {
        &self.phase
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn is_thinking(&self) -> bool {
        matches!(self.phase, AgentPhase::Thinking { .. } | AgentPhase::Suspended { .. })
    }

    /// Start thinking about `context`; the decision commits after the
    /// configured think delay. While paused the request is parked.
    pub fn request_decision(&mut self, context: DecisionContext, timers: &mut Timers) {
        assert!(
            !self.is_thinking(),
            "{} asked for a decision while already thinking",
            self.seat
        );
        let delay = self.config.think_delay;
        if self.paused {
            self.phase = AgentPhase::Suspended { context, remaining: delay };
            return;
        }
        let timer = timers.schedule(delay, Task::AgentCommit(self.seat));
        debug!("agent {}: thinking for {delay:?}", self.seat);
        self.phase = AgentPhase::Thinking { timer, context };
    }

    /// Suspend an in-flight decision, keeping its context.
    pub fn pause(&mut self, timers: &mut Timers) {
        self.paused = true;
        if let AgentPhase::Thinking { timer, context } = &self.phase {
            let remaining = timers.cancel(*timer).unwrap_or_default();
            debug!("agent {}: paused with {remaining:?} left", self.seat);
            self.phase = AgentPhase::Suspended {
                context: context.clone(),
                remaining,
            };
        }
    }

    /// Resume a suspended decision with at least `min_resume_delay`.
    pub fn resume(&mut self, timers: &mut Timers) {
        self.paused = false;
        if let AgentPhase::Suspended { context, remaining } = &self.phase {
            let delay = (*remaining).max(self.config.min_resume_delay);
            let timer = timers.schedule(delay, Task::AgentCommit(self.seat));
            debug!("agent {}: resumed, committing in {delay:?}", self.seat);
            self.phase = AgentPhase::Thinking {
                timer,
                context: context.clone(),
            };
        }
    }

    /// Commit the decision whose think timer `fired` just elapsed.
    ///
    /// Returns `None` for a stale timer that no longer belongs to the
    /// current decision.
    pub fn commit(&mut self, fired: TimerId) -> Option<Decision> {
        let AgentPhase::Thinking { timer, context } = &self.phase else {
            return None;
        };
        if *timer != fired {
            return None;
        }
        let decision = self.policy.decide(context, &self.hand, &mut self.rng);
        debug!("agent {}: commits {decision:?}", self.seat);
        self.phase = AgentPhase::Committed;
        Some(decision)
    }

    /// The committed decision has been resolved.
    pub fn finish(&mut self) {
        if self.phase == AgentPhase::Committed {
            self.phase = AgentPhase::Idle;
        }
    }

    /// Pick a color for a ChangeColor this agent played.
    pub fn choose_color(&mut self) -> Color {
        self.policy.choose_color(&self.hand, &mut self.rng)
    }

    /// Drop any decision in progress and empty the hand.
    pub fn reset(&mut self, timers: &mut Timers) {
        if let AgentPhase::Thinking { timer, .. } = &self.phase {
            timers.cancel(*timer);
        }
        self.phase = AgentPhase::Idle;
        self.paused = false;
        self.hand.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;
    use crate::core::InteractionMode;
    use smallvec::smallvec;

    fn agent() -> DecisionAgent {
        let config = AgentConfig::default()
            .with_think_delay(Duration::from_millis(1000))
            .with_min_resume_delay(Duration::from_millis(400));
        DecisionAgent::new(Seat::B, config, GameRng::new(5))
    }

    fn context() -> DecisionContext {
        DecisionContext {
            seat: Seat::B,
            turn: 2,
            top: Some(Card::number(4, Color::Red)),
            active_color: Some(Color::Red),
            mode: InteractionMode::Normal,
            legal: smallvec![],
            can_draw: true,
            can_end_turn: false,
            can_end_sequence: false,
        }
    }

    #[test]
    fn commits_after_think_delay() {
        let mut agent = agent();
        let mut timers = Timers::new();
        agent.request_decision(context(), &mut timers);
        assert!(agent.is_thinking());

        assert!(timers.advance(Duration::from_millis(999)).is_empty());
        let due = timers.advance(Duration::from_millis(1));
        assert_eq!(due.len(), 1);
        assert_eq!(agent.commit(due[0].0), Some(Decision::Draw));
        assert_eq!(agent.phase(), &AgentPhase::Committed);

        agent.finish();
        assert_eq!(agent.phase(), &AgentPhase::Idle);
    }

    #[test]
    fn pause_keeps_context_and_resume_respects_minimum() {
        let mut agent = agent();
        let mut timers = Timers::new();
        agent.request_decision(context(), &mut timers);
        timers.advance(Duration::from_millis(900));

        agent.pause(&mut timers);
        assert!(timers.is_empty());
        let AgentPhase::Suspended { context: kept, remaining } = agent.phase().clone() else {
            panic!("expected suspension");
        };
        assert_eq!(kept, context());
        assert_eq!(remaining, Duration::from_millis(100));

        agent.resume(&mut timers);
        assert!(timers.advance(Duration::from_millis(399)).is_empty());
        let due = timers.advance(Duration::from_millis(1));
        assert_eq!(agent.commit(due[0].0), Some(Decision::Draw));
    }

    #[test]
    fn pause_from_idle_only_sets_flag() {
        let mut agent = agent();
        let mut timers = Timers::new();
        agent.pause(&mut timers);
        assert!(agent.is_paused());
        assert_eq!(agent.phase(), &AgentPhase::Idle);
        agent.resume(&mut timers);
        assert!(timers.is_empty());
    }

    #[test]
    fn stale_timer_is_ignored() {
        let mut agent = agent();
        let mut timers = Timers::new();
        agent.request_decision(context(), &mut timers);
        let AgentPhase::Thinking { timer, .. } = agent.phase().clone() else {
            panic!("expected thinking");
        };
        agent.pause(&mut timers);
        agent.resume(&mut timers);
        assert_eq!(agent.commit(timer), None);
    }
}
