//! Turn alternation and the Stop skip flag.
//!
//! The scheduler decides *which* seat starts next; the turn-flow
//! controller decides what that seat may do once its turn starts.

use std::time::Duration;

use log::debug;

use super::timer::{Task, TimerId, Timers};
use crate::core::Seat;

/// Alternates turns and owns the agent's natural-delay timer.
#[derive(Clone, Debug, Default)]
pub struct TurnScheduler {
    /// Seat that played Stop; its opponent's next turn start is skipped.
    skip_beneficiary: Option<Seat>,
    /// Pending "agent turn begins" timer, if any.
    agent_turn: Option<TimerId>,
}

impl TurnScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the skip flag for `beneficiary`'s opponent.
    pub fn arm_skip(&mut self, beneficiary: Seat) {
        debug!("scheduler: skip armed, {beneficiary} plays again");
        self.skip_beneficiary = Some(beneficiary);
    }

    #[must_use]
    pub fn skip_armed(&self) -> Option<Seat> {
        self.skip_beneficiary
    }

    /// The seat whose turn actually starts when `seat`'s turn is due.
    ///
    /// A skipped seat never becomes active: the flag is consumed and the
    /// seat that played Stop gets a fresh turn instead.
    pub fn resolve_start(&mut self, seat: Seat) -> Seat {
        match self.skip_beneficiary {
            Some(beneficiary) if beneficiary.other() == seat => {
                self.skip_beneficiary = None;
                debug!("scheduler: {seat} skipped, {beneficiary} starts again");
                beneficiary
            }
            _ => seat,
        }
    }

    /// The seat nominally due after `from`; [`Self::resolve_start`] still
    /// applies when that turn starts.
    #[must_use]
    pub fn next_turn(&self, from: Seat) -> Seat {
        from.other()
    }

    /// Schedule the agent's turn after the natural delay, replacing any
    /// earlier pending schedule.
    pub fn schedule_agent_turn(&mut self, timers: &mut Timers, seat: Seat, delay: Duration) {
        self.cancel_agent_turn(timers);
        self.agent_turn = Some(timers.schedule(delay, Task::AgentTurn(seat)));
    }

    /// Cancel the pending agent turn. It is not re-armed on its own; the
    /// next turn start schedules a fresh one.
    pub fn cancel_agent_turn(&mut self, timers: &mut Timers) -> bool {
        match self.agent_turn.take() {
            Some(id) => timers.cancel(id).is_some(),
            None => false,
        }
    }

    /// Forget a timer that has just fired.
    pub fn agent_turn_fired(&mut self, id: TimerId) {
        if self.agent_turn == Some(id) {
            self.agent_turn = None;
        }
    }

    #[must_use]
    pub fn agent_turn_pending(&self) -> bool {
        self.agent_turn.is_some()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
