//! Cooperative, cancellable timers on a virtual clock.
//!
//! Nothing runs in the background: the owner advances the clock with
//! [`Timers::advance`] and receives every task whose deadline has passed,
//! in deadline order. Cancelling a timer leaves no trace.

use std::time::Duration;

use log::debug;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::Seat;

/// Handle returned by [`Timers::schedule`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(u64);

/// Work deferred until a deadline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Task {
    /// The natural pause before the agent's turn has elapsed.
    AgentTurn(Seat),
    /// The agent's thinking delay has elapsed; commit its decision.
    AgentCommit(Seat),
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    deadline: Duration,
    task: Task,
}

/// Deadline tracking for deferred tasks.
#[derive(Clone, Debug, Default)]
pub struct Timers {
    now: Duration,
    next_id: u64,
    pending: FxHashMap<TimerId, Pending>,
}

impl Timers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the virtual clock.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Run `task` once `after` has elapsed.
    pub fn schedule(&mut self, after: Duration, task: Task) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let deadline = self.now + after;
        debug!("timer {id:?}: {task:?} in {after:?}");
        self.pending.insert(id, Pending { deadline, task });
        id
    }

    /// Cancel a pending timer. Returns the time it still had to run, or
    /// `None` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> Option<Duration> {
        let pending = self.pending.remove(&id)?;
        debug!("timer {id:?}: cancelled");
        Some(pending.deadline.saturating_sub(self.now))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Move the clock forward by `by` and return the tasks that came due,
    /// earliest first. Ties fire in scheduling order.
    pub fn advance(&mut self, by: Duration) -> Vec<(TimerId, Task)> {
        self.now += by;
        let now = self.now;
        let mut due: Vec<(TimerId, Pending)> = Vec::new();
        self.pending.retain(|id, p| {
            if p.deadline <= now {
                due.push((*id, *p));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|(id, p)| (p.deadline, *id));
        due.into_iter().map(|(id, p)| (id, p.task)).collect()
    }

    /// Drop every pending timer without firing it.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
