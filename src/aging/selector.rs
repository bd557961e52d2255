/*!
 * Priority-Aging Selector
 *
 * Picks the next task to dispatch under non-preemptive priority scheduling.
 * Each selection round is one tick: every Ready task ages by one, then the
 * highest effective priority wins. Larger priority values are more urgent;
 * ties go to the smallest task id.
 */

use crate::core::errors::{SimError, SimResult};
use crate::core::types::{Priority, TaskId, Ticks};
use crate::metrics::TaskMetrics;
use crate::task::{TaskDescriptor, TaskSet, TaskState};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

/// Outcome of one selection round
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    /// The task with its aged priority
    pub task: TaskDescriptor,
    pub base_priority: Priority,
    /// Rounds the task spent Ready, including the one that selected it
    pub aged_by: u64,
    /// Simulated ticks skipped because nothing was Ready
    pub idle_before: Ticks,
    pub dispatched_at: Ticks,
    pub completed_at: Ticks,
}

impl Selection {
    pub fn effective_priority(&self) -> Priority {
        self.task.priority
    }

    pub fn metrics(&self) -> TaskMetrics {
        TaskMetrics::from_completion(
            self.task.id,
            self.task.arrival_time,
            self.task.burst_time,
            self.completed_at,
        )
    }
}

#[derive(Debug, Clone)]
struct Candidate {
    task: TaskDescriptor,
    base_priority: Priority,
    aged_by: u64,
}

impl Candidate {
    /// Higher priority first, then lower id
    fn rank(&self, other: &Self) -> Ordering {
        self.task
            .priority
            .cmp(&other.task.priority)
            .then_with(|| other.task.id.cmp(&self.task.id))
    }
}

/// Selection loop state for one priority-aging run
#[derive(Debug, Clone)]
pub struct Selector {
    clock: Ticks,
    remaining: Vec<Candidate>,
    states: BTreeMap<TaskId, TaskState>,
}

impl Selector {
    /// Start a run over a fresh working copy of `tasks`
    pub fn new(tasks: &TaskSet) -> Self {
        let remaining: Vec<Candidate> = tasks
            .working_copy()
            .into_iter()
            .map(|task| Candidate {
                base_priority: task.priority,
                aged_by: 0,
                task,
            })
            .collect();
        let states = remaining
            .iter()
            .map(|c| (c.task.id, TaskState::Unarrived))
            .collect();

        let mut selector = Self {
            clock: 0,
            remaining,
            states,
        };
        selector.admit_arrivals();
        selector
    }

    /// Current simulated time
    pub fn now(&self) -> Ticks {
        self.clock
    }

    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_done(&self) -> bool {
        self.remaining.is_empty()
    }

    pub fn state_of(&self, task_id: TaskId) -> Option<TaskState> {
        self.states.get(&task_id).copied()
    }

    /// Move a task that has left the selector further along its lifecycle
    pub fn advance(&mut self, task_id: TaskId, to: TaskState) -> SimResult<()> {
        let from = self
            .states
            .get(&task_id)
            .copied()
            .unwrap_or(TaskState::Unarrived);
        if !from.can_transition_to(to) {
            return Err(SimError::InvalidStateTransition { task_id, from, to });
        }
        self.states.insert(task_id, to);
        Ok(())
    }

    /// Run one selection round
    ///
    /// Returns `None` once every task has been selected.
    pub fn select_next(&mut self) -> Option<Selection> {
        let idle_before = self.skip_idle()?;

        for candidate in self.remaining.iter_mut() {
            if candidate.task.has_arrived(self.clock) {
                candidate.task.priority = candidate.task.priority.saturating_add(1);
                candidate.aged_by += 1;
            }
        }

        let clock = self.clock;
        let index = self
            .remaining
            .iter()
            .enumerate()
            .filter(|(_, c)| c.task.has_arrived(clock))
            .max_by(|(_, a), (_, b)| a.rank(b))
            .map(|(i, _)| i)?;

        let chosen = self.remaining.remove(index);
        self.states.insert(chosen.task.id, TaskState::Selected);

        let dispatched_at = self.clock;
        // bounded by the horizon TaskSet::new checked
        self.clock += chosen.task.burst_time;

        debug!(
            task_id = chosen.task.id,
            base_priority = chosen.base_priority,
            effective_priority = chosen.task.priority,
            aged_by = chosen.aged_by,
            at = dispatched_at,
            "task selected"
        );

        self.admit_arrivals();

        Some(Selection {
            task: chosen.task,
            base_priority: chosen.base_priority,
            aged_by: chosen.aged_by,
            idle_before,
            dispatched_at,
            completed_at: self.clock,
        })
    }

    /// Advance the clock to the next arrival if nothing is Ready
    fn skip_idle(&mut self) -> Option<Ticks> {
        let clock = self.clock;
        if self.remaining.iter().any(|c| c.task.has_arrived(clock)) {
            return Some(0);
        }

        let next = self.remaining.iter().map(|c| c.task.arrival_time).min()?;
        let idle = next - clock;
        debug!(from = clock, to = next, idle, "no task ready, clock advanced");
        self.clock = next;
        self.admit_arrivals();
        Some(idle)
    }

    fn admit_arrivals(&mut self) {
        let clock = self.clock;
        for candidate in &self.remaining {
            if candidate.task.has_arrived(clock) {
                let state = self
                    .states
                    .entry(candidate.task.id)
                    .or_insert(TaskState::Unarrived);
                if *state == TaskState::Unarrived {
                    *state = TaskState::Ready;
                }
            }
        }
    }
}

impl Iterator for Selector {
    type Item = Selection;

    fn next(&mut self) -> Option<Selection> {
        self.select_next()
    }
}
