/*!
 * Round-Robin Scheduler
 * FIFO time slicing with a fixed quantum
 */

use super::traits::Schedule;
use super::types::{Policy, TimeQuantum};
use crate::core::errors::SimResult;
use crate::core::types::{TaskId, Ticks};
use crate::monitoring::RunSpan;
use crate::task::{TaskDescriptor, TaskSet};
use serde::Serialize;
use std::collections::VecDeque;
use tracing::{debug, info};

/// One contiguous slice of service `[from, to)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Slice {
    pub task_id: TaskId,
    pub from: Ticks,
    pub to: Ticks,
}

impl Slice {
    #[inline]
    pub const fn len(&self) -> Ticks {
        self.to - self.from
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.to == self.from
    }
}

/// Result of a round-robin run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundRobinTrace {
    pub quantum: TimeQuantum,
    /// Slices in execution order
    pub slices: Vec<Slice>,
    /// `(task, finish time)` in completion order
    pub completions: Vec<(TaskId, Ticks)>,
}

impl RoundRobinTrace {
    pub fn slices_for(&self, task_id: TaskId) -> impl Iterator<Item = &Slice> + '_ {
        self.slices.iter().filter(move |s| s.task_id == task_id)
    }

    /// Total service a task received across all of its slices
    pub fn executed(&self, task_id: TaskId) -> Ticks {
        self.slices_for(task_id).map(Slice::len).sum()
    }

    pub fn completion_time(&self, task_id: TaskId) -> Option<Ticks> {
        self.completions
            .iter()
            .find(|(id, _)| *id == task_id)
            .map(|(_, at)| *at)
    }

    pub fn makespan(&self) -> Ticks {
        self.slices.last().map_or(0, |s| s.to)
    }
}

/// Round-robin scheduler
///
/// Tasks are queued in input order and treated as already arrived.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundRobin {
    quantum: TimeQuantum,
}

impl RoundRobin {
    pub fn new(quantum: TimeQuantum) -> Self {
        Self { quantum }
    }

    /// Create from a raw tick count, rejecting non-positive quanta
    pub fn with_quantum(ticks: i64) -> SimResult<Self> {
        Ok(Self::new(TimeQuantum::new(ticks)?))
    }

    pub fn quantum(&self) -> TimeQuantum {
        self.quantum
    }
}

impl Schedule for RoundRobin {
    type Output = RoundRobinTrace;

    fn policy(&self) -> Policy {
        Policy::RoundRobin
    }

    fn run(&self, tasks: &TaskSet) -> RoundRobinTrace {
        let span = RunSpan::new(Policy::RoundRobin, tasks.len());
        let _entered = span.enter();

        let mut queue: VecDeque<TaskDescriptor> = tasks
            .working_copy()
            .into_iter()
            .filter(|task| {
                if task.is_complete() {
                    debug!(task_id = task.id, "zero-burst task skipped");
                }
                !task.is_complete()
            })
            .collect();

        let mut clock: Ticks = 0;
        let mut slices = Vec::new();
        let mut completions = Vec::with_capacity(queue.len());

        while let Some(mut task) = queue.pop_front() {
            let run = self.quantum.slice_for(task.burst_time);
            slices.push(Slice {
                task_id: task.id,
                from: clock,
                to: clock + run,
            });
            // total burst fits in Ticks, checked by TaskSet::new
            clock += run;
            task.burst_time -= run;

            if task.is_complete() {
                completions.push((task.id, clock));
            } else {
                queue.push_back(task);
            }
        }

        info!(
            policy = Policy::RoundRobin.as_str(),
            quantum = self.quantum.ticks(),
            slices = slices.len(),
            makespan = clock,
            "schedule computed"
        );
        span.record_items(completions.len());

        RoundRobinTrace {
            quantum: self.quantum,
            slices,
            completions,
        }
    }
}
