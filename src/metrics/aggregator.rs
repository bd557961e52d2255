/*!
 * Metrics Aggregator
 * Reduces per-task metrics into batch averages
 */

use crate::core::errors::{SimError, SimResult};
use crate::core::types::{TaskId, Ticks};
use serde::Serialize;
use std::time::Duration;

/// Waiting and turnaround time of one completed task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskMetrics {
    pub task_id: TaskId,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub completion_time: Ticks,
    pub waiting_time: Ticks,
    pub turnaround_time: Ticks,
}

impl TaskMetrics {
    /// `turnaround = completion - arrival`, `waiting = turnaround - burst`
    pub fn from_completion(
        task_id: TaskId,
        arrival_time: Ticks,
        burst_time: Ticks,
        completion_time: Ticks,
    ) -> Self {
        debug_assert!(completion_time >= arrival_time.saturating_add(burst_time));
        let turnaround_time = completion_time.saturating_sub(arrival_time);
        Self {
            task_id,
            arrival_time,
            burst_time,
            completion_time,
            waiting_time: turnaround_time.saturating_sub(burst_time),
            turnaround_time,
        }
    }
}

/// Batch-level summary of one run
///
/// Averages are `None` when no task completed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BatchSummary {
    pub tasks: usize,
    pub average_waiting_time: Option<f64>,
    pub average_turnaround_time: Option<f64>,
    /// Wall-clock time of the dispatch phase, if the run dispatched real units
    pub total_dispatch_time: Option<Duration>,
}

impl BatchSummary {
    /// Both averages, or `EmptyWorkload` when there is no data
    pub fn averages(&self) -> SimResult<(f64, f64)> {
        match (self.average_waiting_time, self.average_turnaround_time) {
            (Some(waiting), Some(turnaround)) => Ok((waiting, turnaround)),
            _ => Err(SimError::EmptyWorkload(
                "no completed tasks to average".into(),
            )),
        }
    }
}

/// Accumulates per-task metrics for one run
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    rows: Vec<TaskMetrics>,
    total_waiting: u128,
    total_turnaround: u128,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, metrics: TaskMetrics) {
        self.total_waiting += u128::from(metrics.waiting_time);
        self.total_turnaround += u128::from(metrics.turnaround_time);
        self.rows.push(metrics);
    }

    pub fn rows(&self) -> &[TaskMetrics] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Reduce to a summary; never divides by zero
    pub fn summarize(&self, total_dispatch_time: Option<Duration>) -> BatchSummary {
        let count = self.rows.len();
        let mean = |total: u128| (count > 0).then(|| total as f64 / count as f64);

        BatchSummary {
            tasks: count,
            average_waiting_time: mean(self.total_waiting),
            average_turnaround_time: mean(self.total_turnaround),
            total_dispatch_time,
        }
    }

    pub fn into_rows(self) -> Vec<TaskMetrics> {
        self.rows
    }
}

impl FromIterator<TaskMetrics> for Aggregator {
    fn from_iter<I: IntoIterator<Item = TaskMetrics>>(iter: I) -> Self {
        let mut aggregator = Self::new();
        for metrics in iter {
            aggregator.record(metrics);
        }
        aggregator
    }
}
