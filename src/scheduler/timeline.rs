/*!
 * Timeline
 * Ordered per-task rows produced by non-preemptive analytical policies
 */

use super::types::Policy;
use crate::core::types::{TaskId, Ticks};
use crate::metrics::{Aggregator, BatchSummary, TaskMetrics};
use serde::Serialize;

/// One task's contiguous execution interval `[start, finish)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelineRow {
    pub task_id: TaskId,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub start: Ticks,
    pub finish: Ticks,
}

impl TimelineRow {
    pub fn metrics(&self) -> TaskMetrics {
        TaskMetrics::from_completion(self.task_id, self.arrival_time, self.burst_time, self.finish)
    }
}

/// Result of an FCFS or SJF run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timeline {
    pub policy: Policy,
    pub rows: Vec<TimelineRow>,
}

impl Timeline {
    pub fn new(policy: Policy, rows: Vec<TimelineRow>) -> Self {
        Self { policy, rows }
    }

    /// Task ids in execution order
    pub fn order(&self) -> Vec<TaskId> {
        self.rows.iter().map(|r| r.task_id).collect()
    }

    pub fn row(&self, task_id: TaskId) -> Option<&TimelineRow> {
        self.rows.iter().find(|r| r.task_id == task_id)
    }

    /// Time at which the last task finishes
    pub fn makespan(&self) -> Ticks {
        self.rows.last().map_or(0, |r| r.finish)
    }

    pub fn metrics(&self) -> Vec<TaskMetrics> {
        self.rows.iter().map(TimelineRow::metrics).collect()
    }

    /// Averages over the run; analytical runs have no real dispatch time
    pub fn summary(&self) -> BatchSummary {
        let mut aggregator = Aggregator::new();
        for row in &self.rows {
            aggregator.record(row.metrics());
        }
        aggregator.summarize(None)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
