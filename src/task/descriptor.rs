/*!
 * Task Descriptors
 * Identity and static scheduling inputs of a simulated task
 */

use crate::core::errors::{SimError, SimResult};
use crate::core::types::{Priority, TaskId, Ticks};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A simulated task
///
/// `burst_time` is only decremented by round-robin and `priority` is only
/// raised by aging, both on a run's own working copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TaskDescriptor {
    pub id: TaskId,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<Ticks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_time: Option<Ticks>,
}

impl TaskDescriptor {
    pub fn new(id: TaskId, arrival_time: Ticks, burst_time: Ticks, priority: Priority) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
            priority,
            start_time: None,
            finish_time: None,
        }
    }

    /// A task with no service time left is complete
    #[inline]
    pub const fn is_complete(&self) -> bool {
        self.burst_time == 0
    }

    #[inline]
    pub const fn has_arrived(&self, now: Ticks) -> bool {
        self.arrival_time <= now
    }

    /// Record the first time the task received service; later calls are ignored
    pub fn record_start(&mut self, at: Ticks) {
        debug_assert!(at >= self.arrival_time || self.start_time.is_some());
        self.start_time.get_or_insert(at);
    }

    pub fn record_finish(&mut self, at: Ticks) {
        debug_assert!(self.start_time.map_or(true, |start| at >= start));
        self.finish_time = Some(at);
    }
}

/// Read-only template of the tasks in one workload
///
/// Every policy run takes its own [`TaskSet::working_copy`], so no run can
/// observe another run's mutations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskSet {
    tasks: Vec<TaskDescriptor>,
}

impl TaskSet {
    /// Build a task set, rejecting duplicate ids and unrepresentable timelines
    ///
    /// No policy's clock can pass the latest arrival plus the total burst, so
    /// once that horizon fits in [`Ticks`] the schedulers never overflow.
    pub fn new(tasks: Vec<TaskDescriptor>) -> SimResult<Self> {
        let mut seen = HashSet::with_capacity(tasks.len());
        let mut total_burst: Ticks = 0;
        let mut latest: Option<&TaskDescriptor> = None;

        for task in &tasks {
            if !seen.insert(task.id) {
                return Err(SimError::DuplicateTaskId(task.id));
            }
            total_burst = total_burst
                .checked_add(task.burst_time)
                .ok_or(SimError::TimeOverflow(task.id))?;
            if latest.map_or(true, |l| task.arrival_time > l.arrival_time) {
                latest = Some(task);
            }
        }

        if let Some(latest) = latest {
            latest
                .arrival_time
                .checked_add(total_burst)
                .ok_or(SimError::TimeOverflow(latest.id))?;
        }
        Ok(Self { tasks })
    }

    /// Fresh, independently owned copy of the tasks in input order
    pub fn working_copy(&self) -> Vec<TaskDescriptor> {
        self.tasks.clone()
    }

    pub fn get(&self, id: TaskId) -> Option<&TaskDescriptor> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TaskDescriptor> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl<'a> IntoIterator for &'a TaskSet {
    type Item = &'a TaskDescriptor;
    type IntoIter = std::slice::Iter<'a, TaskDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = TaskSet::new(vec![
            TaskDescriptor::new(1, 0, 2, 1),
            TaskDescriptor::new(2, 0, 2, 1),
            TaskDescriptor::new(1, 3, 1, 1),
        ]);
        assert_eq!(result.unwrap_err(), SimError::DuplicateTaskId(1));
    }

    #[test]
    fn test_overflowing_horizon_rejected() {
        let result = TaskSet::new(vec![
            TaskDescriptor::new(1, 0, Ticks::MAX, 0),
            TaskDescriptor::new(2, 0, 1, 0),
        ]);
        assert_eq!(result.unwrap_err(), SimError::TimeOverflow(2));

        // Fits on its own, but not once the late arrival is added
        let result = TaskSet::new(vec![
            TaskDescriptor::new(1, 0, Ticks::MAX - 3, 0),
            TaskDescriptor::new(2, 9, 0, 0),
        ]);
        assert_eq!(result.unwrap_err(), SimError::TimeOverflow(2));
    }

    #[test]
    fn test_horizon_at_limit_accepted() {
        let set = TaskSet::new(vec![
            TaskDescriptor::new(1, 0, Ticks::MAX - 10, 0),
            TaskDescriptor::new(2, 10, 0, 0),
        ])
        .unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_working_copy_is_independent() {
        let set = TaskSet::new(vec![TaskDescriptor::new(1, 0, 4, 2)]).unwrap();

        let mut copy = set.working_copy();
        copy[0].burst_time = 0;
        copy[0].priority += 5;
        copy[0].record_start(0);

        let original = set.get(1).unwrap();
        assert_eq!(original.burst_time, 4);
        assert_eq!(original.priority, 2);
        assert_eq!(original.start_time, None);
    }

    #[test]
    fn test_start_recorded_once() {
        let mut task = TaskDescriptor::new(7, 1, 3, 0);
        task.record_start(2);
        task.record_start(5);
        task.record_finish(8);
        assert_eq!(task.start_time, Some(2));
        assert_eq!(task.finish_time, Some(8));
    }

    #[test]
    fn test_unset_times_not_serialized() {
        let task = TaskDescriptor::new(1, 0, 1, 1);
        let json = serde_json::to_string(&task).unwrap();
        assert!(!json.contains("start_time"));
        assert!(!json.contains("finish_time"));
    }
}
