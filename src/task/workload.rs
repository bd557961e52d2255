/*!
 * Demo Workload
 * Deterministic synthetic task batch used by the binary and benchmarks
 */

use super::descriptor::{TaskDescriptor, TaskSet};
use crate::core::errors::SimResult;
use crate::core::types::{Priority, Ticks};

/// Generate `count` tasks with ids `1..=count`
///
/// Task `i` arrives at `2i`, needs `(3i mod 5) + 1` ticks and has priority
/// `(i mod 4) + 1`, keeping every burst between 1 and 5 ticks.
pub fn demo_workload(count: u32) -> SimResult<TaskSet> {
    let tasks = (1..=count)
        .map(|i| {
            let n = Ticks::from(i);
            TaskDescriptor::new(
                i,
                n * 2,
                (n * 3) % 5 + 1,
                Priority::from(i % 4 + 1),
            )
        })
        .collect();
    TaskSet::new(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_workload_shape() {
        let set = demo_workload(12).unwrap();
        assert_eq!(set.len(), 12);

        let first = set.get(1).unwrap();
        assert_eq!((first.arrival_time, first.burst_time, first.priority), (2, 4, 2));

        let last = set.get(12).unwrap();
        assert_eq!((last.arrival_time, last.burst_time, last.priority), (24, 2, 1));

        assert!(set.iter().all(|t| (1..=5).contains(&t.burst_time)));
    }

    #[test]
    fn test_empty_workload() {
        assert!(demo_workload(0).unwrap().is_empty());
    }
}
