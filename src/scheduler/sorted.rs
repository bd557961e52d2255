/*!
 * Sorted Schedulers
 * FCFS and SJF as one comparator-driven, non-preemptive walk
 */

use super::timeline::{Timeline, TimelineRow};
use super::traits::Schedule;
use super::types::Policy;
use crate::core::types::Ticks;
use crate::monitoring::RunSpan;
use crate::task::{TaskDescriptor, TaskSet};
use std::marker::PhantomData;
use tracing::{debug, info};

/// Ordering key for a sorted scheduler
pub trait SortKey {
    const POLICY: Policy;

    fn key(task: &TaskDescriptor) -> Ticks;
}

/// Order by arrival time (first come, first served)
#[derive(Debug, Clone, Copy, Default)]
pub struct ByArrival;

impl SortKey for ByArrival {
    const POLICY: Policy = Policy::Fcfs;

    #[inline]
    fn key(task: &TaskDescriptor) -> Ticks {
        task.arrival_time
    }
}

/// Order by service time (shortest job first)
#[derive(Debug, Clone, Copy, Default)]
pub struct ByBurst;

impl SortKey for ByBurst {
    const POLICY: Policy = Policy::Sjf;

    #[inline]
    fn key(task: &TaskDescriptor) -> Ticks {
        task.burst_time
    }
}

/// Stable-sorts tasks by `K` and runs them back to back
///
/// A task never starts before its arrival: when the clock is behind, it
/// jumps forward over the idle gap.
pub struct SortedScheduler<K> {
    _key: PhantomData<fn() -> K>,
}

pub type Fcfs = SortedScheduler<ByArrival>;
pub type Sjf = SortedScheduler<ByBurst>;

impl<K> SortedScheduler<K> {
    pub const fn new() -> Self {
        Self { _key: PhantomData }
    }
}

impl<K> Default for SortedScheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: SortKey> Schedule for SortedScheduler<K> {
    type Output = Timeline;

    fn policy(&self) -> Policy {
        K::POLICY
    }

    fn run(&self, tasks: &TaskSet) -> Timeline {
        let policy = K::POLICY;
        let span = RunSpan::new(policy, tasks.len());
        let _entered = span.enter();

        let mut working = tasks.working_copy();
        // slice::sort_by_key is stable, so ties keep input order
        working.sort_by_key(K::key);

        let mut clock: Ticks = 0;
        for task in working.iter_mut() {
            if clock < task.arrival_time {
                debug!(
                    policy = %policy,
                    from = clock,
                    to = task.arrival_time,
                    "idle until next arrival"
                );
                clock = task.arrival_time;
            }
            task.record_start(clock);
            // bounded by the horizon TaskSet::new checked
            clock += task.burst_time;
            task.record_finish(clock);
        }

        let rows: Vec<TimelineRow> = working
            .iter()
            .map(|task| TimelineRow {
                task_id: task.id,
                arrival_time: task.arrival_time,
                burst_time: task.burst_time,
                start: task.start_time.unwrap_or(task.arrival_time),
                finish: task.finish_time.unwrap_or(task.arrival_time),
            })
            .collect();

        info!(policy = %policy, tasks = rows.len(), makespan = clock, "schedule computed");
        span.record_items(rows.len());
        Timeline::new(policy, rows)
    }
}
