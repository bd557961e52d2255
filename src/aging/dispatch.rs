/*!
 * Concurrent Dispatch Core
 *
 * Runs each selected task on its own named thread. Every unit blocks on a
 * readiness gate before doing work, holds for its simulated service time,
 * and reports real start/finish offsets. The orchestrator joins every unit
 * before aggregate metrics are read.
 */

use super::gate::{GateMode, ReadinessGate};
use super::stats::{AtomicDispatchStats, DispatchStats};
use crate::core::errors::{SimError, SimResult};
use crate::core::types::{Priority, TaskId, Ticks};
use crate::task::TaskDescriptor;
use serde::Serialize;
use std::any::Any;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, error, trace};

/// Performs a task's simulated service on an execution unit
pub trait TaskExecutor: Send + Sync + 'static {
    fn execute(&self, task: &TaskDescriptor, tick: Duration);
}

/// Holds the unit for `burst_time` ticks of real time
#[derive(Debug, Clone, Copy, Default)]
pub struct SleepExecutor;

impl TaskExecutor for SleepExecutor {
    fn execute(&self, task: &TaskDescriptor, tick: Duration) {
        let hold = service_duration(tick, task.burst_time);
        if !hold.is_zero() {
            thread::sleep(hold);
        }
    }
}

/// Real time covered by `burst` ticks, saturating on overflow
pub fn service_duration(tick: Duration, burst: Ticks) -> Duration {
    let nanos = u64::try_from(tick.as_nanos()).unwrap_or(u64::MAX);
    Duration::from_nanos(nanos.saturating_mul(burst))
}

/// What one execution unit observed, as offsets from the dispatcher's epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExecutionRecord {
    pub task_id: TaskId,
    pub burst_time: Ticks,
    pub priority: Priority,
    pub started_at: Duration,
    pub finished_at: Duration,
}

impl ExecutionRecord {
    pub fn elapsed(&self) -> Duration {
        self.finished_at.saturating_sub(self.started_at)
    }
}

struct Unit {
    task_id: TaskId,
    handle: JoinHandle<ExecutionRecord>,
}

/// Dispatch configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchConfig {
    pub gate_mode: GateMode,
    /// Real duration of one simulated tick
    pub tick: Duration,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            gate_mode: GateMode::Shared,
            tick: crate::core::config::DEFAULT_TICK,
        }
    }
}

/// Launches and joins execution units for one run
pub struct Dispatcher<E: TaskExecutor = SleepExecutor> {
    config: DispatchConfig,
    gate: Arc<ReadinessGate>,
    executor: Arc<E>,
    epoch: Instant,
    units: Vec<Unit>,
    stats: Arc<AtomicDispatchStats>,
}

impl Dispatcher<SleepExecutor> {
    pub fn new(config: DispatchConfig) -> Self {
        Self::with_executor(config, Arc::new(SleepExecutor))
    }
}

impl<E: TaskExecutor> Dispatcher<E> {
    pub fn with_executor(config: DispatchConfig, executor: Arc<E>) -> Self {
        Self {
            config,
            gate: Arc::new(ReadinessGate::new()),
            executor,
            epoch: Instant::now(),
            units: Vec::new(),
            stats: Arc::new(AtomicDispatchStats::new()),
        }
    }

    /// The run-wide gate used in [`GateMode::Shared`]
    pub fn gate(&self) -> &Arc<ReadinessGate> {
        &self.gate
    }

    pub fn stats(&self) -> DispatchStats {
        self.stats.snapshot()
    }

    /// Shared counters that outlive [`Dispatcher::join_all`]
    pub fn stats_handle(&self) -> Arc<AtomicDispatchStats> {
        Arc::clone(&self.stats)
    }

    pub fn launched(&self) -> usize {
        self.units.len()
    }

    /// Spawn a unit for `task`, then open its gate
    ///
    /// The task is moved into the unit; the caller keeps no handle on it.
    pub fn launch(&mut self, task: TaskDescriptor) -> SimResult<()> {
        let task_id = task.id;
        let gate = match self.config.gate_mode {
            GateMode::Shared => Arc::clone(&self.gate),
            GateMode::PerDispatch => Arc::new(ReadinessGate::new()),
        };

        let unit_gate = Arc::clone(&gate);
        let executor = Arc::clone(&self.executor);
        let stats = Arc::clone(&self.stats);
        let epoch = self.epoch;
        let tick = self.config.tick;

        let handle = thread::Builder::new()
            .name(format!("task-{}", task_id))
            .spawn(move || run_unit(task, &unit_gate, executor.as_ref(), &stats, epoch, tick))
            .map_err(|e| {
                error!(task_id, error = %e, "failed to spawn execution unit");
                SimError::UnrecoverableExecutionFault {
                    task_id,
                    reason: format!("spawn failed: {}", e),
                }
            })?;

        self.stats.inc_launched();
        self.units.push(Unit { task_id, handle });

        if gate.open() {
            trace!(task_id, mode = %self.config.gate_mode, "readiness gate opened");
        }
        Ok(())
    }

    /// Join every launched unit, in dispatch order
    ///
    /// All units are joined even after a fault; the first fault is returned.
    pub fn join_all(self) -> SimResult<Vec<ExecutionRecord>> {
        let mut records = Vec::with_capacity(self.units.len());
        let mut fault = None;

        for unit in self.units {
            match unit.handle.join() {
                Ok(record) => records.push(record),
                Err(payload) => {
                    let reason = panic_reason(payload.as_ref());
                    error!(task_id = unit.task_id, reason = %reason, "execution unit faulted");
                    fault.get_or_insert(SimError::UnrecoverableExecutionFault {
                        task_id: unit.task_id,
                        reason,
                    });
                }
            }
        }

        match fault {
            Some(err) => Err(err),
            None => Ok(records),
        }
    }
}

fn run_unit<E: TaskExecutor>(
    task: TaskDescriptor,
    gate: &ReadinessGate,
    executor: &E,
    stats: &AtomicDispatchStats,
    epoch: Instant,
    tick: Duration,
) -> ExecutionRecord {
    gate.wait();
    stats.inc_released();

    let started_at = epoch.elapsed();
    debug!(
        task_id = task.id,
        priority = task.priority,
        burst = task.burst_time,
        "unit started"
    );

    executor.execute(&task, tick);

    let finished_at = epoch.elapsed();
    stats.inc_completed();
    debug!(task_id = task.id, "unit completed");

    ExecutionRecord {
        task_id: task.id,
        burst_time: task.burst_time,
        priority: task.priority,
        started_at,
        finished_at,
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "execution unit panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailOn(TaskId);

    impl TaskExecutor for FailOn {
        fn execute(&self, task: &TaskDescriptor, _tick: Duration) {
            if task.id == self.0 {
                panic!("simulated fault in task {}", task.id);
            }
        }
    }

    fn instant(gate_mode: GateMode) -> DispatchConfig {
        DispatchConfig {
            gate_mode,
            tick: Duration::ZERO,
        }
    }

    #[test]
    fn test_service_duration() {
        assert_eq!(
            service_duration(Duration::from_millis(1), 4),
            Duration::from_millis(4)
        );
        assert_eq!(service_duration(Duration::ZERO, 9), Duration::ZERO);
        assert_eq!(
            service_duration(Duration::MAX, 2),
            Duration::from_nanos(u64::MAX)
        );
    }

    #[test]
    fn test_shared_gate_stays_open() {
        let mut dispatcher = Dispatcher::new(instant(GateMode::Shared));
        assert!(!dispatcher.gate().is_open());

        dispatcher.launch(TaskDescriptor::new(1, 0, 1, 1)).unwrap();
        assert!(dispatcher.gate().is_open());

        dispatcher.launch(TaskDescriptor::new(2, 0, 1, 1)).unwrap();
        assert!(dispatcher.gate().is_open());

        let records = dispatcher.join_all().unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.task_id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_per_dispatch_gates_leave_shared_gate_closed() {
        let mut dispatcher = Dispatcher::new(instant(GateMode::PerDispatch));
        dispatcher.launch(TaskDescriptor::new(1, 0, 1, 1)).unwrap();
        dispatcher.launch(TaskDescriptor::new(2, 0, 1, 1)).unwrap();
        assert!(!dispatcher.gate().is_open());

        assert_eq!(dispatcher.join_all().unwrap().len(), 2);
    }

    #[test]
    fn test_units_hold_for_burst() {
        let config = DispatchConfig {
            gate_mode: GateMode::Shared,
            tick: Duration::from_millis(5),
        };
        let mut dispatcher = Dispatcher::new(config);
        dispatcher.launch(TaskDescriptor::new(1, 0, 3, 1)).unwrap();

        let records = dispatcher.join_all().unwrap();
        assert!(records[0].elapsed() >= Duration::from_millis(15));
        assert!(records[0].finished_at >= records[0].started_at);
    }

    #[test]
    fn test_stats_after_join() {
        let mut dispatcher = Dispatcher::new(instant(GateMode::Shared));
        for id in 1..=3 {
            dispatcher.launch(TaskDescriptor::new(id, 0, 1, 0)).unwrap();
        }
        assert_eq!(dispatcher.launched(), 3);
        assert_eq!(dispatcher.stats().launched, 3);
        let stats = dispatcher.stats_handle();
        dispatcher.join_all().unwrap();

        let snap = stats.snapshot();
        assert_eq!(snap.launched, 3);
        assert_eq!(snap.released, 3);
        assert_eq!(snap.completed, 3);
        assert_eq!(snap.in_flight(), 0);
    }

    #[test]
    fn test_fault_surfaces_after_joining_everything() {
        let mut dispatcher =
            Dispatcher::with_executor(instant(GateMode::Shared), Arc::new(FailOn(2)));
        for id in 1..=3 {
            dispatcher.launch(TaskDescriptor::new(id, 0, 1, 0)).unwrap();
        }
        let stats = dispatcher.stats_handle();

        let err = dispatcher.join_all().unwrap_err();
        match err {
            SimError::UnrecoverableExecutionFault { task_id, reason } => {
                assert_eq!(task_id, 2);
                assert!(reason.contains("simulated fault"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        // Units 1 and 3 still ran to completion
        assert_eq!(stats.snapshot().completed, 2);
    }
}
