/*!
 * Scheduling Simulator Library
 *
 * Simulates classical CPU scheduling policies over a batch of tasks:
 * - FCFS and SJF as stable-sorted, non-preemptive timelines
 * - Round-robin with a fixed quantum
 * - Priority scheduling with aging, dispatched on gated worker threads
 */

pub mod aging;
pub mod core;
pub mod metrics;
pub mod monitoring;
pub mod report;
pub mod scheduler;
pub mod simulation;
pub mod task;

// Re-exports
pub use aging::{AgingReport, DispatchConfig, GateMode, PriorityAging, ReadinessGate, Selector};
pub use crate::core::{Priority, SimConfig, SimError, SimResult, TaskId, Ticks};
pub use metrics::{Aggregator, BatchSummary, TaskMetrics};
pub use monitoring::init_tracing;
pub use scheduler::{Fcfs, Policy, RoundRobin, Schedule, Sjf, TimeQuantum, Timeline};
pub use simulation::{run_all, SimulationReport};
pub use task::{demo_workload, TaskDescriptor, TaskSet, TaskState};
