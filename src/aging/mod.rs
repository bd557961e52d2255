/*!
 * Priority Aging Module
 *
 * Non-preemptive priority scheduling with starvation-preventing aging.
 * Selection runs on the caller's thread; each selected task executes on its
 * own thread behind a readiness gate.
 */

pub mod dispatch;
pub mod gate;
pub mod pipeline;
pub mod selector;
pub mod stats;

pub use dispatch::{
    service_duration, DispatchConfig, Dispatcher, ExecutionRecord, SleepExecutor, TaskExecutor,
};
pub use gate::{GateMode, ReadinessGate};
pub use pipeline::{AgingReport, PriorityAging};
pub use selector::{Selection, Selector};
pub use stats::{AtomicDispatchStats, DispatchStats};
