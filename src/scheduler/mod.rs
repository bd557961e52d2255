/*!
 * Scheduler Module
 * Analytical scheduling policies sharing one task model
 */

pub mod round_robin;
pub mod sorted;
pub mod timeline;
pub mod traits;
pub mod types;

// Re-export public API
pub use round_robin::{RoundRobin, RoundRobinTrace, Slice};
pub use sorted::{ByArrival, ByBurst, Fcfs, Sjf, SortKey, SortedScheduler};
pub use timeline::{Timeline, TimelineRow};
pub use traits::Schedule;
pub use types::{Policy, TimeQuantum, DEFAULT_QUANTUM};
