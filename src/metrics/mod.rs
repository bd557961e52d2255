/*!
 * Metrics Module
 * Per-task waiting/turnaround values and their batch reduction
 */

pub mod aggregator;

pub use aggregator::{Aggregator, BatchSummary, TaskMetrics};
