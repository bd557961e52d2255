/*!
 * Core Types
 * Common types used across the simulator
 */

/// Task identifier, unique within a workload
pub type TaskId = u32;

/// Simulated time in abstract ticks
pub type Ticks = u64;

/// Scheduling priority (larger values are more urgent)
pub type Priority = i64;
