/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::TaskId;
use crate::task::TaskState;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for simulator operations
pub type SimResult<T> = Result<T, SimError>;

/// Simulator errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SimError {
    #[error("Invalid time quantum: {0}")]
    #[diagnostic(
        code(scheduler::invalid_quantum),
        help("The round-robin quantum must be a positive number of ticks.")
    )]
    InvalidQuantum(i64),

    #[error("Empty workload: {0}")]
    #[diagnostic(
        code(metrics::empty_workload),
        help("No tasks were scheduled, so there is no data to average.")
    )]
    EmptyWorkload(String),

    #[error("Duplicate task id {0} in workload")]
    #[diagnostic(
        code(task::duplicate_id),
        help("Task ids must be unique within a workload and are never reused.")
    )]
    DuplicateTaskId(TaskId),

    #[error("Workload time horizon overflows at task {0}")]
    #[diagnostic(
        code(task::time_overflow),
        help("The latest arrival plus the total burst time must fit in 64-bit ticks.")
    )]
    TimeOverflow(TaskId),

    #[error("Invalid state transition for task {task_id}: {from:?} -> {to:?}")]
    #[diagnostic(
        code(task::invalid_transition),
        help("Tasks move Unarrived -> Ready -> Selected -> Dispatched -> Finished.")
    )]
    InvalidStateTransition {
        task_id: TaskId,
        from: TaskState,
        to: TaskState,
    },

    #[error("Execution unit for task {task_id} failed: {reason}")]
    #[diagnostic(
        code(dispatch::execution_fault),
        help("An execution unit faulted. The whole priority-aging run was aborted.")
    )]
    UnrecoverableExecutionFault { task_id: TaskId, reason: String },

    #[error("Invalid configuration: {0}")]
    #[diagnostic(
        code(config::invalid),
        help("Check the SCHED_* environment variables.")
    )]
    InvalidConfig(String),
}

impl SimError {
    /// Whether the error aborted a run that was already executing
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::UnrecoverableExecutionFault { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let err = SimError::InvalidQuantum(0);
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("invalid_quantum"));

        let back: SimError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);
    }

    #[test]
    fn test_fault_is_fatal() {
        let fault = SimError::UnrecoverableExecutionFault {
            task_id: 3,
            reason: "boom".into(),
        };
        assert!(fault.is_fatal());
        assert!(!SimError::InvalidQuantum(-1).is_fatal());
        assert_eq!(
            fault.to_string(),
            "Execution unit for task 3 failed: boom"
        );
    }
}
