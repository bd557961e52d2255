/*!
 * Task Lifecycle
 * States a task passes through under the priority-aging policy
 */

use serde::{Deserialize, Serialize};

/// Task state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    /// Arrival time is still in the future
    Unarrived,
    /// Arrived and waiting to be selected; ages every tick
    Ready,
    /// Chosen by the selector
    Selected,
    /// Handed to an execution unit
    Dispatched,
    /// Execution unit has completed
    Finished,
}

impl TaskState {
    /// Whether `next` directly follows this state
    pub const fn can_transition_to(self, next: TaskState) -> bool {
        matches!(
            (self, next),
            (Self::Unarrived, Self::Ready)
                | (Self::Ready, Self::Selected)
                | (Self::Selected, Self::Dispatched)
                | (Self::Dispatched, Self::Finished)
        )
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Finished)
    }
}
