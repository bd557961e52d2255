/*!
 * Scheduler Traits
 * Interface shared by the analytical policies
 */

use super::types::Policy;
use crate::task::TaskSet;

/// A scheduling policy that turns a task set into a simulated schedule
///
/// Implementations work on their own working copy of `tasks`; running the
/// same policy twice on the same set yields identical output.
pub trait Schedule: Send + Sync {
    /// Result of one run
    type Output;

    /// Policy implemented by this scheduler
    fn policy(&self) -> Policy;

    /// Simulate the policy over `tasks`
    fn run(&self, tasks: &TaskSet) -> Self::Output;
}
