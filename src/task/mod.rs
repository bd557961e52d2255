/*!
 * Task Module
 * Task descriptors, per-run task sets and the demo workload source
 */

pub mod descriptor;
pub mod state;
pub mod workload;

pub use descriptor::{TaskDescriptor, TaskSet};
pub use state::TaskState;
pub use workload::demo_workload;
