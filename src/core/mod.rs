/*!
 * Core Module
 * Shared types and error handling for the simulator
 */

pub mod config;
pub mod errors;
pub mod types;

pub use config::SimConfig;
pub use errors::{SimError, SimResult};
pub use types::{Priority, TaskId, Ticks};
