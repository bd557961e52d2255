/*!
 * Readiness Gate
 *
 * One-shot latch built on parking_lot::Condvar. Execution units block on it
 * before doing any work; opening it releases every current and future waiter.
 */

use crate::core::errors::SimError;
use parking_lot::{Condvar, Mutex};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

/// How execution units are gated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateMode {
    /// One gate for the whole run; opened at the first dispatch and never closed
    Shared,
    /// A fresh single-use gate per dispatched unit
    PerDispatch,
}

impl GateMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Shared => "shared",
            Self::PerDispatch => "per_dispatch",
        }
    }
}

impl Default for GateMode {
    fn default() -> Self {
        Self::Shared
    }
}

impl fmt::Display for GateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GateMode {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "shared" | "latch" => Ok(Self::Shared),
            "per_dispatch" | "per-dispatch" | "fresh" => Ok(Self::PerDispatch),
            _ => Err(SimError::InvalidConfig(format!(
                "Invalid gate mode '{}'. Valid: shared, per_dispatch",
                s
            ))),
        }
    }
}

/// One-shot readiness latch
///
/// Starts closed. Once opened it stays open: later `wait` calls return
/// immediately.
#[derive(Debug, Default)]
pub struct ReadinessGate {
    open: Mutex<bool>,
    condvar: Condvar,
}

impl ReadinessGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the gate and wake all waiters
    ///
    /// Returns `true` if this call opened it, `false` if it was already open
    /// (in which case nothing is signalled).
    pub fn open(&self) -> bool {
        let mut open = self.open.lock();
        if *open {
            return false;
        }
        *open = true;
        drop(open);
        self.condvar.notify_all();
        true
    }

    pub fn is_open(&self) -> bool {
        *self.open.lock()
    }

    /// Block until the gate is open
    pub fn wait(&self) {
        let mut open = self.open.lock();
        while !*open {
            self.condvar.wait(&mut open);
        }
    }

    /// Block until the gate is open or `timeout` elapses; returns whether it opened
    pub fn wait_for(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut open = self.open.lock();
        while !*open {
            if self.condvar.wait_until(&mut open, deadline).timed_out() {
                return *open;
            }
        }
        true
    }
}
