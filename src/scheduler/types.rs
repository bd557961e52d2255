/*!
 * Scheduler Types
 * Policy identifiers and round-robin quantum
 */

use crate::core::errors::{SimError, SimResult};
use crate::core::types::Ticks;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Default round-robin quantum in ticks
pub const DEFAULT_QUANTUM: Ticks = 2;

/// Scheduling policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// First come, first served (arrival order)
    Fcfs,
    /// Shortest job first (burst order, non-preemptive)
    Sjf,
    /// Round-robin with fixed time quantum
    RoundRobin,
    /// Non-preemptive priority with aging, dispatched on worker threads
    PriorityAging,
}

impl Policy {
    pub const ALL: [Policy; 4] = [
        Policy::Fcfs,
        Policy::Sjf,
        Policy::RoundRobin,
        Policy::PriorityAging,
    ];

    /// Convert to string representation
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::Sjf => "sjf",
            Self::RoundRobin => "round_robin",
            Self::PriorityAging => "priority_aging",
        }
    }

    /// Heading used in rendered reports
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS Scheduling",
            Self::Sjf => "SJF Scheduling",
            Self::RoundRobin => "Round Robin Scheduling",
            Self::PriorityAging => "Priority Scheduling with Aging",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Policy {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fcfs" | "fifo" => Ok(Self::Fcfs),
            "sjf" | "shortest" => Ok(Self::Sjf),
            "round_robin" | "roundrobin" | "rr" => Ok(Self::RoundRobin),
            "priority_aging" | "priority" | "prio" => Ok(Self::PriorityAging),
            _ => Err(SimError::InvalidConfig(format!(
                "Invalid policy '{}'. Valid: fcfs, sjf, round_robin, priority_aging",
                s
            ))),
        }
    }
}

impl Serialize for Policy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Policy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Round-robin time quantum, always at least one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeQuantum {
    ticks: Ticks,
}

impl TimeQuantum {
    /// Create new time quantum
    pub fn new(ticks: i64) -> SimResult<Self> {
        if ticks <= 0 {
            return Err(SimError::InvalidQuantum(ticks));
        }
        Ok(Self {
            ticks: ticks as Ticks,
        })
    }

    #[inline(always)]
    pub const fn ticks(&self) -> Ticks {
        self.ticks
    }

    /// Length of the next slice for a task with `remaining` ticks left
    #[inline(always)]
    pub fn slice_for(&self, remaining: Ticks) -> Ticks {
        self.ticks.min(remaining)
    }
}

impl Default for TimeQuantum {
    fn default() -> Self {
        Self {
            ticks: DEFAULT_QUANTUM,
        }
    }
}

impl<'de> Deserialize<'de> for TimeQuantum {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Inner {
            ticks: i64,
        }

        let inner = Inner::deserialize(deserializer)?;
        Self::new(inner.ticks).map_err(serde::de::Error::custom)
    }
}
