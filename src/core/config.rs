/*!
 * Simulator Configuration
 *
 * Runtime configuration loaded from the environment:
 * - SCHED_QUANTUM: round-robin quantum in ticks (default: 2)
 * - SCHED_TICK_MICROS: real duration of one tick for dispatched units (default: 1000)
 * - SCHED_GATE_MODE: `shared` or `per_dispatch` (default: shared)
 * - SCHED_TASKS: size of the generated demo workload (default: 12)
 */

use super::errors::{SimError, SimResult};
use crate::aging::GateMode;
use crate::scheduler::TimeQuantum;
use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_TICK: Duration = Duration::from_millis(1);
pub const DEFAULT_TASK_COUNT: u32 = 12;

/// Simulator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SimConfig {
    pub quantum: TimeQuantum,
    pub tick: Duration,
    pub gate_mode: GateMode,
    pub task_count: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            quantum: TimeQuantum::default(),
            tick: DEFAULT_TICK,
            gate_mode: GateMode::Shared,
            task_count: DEFAULT_TASK_COUNT,
        }
    }
}

impl SimConfig {
    /// Configuration that runs dispatched units without real delay
    pub fn instant() -> Self {
        Self {
            tick: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Load configuration from process environment variables
    pub fn from_env() -> SimResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> SimResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("SCHED_QUANTUM") {
            let ticks = parse_number::<i64>("SCHED_QUANTUM", &raw)?;
            config.quantum = TimeQuantum::new(ticks)?;
        }

        if let Some(raw) = lookup("SCHED_TICK_MICROS") {
            let micros = parse_number::<u64>("SCHED_TICK_MICROS", &raw)?;
            config.tick = Duration::from_micros(micros);
        }

        if let Some(raw) = lookup("SCHED_GATE_MODE") {
            config.gate_mode = raw.parse()?;
        }

        if let Some(raw) = lookup("SCHED_TASKS") {
            config.task_count = parse_number::<u32>("SCHED_TASKS", &raw)?;
        }

        Ok(config)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> SimResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| SimError::InvalidConfig(format!("{} must be a number, got '{}'", key, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SimConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, SimConfig::default());
        assert_eq!(config.quantum.ticks(), 2);
        assert_eq!(config.tick, Duration::from_millis(1));
        assert_eq!(config.gate_mode, GateMode::Shared);
    }

    #[test]
    fn test_overrides() {
        let config = SimConfig::from_lookup(lookup_from(&[
            ("SCHED_QUANTUM", "4"),
            ("SCHED_TICK_MICROS", "250"),
            ("SCHED_GATE_MODE", "per_dispatch"),
            ("SCHED_TASKS", "3"),
        ]))
        .unwrap();

        assert_eq!(config.quantum.ticks(), 4);
        assert_eq!(config.tick, Duration::from_micros(250));
        assert_eq!(config.gate_mode, GateMode::PerDispatch);
        assert_eq!(config.task_count, 3);
    }

    #[test]
    fn test_rejects_bad_quantum() {
        let err = SimConfig::from_lookup(lookup_from(&[("SCHED_QUANTUM", "0")])).unwrap_err();
        assert_eq!(err, SimError::InvalidQuantum(0));

        let err = SimConfig::from_lookup(lookup_from(&[("SCHED_QUANTUM", "-2")])).unwrap_err();
        assert_eq!(err, SimError::InvalidQuantum(-2));

        let err = SimConfig::from_lookup(lookup_from(&[("SCHED_QUANTUM", "two")])).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_bad_gate_mode() {
        let err = SimConfig::from_lookup(lookup_from(&[("SCHED_GATE_MODE", "barrier")])).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)));
    }
}
