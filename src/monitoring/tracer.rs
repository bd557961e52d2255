/*!
 * Run Tracing
 * Structured tracing for policy runs using the tracing crate
 *
 * Features:
 * - Run ID generation for correlating every event of one policy run
 * - JSON-formatted logs for structured parsing
 * - Span per run with duration and outcome recorded on close
 */

use crate::scheduler::Policy;
use std::time::Instant;
use tracing::{debug, info, span, warn, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};
use uuid::Uuid;

/// Runs slower than this are reported at warn level
const SLOW_RUN_MS: u128 = 1_000;

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - SCHED_TRACE_JSON: Enable JSON output (default: false)
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("SCHED_TRACE_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_names(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .init();
        info!("Structured tracing initialized with JSON output");
    } else {
        // Thread names identify execution units (task-<id>)
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_names(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .init();
        info!("Structured tracing initialized");
    }
}

/// Generate a unique id for one policy run
pub fn generate_run_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span covering one policy run
pub struct RunSpan {
    span: tracing::Span,
    start: Instant,
    policy: Policy,
    run_id: String,
}

impl RunSpan {
    pub fn new(policy: Policy, tasks: usize) -> Self {
        let run_id = generate_run_id();

        let span = span!(
            Level::INFO,
            "run",
            run_id = %run_id,
            policy = policy.as_str(),
            tasks = tasks,
            duration_us = tracing::field::Empty,
            items = tracing::field::Empty,
            result = tracing::field::Empty,
            error = tracing::field::Empty,
        );

        span.in_scope(|| debug!(policy = policy.as_str(), tasks, "run started"));

        Self {
            span,
            start: Instant::now(),
            policy,
            run_id,
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Record how many tasks the run completed
    pub fn record_items(&self, count: usize) {
        self.span.record("items", count);
        self.span.record("result", "success");
    }

    pub fn record_error(&self, error: &str) {
        self.span.record("error", error);
        self.span.record("result", "error");
    }

    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }
}

impl Drop for RunSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        let _entered = self.span.enter();
        self.span.record("duration_us", duration.as_micros() as u64);

        if duration.as_millis() > SLOW_RUN_MS {
            warn!(
                run_id = %self.run_id,
                policy = self.policy.as_str(),
                duration_ms = duration.as_millis() as u64,
                slow = true,
                "slow run"
            );
        } else {
            debug!(
                run_id = %self.run_id,
                policy = self.policy.as_str(),
                duration_us = duration.as_micros() as u64,
                "run closed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_test_tracing() {
        let _ = tracing_subscriber::registry()
            .with(EnvFilter::new("debug"))
            .with(tracing_subscriber::fmt::layer().compact())
            .try_init();
    }

    #[test]
    fn test_run_ids_unique() {
        assert_ne!(generate_run_id(), generate_run_id());
    }

    #[test]
    fn test_run_span() {
        init_test_tracing();

        let span = RunSpan::new(Policy::Fcfs, 3);
        assert_eq!(span.run_id().len(), 36);
        {
            let _entered = span.enter();
            span.record_items(3);
        }
        // Span is dropped and logged with its duration
    }

    #[test]
    fn test_run_span_error() {
        init_test_tracing();

        let span = RunSpan::new(Policy::PriorityAging, 1);
        span.record_error("unit faulted");
    }
}
