/*!
 * Report Rendering
 * Plain-text tables for a simulation report
 */

use crate::aging::AgingReport;
use crate::metrics::BatchSummary;
use crate::scheduler::{Policy, RoundRobinTrace, Timeline};
use crate::simulation::SimulationReport;
use std::fmt::Write;

/// Render the whole report as human-readable text
pub fn render_text(report: &SimulationReport) -> String {
    let mut out = String::new();
    render_timeline(&mut out, &report.fcfs);
    render_timeline(&mut out, &report.sjf);
    render_round_robin(&mut out, &report.round_robin);
    render_aging(&mut out, &report.priority_aging);
    out
}

fn render_timeline(out: &mut String, timeline: &Timeline) {
    let _ = writeln!(out, "\n--- {} ---", timeline.policy.title());
    for row in &timeline.rows {
        let _ = writeln!(
            out,
            "Task {} started at {} and finished at {}",
            row.task_id, row.start, row.finish
        );
    }
    render_summary(out, &timeline.summary());
}

fn render_round_robin(out: &mut String, trace: &RoundRobinTrace) {
    let _ = writeln!(
        out,
        "\n--- {} (quantum {}) ---",
        Policy::RoundRobin.title(),
        trace.quantum.ticks()
    );
    for slice in &trace.slices {
        let _ = writeln!(
            out,
            "Task {} executed from {} to {}",
            slice.task_id, slice.from, slice.to
        );
    }
}

fn render_aging(out: &mut String, report: &AgingReport) {
    let _ = writeln!(out, "\n--- {} ---", Policy::PriorityAging.title());
    let _ = writeln!(
        out,
        "{:<5}{:<10}{:<10}{:<10}{:<10}{:<10}",
        "ID", "Arrival", "Burst", "Priority", "Waiting", "TAT"
    );
    let _ = writeln!(out, "{}", "-".repeat(55));
    for (selection, metrics) in report.selections.iter().zip(&report.metrics) {
        let _ = writeln!(
            out,
            "{:<5}{:<10}{:<10}{:<10}{:<10}{:<10}",
            metrics.task_id,
            metrics.arrival_time,
            metrics.burst_time,
            format!("{}->{}", selection.base_priority, selection.effective_priority()),
            metrics.waiting_time,
            metrics.turnaround_time
        );
    }
    render_summary(out, &report.summary);
}

fn render_summary(out: &mut String, summary: &BatchSummary) {
    if let Some(elapsed) = summary.total_dispatch_time {
        let _ = writeln!(out, "Total Dispatch Time = {} ms", elapsed.as_millis());
    }
    match summary.averages() {
        Ok((waiting, turnaround)) => {
            let _ = writeln!(out, "Average Waiting Time = {:.2}", waiting);
            let _ = writeln!(out, "Average Turnaround Time = {:.2}", turnaround);
        }
        Err(_) => {
            let _ = writeln!(out, "Average Waiting Time = no data");
            let _ = writeln!(out, "Average Turnaround Time = no data");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimConfig;
    use crate::simulation::run_all;
    use crate::task::{TaskDescriptor, TaskSet};

    #[test]
    fn test_render_contains_every_section() {
        let tasks = TaskSet::new(vec![
            TaskDescriptor::new(1, 2, 4, 1),
            TaskDescriptor::new(2, 0, 2, 2),
        ])
        .unwrap();
        let report = run_all(&tasks, &SimConfig::instant()).unwrap();
        let text = render_text(&report);

        assert!(text.contains("--- FCFS Scheduling ---"));
        assert!(text.contains("--- SJF Scheduling ---"));
        assert!(text.contains("Task 2 started at 0 and finished at 2"));
        assert!(text.contains("--- Round Robin Scheduling (quantum 2) ---"));
        assert!(text.contains("--- Priority Scheduling with Aging ---"));
        assert!(text.contains("Average Waiting Time ="));
    }

    #[test]
    fn test_render_empty_reports_no_data() {
        let report = run_all(&TaskSet::default(), &SimConfig::instant()).unwrap();
        let text = render_text(&report);
        assert!(text.contains("Average Waiting Time = no data"));
        assert!(!text.contains("NaN"));
    }
}
