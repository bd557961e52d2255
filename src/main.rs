/*!
 * Scheduling Simulator - Main Entry Point
 *
 * Runs every policy over the demo workload and prints the results.
 * Pass `--json` to emit the structured report instead of text tables.
 */

use miette::IntoDiagnostic;
use tracing::info;

use sched_sim::{demo_workload, init_tracing, report, run_all, SimConfig};

fn main() -> miette::Result<()> {
    init_tracing();

    let config = SimConfig::from_env()?;
    info!(
        quantum = config.quantum.ticks(),
        tick_us = config.tick.as_micros() as u64,
        gate_mode = %config.gate_mode,
        tasks = config.task_count,
        "configuration loaded"
    );

    let workload = demo_workload(config.task_count)?;
    let results = run_all(&workload, &config)?;

    if std::env::args().skip(1).any(|arg| arg == "--json") {
        let json = serde_json::to_string_pretty(&results).into_diagnostic()?;
        println!("{}", json);
    } else {
        print!("{}", report::render_text(&results));
    }

    Ok(())
}
