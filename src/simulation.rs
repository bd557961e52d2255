/*!
 * Simulation
 * Runs every policy over independent copies of one workload
 */

use crate::aging::{AgingReport, DispatchConfig, PriorityAging};
use crate::core::config::SimConfig;
use crate::core::errors::SimResult;
use crate::scheduler::{Fcfs, RoundRobin, RoundRobinTrace, Schedule, Sjf, Timeline};
use crate::task::TaskSet;
use serde::Serialize;
use tracing::{debug, info};

/// Results of all four policies over the same workload
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub workload: TaskSet,
    pub fcfs: Timeline,
    pub sjf: Timeline,
    pub round_robin: RoundRobinTrace,
    pub priority_aging: AgingReport,
}

fn run_policy<S: Schedule>(scheduler: &S, tasks: &TaskSet) -> S::Output {
    debug!(policy = %scheduler.policy(), "running policy");
    scheduler.run(tasks)
}

/// Run FCFS, SJF, round-robin and priority-aging in sequence
///
/// `tasks` is only read; each policy works on its own copy.
pub fn run_all(tasks: &TaskSet, config: &SimConfig) -> SimResult<SimulationReport> {
    info!(
        tasks = tasks.len(),
        quantum = config.quantum.ticks(),
        gate_mode = %config.gate_mode,
        "simulation starting"
    );

    let fcfs = run_policy(&Fcfs::new(), tasks);
    let sjf = run_policy(&Sjf::new(), tasks);
    let round_robin = run_policy(&RoundRobin::new(config.quantum), tasks);
    let priority_aging = PriorityAging::new(DispatchConfig {
        gate_mode: config.gate_mode,
        tick: config.tick,
    })
    .run(tasks)?;

    Ok(SimulationReport {
        workload: tasks.clone(),
        fcfs,
        sjf,
        round_robin,
        priority_aging,
    })
}
