use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use tracing::debug;

use crate::algorithms::{build_policy, SchedulingPolicy};
use crate::error::{Error, Result};
use crate::models::{AlgoConfig, Process, ProcessProfile, SimConfig, TimelineSegment};
use crate::state::{RunMetadata, RunStats, SimulationReport};

pub struct SimulationEngine {
    pub config: SimConfig,
    pub policy: Box<dyn SchedulingPolicy>,
}

impl SimulationEngine {
    pub fn new(config: SimConfig, policy: Box<dyn SchedulingPolicy>) -> Self {
        Self { config, policy }
    }

    pub fn run(&self) -> Result<SimulationReport> {
        let processes = build_processes(&self.config.processes, self.config.seed)?;
        validate_processes(&processes)?;

        debug!(
            algo = self.policy.name(),
            processes = processes.len(),
            "simulation starting"
        );
        let run = self.policy.run(&processes);
        let stats = compute_stats(&processes, &run.output.metrics.gantt_chart);
        debug!(
            makespan = stats.makespan,
            segments = run.output.metrics.gantt_chart.len(),
            "simulation finished"
        );

        Ok(SimulationReport {
            output: run.output,
            metadata: build_metadata(&self.config, processes.len()),
            stats,
            queue_levels: run.queue_levels,
        })
    }
}

pub fn run_simulation(config: &SimConfig) -> Result<SimulationReport> {
    validate_config(config)?;
    let policy = build_policy(config)?;
    SimulationEngine::new(config.clone(), policy).run()
}

pub fn validate_config(config: &SimConfig) -> Result<()> {
    match config.algo {
        AlgoConfig::RoundRobin if config.quantum == 0 => {
            return Err(Error::InvalidQuantum(config.quantum));
        }
        AlgoConfig::Mlfq => {
            if config.quantums.is_empty() {
                return Err(Error::EmptyQuantums);
            }
            if let Some(level) = config.quantums.iter().position(|&q| q == 0) {
                return Err(Error::InvalidQueueQuantum { level, value: 0 });
            }
        }
        _ => {}
    }

    if let ProcessProfile::Explicit(processes) = &config.processes {
        validate_processes(processes)?;
    }

    Ok(())
}

fn validate_processes(processes: &[Process]) -> Result<()> {
    let mut ids = HashSet::new();
    let mut horizon = 0u64;
    for process in processes {
        if process.id.trim().is_empty() {
            return Err(Error::EmptyProcessId);
        }
        if process.burst_time == 0 {
            return Err(Error::InvalidBurstValue(process.id.clone()));
        }
        if !ids.insert(process.id.as_str()) {
            return Err(Error::DuplicateProcessId(process.id.clone()));
        }
        horizon = horizon
            .checked_add(process.burst_time)
            .ok_or(Error::WorkloadOverflow)?;
    }

    // The clock never passes the last arrival plus the total burst.
    let last_arrival = processes.iter().map(|p| p.arrival_time).max().unwrap_or(0);
    last_arrival
        .checked_add(horizon)
        .ok_or(Error::WorkloadOverflow)?;

    Ok(())
}

pub fn build_processes(profile: &ProcessProfile, seed: Option<u64>) -> Result<Vec<Process>> {
    match profile {
        ProcessProfile::Explicit(processes) => Ok(processes.clone()),
        ProcessProfile::Random {
            count,
            max_arrival,
            max_burst,
            max_priority,
        } => generate_processes(*count, *max_arrival, *max_burst, *max_priority, seed),
    }
}

/// Seeded random workload named `P1..Pn`.
pub fn generate_processes(
    count: usize,
    max_arrival: u64,
    max_burst: u64,
    max_priority: Option<u32>,
    seed: Option<u64>,
) -> Result<Vec<Process>> {
    if max_burst == 0 {
        return Err(Error::InvalidRandomProfile(
            "max_burst must be > 0".to_string(),
        ));
    }

    let mut rng = StdRng::seed_from_u64(seed.unwrap_or(0));
    Ok((0..count)
        .map(|idx| Process {
            id: format!("P{}", idx + 1),
            arrival_time: rng.gen_range(0..=max_arrival),
            burst_time: rng.gen_range(1..=max_burst),
            priority: max_priority.map(|max| rng.gen_range(0..=max)),
        })
        .collect())
}

fn build_metadata(config: &SimConfig, processes: usize) -> RunMetadata {
    RunMetadata {
        algorithm: config.algo.to_string(),
        quantum: matches!(config.algo, AlgoConfig::RoundRobin).then_some(config.quantum),
        quantums: matches!(config.algo, AlgoConfig::Mlfq).then(|| config.quantums.clone()),
        processes,
    }
}

pub fn compute_stats(processes: &[Process], gantt_chart: &[TimelineSegment]) -> RunStats {
    let makespan = gantt_chart.iter().map(|s| s.end).max().unwrap_or(0);
    let busy_time: u64 = processes.iter().map(|p| p.burst_time).sum();
    let idle_time = makespan.saturating_sub(busy_time);
    let context_switches = gantt_chart
        .windows(2)
        .filter(|pair| pair[0].process_id != pair[1].process_id)
        .count();

    let (cpu_utilization_pct, throughput) = if makespan == 0 {
        (0.0, 0.0)
    } else {
        (
            (busy_time as f64 / makespan as f64) * 100.0,
            processes.len() as f64 / makespan as f64,
        )
    };

    RunStats {
        makespan,
        busy_time,
        idle_time,
        cpu_utilization_pct: round_to(cpu_utilization_pct, 2),
        throughput: round_to(throughput, 4),
        context_switches,
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    if decimals == 0 {
        return value.round();
    }
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}
