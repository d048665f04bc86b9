use clap::{Args, Parser, Subcommand, ValueEnum};
use std::collections::HashSet;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::models::{AlgoConfig, Process};

#[derive(Parser, Debug)]
#[command(name = "sched-sim", about = "CPU scheduling simulator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Simulate a workload and print the schedule
    Run(RunArgs),
    /// Print the resolved configuration without simulating
    ShowConfig(RunArgs),
    /// Print the supported algorithm names
    ListAlgorithms,
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    #[arg(long, help = "TOML or JSON config file; flags override its values")]
    pub config: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub algo: Option<AlgoArg>,
    #[arg(
        long = "process",
        help = "Process as id:arrival:burst[:priority] or arrival:burst[:priority] (repeatable)"
    )]
    pub process: Vec<String>,
    #[arg(long, help = "Comma-separated process entries")]
    pub processes: Option<String>,
    #[arg(long, help = "Round robin time slice")]
    pub quantum: Option<u64>,
    #[arg(long, value_delimiter = ',', help = "MLFQ quantums, highest priority first")]
    pub quantums: Vec<u64>,
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,
    #[arg(long, help = "Shorthand for --format summary")]
    pub summary: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlgoArg {
    Fcfs,
    Sjf,
    RoundRobin,
    Mlfq,
}

impl From<AlgoArg> for AlgoConfig {
    fn from(value: AlgoArg) -> Self {
        match value {
            AlgoArg::Fcfs => AlgoConfig::Fcfs,
            AlgoArg::Sjf => AlgoConfig::Sjf,
            AlgoArg::RoundRobin => AlgoConfig::RoundRobin,
            AlgoArg::Mlfq => AlgoConfig::Mlfq,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatArg {
    #[default]
    Human,
    Summary,
    Json,
}

pub fn parse_args() -> Result<Cli> {
    Cli::try_parse().map_err(|e| Error::Cli(e.to_string()))
}

/// Parses process entries. An entry whose first field is numeric has no id
/// and is named `P<n>` after its 1-based position.
pub fn parse_processes<S: AsRef<str>>(entries: &[S]) -> Result<Vec<Process>> {
    let mut processes = Vec::with_capacity(entries.len());
    let mut ids = HashSet::new();

    for (pos, entry) in entries.iter().enumerate() {
        let trimmed = entry.as_ref().trim();
        if trimmed.is_empty() {
            return Err(Error::EmptyProcessEntry);
        }

        let parts: Vec<&str> = trimmed.split(':').map(str::trim).collect();
        let anonymous = parts[0].parse::<u64>().is_ok();
        let (id, fields) = if anonymous {
            (format!("P{}", pos + 1), &parts[..])
        } else {
            (parts[0].to_string(), &parts[1..])
        };
        if id.is_empty() || !(2..=3).contains(&fields.len()) {
            return Err(Error::InvalidProcessEntry(trimmed.to_string()));
        }

        let arrival_time: u64 = fields[0]
            .parse()
            .map_err(|_| Error::InvalidArrival(trimmed.to_string()))?;
        let burst_time: u64 = fields[1]
            .parse()
            .map_err(|_| Error::InvalidBurst(trimmed.to_string()))?;
        if burst_time == 0 {
            return Err(Error::InvalidBurstValue(id));
        }
        let priority = match fields.get(2) {
            Some(raw) => Some(
                raw.parse::<u32>()
                    .map_err(|_| Error::InvalidPriority(trimmed.to_string()))?,
            ),
            None => None,
        };

        if !ids.insert(id.clone()) {
            return Err(Error::DuplicateProcessId(id));
        }
        processes.push(Process {
            id,
            arrival_time,
            burst_time,
            priority,
        });
    }

    Ok(processes)
}

/// Splits a comma-separated `--processes` value into entries.
pub fn split_entries(input: &str) -> Vec<String> {
    if input.trim().is_empty() {
        return Vec::new();
    }
    input.split(',').map(str::to_string).collect()
}
