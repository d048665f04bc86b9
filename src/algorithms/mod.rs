mod fcfs;
mod mlfq;
mod round_robin;
mod sjf;

use std::num::NonZeroU64;

use crate::error::{Error, Result};
use crate::models::{AlgoConfig, Process, ScheduleOutput, SimConfig};
use crate::state::LevelSegment;

pub use fcfs::{fcfs, FcfsPolicy};
pub use mlfq::{mlfq, mlfq_traced, MlfqPolicy, QueueLadder};
pub use round_robin::{round_robin, RoundRobinPolicy};
pub use sjf::{sjf, SjfPolicy};

/// A CPU-scheduling policy: a pure function from processes to a schedule.
pub trait SchedulingPolicy {
    fn name(&self) -> &'static str;

    fn schedule(&self, processes: &[Process]) -> ScheduleOutput;

    /// Like `schedule`, plus the queue level of every dispatch for policies
    /// that keep more than one ready queue.
    fn run(&self, processes: &[Process]) -> PolicyRun {
        PolicyRun {
            output: self.schedule(processes),
            queue_levels: Vec::new(),
        }
    }
}

pub struct PolicyRun {
    pub output: ScheduleOutput,
    pub queue_levels: Vec<LevelSegment>,
}

/// A validated time slice of at least one unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Quantum(NonZeroU64);

impl Quantum {
    pub fn new(value: u64) -> Result<Self> {
        NonZeroU64::new(value)
            .map(Self)
            .ok_or(Error::InvalidQuantum(value))
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }
}

pub fn build_policy(config: &SimConfig) -> Result<Box<dyn SchedulingPolicy>> {
    Ok(match config.algo {
        AlgoConfig::Fcfs => Box::new(FcfsPolicy),
        AlgoConfig::Sjf => Box::new(SjfPolicy),
        AlgoConfig::RoundRobin => Box::new(RoundRobinPolicy::new(Quantum::new(config.quantum)?)),
        AlgoConfig::Mlfq => Box::new(MlfqPolicy::new(QueueLadder::new(&config.quantums)?)),
    })
}
