use serde::Serialize;
use tracing::trace;

use crate::models::{Process, ProcessResult, ResultMetrics, ScheduleOutput, TimelineSegment};

/// Mutable bookkeeping for one process, owned by a single simulation call.
#[derive(Clone, Debug)]
pub(crate) struct ProcessState {
    pub remaining: u64,
    pub start_time: Option<u64>,
    pub level: usize,
    pub time_in_queue: u64,
    pub admitted: bool,
}

impl ProcessState {
    pub fn new(process: &Process) -> Self {
        Self {
            remaining: process.burst_time,
            start_time: None,
            level: 0,
            time_in_queue: 0,
            admitted: false,
        }
    }

    pub fn init_all(processes: &[Process]) -> Vec<Self> {
        processes.iter().map(Self::new).collect()
    }

    /// Records the first dispatch and returns it.
    pub fn mark_started(&mut self, clock: u64) -> u64 {
        *self.start_time.get_or_insert(clock)
    }
}

/// Collects the Gantt trace and finished results for one run.
pub(crate) struct Recorder<'a> {
    processes: &'a [Process],
    results: Vec<ProcessResult>,
    gantt_chart: Vec<TimelineSegment>,
}

impl<'a> Recorder<'a> {
    pub fn new(processes: &'a [Process]) -> Self {
        Self {
            processes,
            results: Vec::with_capacity(processes.len()),
            gantt_chart: Vec::with_capacity(processes.len()),
        }
    }

    pub fn dispatch(&mut self, index: usize, start: u64, end: u64) {
        debug_assert!(end > start, "segments must be non-empty");
        let process = &self.processes[index];
        trace!(process = %process.id, start, end, "dispatch");
        self.gantt_chart.push(TimelineSegment {
            process_id: process.id.clone(),
            start,
            end,
        });
    }

    pub fn complete(&mut self, index: usize, start_time: u64, completion_time: u64) {
        self.results.push(ProcessResult::new(
            &self.processes[index],
            start_time,
            completion_time,
        ));
    }

    pub fn finish(self) -> ScheduleOutput {
        let metrics = ResultMetrics::from_results(&self.results, self.gantt_chart);
        ScheduleOutput {
            results: self.results,
            metrics,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunMetadata {
    pub algorithm: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantum: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantums: Option<Vec<u64>>,
    pub processes: usize,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RunStats {
    pub makespan: u64,
    pub busy_time: u64,
    pub idle_time: u64,
    pub cpu_utilization_pct: f64,
    pub throughput: f64,
    pub context_switches: usize,
}

/// Queue level held by a process during one MLFQ dispatch.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LevelSegment {
    pub process_id: String,
    pub level: usize,
    pub start: u64,
    pub end: u64,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    #[serde(flatten)]
    pub output: ScheduleOutput,
    pub metadata: RunMetadata,
    pub stats: RunStats,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub queue_levels: Vec<LevelSegment>,
}
