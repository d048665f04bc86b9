use serde::{Deserialize, Serialize};
use std::fmt;

/// A CPU-bound process descriptor supplied by the caller.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    pub id: String,
    pub arrival_time: u64,
    pub burst_time: u64,
    /// Only consulted by MLFQ; `None` enters the highest-priority queue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
}

impl Process {
    pub fn new(id: impl Into<String>, arrival_time: u64, burst_time: u64) -> Self {
        Self {
            id: id.into(),
            arrival_time,
            burst_time,
            priority: None,
        }
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = Some(priority);
        self
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResult {
    pub id: String,
    pub arrival_time: u64,
    pub burst_time: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    pub start_time: u64,
    pub completion_time: u64,
    pub turnaround_time: u64,
    pub waiting_time: u64,
}

impl ProcessResult {
    pub(crate) fn new(process: &Process, start_time: u64, completion_time: u64) -> Self {
        debug_assert!(completion_time >= process.arrival_time + process.burst_time);
        let turnaround_time = completion_time - process.arrival_time;
        Self {
            id: process.id.clone(),
            arrival_time: process.arrival_time,
            burst_time: process.burst_time,
            priority: process.priority,
            start_time,
            completion_time,
            turnaround_time,
            waiting_time: turnaround_time - process.burst_time,
        }
    }
}

/// One uninterrupted dispatch of a process on the CPU.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimelineSegment {
    pub process_id: String,
    pub start: u64,
    pub end: u64,
}

impl TimelineSegment {
    pub fn duration(&self) -> u64 {
        self.end - self.start
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResultMetrics {
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
    pub gantt_chart: Vec<TimelineSegment>,
}

impl ResultMetrics {
    pub fn from_results(results: &[ProcessResult], gantt_chart: Vec<TimelineSegment>) -> Self {
        let (average_waiting_time, average_turnaround_time) = if results.is_empty() {
            (0.0, 0.0)
        } else {
            let count = results.len() as f64;
            let waiting = results.iter().map(|r| r.waiting_time).sum::<u64>() as f64;
            let turnaround = results.iter().map(|r| r.turnaround_time).sum::<u64>() as f64;
            (waiting / count, turnaround / count)
        };

        Self {
            average_waiting_time,
            average_turnaround_time,
            gantt_chart,
        }
    }
}

/// The `{ results, metrics }` pair every policy returns.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ScheduleOutput {
    pub results: Vec<ProcessResult>,
    pub metrics: ResultMetrics,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SimConfig {
    pub algo: AlgoConfig,
    #[serde(default = "default_quantum")]
    pub quantum: u64,
    #[serde(default)]
    pub quantums: Vec<u64>,
    pub processes: ProcessProfile,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ProcessProfile {
    Explicit(Vec<Process>),
    Random {
        count: usize,
        max_arrival: u64,
        max_burst: u64,
        #[serde(default)]
        max_priority: Option<u32>,
    },
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AlgoConfig {
    Fcfs,
    Sjf,
    RoundRobin,
    Mlfq,
}

impl AlgoConfig {
    pub const ALL: [AlgoConfig; 4] = [
        AlgoConfig::Fcfs,
        AlgoConfig::Sjf,
        AlgoConfig::RoundRobin,
        AlgoConfig::Mlfq,
    ];
}

impl fmt::Display for AlgoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AlgoConfig::Fcfs => "fcfs",
            AlgoConfig::Sjf => "sjf",
            AlgoConfig::RoundRobin => "round-robin",
            AlgoConfig::Mlfq => "mlfq",
        };
        f.write_str(label)
    }
}

pub fn default_quantum() -> u64 {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_are_zero_for_empty_results() {
        let metrics = ResultMetrics::from_results(&[], Vec::new());
        assert_eq!(metrics.average_waiting_time, 0.0);
        assert_eq!(metrics.average_turnaround_time, 0.0);
        assert!(metrics.gantt_chart.is_empty());
    }

    #[test]
    fn process_result_derives_turnaround_and_waiting() {
        let process = Process::new("P2", 1, 3);
        let result = ProcessResult::new(&process, 5, 8);
        assert_eq!(result.turnaround_time, 7);
        assert_eq!(result.waiting_time, 4);
    }

    #[test]
    fn output_uses_display_layer_field_names() {
        let process = Process::new("P1", 0, 2);
        let results = vec![ProcessResult::new(&process, 0, 2)];
        let gantt = vec![TimelineSegment {
            process_id: "P1".to_string(),
            start: 0,
            end: 2,
        }];
        let output = ScheduleOutput {
            metrics: ResultMetrics::from_results(&results, gantt),
            results,
        };
        let json = serde_json::to_value(&output).expect("output should serialize");

        assert_eq!(json["metrics"]["averageWaitingTime"], 0.0);
        assert_eq!(json["metrics"]["averageTurnaroundTime"], 2.0);
        assert_eq!(json["metrics"]["ganttChart"][0]["processId"], "P1");
        assert_eq!(json["results"][0]["completionTime"], 2);
        assert!(json["results"][0].get("priority").is_none());
    }

    #[test]
    fn process_accepts_camel_case_keys() {
        let process: Process =
            serde_json::from_str(r#"{"id":"P1","arrivalTime":3,"burstTime":4,"priority":1}"#)
                .expect("process should parse");
        assert_eq!(process, Process::new("P1", 3, 4).with_priority(1));
    }

    #[test]
    fn algo_labels_are_kebab_case() {
        let labels: Vec<String> = AlgoConfig::ALL.iter().map(|a| a.to_string()).collect();
        assert_eq!(labels, vec!["fcfs", "sjf", "round-robin", "mlfq"]);
    }
}
