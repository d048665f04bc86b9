use crate::error::Result;
use crate::state::SimulationReport;

pub trait Formatter {
    fn write(&self, report: &SimulationReport) -> Result<String>;
}

pub struct HumanFormatter;
pub struct SummaryFormatter;
pub struct JsonFormatter;

impl Formatter for HumanFormatter {
    fn write(&self, report: &SimulationReport) -> Result<String> {
        let mut out = String::new();
        write_metadata(&mut out, report);

        out.push_str("Timeline:\n");
        if report.queue_levels.is_empty() {
            for segment in &report.output.metrics.gantt_chart {
                out.push_str(&format!(
                    "{} [{}-{}]\n",
                    segment.process_id, segment.start, segment.end
                ));
            }
        } else {
            for segment in &report.queue_levels {
                out.push_str(&format!(
                    "{} [{}-{}] (queue {})\n",
                    segment.process_id, segment.start, segment.end, segment.level
                ));
            }
        }

        out.push_str("Results:\n");
        for result in &report.output.results {
            out.push_str(&format!(
                "{}: arrival {}, burst {}, start {}, completion {}, turnaround {}, waiting {}\n",
                result.id,
                result.arrival_time,
                result.burst_time,
                result.start_time,
                result.completion_time,
                result.turnaround_time,
                result.waiting_time
            ));
        }

        write_summary(&mut out, report);
        Ok(out)
    }
}

impl Formatter for SummaryFormatter {
    fn write(&self, report: &SimulationReport) -> Result<String> {
        let mut out = String::new();
        write_metadata(&mut out, report);
        write_summary(&mut out, report);
        Ok(out)
    }
}

impl Formatter for JsonFormatter {
    fn write(&self, report: &SimulationReport) -> Result<String> {
        let mut out = serde_json::to_string_pretty(report)?;
        out.push('\n');
        Ok(out)
    }
}

fn write_metadata(out: &mut String, report: &SimulationReport) {
    let metadata = &report.metadata;
    out.push_str("Metadata:\n");
    out.push_str(&format!("algorithm: {}\n", metadata.algorithm));
    if let Some(quantum) = metadata.quantum {
        out.push_str(&format!("quantum: {}\n", quantum));
    }
    if let Some(quantums) = &metadata.quantums {
        let joined = quantums
            .iter()
            .map(|q| q.to_string())
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&format!("quantums: {}\n", joined));
    }
    out.push_str(&format!("processes: {}\n", metadata.processes));
}

fn write_summary(out: &mut String, report: &SimulationReport) {
    let metrics = &report.output.metrics;
    let stats = &report.stats;
    out.push_str("Summary:\n");
    out.push_str(&format!(
        "average waiting time: {:.2}\n",
        metrics.average_waiting_time
    ));
    out.push_str(&format!(
        "average turnaround time: {:.2}\n",
        metrics.average_turnaround_time
    ));
    out.push_str(&format!("makespan: {}\n", stats.makespan));
    out.push_str(&format!("idle time: {}\n", stats.idle_time));
    out.push_str(&format!(
        "cpu utilization: {:.2}%\n",
        stats.cpu_utilization_pct
    ));
    out.push_str(&format!("context switches: {}\n", stats.context_switches));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::run_simulation;
    use crate::models::{AlgoConfig, Process, ProcessProfile, SimConfig};

    fn report(algo: AlgoConfig, processes: Vec<Process>) -> SimulationReport {
        let config = SimConfig {
            algo,
            quantum: 2,
            quantums: vec![2, 4],
            processes: ProcessProfile::Explicit(processes),
            seed: None,
        };
        run_simulation(&config).expect("simulation should succeed")
    }

    #[test]
    fn summary_lists_averages_and_stats() {
        let report = report(
            AlgoConfig::Fcfs,
            vec![
                Process::new("P1", 0, 5),
                Process::new("P2", 1, 3),
                Process::new("P3", 2, 8),
            ],
        );
        let expected = concat!(
            "Metadata:\n",
            "algorithm: fcfs\n",
            "processes: 3\n",
            "Summary:\n",
            "average waiting time: 3.33\n",
            "average turnaround time: 8.67\n",
            "makespan: 16\n",
            "idle time: 0\n",
            "cpu utilization: 100.00%\n",
            "context switches: 2\n",
        );
        assert_eq!(SummaryFormatter.write(&report).unwrap(), expected);
    }

    #[test]
    fn human_output_marks_mlfq_queue_levels() {
        let report = report(
            AlgoConfig::Mlfq,
            vec![Process::new("P1", 0, 5).with_priority(0)],
        );
        let out = HumanFormatter.write(&report).unwrap();
        assert!(out.contains("quantums: 2,4\n"));
        assert!(out.contains("P1 [0-2] (queue 0)\nP1 [2-5] (queue 1)\n"));
        assert!(out.contains(
            "P1: arrival 0, burst 5, start 0, completion 5, turnaround 5, waiting 0\n"
        ));
    }

    #[test]
    fn json_output_keeps_display_layer_shape() {
        let report = report(AlgoConfig::RoundRobin, vec![Process::new("P1", 0, 3)]);
        let out = JsonFormatter.write(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["metadata"]["quantum"], 2);
        assert_eq!(value["results"][0]["waitingTime"], 0);
        assert_eq!(value["metrics"]["ganttChart"][1]["start"], 2);
        assert_eq!(value["metrics"]["averageTurnaroundTime"], 3.0);
        assert_eq!(value["stats"]["makespan"], 3);
        assert!(value.get("queueLevels").is_none());
    }
}
