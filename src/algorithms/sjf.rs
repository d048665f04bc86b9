use crate::algorithms::SchedulingPolicy;
use crate::arrivals::ArrivalQueue;
use crate::models::{Process, ScheduleOutput};
use crate::state::Recorder;

/// Non-preemptive shortest-job-first.
///
/// At each decision point the arrived process with the smallest burst runs
/// to completion. Ties go to the earlier arrival, then to the earlier input
/// position.
pub fn sjf(processes: &[Process]) -> ScheduleOutput {
    let mut recorder = Recorder::new(processes);
    let mut arrivals = ArrivalQueue::new(processes);
    let mut ready: Vec<usize> = Vec::with_capacity(processes.len());
    let mut clock = 0u64;

    loop {
        ready.extend(arrivals.admit_until(clock));

        let Some(pos) = shortest(processes, &ready) else {
            match arrivals.next_arrival() {
                Some(next) => {
                    clock = clock.max(next);
                    continue;
                }
                None => break,
            }
        };

        let index = ready.swap_remove(pos);
        let start = clock;
        clock += processes[index].burst_time;
        recorder.dispatch(index, start, clock);
        recorder.complete(index, start, clock);
    }

    recorder.finish()
}

fn shortest(processes: &[Process], ready: &[usize]) -> Option<usize> {
    ready
        .iter()
        .enumerate()
        .min_by_key(|&(_, &index)| {
            let process = &processes[index];
            (process.burst_time, process.arrival_time, index)
        })
        .map(|(pos, _)| pos)
}

#[derive(Default)]
pub struct SjfPolicy;

impl SchedulingPolicy for SjfPolicy {
    fn name(&self) -> &'static str {
        "sjf"
    }

    fn schedule(&self, processes: &[Process]) -> ScheduleOutput {
        sjf(processes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(output: &ScheduleOutput) -> Vec<(&str, u64, u64)> {
        output
            .metrics
            .gantt_chart
            .iter()
            .map(|s| (s.process_id.as_str(), s.start, s.end))
            .collect()
    }

    #[test]
    fn picks_shortest_arrived_job() {
        let processes = vec![
            Process::new("P1", 0, 5),
            Process::new("P2", 1, 3),
            Process::new("P3", 2, 8),
        ];
        let output = sjf(&processes);
        assert_eq!(
            order(&output),
            vec![("P1", 0, 5), ("P2", 5, 8), ("P3", 8, 16)]
        );
    }

    #[test]
    fn does_not_preempt_running_job() {
        let processes = vec![Process::new("long", 0, 10), Process::new("short", 1, 1)];
        let output = sjf(&processes);
        assert_eq!(order(&output), vec![("long", 0, 10), ("short", 10, 11)]);
    }

    #[test]
    fn ties_prefer_earlier_arrival_then_input_order() {
        let processes = vec![
            Process::new("blocker", 0, 4),
            Process::new("late", 3, 2),
            Process::new("early", 1, 2),
            Process::new("twin", 1, 2),
        ];
        let output = sjf(&processes);
        let ids: Vec<&str> = output.results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["blocker", "early", "twin", "late"]);
    }

    #[test]
    fn jumps_to_next_arrival_when_idle() {
        let processes = vec![Process::new("a", 4, 2), Process::new("b", 20, 1)];
        let output = sjf(&processes);
        assert_eq!(order(&output), vec![("a", 4, 6), ("b", 20, 21)]);
    }
}
