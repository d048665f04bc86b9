use crate::algorithms::SchedulingPolicy;
use crate::arrivals::ArrivalQueue;
use crate::models::{Process, ScheduleOutput};
use crate::state::Recorder;

/// First-come-first-served: arrival order, no preemption.
pub fn fcfs(processes: &[Process]) -> ScheduleOutput {
    let mut recorder = Recorder::new(processes);
    let mut clock = 0u64;

    for index in ArrivalQueue::new(processes).into_order() {
        let process = &processes[index];
        let start = clock.max(process.arrival_time);
        clock = start + process.burst_time;
        recorder.dispatch(index, start, clock);
        recorder.complete(index, start, clock);
    }

    recorder.finish()
}

#[derive(Default)]
pub struct FcfsPolicy;

impl SchedulingPolicy for FcfsPolicy {
    fn name(&self) -> &'static str {
        "fcfs"
    }

    fn schedule(&self, processes: &[Process]) -> ScheduleOutput {
        fcfs(processes)
    }
}
