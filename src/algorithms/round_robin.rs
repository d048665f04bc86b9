use std::collections::VecDeque;

use crate::algorithms::{Quantum, SchedulingPolicy};
use crate::arrivals::ArrivalQueue;
use crate::models::{Process, ScheduleOutput};
use crate::state::{ProcessState, Recorder};

/// Time-sliced round robin over a single FIFO ready queue.
///
/// Processes that arrive during a slice are enqueued before the preempted
/// process goes back to the tail.
pub fn round_robin(processes: &[Process], quantum: Quantum) -> ScheduleOutput {
    let mut recorder = Recorder::new(processes);
    let mut arrivals = ArrivalQueue::new(processes);
    let mut states = ProcessState::init_all(processes);
    let mut ready: VecDeque<usize> = VecDeque::with_capacity(processes.len());
    let mut clock = 0u64;

    loop {
        ready.extend(arrivals.admit_until(clock));

        let Some(index) = ready.pop_front() else {
            match arrivals.next_arrival() {
                Some(next) => {
                    clock = clock.max(next);
                    continue;
                }
                None => break,
            }
        };

        let state = &mut states[index];
        let start = clock;
        let first_dispatch = state.mark_started(start);
        let slice = state.remaining.min(quantum.get());
        clock += slice;
        state.remaining -= slice;
        recorder.dispatch(index, start, clock);

        ready.extend(arrivals.admit_until(clock));

        if state.remaining == 0 {
            recorder.complete(index, first_dispatch, clock);
        } else {
            ready.push_back(index);
        }
    }

    recorder.finish()
}

pub struct RoundRobinPolicy {
    quantum: Quantum,
}

impl RoundRobinPolicy {
    pub fn new(quantum: Quantum) -> Self {
        Self { quantum }
    }
}

impl SchedulingPolicy for RoundRobinPolicy {
    fn name(&self) -> &'static str {
        "round-robin"
    }

    fn schedule(&self, processes: &[Process]) -> ScheduleOutput {
        round_robin(processes, self.quantum)
    }
}
