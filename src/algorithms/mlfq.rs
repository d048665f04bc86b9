use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::algorithms::{PolicyRun, Quantum, SchedulingPolicy};
use crate::arrivals::ArrivalQueue;
use crate::error::{Error, Result};
use crate::models::{Process, ScheduleOutput};
use crate::state::{LevelSegment, ProcessState, Recorder};

/// Per-level quantums of the MLFQ ready queues; level 0 has the highest
/// priority. Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueueLadder {
    quantums: Vec<Quantum>,
}

impl QueueLadder {
    pub fn new(quantums: &[u64]) -> Result<Self> {
        if quantums.is_empty() {
            return Err(Error::EmptyQuantums);
        }
        let quantums = quantums
            .iter()
            .enumerate()
            .map(|(level, &value)| {
                Quantum::new(value).map_err(|_| Error::InvalidQueueQuantum { level, value })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { quantums })
    }

    pub fn levels(&self) -> usize {
        self.quantums.len()
    }

    pub fn quantum(&self, level: usize) -> u64 {
        self.quantums[level].get()
    }

    /// Queue a newly arrived process enters; priorities past the bottom clamp.
    pub fn entry_level(&self, priority: Option<u32>) -> usize {
        (priority.unwrap_or(0) as usize).min(self.lowest())
    }

    pub fn lowest(&self) -> usize {
        self.quantums.len() - 1
    }

    fn demote(&self, level: usize) -> usize {
        (level + 1).min(self.lowest())
    }
}

struct Mlfq<'a> {
    processes: &'a [Process],
    ladder: &'a QueueLadder,
    states: Vec<ProcessState>,
    queues: Vec<VecDeque<usize>>,
    arrivals: ArrivalQueue,
    recorder: Recorder<'a>,
    levels: Vec<LevelSegment>,
    clock: u64,
}

impl<'a> Mlfq<'a> {
    fn new(processes: &'a [Process], ladder: &'a QueueLadder) -> Self {
        Self {
            processes,
            ladder,
            states: ProcessState::init_all(processes),
            queues: vec![VecDeque::new(); ladder.levels()],
            arrivals: ArrivalQueue::new(processes),
            recorder: Recorder::new(processes),
            levels: Vec::new(),
            clock: 0,
        }
    }

    fn admit_arrivals(&mut self) {
        let arrived: Vec<usize> = self.arrivals.admit_until(self.clock).collect();
        for index in arrived {
            self.admit(index);
        }
    }

    /// Places a process in its entry queue. Returns false, leaving the queues
    /// untouched, if the process was admitted before.
    fn admit(&mut self, index: usize) -> bool {
        let state = &mut self.states[index];
        if state.admitted {
            warn!(process = %self.processes[index].id, "process already admitted");
            return false;
        }
        let level = self.ladder.entry_level(self.processes[index].priority);
        state.admitted = true;
        state.level = level;
        state.time_in_queue = 0;
        self.queues[level].push_back(index);
        true
    }

    fn next_ready(&mut self) -> Option<(usize, usize)> {
        self.queues
            .iter_mut()
            .enumerate()
            .find_map(|(level, queue)| queue.pop_front().map(|index| (level, index)))
    }

    fn run(mut self) -> (ScheduleOutput, Vec<LevelSegment>) {
        loop {
            self.admit_arrivals();

            let Some((level, index)) = self.next_ready() else {
                match self.arrivals.next_arrival() {
                    Some(next) => {
                        self.clock = self.clock.max(next);
                        continue;
                    }
                    None => break,
                }
            };

            self.dispatch(level, index);
        }

        (self.recorder.finish(), self.levels)
    }

    fn dispatch(&mut self, level: usize, index: usize) {
        let quantum = self.ladder.quantum(level);
        let start = self.clock;

        let state = &mut self.states[index];
        debug_assert_eq!(state.level, level);
        debug_assert!(state.time_in_queue < quantum);
        let first_dispatch = state.mark_started(start);
        let mut exec = state
            .remaining
            .min(quantum.saturating_sub(state.time_in_queue));
        if exec == 0 && state.remaining > 0 {
            exec = 1;
        }
        state.remaining -= exec;
        let finished = state.remaining == 0;
        let mut next_level = level;
        if !finished {
            state.time_in_queue += exec;
            if state.time_in_queue >= quantum {
                state.time_in_queue = 0;
                next_level = self.ladder.demote(level);
                state.level = next_level;
            }
        }

        self.clock += exec;
        self.recorder.dispatch(index, start, self.clock);
        self.levels.push(LevelSegment {
            process_id: self.processes[index].id.clone(),
            level,
            start,
            end: self.clock,
        });

        self.admit_arrivals();

        if finished {
            self.recorder.complete(index, first_dispatch, self.clock);
            return;
        }
        if next_level != level {
            debug!(
                process = %self.processes[index].id,
                from = level,
                to = next_level,
                "demoted"
            );
        }
        self.queues[next_level].push_back(index);
    }
}

/// Preemptive multi-level feedback queue scheduling.
pub fn mlfq(processes: &[Process], ladder: &QueueLadder) -> ScheduleOutput {
    Mlfq::new(processes, ladder).run().0
}

/// Same schedule as [`mlfq`], plus the queue level of every dispatch.
pub fn mlfq_traced(
    processes: &[Process],
    ladder: &QueueLadder,
) -> (ScheduleOutput, Vec<LevelSegment>) {
    Mlfq::new(processes, ladder).run()
}

pub struct MlfqPolicy {
    ladder: QueueLadder,
}

impl MlfqPolicy {
    pub fn new(ladder: QueueLadder) -> Self {
        Self { ladder }
    }
}

impl SchedulingPolicy for MlfqPolicy {
    fn name(&self) -> &'static str {
        "mlfq"
    }

    fn schedule(&self, processes: &[Process]) -> ScheduleOutput {
        mlfq(processes, &self.ladder)
    }

    fn run(&self, processes: &[Process]) -> PolicyRun {
        let (output, queue_levels) = mlfq_traced(processes, &self.ladder);
        PolicyRun {
            output,
            queue_levels,
        }
    }
}
