use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::models::Process;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Arrival {
    pub time: u64,
    pub index: usize,
}

impl Ord for Arrival {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .cmp(&other.time)
            .then_with(|| self.index.cmp(&other.index))
    }
}

impl PartialOrd for Arrival {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Processes that have not reached the ready queue yet, ordered by arrival
/// time and then by input position.
#[derive(Debug)]
pub(crate) struct ArrivalQueue {
    pending: VecDeque<Arrival>,
}

impl ArrivalQueue {
    pub fn new(processes: &[Process]) -> Self {
        let mut pending: Vec<Arrival> = processes
            .iter()
            .enumerate()
            .map(|(index, process)| Arrival {
                time: process.arrival_time,
                index,
            })
            .collect();
        pending.sort_unstable();

        Self {
            pending: pending.into(),
        }
    }

    pub fn next_arrival(&self) -> Option<u64> {
        self.pending.front().map(|arrival| arrival.time)
    }

    /// Pops every process whose arrival time is at or before `clock`.
    pub fn admit_until(&mut self, clock: u64) -> impl Iterator<Item = usize> + '_ {
        std::iter::from_fn(move || {
            if self.next_arrival()? > clock {
                return None;
            }
            self.pending.pop_front().map(|arrival| arrival.index)
        })
    }

    pub fn into_order(self) -> impl Iterator<Item = usize> {
        self.pending.into_iter().map(|arrival| arrival.index)
    }
}
