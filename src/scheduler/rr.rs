use std::collections::VecDeque;

use super::{Dispatch, EnqueueReason, Scheduler};
use crate::core::{SimCtx, TaskId};
use crate::sim::Quantum;

/// Preemptive round robin over a single FIFO ready queue.
///
/// The core admits arrivals that happened during a slice before it hands the
/// preempted task back, so a newcomer always lands ahead of the task it
/// interrupted.
#[derive(Debug)]
pub struct RoundRobinScheduler {
    quantum: Quantum,
    ready: VecDeque<TaskId>,
}

impl RoundRobinScheduler {
    pub fn new(quantum: Quantum) -> Self {
        Self {
            quantum,
            ready: VecDeque::new(),
        }
    }
}

impl Scheduler for RoundRobinScheduler {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn enqueue(&mut self, _ctx: &SimCtx, task: TaskId, _reason: EnqueueReason) {
        self.ready.push_back(task);
    }

    fn dispatch(&mut self, _ctx: &SimCtx) -> Option<Dispatch> {
        let task = self.ready.pop_front()?;
        Some(Dispatch {
            task,
            slice: self.quantum.get(),
        })
    }
}
