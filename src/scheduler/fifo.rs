use std::collections::VecDeque;

use super::{Dispatch, EnqueueReason, Scheduler};
use crate::core::{SimCtx, TaskId};

/// First-come-first-served: arrival order, each task runs to completion.
#[derive(Debug, Default)]
pub struct FcfsScheduler {
    ready: VecDeque<TaskId>,
}

impl FcfsScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for FcfsScheduler {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn enqueue(&mut self, _ctx: &SimCtx, task: TaskId, reason: EnqueueReason) {
        debug_assert_eq!(reason, EnqueueReason::Arrival, "FCFS never preempts");
        self.ready.push_back(task);
    }

    fn dispatch(&mut self, ctx: &SimCtx) -> Option<Dispatch> {
        let task = self.ready.pop_front()?;
        Some(Dispatch {
            task,
            slice: ctx.task(task).remaining,
        })
    }
}
