use super::{
    observer::Observer,
    state::{SimCtx, TaskId},
};
use crate::scheduler::{Dispatch, EnqueueReason, Scheduler};
use crate::sim::ProcessBatch;

pub struct SchedCore<S: Scheduler> {
    pub ctx: SimCtx,
    pub scheduler: S,
    observer: Observer,
}

impl<S: Scheduler> SchedCore<S> {
    pub fn new(batch: &ProcessBatch, scheduler: S) -> Self {
        Self {
            ctx: SimCtx::new(batch),
            scheduler,
            observer: Observer::new(),
        }
    }

    /// Advances the simulation by one dispatch or one idle period.
    /// Returns false once every task has finished.
    pub fn step(&mut self) -> bool {
        if self.ctx.all_finished() {
            return false;
        }

        self.admit_arrivals();

        match self.scheduler.dispatch(&self.ctx) {
            Some(dispatch) => self.run(dispatch),
            None => match self.ctx.next_arrival() {
                Some(at) => self.ctx.idle_until(at),
                None => {
                    debug_assert!(
                        false,
                        "{} left unfinished tasks unqueued",
                        self.scheduler.name()
                    );
                    return false;
                }
            },
        }

        self.observer.observe(&self.ctx);
        true
    }

    pub fn run_to_completion(mut self) -> SimCtx {
        while self.step() {}
        self.ctx
    }

    fn admit_arrivals(&mut self) {
        for task in self.ctx.admit_arrivals() {
            self.scheduler.enqueue(&self.ctx, task, EnqueueReason::Arrival);
        }
    }

    fn run(&mut self, dispatch: Dispatch) {
        let Dispatch { task, slice } = dispatch;
        self.ctx.set_running(task);
        self.ctx.run_slice(task, slice);

        // Tasks that arrived while `task` held the CPU queue ahead of it
        self.admit_arrivals();
        self.stop(task);
    }

    fn stop(&mut self, task: TaskId) {
        if self.ctx.task(task).remaining == 0 {
            self.ctx.mark_completed(task);
        } else {
            self.ctx.mark_ready(task);
            self.scheduler
                .enqueue(&self.ctx, task, EnqueueReason::Preempted);
        }
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}
