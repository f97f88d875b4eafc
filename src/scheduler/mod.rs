pub mod fifo;
pub mod priq;
pub mod rr;

use crate::core::{SimCtx, TaskId, Ticks};
pub use fifo::FcfsScheduler;
pub use priq::{
    HighestPriority, PriorityScheduler, PriqScheduler, RankKey, RankPolicy, ShortestJob,
    SjfScheduler,
};
pub use rr::RoundRobinScheduler;

/// Slice used by round robin when the caller does not name one.
pub const DEFAULT_QUANTUM: Ticks = 2;

/// Priority written on protocol lines for policies that ignore it.
pub const DEFAULT_PRIORITY: i64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueReason {
    Arrival,
    // Slice expired with work left
    Preempted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub task: TaskId,
    // Upper bound; the core clamps it to the task's remaining work
    pub slice: Ticks,
}

pub trait Scheduler {
    fn name(&self) -> &'static str;

    fn enqueue(&mut self, ctx: &SimCtx, task: TaskId, reason: EnqueueReason);

    /// Picks the next task to run, or `None` when nothing is ready.
    fn dispatch(&mut self, ctx: &SimCtx) -> Option<Dispatch>;
}
