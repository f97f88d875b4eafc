use crate::core::{TaskState, Ticks};
use crate::sim::ProcessId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedCoreEvent {
    TaskStateChange {
        task: ProcessId,
        from: TaskState,
        to: TaskState,
    },
    // Slice length is already clamped to the task's remaining work
    Dispatched {
        task: ProcessId,
        slice: Ticks,
    },
    // No runnable task until the next arrival
    CpuIdle {
        until: Ticks,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedEvent {
    pub at: Ticks,
    pub event: SchedCoreEvent,
}
