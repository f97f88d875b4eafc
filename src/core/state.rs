use log::trace;

use super::event::{SchedCoreEvent, TimedEvent};
use crate::sim::{ProcessBatch, ProcessId};

// Index into the batch / task Vec
pub type TaskId = usize;
pub type Ticks = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    NotArrived,
    Ready,
    Running,
    Finished,
}

#[derive(Debug, Clone)]
pub struct Task {
    pub id: TaskId,
    pub pid: ProcessId,
    pub state: TaskState,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub priority: Option<i64>,
    pub remaining: Ticks,
    pub first_run: Option<Ticks>,
    pub completion_time: Option<Ticks>,
}

/// One contiguous stretch of the timeline; `task == None` is CPU idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub task: Option<TaskId>,
    pub start: Ticks,
    pub end: Ticks,
}

#[derive(Debug)]
pub struct SimCtx {
    pub now: Ticks,
    pub tasks: Vec<Task>,
    pub timeline: Vec<Slot>,
    pub events: Vec<TimedEvent>,
    arrival_order: Vec<TaskId>,

    // Position in `arrival_order` of the next task to admit
    arrival_cursor: usize,
}

impl SimCtx {
    pub fn new(batch: &ProcessBatch) -> Self {
        let tasks = batch
            .iter()
            .enumerate()
            .map(|(id, p)| Task {
                id,
                pid: p.id.clone(),
                state: TaskState::NotArrived,
                arrival_time: p.arrival_time,
                burst_time: p.burst_time,
                priority: p.priority,
                remaining: p.burst_time,
                first_run: None,
                completion_time: None,
            })
            .collect();

        Self {
            now: 0,
            tasks,
            timeline: Vec::new(),
            events: Vec::new(),
            arrival_order: batch.arrival_order(),
            arrival_cursor: 0,
        }
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    fn emit(&mut self, event: SchedCoreEvent) {
        trace!("t={} {:?}", self.now, event);
        self.events.push(TimedEvent { at: self.now, event });
    }

    fn transition(&mut self, task_id: TaskId, to: TaskState) -> TaskState {
        let task = &mut self.tasks[task_id];
        let from = task.state;
        task.state = to;
        let task = task.pid.clone();
        self.emit(SchedCoreEvent::TaskStateChange { task, from, to });
        from
    }

    /// Marks every task with `arrival_time <= now` that has not yet been
    /// admitted as Ready. Returned in arrival order.
    pub fn admit_arrivals(&mut self) -> Vec<TaskId> {
        let mut admitted = Vec::new();
        while let Some(&task_id) = self.arrival_order.get(self.arrival_cursor) {
            if self.tasks[task_id].arrival_time > self.now {
                break;
            }
            self.arrival_cursor += 1;
            let prev = self.transition(task_id, TaskState::Ready);
            debug_assert_eq!(prev, TaskState::NotArrived, "Task {task_id} admitted twice");
            admitted.push(task_id);
        }
        admitted
    }

    pub fn next_arrival(&self) -> Option<Ticks> {
        self.arrival_order
            .get(self.arrival_cursor)
            .map(|&task_id| self.tasks[task_id].arrival_time)
    }

    pub fn idle_until(&mut self, until: Ticks) {
        debug_assert!(until > self.now, "Idle period must move the clock forward");
        self.emit(SchedCoreEvent::CpuIdle { until });
        self.timeline.push(Slot {
            task: None,
            start: self.now,
            end: until,
        });
        self.now = until;
    }

    // Return previous state (always Ready for a task that came off a queue)
    pub fn set_running(&mut self, task_id: TaskId) -> TaskState {
        debug_assert!(
            self.tasks.iter().all(|t| t.state != TaskState::Running),
            "CPU already running a task"
        );
        let prev = self.transition(task_id, TaskState::Running);
        let task = &mut self.tasks[task_id];
        task.first_run.get_or_insert(self.now);
        prev
    }

    /// Runs the current task for up to `slice` ticks and returns the ticks consumed.
    pub fn run_slice(&mut self, task_id: TaskId, slice: Ticks) -> Ticks {
        let task = &self.tasks[task_id];
        debug_assert_eq!(task.state, TaskState::Running, "Task {task_id} must be running");
        let ran = slice.min(task.remaining);
        debug_assert!(ran > 0, "Task {task_id} dispatched with nothing to run");

        let pid = task.pid.clone();
        self.emit(SchedCoreEvent::Dispatched { task: pid, slice: ran });
        self.timeline.push(Slot {
            task: Some(task_id),
            start: self.now,
            end: self.now + ran,
        });
        self.tasks[task_id].remaining -= ran;
        self.advance_time(ran);
        ran
    }

    pub fn mark_ready(&mut self, task_id: TaskId) {
        debug_assert!(
            self.tasks[task_id].remaining > 0,
            "Task {task_id} has no work left to queue for"
        );
        self.transition(task_id, TaskState::Ready);
    }

    pub fn mark_completed(&mut self, task_id: TaskId) {
        debug_assert_eq!(
            self.tasks[task_id].remaining, 0,
            "Task {task_id} completed with work left"
        );
        let prev = self.transition(task_id, TaskState::Finished);
        debug_assert_eq!(
            prev,
            TaskState::Running,
            "Task {task_id} must have been running before marked complete"
        );
        self.tasks[task_id].completion_time = Some(self.now);
    }

    pub fn task(&self, task_id: TaskId) -> &Task {
        &self.tasks[task_id]
    }

    pub fn all_finished(&self) -> bool {
        self.tasks.iter().all(|t| t.state == TaskState::Finished)
    }
}
