use super::state::{SimCtx, TaskState};

#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, ctx: &SimCtx) {
        self.step += 1;

        for task in &ctx.tasks {
            debug_assert_ne!(
                task.state,
                TaskState::Running,
                "Task {} still running between steps",
                task.pid
            );
            match task.state {
                TaskState::Finished => {
                    debug_assert_eq!(task.remaining, 0, "Finished task {} has work left", task.pid);
                    debug_assert!(
                        task.completion_time.is_some(),
                        "Finished task {} missing completion time",
                        task.pid
                    );
                }
                TaskState::Ready => debug_assert!(
                    task.arrival_time <= ctx.now && task.remaining > 0,
                    "Ready task {} not eligible",
                    task.pid
                ),
                TaskState::NotArrived => debug_assert!(
                    task.first_run.is_none(),
                    "Task {} ran before arriving",
                    task.pid
                ),
                TaskState::Running => {}
            }
        }

        let mut expected_start = 0;
        for slot in &ctx.timeline {
            debug_assert_eq!(
                slot.start, expected_start,
                "Timeline gap or overlap at step {}",
                self.step
            );
            debug_assert!(slot.end > slot.start, "Empty timeline slot at {}", slot.start);
            expected_start = slot.end;
        }
        debug_assert_eq!(expected_start, ctx.now, "Timeline does not reach the clock");
    }
}
