pub mod driver;
pub mod event;
pub mod observer;
pub mod state;

pub use driver::SchedCore;
pub use event::{SchedCoreEvent, TimedEvent};
pub use state::{SimCtx, Slot, Task, TaskId, TaskState, Ticks};
