pub mod core;
pub mod error;
pub mod scheduler;
pub mod sim;
pub mod transport;

pub use crate::core::{SchedCoreEvent, TimedEvent};
pub use error::{Error, ProtocolError, TransportError, ValidationError};
pub use scheduler::Scheduler;
pub use sim::{
    Algorithm, ProcessDescriptor, ProcessId, SimulationRequest, SimulationResult, simulate,
};
