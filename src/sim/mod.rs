pub mod driver;
pub mod metrics;
pub mod process;
pub mod request;
pub mod result;
pub mod workload;

pub use driver::{
    fcfs, priority, round_robin, run_policy, simulate, simulate_batch, simulate_traced, sjf,
};
pub use metrics::Metrics;
pub use process::{ProcessBatch, ProcessDescriptor, ProcessId, Quantum};
pub use request::{Algorithm, Policy, SimulationRequest};
pub use result::{
    Completion, ProcessStats, Schedule, SimulationResult, TimelineSegment, coalesce,
};
pub use workload::{WorkloadConfig, bernoulli_jobs};
