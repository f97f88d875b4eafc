use log::debug;

use super::{
    Policy, ProcessBatch, Quantum, Schedule, SimulationRequest, SimulationResult, metrics,
};
use crate::{
    core::{SchedCore, TimedEvent},
    error::ValidationError,
    scheduler::{FcfsScheduler, PriorityScheduler, RoundRobinScheduler, Scheduler, SjfScheduler},
};

/// Runs `scheduler` over `batch` until every process has finished.
pub fn run_policy<S: Scheduler>(batch: &ProcessBatch, scheduler: S) -> Schedule {
    let name = scheduler.name();
    let core = SchedCore::new(batch, scheduler);
    let ctx = core.run_to_completion();
    debug!(
        "{name}: {} processes finished at t={} in {} segments",
        batch.len(),
        ctx.now,
        ctx.timeline.len()
    );
    Schedule::from_ctx(ctx)
}

pub fn fcfs(batch: &ProcessBatch) -> Schedule {
    run_policy(batch, FcfsScheduler::new())
}

pub fn sjf(batch: &ProcessBatch) -> Schedule {
    run_policy(batch, SjfScheduler::new())
}

pub fn priority(batch: &ProcessBatch) -> Schedule {
    run_policy(batch, PriorityScheduler::new())
}

pub fn round_robin(batch: &ProcessBatch, quantum: Quantum) -> Schedule {
    run_policy(batch, RoundRobinScheduler::new(quantum))
}

impl Policy {
    pub fn schedule(self, batch: &ProcessBatch) -> Schedule {
        match self {
            Self::Fcfs => fcfs(batch),
            Self::Sjf => sjf(batch),
            Self::Priority => priority(batch),
            Self::RoundRobin(quantum) => round_robin(batch, quantum),
        }
    }
}

/// Simulates an already validated batch and derives its metrics.
pub fn simulate_batch(batch: &ProcessBatch, policy: Policy) -> (SimulationResult, Vec<TimedEvent>) {
    let schedule = policy.schedule(batch);
    let metrics = metrics::aggregate(&schedule.completions);
    let result = SimulationResult {
        algorithm: policy.algorithm(),
        quantum: policy.quantum().map(Quantum::get),
        timeline: schedule.timeline,
        stats: metrics.stats,
        average_waiting_time: metrics.average_waiting_time,
        average_turnaround_time: metrics.average_turnaround_time,
        average_response_time: metrics.average_response_time,
    };
    (result, schedule.events)
}

pub fn simulate(request: &SimulationRequest) -> Result<SimulationResult, ValidationError> {
    simulate_traced(request).map(|(result, _)| result)
}

/// Like [`simulate`], also returning every scheduling event in order.
pub fn simulate_traced(
    request: &SimulationRequest,
) -> Result<(SimulationResult, Vec<TimedEvent>), ValidationError> {
    let (batch, policy) = request.validate()?;
    Ok(simulate_batch(&batch, policy))
}
