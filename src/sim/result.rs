use serde::{Deserialize, Serialize};

use super::{Algorithm, ProcessId};
use crate::core::{SimCtx, TimedEvent, Ticks};

/// A stretch of CPU time; `process_id == None` marks the CPU idle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineSegment {
    pub process_id: Option<ProcessId>,
    pub start: Ticks,
    pub end: Ticks,
}

impl TimelineSegment {
    pub fn run(process_id: impl Into<ProcessId>, start: Ticks, end: Ticks) -> Self {
        Self {
            process_id: Some(process_id.into()),
            start,
            end,
        }
    }

    pub fn idle(start: Ticks, end: Ticks) -> Self {
        Self {
            process_id: None,
            start,
            end,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.process_id.is_none()
    }

    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }
}

/// Merges neighbouring segments that belong to the same process (or are both idle).
/// Useful for Gantt rendering, where one bar per uninterrupted run reads better.
pub fn coalesce(timeline: &[TimelineSegment]) -> Vec<TimelineSegment> {
    let mut merged: Vec<TimelineSegment> = Vec::with_capacity(timeline.len());
    for seg in timeline {
        match merged.last_mut() {
            Some(last) if last.process_id == seg.process_id && last.end == seg.start => {
                last.end = seg.end;
            }
            _ => merged.push(seg.clone()),
        }
    }
    merged
}

/// Raw per-process outcome of a policy run, before metrics are derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub process_id: ProcessId,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub start_time: Ticks,
    pub completion_time: Ticks,
}

/// Output of one policy: the timeline, one completion per input process
/// (input order), and the event trace that produced them.
#[derive(Debug, Clone)]
pub struct Schedule {
    pub timeline: Vec<TimelineSegment>,
    pub completions: Vec<Completion>,
    pub events: Vec<TimedEvent>,
}

impl Schedule {
    pub(crate) fn from_ctx(ctx: SimCtx) -> Self {
        let timeline = ctx
            .timeline
            .iter()
            .map(|slot| TimelineSegment {
                process_id: slot.task.map(|t| ctx.tasks[t].pid.clone()),
                start: slot.start,
                end: slot.end,
            })
            .collect();

        let completions = ctx
            .tasks
            .iter()
            .map(|task| Completion {
                process_id: task.pid.clone(),
                arrival_time: task.arrival_time,
                burst_time: task.burst_time,
                start_time: task
                    .first_run
                    .expect("Finished task must have been dispatched"),
                completion_time: task
                    .completion_time
                    .expect("Simulation ended with an unfinished task"),
            })
            .collect();

        Self {
            timeline,
            completions,
            events: ctx.events,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStats {
    pub process_id: ProcessId,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub start_time: Ticks,
    pub completion_time: Ticks,
    pub turnaround_time: Ticks,
    pub waiting_time: Ticks,
    pub response_time: Ticks,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub algorithm: Algorithm,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantum: Option<Ticks>,
    pub timeline: Vec<TimelineSegment>,
    pub stats: Vec<ProcessStats>,
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
    pub average_response_time: f64,
}

impl SimulationResult {
    pub fn stats_for(&self, id: &ProcessId) -> Option<&ProcessStats> {
        self.stats.iter().find(|s| &s.process_id == id)
    }
}
