use average::{Estimate, Mean};

use super::{Completion, ProcessStats};

/// Per-process statistics plus their unweighted means.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub stats: Vec<ProcessStats>,
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
    pub average_response_time: f64,
}

pub fn process_stats(c: &Completion) -> ProcessStats {
    let turnaround_time = c.completion_time - c.arrival_time;
    ProcessStats {
        process_id: c.process_id.clone(),
        arrival_time: c.arrival_time,
        burst_time: c.burst_time,
        start_time: c.start_time,
        completion_time: c.completion_time,
        turnaround_time,
        waiting_time: turnaround_time - c.burst_time,
        response_time: c.start_time - c.arrival_time,
    }
}

/// Derives metrics from any policy's completions. Callers never pass an
/// empty slice, since batch validation rejects empty input.
pub fn aggregate(completions: &[Completion]) -> Metrics {
    let stats: Vec<ProcessStats> = completions.iter().map(process_stats).collect();
    debug_assert!(!stats.is_empty(), "Metrics over an empty batch");

    let average_waiting_time = avg(stats.iter().map(|s| s.waiting_time as f64));
    let average_turnaround_time = avg(stats.iter().map(|s| s.turnaround_time as f64));
    let average_response_time = avg(stats.iter().map(|s| s.response_time as f64));

    Metrics {
        stats,
        average_waiting_time,
        average_turnaround_time,
        average_response_time,
    }
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<Mean>().estimate()
}
