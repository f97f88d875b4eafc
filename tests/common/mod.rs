#![allow(dead_code)]

use rand::prelude::*;
use schedsim::sim::{ProcessDescriptor, SimulationResult};

pub fn fixture() -> Vec<ProcessDescriptor> {
    vec![
        ProcessDescriptor::new("P1", 0, 5).with_priority(2),
        ProcessDescriptor::new("P2", 2, 3).with_priority(1),
        ProcessDescriptor::new("P3", 4, 1).with_priority(3),
    ]
}

pub fn random_batch(rng: &mut StdRng, max_len: usize) -> Vec<ProcessDescriptor> {
    let n = rng.random_range(1..=max_len);
    (0..n)
        .map(|i| {
            ProcessDescriptor::new(
                format!("P{i}"),
                rng.random_range(0..30),
                rng.random_range(1..=8),
            )
            .with_priority(rng.random_range(0..4))
        })
        .collect()
}

/// Asserts every property a result must satisfy regardless of policy.
pub fn assert_well_formed(input: &[ProcessDescriptor], result: &SimulationResult) {
    assert_eq!(result.stats.len(), input.len());

    let mut clock = 0;
    for seg in &result.timeline {
        assert_eq!(seg.start, clock, "timeline gap or overlap: {:?}", result.timeline);
        assert!(seg.end > seg.start, "empty segment {seg:?}");
        clock = seg.end;
    }

    for p in input {
        let stats = result.stats_for(&p.id).expect("stats for every process");
        assert_eq!(stats.arrival_time, p.arrival_time);
        assert_eq!(stats.burst_time, p.burst_time);
        assert!(stats.completion_time >= p.arrival_time + p.burst_time);
        assert!(stats.waiting_time >= 0);
        assert!(stats.start_time >= p.arrival_time);
        assert_eq!(stats.turnaround_time, stats.completion_time - p.arrival_time);
        assert_eq!(stats.waiting_time, stats.turnaround_time - p.burst_time);

        let ran: i64 = result
            .timeline
            .iter()
            .filter(|s| s.process_id.as_ref() == Some(&p.id))
            .map(|s| s.duration())
            .sum();
        assert_eq!(ran, p.burst_time, "run time of {} differs from burst", p.id);

        let last_end = result
            .timeline
            .iter()
            .filter(|s| s.process_id.as_ref() == Some(&p.id))
            .map(|s| s.end)
            .max();
        assert_eq!(last_end, Some(stats.completion_time));
    }

    // CPU is only idle while nothing unfinished has arrived
    for idle in result.timeline.iter().filter(|s| s.is_idle()) {
        for stats in &result.stats {
            assert!(
                stats.arrival_time >= idle.end || stats.completion_time <= idle.start,
                "{} was runnable during idle {idle:?}",
                stats.process_id
            );
        }
    }

    let n = result.stats.len() as f64;
    let wait: f64 = result.stats.iter().map(|s| s.waiting_time as f64).sum::<f64>() / n;
    let tat: f64 = result.stats.iter().map(|s| s.turnaround_time as f64).sum::<f64>() / n;
    assert!((result.average_waiting_time - wait).abs() < 1e-9);
    assert!((result.average_turnaround_time - tat).abs() < 1e-9);
}
