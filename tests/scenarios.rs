mod common;

use schedsim::{
    Algorithm, SimulationRequest, SimulationResult, ValidationError, simulate,
    sim::{ProcessBatch, ProcessDescriptor, Quantum, TimelineSegment, fcfs, priority, round_robin},
};

fn run(
    processes: Vec<ProcessDescriptor>,
    algorithm: Algorithm,
    quantum: Option<i64>,
) -> SimulationResult {
    let mut request = SimulationRequest::new(processes, algorithm);
    request.quantum = quantum;
    let result = simulate(&request).unwrap();
    common::assert_well_formed(&request.processes, &result);
    result
}

#[test]
fn fcfs_default_fixture() {
    let result = run(common::fixture(), Algorithm::Fcfs, None);
    assert_eq!(
        result.timeline,
        vec![
            TimelineSegment::run("P1", 0, 5),
            TimelineSegment::run("P2", 5, 8),
            TimelineSegment::run("P3", 8, 9),
        ]
    );
    let p2 = result.stats_for(&"P2".into()).unwrap();
    assert_eq!((p2.completion_time, p2.waiting_time, p2.turnaround_time), (8, 3, 6));
    let p3 = result.stats_for(&"P3".into()).unwrap();
    assert_eq!((p3.completion_time, p3.waiting_time, p3.turnaround_time), (9, 4, 5));
    assert!((result.average_waiting_time - 2.333_333_333).abs() < 1e-6);
    assert!((result.average_turnaround_time - 5.333_333_333).abs() < 1e-6);
}

#[test]
fn priority_default_fixture() {
    let result = run(common::fixture(), Algorithm::Priority, None);
    assert_eq!(result.timeline, run(common::fixture(), Algorithm::Fcfs, None).timeline);
}

#[test]
fn priority_prefers_lower_number() {
    let processes = vec![
        ProcessDescriptor::new("A", 0, 2).with_priority(5),
        ProcessDescriptor::new("B", 1, 2).with_priority(3),
        ProcessDescriptor::new("C", 1, 2).with_priority(1),
    ];
    let result = run(processes, Algorithm::Priority, None);
    let order: Vec<_> = result
        .timeline
        .iter()
        .map(|s| s.process_id.as_ref().unwrap().to_string())
        .collect();
    assert_eq!(order, vec!["A", "C", "B"]);
}

#[test]
fn priority_missing_value_runs_after_every_supplied_one() {
    let batch = ProcessBatch::new(vec![
        ProcessDescriptor::new("X", 0, 2).with_priority(0),
        ProcessDescriptor::new("M", 1, 1),
        ProcessDescriptor::new("N", 2, 1).with_priority(i64::MAX),
    ])
    .unwrap();
    let schedule = priority(&batch);
    let order: Vec<_> = schedule
        .timeline
        .iter()
        .map(|s| s.process_id.as_ref().unwrap().to_string())
        .collect();
    assert_eq!(order, vec!["X", "N", "M"]);
}

#[test]
fn rr_default_fixture() {
    let result = run(common::fixture(), Algorithm::RoundRobin, Some(2));
    assert_eq!(
        result.timeline,
        vec![
            TimelineSegment::run("P1", 0, 2),
            TimelineSegment::run("P2", 2, 4),
            TimelineSegment::run("P1", 4, 6),
            TimelineSegment::run("P3", 6, 7),
            TimelineSegment::run("P2", 7, 8),
            TimelineSegment::run("P1", 8, 9),
        ]
    );
}

#[test]
fn rr_quantum_one_interleaves_in_arrival_order() {
    let processes = vec![ProcessDescriptor::new("A", 0, 1), ProcessDescriptor::new("B", 0, 1)];
    let result = run(processes, Algorithm::RoundRobin, Some(1));
    assert_eq!(
        result.timeline,
        vec![TimelineSegment::run("A", 0, 1), TimelineSegment::run("B", 1, 2)]
    );

    let processes = vec![ProcessDescriptor::new("A", 0, 2), ProcessDescriptor::new("B", 0, 2)];
    let result = run(processes, Algorithm::RoundRobin, Some(1));
    let order: Vec<_> = result
        .timeline
        .iter()
        .map(|s| s.process_id.as_ref().unwrap().to_string())
        .collect();
    assert_eq!(order, vec!["A", "B", "A", "B"]);
}

#[test]
fn rr_arrival_during_slice_queues_before_preempted() {
    // C arrives while A runs; it must go ahead of A but behind B
    let processes = vec![
        ProcessDescriptor::new("A", 0, 4),
        ProcessDescriptor::new("B", 0, 2),
        ProcessDescriptor::new("C", 1, 1),
    ];
    let result = run(processes, Algorithm::RoundRobin, Some(2));
    assert_eq!(
        result.timeline,
        vec![
            TimelineSegment::run("A", 0, 2),
            TimelineSegment::run("B", 2, 4),
            TimelineSegment::run("C", 4, 5),
            TimelineSegment::run("A", 5, 7),
        ]
    );
}

#[test]
fn rr_idles_between_bursts() {
    let processes = vec![ProcessDescriptor::new("A", 1, 3), ProcessDescriptor::new("B", 10, 2)];
    let result = run(processes, Algorithm::RoundRobin, Some(2));
    assert_eq!(
        result.timeline,
        vec![
            TimelineSegment::idle(0, 1),
            TimelineSegment::run("A", 1, 3),
            TimelineSegment::run("A", 3, 4),
            TimelineSegment::idle(4, 10),
            TimelineSegment::run("B", 10, 12),
        ]
    );
}

#[test]
fn sjf_ties_break_on_arrival_then_id() {
    let processes = vec![
        ProcessDescriptor::new("L", 0, 5),
        ProcessDescriptor::new("Y", 2, 3),
        ProcessDescriptor::new("X", 2, 3),
        ProcessDescriptor::new("W", 3, 3),
    ];
    let result = run(processes, Algorithm::Sjf, None);
    let order: Vec<_> = result
        .timeline
        .iter()
        .map(|s| s.process_id.as_ref().unwrap().to_string())
        .collect();
    assert_eq!(order, vec!["L", "X", "Y", "W"]);
}

#[test]
fn fcfs_is_stable_on_equal_arrivals() {
    let a = ProcessDescriptor::new("A", 0, 3);
    let b = ProcessDescriptor::new("B", 0, 1);
    let c = ProcessDescriptor::new("C", 5, 2);

    let forward = fcfs(&ProcessBatch::new(vec![a.clone(), b.clone(), c.clone()]).unwrap());
    let shuffled = fcfs(&ProcessBatch::new(vec![c.clone(), a.clone(), b.clone()]).unwrap());
    assert_eq!(forward.timeline, shuffled.timeline);

    let swapped = fcfs(&ProcessBatch::new(vec![b, a, c]).unwrap());
    assert_ne!(forward.timeline, swapped.timeline);
    assert_eq!(swapped.timeline[0], TimelineSegment::run("B", 0, 1));
}

#[test]
fn rr_with_large_quantum_matches_fcfs() {
    let batch = ProcessBatch::new(common::fixture()).unwrap();
    let quantum = Quantum::new(batch.max_burst()).unwrap();
    assert_eq!(round_robin(&batch, quantum).timeline, fcfs(&batch).timeline);
    assert_eq!(round_robin(&batch, quantum).completions, fcfs(&batch).completions);
}

#[test]
fn invalid_requests_never_simulate() {
    let empty = SimulationRequest::new(vec![], Algorithm::Fcfs);
    assert_eq!(simulate(&empty).unwrap_err(), ValidationError::EmptyBatch);

    let no_quantum = SimulationRequest::new(common::fixture(), Algorithm::RoundRobin);
    assert_eq!(simulate(&no_quantum).unwrap_err(), ValidationError::MissingQuantum);

    let negative =
        SimulationRequest::new(common::fixture(), Algorithm::RoundRobin).with_quantum(-2);
    assert_eq!(simulate(&negative).unwrap_err(), ValidationError::NonPositiveQuantum(-2));
}

#[test]
fn request_from_json() {
    let request: SimulationRequest = serde_json::from_str(
        r#"{
            "processes": [
                {"id": 1, "arrivalTime": 0, "burstTime": 5, "priority": 2},
                {"id": 2, "arrivalTime": 2, "burstTime": 3, "priority": 1}
            ],
            "algorithm": "Priority"
        }"#,
    )
    .unwrap();
    let result = simulate(&request).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["algorithm"], "Priority");
    assert_eq!(json["timeline"][1]["processId"], "2");
    assert_eq!(json["stats"][1]["waitingTime"], 3);
    assert!(json.get("quantum").is_none());
}
