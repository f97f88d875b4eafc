use std::cmp::Ordering;

use keyed_priority_queue::KeyedPriorityQueue;

use super::{Dispatch, EnqueueReason, Scheduler};
use crate::core::{SimCtx, Task, TaskId, Ticks};
use crate::sim::ProcessId;

/// Primary selection key: a `true` flag sorts after every `false` one,
/// then the smaller value wins.
pub type RankKey = (bool, i64);

/// Selection key for the non-preemptive policies. Smaller `primary` wins,
/// then earlier arrival, then the smaller id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rank {
    primary: RankKey,
    arrival: Ticks,
    pid: ProcessId,
}

impl Rank {
    fn key(&self) -> (RankKey, Ticks, &ProcessId) {
        (self.primary, self.arrival, &self.pid)
    }
}

// KeyedPriorityQueue is a max-heap, so we need to flip-flop Rank's Ord
impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

pub trait RankPolicy {
    const NAME: &'static str;

    fn primary(task: &Task) -> RankKey;
}

/// Shortest burst first.
#[derive(Debug, Default)]
pub struct ShortestJob;

impl RankPolicy for ShortestJob {
    const NAME: &'static str = "SJF";

    fn primary(task: &Task) -> RankKey {
        (false, task.burst_time)
    }
}

/// Lowest priority number first; a task without one ranks after every task that has one.
#[derive(Debug, Default)]
pub struct HighestPriority;

impl RankPolicy for HighestPriority {
    const NAME: &'static str = "Priority";

    fn primary(task: &Task) -> RankKey {
        (task.priority.is_none(), task.priority.unwrap_or(0))
    }
}

/// Non-preemptive scheduler that always dispatches the best-ranked ready task
/// for its whole remaining burst.
#[derive(Debug)]
pub struct PriqScheduler<R: RankPolicy> {
    ready: KeyedPriorityQueue<TaskId, Rank>,
    _policy: R,
}

pub type SjfScheduler = PriqScheduler<ShortestJob>;
pub type PriorityScheduler = PriqScheduler<HighestPriority>;

impl<R: RankPolicy + Default> PriqScheduler<R> {
    pub fn new() -> Self {
        Self {
            ready: KeyedPriorityQueue::new(),
            _policy: R::default(),
        }
    }
}

impl<R: RankPolicy + Default> Default for PriqScheduler<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RankPolicy> Scheduler for PriqScheduler<R> {
    fn name(&self) -> &'static str {
        R::NAME
    }

    fn enqueue(&mut self, ctx: &SimCtx, task: TaskId, reason: EnqueueReason) {
        debug_assert_eq!(reason, EnqueueReason::Arrival, "{} never preempts", R::NAME);
        let t = ctx.task(task);
        let rank = Rank {
            primary: R::primary(t),
            arrival: t.arrival_time,
            pid: t.pid.clone(),
        };
        let prev = self.ready.push(task, rank);
        debug_assert!(prev.is_none(), "Task {task} already present in ready queue");
    }

    fn dispatch(&mut self, ctx: &SimCtx) -> Option<Dispatch> {
        let (task, _) = self.ready.pop()?;
        Some(Dispatch {
            task,
            slice: ctx.task(task).remaining,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rank(primary: i64, arrival: Ticks, pid: &str) -> Rank {
        Rank {
            primary: (false, primary),
            arrival,
            pid: pid.into(),
        }
    }

    #[test]
    fn test_rank_order_is_reversed_for_max_heap() {
        assert!(rank(1, 5, "B") > rank(2, 0, "A"));
        assert!(rank(3, 0, "Z") > rank(3, 1, "A"));
        assert!(rank(3, 1, "A") > rank(3, 1, "B"));
    }

    #[test]
    fn test_missing_key_ranks_after_any_value() {
        let missing = Rank {
            primary: (true, 0),
            arrival: 0,
            pid: "A".into(),
        };
        assert!(rank(i64::MAX, 9, "Z") > missing);
    }

    #[test]
    fn test_queue_pops_smallest_rank() {
        let mut q = KeyedPriorityQueue::new();
        q.push(0usize, rank(4, 0, "P0"));
        q.push(1usize, rank(2, 3, "P1"));
        q.push(2usize, rank(2, 1, "P2"));
        let order: Vec<usize> = std::iter::from_fn(|| q.pop().map(|(k, _)| k)).collect();
        assert_eq!(order, vec![2, 1, 0]);
    }
}
