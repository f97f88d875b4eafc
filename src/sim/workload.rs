use rand::prelude::*;

use super::ProcessDescriptor;
use crate::core::Ticks;

/// Parameters for a Bernoulli-arrival workload: at every tick a process
/// arrives with probability `p_arrival`, and it is short with probability `p_short`.
#[derive(Debug, Clone)]
pub struct WorkloadConfig {
    pub ticks: Ticks,
    pub p_arrival: f64,
    pub p_short: f64,
    pub short_ticks: Ticks,
    pub long_ticks: Ticks,
    pub max_priority: i64,
    pub seed: u64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            ticks: 500,
            p_arrival: 0.3,
            p_short: 0.3,
            short_ticks: 2,
            long_ticks: 6,
            max_priority: 5,
            seed: 0,
        }
    }
}

pub fn bernoulli_jobs(cfg: &WorkloadConfig) -> Vec<ProcessDescriptor> {
    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let mut jobs = Vec::new();

    for t in 0..cfg.ticks {
        if rng.random::<f64>() < cfg.p_arrival {
            let burst = if rng.random::<f64>() < cfg.p_short {
                cfg.short_ticks
            } else {
                cfg.long_ticks
            };
            let priority = rng.random_range(1..=cfg.max_priority.max(1));

            let id = format!("P{}", jobs.len() + 1);
            jobs.push(ProcessDescriptor::new(id, t, burst).with_priority(priority));
        }
    }

    jobs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_workload() {
        let cfg = WorkloadConfig {
            ticks: 100,
            seed: 42,
            ..WorkloadConfig::default()
        };
        assert_eq!(bernoulli_jobs(&cfg), bernoulli_jobs(&cfg));
    }

    #[test]
    fn test_jobs_respect_config() {
        let cfg = WorkloadConfig {
            ticks: 200,
            p_arrival: 1.0,
            ..WorkloadConfig::default()
        };
        let jobs = bernoulli_jobs(&cfg);
        assert_eq!(jobs.len(), 200);
        for (t, job) in jobs.iter().enumerate() {
            assert_eq!(job.arrival_time, t as Ticks);
            assert!(job.burst_time == cfg.short_ticks || job.burst_time == cfg.long_ticks);
            assert!((1..=cfg.max_priority).contains(&job.priority.unwrap()));
        }
    }
}
