use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::Ticks;
use crate::error::ValidationError;

/// Process identifier. Accepts either a JSON string or integer and is held as a string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "IdRepr", into = "String")]
pub struct ProcessId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Text(String),
    Number(i64),
}

impl From<IdRepr> for ProcessId {
    fn from(repr: IdRepr) -> Self {
        match repr {
            IdRepr::Text(s) => Self(s),
            IdRepr::Number(n) => Self(n.to_string()),
        }
    }
}

impl From<ProcessId> for String {
    fn from(id: ProcessId) -> Self {
        id.0
    }
}

impl From<&str> for ProcessId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ProcessId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u64> for ProcessId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl ProcessId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessDescriptor {
    pub id: ProcessId,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

impl ProcessDescriptor {
    pub fn new(id: impl Into<ProcessId>, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            id: id.into(),
            arrival_time,
            burst_time,
            priority: None,
        }
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// A validated, owned batch of descriptors. Every policy runs over one of these.
#[derive(Debug, Clone)]
pub struct ProcessBatch {
    processes: Vec<ProcessDescriptor>,
}

impl ProcessBatch {
    pub fn new(processes: Vec<ProcessDescriptor>) -> Result<Self, ValidationError> {
        if processes.is_empty() {
            return Err(ValidationError::EmptyBatch);
        }

        let mut seen = FxHashSet::default();
        let mut horizon: Ticks = 0;
        for p in &processes {
            if p.arrival_time < 0 {
                return Err(ValidationError::NegativeArrival {
                    id: p.id.clone(),
                    arrival: p.arrival_time,
                });
            }
            if p.burst_time <= 0 {
                return Err(ValidationError::NonPositiveBurst {
                    id: p.id.clone(),
                    burst: p.burst_time,
                });
            }
            if !seen.insert(&p.id) {
                return Err(ValidationError::DuplicateId(p.id.clone()));
            }
            horizon = horizon
                .checked_add(p.burst_time)
                .ok_or(ValidationError::HorizonOverflow)?;
        }

        // No completion can land later than the latest arrival plus all work
        let latest = processes.iter().map(|p| p.arrival_time).max().unwrap_or(0);
        latest
            .checked_add(horizon)
            .ok_or(ValidationError::HorizonOverflow)?;

        Ok(Self { processes })
    }

    pub fn from_slice(processes: &[ProcessDescriptor]) -> Result<Self, ValidationError> {
        Self::new(processes.to_vec())
    }

    /// Rejects descriptors without a priority value.
    pub fn require_priorities(&self) -> Result<(), ValidationError> {
        match self.processes.iter().find(|p| p.priority.is_none()) {
            Some(p) => Err(ValidationError::MissingPriority(p.id.clone())),
            None => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProcessDescriptor> {
        self.processes.iter()
    }

    pub fn as_slice(&self) -> &[ProcessDescriptor] {
        &self.processes
    }

    /// Indices into the batch ordered by arrival time; equal arrivals keep input order.
    pub fn arrival_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.processes.len()).collect();
        order.sort_by_key(|&i| self.processes[i].arrival_time);
        order
    }

    pub fn max_burst(&self) -> Ticks {
        self.processes.iter().map(|p| p.burst_time).max().unwrap_or(0)
    }
}

/// Round-robin time slice, always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantum(Ticks);

impl Quantum {
    pub fn new(ticks: Ticks) -> Result<Self, ValidationError> {
        if ticks <= 0 {
            return Err(ValidationError::NonPositiveQuantum(ticks));
        }
        Ok(Self(ticks))
    }

    pub fn get(self) -> Ticks {
        self.0
    }
}
