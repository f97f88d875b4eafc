use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{ProcessBatch, ProcessDescriptor, Quantum};
use crate::core::Ticks;
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    #[serde(rename = "FCFS", alias = "fcfs")]
    Fcfs,
    #[serde(rename = "SJF", alias = "sjf")]
    Sjf,
    #[serde(rename = "Priority", alias = "priority")]
    Priority,
    #[serde(rename = "RR", alias = "rr")]
    RoundRobin,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [Self::Fcfs, Self::Sjf, Self::Priority, Self::RoundRobin];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::Sjf => "SJF",
            Self::Priority => "Priority",
            Self::RoundRobin => "RR",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fcfs" => Ok(Self::Fcfs),
            "sjf" => Ok(Self::Sjf),
            "priority" => Ok(Self::Priority),
            "rr" | "round-robin" => Ok(Self::RoundRobin),
            other => Err(format!(
                "unknown algorithm {other:?} (expected fcfs, sjf, priority or rr)"
            )),
        }
    }
}

/// A validated algorithm selector; round robin carries its quantum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Fcfs,
    Sjf,
    Priority,
    RoundRobin(Quantum),
}

impl Policy {
    pub fn algorithm(self) -> Algorithm {
        match self {
            Self::Fcfs => Algorithm::Fcfs,
            Self::Sjf => Algorithm::Sjf,
            Self::Priority => Algorithm::Priority,
            Self::RoundRobin(_) => Algorithm::RoundRobin,
        }
    }

    pub fn quantum(self) -> Option<Quantum> {
        match self {
            Self::RoundRobin(q) => Some(q),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    pub processes: Vec<ProcessDescriptor>,
    pub algorithm: Algorithm,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantum: Option<Ticks>,
}

impl SimulationRequest {
    pub fn new(processes: Vec<ProcessDescriptor>, algorithm: Algorithm) -> Self {
        Self {
            processes,
            algorithm,
            quantum: None,
        }
    }

    pub fn with_quantum(mut self, quantum: Ticks) -> Self {
        self.quantum = Some(quantum);
        self
    }

    /// Runs every check shared by the policies plus the algorithm-specific
    /// ones. Nothing is simulated unless this succeeds.
    pub fn validate(&self) -> Result<(ProcessBatch, Policy), ValidationError> {
        let batch = ProcessBatch::from_slice(&self.processes)?;
        let policy = match self.algorithm {
            Algorithm::Fcfs => Policy::Fcfs,
            Algorithm::Sjf => Policy::Sjf,
            Algorithm::Priority => {
                batch.require_priorities()?;
                Policy::Priority
            }
            Algorithm::RoundRobin => {
                let quantum = self.quantum.ok_or(ValidationError::MissingQuantum)?;
                Policy::RoundRobin(Quantum::new(quantum)?)
            }
        };
        Ok((batch, policy))
    }
}
