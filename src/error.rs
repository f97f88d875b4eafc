use std::path::PathBuf;

use crate::core::Ticks;
use crate::sim::ProcessId;

/// Caller mistakes, reported before any simulation step runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("process batch is empty")]
    EmptyBatch,

    #[error("process {id}: burst time must be positive, got {burst}")]
    NonPositiveBurst { id: ProcessId, burst: Ticks },

    #[error("process {id}: arrival time must not be negative, got {arrival}")]
    NegativeArrival { id: ProcessId, arrival: Ticks },

    #[error("duplicate process id {0}")]
    DuplicateId(ProcessId),

    #[error("round robin requires a quantum")]
    MissingQuantum,

    #[error("quantum must be positive, got {0}")]
    NonPositiveQuantum(Ticks),

    #[error("process {0}: priority scheduling requires a priority")]
    MissingPriority(ProcessId),

    #[error("schedule horizon overflows the tick range")]
    HorizonOverflow,
}

/// Malformed line-protocol input on the compute side.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    #[error("missing header line")]
    MissingHeader,

    #[error("line {line}: invalid {field} {value:?}")]
    BadField {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: expected 3 or 4 fields, found {found}")]
    FieldCount { line: usize, found: usize },

    #[error("header announces {expected} processes, found {found}")]
    CountMismatch { expected: usize, found: usize },

    #[error("malformed request: {0}")]
    BadRequest(String),

    #[error("process id {0:?} cannot be written on a protocol line")]
    UnencodableId(ProcessId),
}

/// The computation could not be performed by the external backend.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to start {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error talking to backend: {0}")]
    Io(#[from] std::io::Error),

    #[error("{} exited with {}: {stderr}", .program.display(), exit_code_label(.code))]
    NonZeroExit {
        program: PathBuf,
        code: Option<i32>,
        stderr: String,
    },

    #[error("backend output contains no JSON object: {raw:?}")]
    MissingJson { raw: String },

    #[error("failed to parse backend output: {source}")]
    Unparseable {
        raw: String,
        #[source]
        source: serde_json::Error,
    },
}

fn exit_code_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {code}"),
        None => "a signal".to_string(),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl Error {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
