//! Line protocol spoken with a compute process.
//!
//! Input: a header line holding the process count (round robin appends the
//! quantum on the same line), then one `id arrival burst priority` line per
//! process. Output: a single JSON [`SimulationResult`], possibly preceded by
//! diagnostic text; readers start parsing at the first `{`.

use crate::core::Ticks;
use crate::error::{ProtocolError, TransportError};
use crate::scheduler::DEFAULT_PRIORITY;
use crate::sim::{Algorithm, ProcessDescriptor, SimulationRequest, SimulationResult};

pub fn encode_request(request: &SimulationRequest) -> Result<String, ProtocolError> {
    let mut out = request.processes.len().to_string();
    if request.algorithm == Algorithm::RoundRobin {
        if let Some(quantum) = request.quantum {
            out.push_str(&format!(" {quantum}"));
        }
    }

    for p in &request.processes {
        let id = p.id.as_str();
        if id.is_empty() || id.chars().any(char::is_whitespace) {
            return Err(ProtocolError::UnencodableId(p.id.clone()));
        }
        let priority = p.priority.unwrap_or(DEFAULT_PRIORITY);
        out.push_str(&format!("\n{id} {} {} {priority}", p.arrival_time, p.burst_time));
    }
    out.push('\n');
    Ok(out)
}

pub fn decode_request(
    input: &str,
    algorithm: Algorithm,
) -> Result<SimulationRequest, ProtocolError> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (header_no, header) = lines.next().ok_or(ProtocolError::MissingHeader)?;
    let mut fields = header.split_whitespace();
    let count: usize = parse_field(header_no, "process count", fields.next())?;
    let quantum: Option<Ticks> = match algorithm {
        Algorithm::RoundRobin => fields
            .next()
            .map(|q| parse_field(header_no, "quantum", Some(q)))
            .transpose()?,
        _ => None,
    };

    let processes = lines
        .map(|(line_no, line)| decode_process(line_no, line))
        .collect::<Result<Vec<_>, _>>()?;
    if processes.len() != count {
        return Err(ProtocolError::CountMismatch {
            expected: count,
            found: processes.len(),
        });
    }

    Ok(SimulationRequest {
        processes,
        algorithm,
        quantum,
    })
}

fn decode_process(line_no: usize, line: &str) -> Result<ProcessDescriptor, ProtocolError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if !(3..=4).contains(&fields.len()) {
        return Err(ProtocolError::FieldCount {
            line: line_no,
            found: fields.len(),
        });
    }

    let mut process = ProcessDescriptor::new(
        fields[0],
        parse_field(line_no, "arrival time", Some(fields[1]))?,
        parse_field(line_no, "burst time", Some(fields[2]))?,
    );
    if let Some(&priority) = fields.get(3) {
        process.priority = Some(parse_field(line_no, "priority", Some(priority))?);
    }
    Ok(process)
}

fn parse_field<T: std::str::FromStr>(
    line: usize,
    field: &'static str,
    value: Option<&str>,
) -> Result<T, ProtocolError> {
    let value = value.unwrap_or_default();
    value.parse().map_err(|_| ProtocolError::BadField {
        line,
        field,
        value: value.to_string(),
    })
}

pub fn render_result(result: &SimulationResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

/// Parses backend stdout, skipping anything before the first `{`.
pub fn parse_result(stdout: &str) -> Result<SimulationResult, TransportError> {
    let start = stdout.find('{').ok_or_else(|| TransportError::MissingJson {
        raw: stdout.to_string(),
    })?;
    serde_json::from_str(&stdout[start..]).map_err(|source| TransportError::Unparseable {
        raw: stdout.to_string(),
        source,
    })
}
