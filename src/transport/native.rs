use log::debug;

use super::protocol;
use crate::error::Result;
use crate::sim::{Algorithm, simulate};

/// Compute side of the line protocol: decodes `input`, simulates it with
/// `algorithm` and returns the JSON document to write on stdout.
pub fn serve(input: &str, algorithm: Algorithm) -> Result<String> {
    let request = protocol::decode_request(input, algorithm)?;
    debug!(
        "serving {} processes with {algorithm}",
        request.processes.len()
    );
    let result = simulate(&request)?;
    // SimulationResult contains only numbers, strings and sequences
    Ok(protocol::render_result(&result).expect("SimulationResult always serializes"))
}
