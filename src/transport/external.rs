use std::ffi::OsString;
use std::io::{self, ErrorKind, Write};
use std::thread;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use log::{debug, warn};

use super::protocol;
use crate::error::{Result, TransportError};
use crate::sim::{SimulationRequest, SimulationResult};

/// Argument replaced by the lowercase algorithm name when the backend is spawned.
pub const ALGORITHM_PLACEHOLDER: &str = "{algorithm}";

/// A separately built program that computes a schedule over the line protocol.
#[derive(Debug, Clone)]
pub struct ExternalBackend {
    program: PathBuf,
    args: Vec<OsString>,
}

impl ExternalBackend {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Validates locally, then hands the request to the backend. Validation
    /// failures never reach the backend; anything that goes wrong afterwards
    /// is a transport error.
    pub fn run(&self, request: &SimulationRequest) -> Result<SimulationResult> {
        request.validate()?;
        let input = protocol::encode_request(request)?;

        let algorithm = request.algorithm.as_str().to_lowercase();
        let args = self.args.iter().map(|a| {
            if a == ALGORITHM_PLACEHOLDER {
                OsString::from(&algorithm)
            } else {
                a.clone()
            }
        });

        debug!("spawning {} for {}", self.program.display(), request.algorithm);
        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| TransportError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Feed stdin while the output pipes drain; either side can fill up first.
        // Dropping stdin closes the pipe so the backend sees EOF.
        let stdin = child.stdin.take();
        let (written, output) = thread::scope(|s| {
            let writer = s.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(input.as_bytes()),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked")));
            (written, output)
        });

        // The child is reaped by now whatever the writer reported
        let output = output.map_err(TransportError::from)?;
        match written {
            Ok(()) => {}
            // Backend quit without reading; its exit status and output decide
            Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                debug!("{} closed stdin early", self.program.display());
            }
            Err(e) => return Err(TransportError::from(e).into()),
        }

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            warn!("{} failed: {}", self.program.display(), stderr.trim());
            return Err(TransportError::NonZeroExit {
                program: self.program.clone(),
                code: output.status.code(),
                stderr,
            }
            .into());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(protocol::parse_result(&stdout)?)
    }
}
