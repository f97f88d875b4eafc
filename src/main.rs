use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use schedsim::{
    Algorithm, Error, ProtocolError, SimulationRequest, SimulationResult, TransportError,
    scheduler::DEFAULT_QUANTUM,
    sim::{self, Policy, ProcessBatch, Quantum, WorkloadConfig, coalesce},
    transport::{self, ALGORITHM_PLACEHOLDER, ExternalBackend},
};

/// Deterministic CPU scheduling simulator.
#[derive(Parser, Debug)]
#[command(name = "schedsim", version)]
#[command(about = "Simulate FCFS, SJF, Priority and Round Robin scheduling")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate a JSON request read from a file or stdin.
    Run {
        /// Request file; stdin when omitted.
        #[arg(long, short)]
        input: Option<PathBuf>,

        /// Override the request's algorithm.
        #[arg(long, short)]
        algorithm: Option<Algorithm>,

        /// Override the request's round-robin quantum.
        #[arg(long, short)]
        quantum: Option<i64>,

        /// Print a table instead of JSON.
        #[arg(long)]
        table: bool,

        /// Print every scheduling event before the result.
        #[arg(long)]
        trace: bool,
    },

    /// Compute backend: line protocol on stdin, JSON result on stdout.
    Native {
        #[arg(long, short)]
        algorithm: Algorithm,
    },

    /// Run a JSON request through an external compute backend.
    Remote {
        /// Backend program.
        #[arg(long, env = "SCHEDSIM_BACKEND")]
        backend: PathBuf,

        /// Backend argument; `{algorithm}` expands to the algorithm name.
        /// Defaults to `native --algorithm {algorithm}`.
        #[arg(long = "backend-arg", allow_hyphen_values = true)]
        backend_args: Vec<String>,

        /// Request file; stdin when omitted.
        #[arg(long, short)]
        input: Option<PathBuf>,
    },

    /// Run every policy over a random Bernoulli workload and compare averages.
    Compare {
        #[arg(long, default_value_t = 500)]
        ticks: i64,

        #[arg(long, default_value_t = 0.3)]
        p_arrival: f64,

        #[arg(long, default_value_t = 0.3)]
        p_short: f64,

        #[arg(long, default_value_t = 2)]
        short_ticks: i64,

        #[arg(long, default_value_t = 6)]
        long_ticks: i64,

        #[arg(long, default_value_t = DEFAULT_QUANTUM)]
        quantum: i64,

        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match execute(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            match err {
                Error::Validation(_) => ExitCode::from(1),
                Error::Protocol(_) => ExitCode::from(2),
                Error::Transport(_) => ExitCode::from(3),
            }
        }
    }
}

fn execute(command: Command) -> Result<(), Error> {
    match command {
        Command::Run {
            input,
            algorithm,
            quantum,
            table,
            trace,
        } => {
            let mut request = read_request(input)?;
            if let Some(algorithm) = algorithm {
                request.algorithm = algorithm;
            }
            if quantum.is_some() {
                request.quantum = quantum;
            }

            let (result, events) = sim::simulate_traced(&request)?;
            if trace {
                for e in &events {
                    println!("t={} {:?}", e.at, e.event);
                }
            }
            if table {
                print_table(&result);
            } else {
                print_json(&result);
            }
        }
        Command::Native { algorithm } => {
            let input = read_to_string(None)?;
            println!("{}", transport::serve(&input, algorithm)?);
        }
        Command::Remote {
            backend,
            backend_args,
            input,
        } => {
            let request = read_request(input)?;
            let args = if backend_args.is_empty() {
                vec!["native".into(), "--algorithm".into(), ALGORITHM_PLACEHOLDER.into()]
            } else {
                backend_args
            };
            let result = ExternalBackend::new(backend).args(args).run(&request)?;
            print_json(&result);
        }
        Command::Compare {
            ticks,
            p_arrival,
            p_short,
            short_ticks,
            long_ticks,
            quantum,
            seed,
        } => {
            let cfg = WorkloadConfig {
                ticks,
                p_arrival,
                p_short,
                short_ticks,
                long_ticks,
                seed,
                ..WorkloadConfig::default()
            };
            let batch = ProcessBatch::new(sim::bernoulli_jobs(&cfg))?;
            let quantum = Quantum::new(quantum)?;
            println!("{} processes over {} ticks", batch.len(), ticks);

            for policy in [
                Policy::Fcfs,
                Policy::Sjf,
                Policy::Priority,
                Policy::RoundRobin(quantum),
            ] {
                let (result, _) = sim::simulate_batch(&batch, policy);
                println!(
                    "{:<8} waiting {:>8.2}  turnaround {:>8.2}  response {:>8.2} ticks",
                    policy.algorithm(),
                    result.average_waiting_time,
                    result.average_turnaround_time,
                    result.average_response_time
                );
            }
        }
    }
    Ok(())
}

fn read_to_string(input: Option<PathBuf>) -> Result<String, Error> {
    let text = match input {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).map(|_| buf)
        }
    };
    text.map_err(|e| TransportError::Io(e).into())
}

fn read_request(input: Option<PathBuf>) -> Result<SimulationRequest, Error> {
    let text = read_to_string(input)?;
    serde_json::from_str(&text).map_err(|e| ProtocolError::BadRequest(e.to_string()).into())
}

fn print_json(result: &SimulationResult) {
    match transport::protocol::render_result(result) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("error: failed to render result: {e}"),
    }
}

fn print_table(result: &SimulationResult) {
    println!("Algorithm: {}", result.algorithm);
    if let Some(q) = result.quantum {
        println!("Quantum: {q}");
    }

    println!("\nTimeline:");
    for seg in coalesce(&result.timeline) {
        let who = seg.process_id.as_ref().map_or("idle", |id| id.as_str());
        println!("  [{:>4}, {:>4})  {who}", seg.start, seg.end);
    }

    println!(
        "\n{:<8} {:>7} {:>5} {:>5} {:>10} {:>10} {:>7} {:>8}",
        "id", "arrival", "burst", "start", "completion", "turnaround", "waiting", "response"
    );
    for s in &result.stats {
        println!(
            "{:<8} {:>7} {:>5} {:>5} {:>10} {:>10} {:>7} {:>8}",
            s.process_id,
            s.arrival_time,
            s.burst_time,
            s.start_time,
            s.completion_time,
            s.turnaround_time,
            s.waiting_time,
            s.response_time
        );
    }

    println!("\nAverage waiting time: {:.2} ticks", result.average_waiting_time);
    println!("Average turnaround time: {:.2} ticks", result.average_turnaround_time);
    println!("Average response time: {:.2} ticks", result.average_response_time);
}
