//! Workq CLI Client
//!
//! Command-line interface issuing one Workq command per invocation.

use std::io::{self, Write};

use clap::{Args as ClapArgs, Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::{fmt, EnvFilter};
use workq_client::config::DEFAULT_ADDR;
use workq_client::{
    BackgroundJob, Client, ClientConfig, ForegroundJob, InspectedJob, ScheduledJob, WorkqError,
};

/// Failures of a single CLI invocation
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Workq(#[from] WorkqError),

    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),

    #[error("Failed to render jobs: {0}")]
    Render(#[from] serde_json::Error),
}

/// Workq CLI
#[derive(Parser, Debug)]
#[command(name = "workq-cli")]
#[command(about = "CLI for the Workq job server")]
#[command(version)]
struct Args {
    /// Server address
    #[arg(short, long, default_value = DEFAULT_ADDR)]
    server: String,

    /// Connect timeout in milliseconds (0 = OS default)
    #[arg(long, default_value = "0")]
    connect_timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

/// Fields shared by every job submission
#[derive(ClapArgs, Debug)]
struct JobArgs {
    /// Job id (UUID)
    #[arg(long)]
    id: String,

    /// Job name
    #[arg(long)]
    name: String,

    /// Time-to-run in seconds
    #[arg(long)]
    ttr: u32,

    /// Numeric priority
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    priority: i32,

    /// Job payload
    payload: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a background job
    Add {
        #[command(flatten)]
        job: JobArgs,

        /// Time-to-live in seconds
        #[arg(long)]
        ttl: u64,

        #[arg(long, default_value = "0")]
        max_attempts: u8,

        #[arg(long, default_value = "0")]
        max_fails: u8,
    },

    /// Run a foreground job and wait for its result
    Run {
        #[command(flatten)]
        job: JobArgs,

        /// Milliseconds to wait for the result
        #[arg(long)]
        timeout: u64,
    },

    /// Schedule a job at a UTC time (2006-01-02T15:04:05Z)
    Schedule {
        #[command(flatten)]
        job: JobArgs,

        #[arg(long)]
        ttl: u64,

        #[arg(long)]
        time: String,

        #[arg(long, default_value = "0")]
        max_attempts: u8,

        #[arg(long, default_value = "0")]
        max_fails: u8,
    },

    /// Fetch a job result
    Result {
        id: String,

        #[arg(long, default_value = "1000")]
        timeout: u64,
    },

    /// Lease a job from one or more names
    Lease {
        #[arg(required = true)]
        names: Vec<String>,

        #[arg(long, default_value = "1000")]
        timeout: u64,
    },

    /// Mark a job complete
    Complete { id: String, result: String },

    /// Mark a job failed
    Fail { id: String, result: String },

    /// Delete a job
    Delete { id: String },

    /// Inspect jobs by name
    Inspect {
        name: String,

        #[arg(long, default_value = "0")]
        offset: u64,

        #[arg(long, default_value = "10")]
        limit: u64,

        /// Print jobs as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,workq_client=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = ClientConfig::builder()
        .addr(&args.server)
        .connect_timeout_ms(args.connect_timeout_ms)
        .build();

    let mut client = match Client::connect_with(&config) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to connect to {}: {}", args.server, e);
            std::process::exit(1);
        }
    };

    let mut out = io::stdout().lock();
    let outcome = execute(&mut client, args.command, &mut out);
    let _ = client.close();

    if let Err(e) = outcome {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn execute<T: workq_client::Transport>(
    client: &mut Client<T>,
    command: Commands,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        Commands::Add {
            job,
            ttl,
            max_attempts,
            max_fails,
        } => {
            client.add(&BackgroundJob {
                id: job.id,
                name: job.name,
                ttr: job.ttr,
                ttl,
                payload: job.payload.into_bytes(),
                priority: job.priority,
                max_attempts,
                max_fails,
            })?;
            writeln!(out, "OK")?;
        }
        Commands::Run { job, timeout } => {
            let result = client.run(&ForegroundJob {
                id: job.id,
                name: job.name,
                ttr: job.ttr,
                timeout,
                payload: job.payload.into_bytes(),
                priority: job.priority,
            })?;
            print_result(out, result.success, &result.result)?;
        }
        Commands::Schedule {
            job,
            ttl,
            time,
            max_attempts,
            max_fails,
        } => {
            client.schedule(&ScheduledJob {
                id: job.id,
                name: job.name,
                ttr: job.ttr,
                ttl,
                time,
                payload: job.payload.into_bytes(),
                priority: job.priority,
                max_attempts,
                max_fails,
            })?;
            writeln!(out, "OK")?;
        }
        Commands::Result { id, timeout } => {
            let result = client.result(&id, timeout)?;
            print_result(out, result.success, &result.result)?;
        }
        Commands::Lease { names, timeout } => {
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            let job = client.lease(&names, timeout)?;
            writeln!(out, "{} {}", job.id, job.name)?;
            write_payload(out, &job.payload)?;
        }
        Commands::Complete { id, result } => {
            client.complete(&id, result.as_bytes())?;
            writeln!(out, "OK")?;
        }
        Commands::Fail { id, result } => {
            client.fail(&id, result.as_bytes())?;
            writeln!(out, "OK")?;
        }
        Commands::Delete { id } => {
            client.delete(&id)?;
            writeln!(out, "OK")?;
        }
        Commands::Inspect {
            name,
            offset,
            limit,
            json,
        } => {
            let jobs = client.inspect_jobs(&name, offset, limit)?;
            if json {
                serde_json::to_writer_pretty(&mut *out, &jobs)?;
                writeln!(out)?;
            } else {
                for job in &jobs {
                    print_inspected(out, job)?;
                }
            }
        }
    }

    out.flush()?;
    Ok(())
}

fn print_result(out: &mut impl Write, success: bool, result: &[u8]) -> io::Result<()> {
    writeln!(out, "success={}", success)?;
    write_payload(out, result)
}

fn print_inspected(out: &mut impl Write, job: &InspectedJob) -> io::Result<()> {
    writeln!(
        out,
        "{} name={} ttr={} ttl={} priority={} attempts={}/{} fails={}/{} state={} created={} payload={}B",
        job.job.id,
        job.job.name,
        job.job.ttr,
        job.job.ttl,
        job.job.priority,
        job.attempts,
        job.job.max_attempts,
        job.fails,
        job.job.max_fails,
        job.state,
        job.created.map(|t| t.to_rfc3339()).unwrap_or_default(),
        job.job.payload.len(),
    )
}

/// Payloads are raw bytes; pass them through untouched
fn write_payload(out: &mut impl Write, payload: &[u8]) -> io::Result<()> {
    out.write_all(payload)?;
    out.write_all(b"\n")
}
