//! `admit` CLI — run room reservation batches from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Run a batch (stdin → stdout), one room number or -1 per request
//! printf '2 3\n101 15 1 6\n102 20 4 7\n10 1 3\n30 5 7\n15 4 6\n' | admit run
//!
//! # Run from file to file, re-checking store invariants after every commit
//! admit run -i batch.txt -o outcomes.txt --verify
//!
//! # Full JSON report: outcomes, reservations, remaining free time per room
//! admit run -i batch.txt --format json
//!
//! # Per-room usage summary
//! admit stats -i batch.txt
//!
//! # Validate a batch without running it
//! admit check -i batch.txt
//!
//! # Decision-level logging on stderr
//! admit -vv run -i batch.txt
//! ```

use std::io::{self, Read};

use admission_engine::{format_outcomes, parse_batch, Batch, EngineOptions, RunReport};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "admit", version, about = "Greedy room reservation batch runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace).
    /// RUST_LOG overrides this when set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a batch and print one outcome per request
    Run {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Re-check every room's free intervals after each commit
        #[arg(long)]
        verify: bool,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Run a batch and show per-room usage statistics
    Stats {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Parse and validate a batch without running any request
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// One integer per line: the room number, or -1
    Text,
    /// Pretty-printed JSON run report
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            input,
            output,
            verify,
            format,
        } => {
            let batch = read_batch(input.as_deref())?;
            let options = EngineOptions {
                verify_invariants: verify,
            };
            let engine = batch.run(options).context("Failed to run batch")?;

            let rendered = match format {
                Format::Text => format_outcomes(engine.outcomes()),
                Format::Json => {
                    let report = RunReport::new(&engine);
                    let mut json = serde_json::to_string_pretty(&report)?;
                    json.push('\n');
                    json
                }
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Stats { input } => {
            let batch = read_batch(input.as_deref())?;
            let engine = batch
                .run(EngineOptions::default())
                .context("Failed to run batch")?;
            print!("{}", render_stats(&RunReport::new(&engine)));
        }
        Commands::Check { input } => {
            let batch = read_batch(input.as_deref())?;
            batch
                .engine(EngineOptions::default())
                .context("Invalid room configuration")?;
            for (index, request) in batch.requests.iter().enumerate() {
                admission_engine::engine::validate_request(index, request)
                    .context("Invalid request")?;
            }
            println!(
                "OK: {} rooms, {} requests",
                batch.rooms.len(),
                batch.requests.len()
            );
        }
    }

    Ok(())
}

/// Install a stderr `fmt` subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level follows `-v` occurrences.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn render_stats(report: &RunReport) -> String {
    let total = report.reserved + report.rejected;
    let mut out = format!(
        "Requests:  {}\nReserved:  {}\nRejected:  {}\n",
        total, report.reserved, report.rejected
    );
    out.push_str(&format!(
        "\n{:<8}{:<10}{:<14}{:<10}{:<8}{}\n",
        "ROOM", "CAPACITY", "RESERVATIONS", "RESERVED", "FREE", "FREE INTERVALS"
    ));
    for room in &report.rooms {
        let intervals: Vec<String> = room
            .free_intervals
            .iter()
            .map(|iv| iv.to_string())
            .collect();
        out.push_str(&format!(
            "{:<8}{:<10}{:<14}{:<10}{:<8}{}\n",
            room.room_no,
            room.capacity,
            room.reservations,
            room.reserved_time,
            room.free_time,
            if intervals.is_empty() {
                "-".to_string()
            } else {
                intervals.join(" ")
            }
        ));
    }
    out
}

fn read_batch(path: Option<&str>) -> Result<Batch> {
    let text = read_input(path)?;
    let batch = parse_batch(&text).context("Failed to parse batch")?;
    tracing::debug!(
        rooms = batch.rooms.len(),
        requests = batch.requests.len(),
        "batch parsed"
    );
    Ok(batch)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
