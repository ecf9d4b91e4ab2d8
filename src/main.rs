//! `qgrep` binary: print the lines of a file that contain a target string,
//! found with one simulated Grover search per target character.
//!
//! # Usage
//!
//! ```bash
//! qgrep notes.txt cat
//! qgrep notes.txt cat --shots 2048 --seed 7 --log-level debug
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use qgrep::{CharMatrix, SearchConfig, SubstringMatcher, encode_str};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "qgrep",
    version,
    about = "Substring search using simulated Grover search circuits",
    long_about = None
)]
struct Args {
    /// File to search.
    filename: PathBuf,

    /// String to search for.
    target: String,

    /// Shots sampled per target character.
    #[arg(long, default_value_t = qgrep::core::constants::DEFAULT_SHOTS)]
    shots: u32,

    /// Grover iterations per search (derived from the register width if omitted).
    #[arg(long)]
    iterations: Option<u32>,

    /// Seed for the measurement sampler, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Widest search register to simulate.
    #[arg(long, default_value_t = qgrep::core::constants::DEFAULT_MAX_QUBITS)]
    max_qubits: u32,

    /// Print the circuit of the first character's search to stderr.
    #[arg(long, default_value_t = false)]
    show_circuit: bool,

    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Args {
    fn search_config(&self) -> SearchConfig {
        SearchConfig {
            shots: self.shots,
            iterations: self.iterations,
            seed: self.seed,
            max_qubits: self.max_qubits,
        }
    }
}

fn main() {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&args) {
        error!("{e:#}");
        eprintln!("qgrep: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let text = std::fs::read_to_string(&args.filename)
        .with_context(|| format!("failed to read {}", args.filename.display()))?;
    let haystack = CharMatrix::from_text(&text);
    info!(rows = haystack.rows(), width = haystack.width(), "loaded {}", args.filename.display());

    let config = args.search_config();
    let mut matcher = SubstringMatcher::new(config.simulator(), config).context("invalid search settings")?;
    if args.show_circuit {
        matcher = matcher.inspect_circuits(|offset, circuit| {
            if offset == 0 {
                eprintln!("{}", circuit);
            }
        });
    }

    let lines = matcher
        .find(&haystack, &encode_str(&args.target))
        .with_context(|| format!("search for {:?} failed", args.target))?;

    for &line in &lines {
        let content = haystack.row_text(line).unwrap_or_default();
        println!("{}: {}", line + 1, content);
    }
    println!("{} matching line(s)", lines.len());
    Ok(())
}
