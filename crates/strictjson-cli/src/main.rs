//! `strictjson` CLI: check, re-encode, and run conformance suites from the
//! command line.
//!
//! ## Usage
//!
//! ```sh
//! # Check that stdin is strict JSON
//! echo '{"a": [1, 2.0]}' | strictjson check
//!
//! # Re-emit in canonical layout (stdin → stdout)
//! echo '{ "a" :[1,2] }' | strictjson decode
//!
//! # Same, file to file
//! strictjson decode -i data.json -o data.canonical.json
//!
//! # Convert arbitrary JSON (read leniently) into canonical strict text
//! strictjson encode -i data.json
//!
//! # Run a directory of y_/n_/i_ labeled files
//! strictjson suite test_parsing/ --json
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

mod suite;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;
use strictjson::limits::DEFAULT_MAX_DEPTH;
use strictjson::{Decoder, Limits};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "strictjson", version, about = "Strict JSON codec CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Maximum array/object nesting depth accepted by the decoder
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode strict JSON and re-emit it in canonical layout
    Decode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Read any JSON document and encode it as canonical strict JSON
    Encode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Report whether the input is strict JSON
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Run every y_/n_/i_ labeled *.json file in a directory
    Suite {
        /// Directory holding the test files
        dir: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let decoder = Decoder::new(Limits::default().with_max_depth(cli.max_depth));
    debug!(max_depth = cli.max_depth, "decoder configured");

    match cli.command {
        Commands::Decode { input, output } => {
            let bytes = read_input(input.as_deref())?;
            let value = decoder
                .decode_slice(&bytes)
                .context("Failed to decode JSON")?;
            let text = strictjson::encode(&value).context("Failed to encode JSON")?;
            write_output(output.as_deref(), &text)?;
        }
        Commands::Encode { input, output } => {
            let bytes = read_input(input.as_deref())?;
            let host: serde_json::Value =
                serde_json::from_slice(&bytes).context("Failed to read input as JSON")?;
            let text = strictjson::to_string(&host).context("Failed to encode JSON")?;
            write_output(output.as_deref(), &text)?;
        }
        Commands::Check { input } => {
            let bytes = read_input(input.as_deref())?;
            let value = decoder
                .decode_slice(&bytes)
                .context("Input is not strict JSON")?;
            println!("ok: {}", value.type_name());
        }
        Commands::Suite { dir, json } => {
            let report = suite::run(&dir, &decoder)?;
            info!(
                passed = report.passed,
                failed = report.failed(),
                skipped = report.skipped,
                "suite finished"
            );
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report).context("Failed to render report")?
                );
            } else {
                print!("{}", report.render_text());
            }
            if report.failed() > 0 {
                process::exit(1);
            }
        }
    }

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(path: Option<&std::path::Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))
        }
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&std::path::Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
