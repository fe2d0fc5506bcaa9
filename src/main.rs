//! Cubetrack
//!
//! Replays a cube trajectory dataset on the wall clock, logging object
//! positions whenever the active step changes. Can also export any
//! dataset source (built-in, JSON, or raw telemetry) to JSON.

mod app;
mod replay;

use app::{DatasetSource, LoggingConfig, RunConfig};
use clap::Parser;
use std::path::PathBuf;

/// Cubetrack - looping playback of time-stepped cube positions
#[derive(Parser, Debug)]
#[command(name = "cubetrack")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON dataset to play instead of the built-in cubes
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// Raw telemetry JSON to ingest and play at 30x speed
    #[arg(short, long)]
    telemetry: Option<PathBuf>,

    /// Override the step duration in milliseconds
    #[arg(long)]
    step_ms: Option<f64>,

    /// Override the polling interval in milliseconds
    #[arg(long)]
    interval_ms: Option<f64>,

    /// Number of full cycles to play
    #[arg(short, long, default_value_t = 1)]
    cycles: u32,

    /// Write the dataset as JSON to this path and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    let source = match DatasetSource::from_flags(args.dataset, args.telemetry) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Application error: {}", e);
            std::process::exit(1);
        }
    };

    let config = RunConfig {
        source,
        step_ms: args.step_ms,
        interval_ms: args.interval_ms,
        cycles: args.cycles,
        export: args.export,
        logging: LoggingConfig {
            level: args.log_level,
        },
    };

    if let Err(e) = app::run(config) {
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}
