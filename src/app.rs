//! Dataset selection, logging setup, and the polling replay loop.

use crate::replay::Replay;
use cubetrack_data::telemetry::replay_config;
use cubetrack_data::{
    DEFAULT_STEP_DURATION_MS, DEFAULT_UPDATE_INTERVAL_MS, DataError, Dataset, IngestOptions,
    StepConfig, build_dataset, cube_config, cube_dataset, load_dataset, load_telemetry,
    save_dataset,
};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

/// Errors surfaced by the replay binary.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Conflicting sources: {0}")]
    ConflictingSources(String),
}

/// Where the dataset comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetSource {
    Builtin,
    Json(PathBuf),
    Telemetry(PathBuf),
}

/// Logging configuration.
pub struct LoggingConfig {
    pub level: String,
}

/// Everything the binary needs to run, resolved from the command line.
pub struct RunConfig {
    pub source: DatasetSource,
    pub step_ms: Option<f64>,
    pub interval_ms: Option<f64>,
    pub cycles: u32,
    pub export: Option<PathBuf>,
    pub logging: LoggingConfig,
}

impl DatasetSource {
    /// Pick a source from the optional `--dataset` and `--telemetry` flags.
    pub fn from_flags(
        dataset: Option<PathBuf>,
        telemetry: Option<PathBuf>,
    ) -> Result<Self, ReplayError> {
        match (dataset, telemetry) {
            (Some(_), Some(_)) => Err(ReplayError::ConflictingSources(
                "use either --dataset or --telemetry, not both".to_string(),
            )),
            (Some(path), None) => Ok(Self::Json(path)),
            (None, Some(path)) => Ok(Self::Telemetry(path)),
            (None, None) => Ok(Self::Builtin),
        }
    }

    /// Load the dataset and its default timing.
    pub fn load(&self) -> Result<(Dataset, StepConfig), DataError> {
        match self {
            Self::Builtin => Ok((cube_dataset(), cube_config())),
            Self::Json(path) => {
                let dataset = load_dataset(path)?;
                let config = StepConfig::for_dataset(
                    &dataset,
                    DEFAULT_STEP_DURATION_MS,
                    DEFAULT_UPDATE_INTERVAL_MS,
                )?;
                Ok((dataset, config))
            }
            Self::Telemetry(path) => {
                let objects = load_telemetry(path)?;
                let dataset = build_dataset(&objects, &IngestOptions::default())?;
                let config = replay_config(&dataset)?;
                Ok((dataset, config))
            }
        }
    }
}

/// Apply command-line timing overrides to a loaded config.
pub fn apply_overrides(
    config: StepConfig,
    step_ms: Option<f64>,
    interval_ms: Option<f64>,
) -> Result<StepConfig, DataError> {
    StepConfig::new(
        step_ms.unwrap_or(config.step_duration_ms()),
        config.total_steps(),
        interval_ms.unwrap_or(config.update_interval_ms()),
    )
}

pub fn init_logging(logging: &LoggingConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level)),
        )
        .with_target(false)
        .init();
}

pub fn run(config: RunConfig) -> Result<(), ReplayError> {
    init_logging(&config.logging);

    let (dataset, step_config) = config.source.load()?;
    let step_config = apply_overrides(step_config, config.step_ms, config.interval_ms)?;
    info!(
        "Dataset ready: {} objects x {} steps, {} ms per step",
        dataset.len(),
        step_config.total_steps(),
        step_config.step_duration_ms()
    );

    if let Some(path) = &config.export {
        save_dataset(path, &dataset)?;
        info!("Exported dataset to {}", path.display());
        return Ok(());
    }

    replay(&dataset, step_config, config.cycles)
}

/// Poll the step mapping at the update interval until `cycles` cycles have played.
fn replay(dataset: &Dataset, config: StepConfig, cycles: u32) -> Result<(), ReplayError> {
    let interval = Duration::from_secs_f64(config.update_interval_ms() / 1000.0);
    let mut replay = Replay::new(dataset, config);
    let start = Instant::now();

    loop {
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        if replay.finished(elapsed_ms, cycles) {
            break;
        }
        if let Some(change) = replay.poll(elapsed_ms)? {
            info!("cycle {} step {}", change.cycle, change.step);
            for (index, position) in change.positions.iter().enumerate() {
                debug!(
                    "  object {index}: ({:.3}, {:.3}, {:.3})",
                    position.x, position.y, position.z
                );
            }
        }
        thread::sleep(interval);
    }

    info!("Replay finished after {} cycle(s)", cycles);
    Ok(())
}
