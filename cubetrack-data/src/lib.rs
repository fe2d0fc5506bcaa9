//! Cubetrack Data Crate
//!
//! Time-indexed positions for a small set of animated objects, and the
//! mapping from elapsed time to a looping step index. Renderers read a
//! [`Dataset`] and a [`StepConfig`]; nothing here draws anything.

pub mod builtin;
pub mod config;
pub mod error;
pub mod io;
pub mod telemetry;
pub mod trajectory;
pub mod types;

pub use builtin::{cube_config, cube_dataset};
pub use config::{
    DEFAULT_STEP_DURATION_MS, DEFAULT_UPDATE_INTERVAL_MS, REPLAY_STEP_DURATION_MS, StepConfig,
};
pub use error::DataError;
pub use io::{load_dataset, load_telemetry, save_dataset};
pub use telemetry::{IngestOptions, ObjectTelemetry, TelemetrySample, build_dataset};
pub use trajectory::{Dataset, Trajectory};
pub use types::Position;
