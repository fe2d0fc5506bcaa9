//! Error types for dataset construction, lookup, and I/O.

use thiserror::Error;

/// Errors produced by the cubetrack data layer.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Step {step} out of range (dataset has {total} steps)")]
    OutOfRange { step: usize, total: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid step config: {0}")]
    InvalidConfig(String),

    #[error("Dataset contains no trajectories")]
    EmptyDataset,

    #[error("Trajectory {index} has no positions")]
    EmptyTrajectory { index: usize },

    #[error("Trajectory {index} has {found} steps, expected {expected}")]
    RaggedTrajectory {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
