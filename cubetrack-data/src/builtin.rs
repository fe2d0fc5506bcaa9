//! The compiled-in three-cube dataset.
//!
//! Each cube slides one unit along +X per step; the cubes start one unit
//! apart, so they move in lockstep.

use crate::config::{DEFAULT_STEP_DURATION_MS, DEFAULT_UPDATE_INTERVAL_MS, StepConfig};
use crate::trajectory::{Dataset, Trajectory};
use crate::types::Position;

/// Number of steps in every built-in trajectory.
pub const CUBE_STEPS: usize = 11;

// Rows are cubes (red, teal, blue), columns are steps 0..=10.
const CUBE_POSITIONS: [[Position; CUBE_STEPS]; 3] = [
    [
        Position::new(0.0, 0.0, 0.0),
        Position::new(1.0, 0.0, 0.0),
        Position::new(2.0, 0.0, 0.0),
        Position::new(3.0, 0.0, 0.0),
        Position::new(4.0, 0.0, 0.0),
        Position::new(5.0, 0.0, 0.0),
        Position::new(6.0, 0.0, 0.0),
        Position::new(7.0, 0.0, 0.0),
        Position::new(8.0, 0.0, 0.0),
        Position::new(9.0, 0.0, 0.0),
        Position::new(10.0, 0.0, 0.0),
    ],
    [
        Position::new(1.0, 0.0, 0.0),
        Position::new(2.0, 0.0, 0.0),
        Position::new(3.0, 0.0, 0.0),
        Position::new(4.0, 0.0, 0.0),
        Position::new(5.0, 0.0, 0.0),
        Position::new(6.0, 0.0, 0.0),
        Position::new(7.0, 0.0, 0.0),
        Position::new(8.0, 0.0, 0.0),
        Position::new(9.0, 0.0, 0.0),
        Position::new(10.0, 0.0, 0.0),
        Position::new(11.0, 0.0, 0.0),
    ],
    [
        Position::new(2.0, 0.0, 0.0),
        Position::new(3.0, 0.0, 0.0),
        Position::new(4.0, 0.0, 0.0),
        Position::new(5.0, 0.0, 0.0),
        Position::new(6.0, 0.0, 0.0),
        Position::new(7.0, 0.0, 0.0),
        Position::new(8.0, 0.0, 0.0),
        Position::new(9.0, 0.0, 0.0),
        Position::new(10.0, 0.0, 0.0),
        Position::new(11.0, 0.0, 0.0),
        Position::new(12.0, 0.0, 0.0),
    ],
];

/// The built-in cube trajectories.
pub fn cube_dataset() -> Dataset {
    let trajectories = CUBE_POSITIONS
        .iter()
        .map(|row| Trajectory::new(row.to_vec()))
        .collect();
    // The table is non-empty and rectangular by construction.
    match Dataset::new(trajectories) {
        Ok(dataset) => dataset,
        Err(err) => unreachable!("built-in cube table is invalid: {err}"),
    }
}

/// Timing for the built-in dataset: one-second steps, 50 ms polling.
pub fn cube_config() -> StepConfig {
    match StepConfig::new(
        DEFAULT_STEP_DURATION_MS,
        CUBE_STEPS,
        DEFAULT_UPDATE_INTERVAL_MS,
    ) {
        Ok(config) => config,
        Err(err) => unreachable!("built-in cube config is invalid: {err}"),
    }
}
