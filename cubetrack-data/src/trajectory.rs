//! Trajectories and the dataset that groups them.

use crate::error::DataError;
use crate::types::Position;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The positions of one object, one entry per step.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trajectory {
    positions: Vec<Position>,
}

impl Trajectory {
    pub fn new(positions: Vec<Position>) -> Self {
        Self { positions }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position at `step`, if the trajectory is that long.
    pub fn get(&self, step: usize) -> Option<Position> {
        self.positions.get(step).copied()
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Drop every position past `len`.
    pub fn truncate(&mut self, len: usize) {
        self.positions.truncate(len);
    }
}

impl From<Vec<Position>> for Trajectory {
    fn from(positions: Vec<Position>) -> Self {
        Self::new(positions)
    }
}

impl FromIterator<Position> for Trajectory {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// An ordered set of equal-length trajectories.
///
/// Trajectory order is object identity: index `i` in every step projection
/// refers to the same object. A constructed `Dataset` is never empty and
/// every trajectory has the same, non-zero number of steps.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    trajectories: Vec<Trajectory>,
}

impl Dataset {
    /// Build a dataset, checking that all trajectories share one non-zero length.
    pub fn new(trajectories: Vec<Trajectory>) -> Result<Self, DataError> {
        let expected = trajectories.first().ok_or(DataError::EmptyDataset)?.len();

        for (index, trajectory) in trajectories.iter().enumerate() {
            if trajectory.is_empty() {
                return Err(DataError::EmptyTrajectory { index });
            }
            if trajectory.len() != expected {
                return Err(DataError::RaggedTrajectory {
                    index,
                    expected,
                    found: trajectory.len(),
                });
            }
        }

        debug!(
            "Dataset built: {} trajectories x {} steps",
            trajectories.len(),
            expected
        );
        Ok(Self { trajectories })
    }

    /// Number of trajectories (objects).
    pub fn len(&self) -> usize {
        self.trajectories.len()
    }

    /// Always false for a constructed dataset; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.trajectories.is_empty()
    }

    /// Number of steps, read from the first trajectory.
    pub fn step_count(&self) -> usize {
        self.trajectories[0].len()
    }

    pub fn trajectory(&self, index: usize) -> Option<&Trajectory> {
        self.trajectories.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Trajectory> {
        self.trajectories.iter()
    }

    pub fn into_trajectories(self) -> Vec<Trajectory> {
        self.trajectories
    }

    /// Positions of every object at `step`, in dataset order.
    pub fn coordinates_at_step(&self, step: usize) -> Result<Vec<Position>, DataError> {
        let total = self.step_count();
        if step >= total {
            return Err(DataError::OutOfRange { step, total });
        }
        Ok(self
            .trajectories
            .iter()
            .map(|t| t.positions[step])
            .collect())
    }
}

impl<'de> Deserialize<'de> for Dataset {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let trajectories = Vec::<Trajectory>::deserialize(deserializer)?;
        Dataset::new(trajectories).map_err(serde::de::Error::custom)
    }
}
