//! Core position type shared by trajectories and telemetry ingest.
//!
//! Positions are plain CPU-side values; renderers convert them to
//! `glam::Vec3` (or their own vertex types) at the edge.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A point in scene space. Units are whatever the dataset was authored in.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a position from its three coordinates.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Convert to a glam vector.
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// True when every coordinate is exactly zero.
    pub fn is_origin(&self) -> bool {
        *self == Self::ZERO
    }
}

impl From<Vec3> for Position {
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Position> for Vec3 {
    fn from(p: Position) -> Self {
        p.to_vec3()
    }
}

impl From<[f32; 3]> for Position {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}
