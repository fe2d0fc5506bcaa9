//! Telemetry ingest: raw timestamped position samples to a replayable dataset.
//!
//! Source telemetry is sampled irregularly and several times per second, in
//! a Z-up frame with large coordinates. Ingest keeps one position per second,
//! rescales, and converts to a Y-up frame so the result can be replayed on
//! the same step grid as the built-in cubes.

use crate::config::{DEFAULT_UPDATE_INTERVAL_MS, REPLAY_STEP_DURATION_MS, StepConfig};
use crate::error::DataError;
use crate::trajectory::{Dataset, Trajectory};
use crate::types::Position;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// One raw sample. Missing coordinates mean the source had no fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    pub time_s: f64,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

impl TelemetrySample {
    pub fn new(time_s: f64, x: f64, y: f64, z: f64) -> Self {
        Self {
            time_s,
            x: Some(x),
            y: Some(y),
            z: Some(z),
        }
    }
}

/// All samples recorded for one object (e.g. one car).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectTelemetry {
    pub id: String,
    pub samples: Vec<TelemetrySample>,
}

/// Ingest parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IngestOptions {
    /// Every coordinate is divided by this.
    pub scale_divisor: f64,
    /// Swap source Y and Z so that source Z (up) becomes Y.
    pub swap_yz: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            scale_divisor: 100.0,
            swap_yz: true,
        }
    }
}

/// Reduce one object's samples to a one-position-per-second trajectory.
///
/// Within each whole second, every axis takes the first present, non-NaN
/// value in time order, so a sample without a fix does not hide later ones.
pub fn extract_trajectory(samples: &[TelemetrySample], options: &IngestOptions) -> Trajectory {
    let mut sorted: Vec<&TelemetrySample> =
        samples.iter().filter(|s| s.time_s.is_finite()).collect();
    sorted.sort_by(|a, b| a.time_s.total_cmp(&b.time_s));

    let mut seconds: BTreeMap<i64, [Option<f64>; 3]> = BTreeMap::new();
    for sample in sorted {
        let axes = seconds.entry(sample.time_s.floor() as i64).or_default();
        for (slot, value) in axes.iter_mut().zip([sample.x, sample.y, sample.z]) {
            if slot.is_none() {
                *slot = value.filter(|v| !v.is_nan());
            }
        }
    }

    let mut positions = Vec::with_capacity(seconds.len());
    for axes in seconds.into_values() {
        let [Some(x), Some(y), Some(z)] = axes else {
            continue;
        };

        let (x, y, z) = (
            x / options.scale_divisor,
            y / options.scale_divisor,
            z / options.scale_divisor,
        );
        let position = if options.swap_yz {
            Position::new(x as f32, z as f32, y as f32)
        } else {
            Position::new(x as f32, y as f32, z as f32)
        };

        if !position.is_origin() {
            positions.push(position);
        }
    }

    Trajectory::new(positions)
}

/// Build a dataset from several objects, truncated to the shortest trajectory.
///
/// Objects with no usable positions are skipped.
#[tracing::instrument(skip_all, fields(objects = objects.len()))]
pub fn build_dataset(
    objects: &[ObjectTelemetry],
    options: &IngestOptions,
) -> Result<Dataset, DataError> {
    let mut trajectories = Vec::with_capacity(objects.len());

    for object in objects {
        let trajectory = extract_trajectory(&object.samples, options);
        if trajectory.is_empty() {
            warn!("No usable positions for object {}", object.id);
            continue;
        }
        debug!(
            "Object {}: {} samples -> {} positions",
            object.id,
            object.samples.len(),
            trajectory.len()
        );
        trajectories.push(trajectory);
    }

    let min_len = trajectories
        .iter()
        .map(Trajectory::len)
        .min()
        .ok_or(DataError::EmptyDataset)?;

    for trajectory in &mut trajectories {
        trajectory.truncate(min_len);
    }

    info!(
        "Telemetry ingested: {} objects x {} steps",
        trajectories.len(),
        min_len
    );
    Dataset::new(trajectories)
}

/// Timing for replaying ingested telemetry at 30x speed.
pub fn replay_config(dataset: &Dataset) -> Result<StepConfig, DataError> {
    StepConfig::for_dataset(dataset, REPLAY_STEP_DURATION_MS, DEFAULT_UPDATE_INTERVAL_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downsamples_to_first_sample_per_second() {
        let samples = vec![
            TelemetrySample::new(1.7, 300.0, 400.0, 500.0),
            TelemetrySample::new(0.2, 100.0, 200.0, 300.0),
            TelemetrySample::new(0.9, 999.0, 999.0, 999.0),
            TelemetrySample::new(1.1, 200.0, 300.0, 400.0),
        ];
        let trajectory = extract_trajectory(&samples, &IngestOptions::default());
        assert_eq!(trajectory.len(), 2);
        // Scaled by 1/100, source Y and Z swapped.
        assert_eq!(trajectory.get(0), Some(Position::new(1.0, 3.0, 2.0)));
        assert_eq!(trajectory.get(1), Some(Position::new(2.0, 4.0, 3.0)));
    }

    #[test]
    fn test_missing_fix_filled_from_later_samples_in_same_second() {
        let samples = vec![
            TelemetrySample {
                time_s: 0.1,
                x: None,
                y: None,
                z: None,
            },
            TelemetrySample::new(0.5, 100.0, 200.0, 300.0),
            TelemetrySample::new(1.0, 200.0, 200.0, 300.0),
        ];
        let trajectory = extract_trajectory(&samples, &IngestOptions::default());
        assert_eq!(
            trajectory.positions(),
            &[Position::new(1.0, 3.0, 2.0), Position::new(2.0, 3.0, 2.0)]
        );
    }

    #[test]
    fn test_axes_filled_independently() {
        let samples = vec![
            TelemetrySample {
                time_s: 4.0,
                x: Some(100.0),
                y: None,
                z: Some(f64::NAN),
            },
            TelemetrySample::new(4.3, 900.0, 200.0, 300.0),
            TelemetrySample::new(4.6, 900.0, 900.0, 900.0),
        ];
        let trajectory = extract_trajectory(&samples, &IngestOptions::default());
        // x from t=4.0, y and z from t=4.3.
        assert_eq!(trajectory.positions(), &[Position::new(1.0, 3.0, 2.0)]);
    }

    #[test]
    fn test_drops_missing_and_zero_positions() {
        let samples = vec![
            TelemetrySample::new(0.0, 0.0, 0.0, 0.0),
            TelemetrySample {
                time_s: 1.0,
                x: Some(100.0),
                y: None,
                z: Some(100.0),
            },
            TelemetrySample::new(2.0, f64::NAN, 1.0, 1.0),
            TelemetrySample::new(3.0, 100.0, 0.0, 0.0),
        ];
        let trajectory = extract_trajectory(&samples, &IngestOptions::default());
        assert_eq!(trajectory.positions(), &[Position::new(1.0, 0.0, 0.0)]);
    }

    #[test]
    fn test_without_axis_swap() {
        let options = IngestOptions {
            scale_divisor: 1.0,
            swap_yz: false,
        };
        let samples = [TelemetrySample::new(0.0, 1.0, 2.0, 3.0)];
        let trajectory = extract_trajectory(&samples, &options);
        assert_eq!(trajectory.get(0), Some(Position::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_build_dataset_truncates_and_skips_empty() {
        let objects = vec![
            ObjectTelemetry {
                id: "4".to_string(),
                samples: (0..5)
                    .map(|s| TelemetrySample::new(s as f64, 100.0 * (s + 1) as f64, 0.0, 0.0))
                    .collect(),
            },
            ObjectTelemetry {
                id: "27".to_string(),
                samples: Vec::new(),
            },
            ObjectTelemetry {
                id: "81".to_string(),
                samples: (0..3)
                    .map(|s| TelemetrySample::new(s as f64, 0.0, 0.0, 100.0))
                    .collect(),
            },
        ];
        let dataset = build_dataset(&objects, &IngestOptions::default()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.step_count(), 3);
        assert_eq!(
            dataset.coordinates_at_step(2).unwrap(),
            vec![Position::new(3.0, 0.0, 0.0), Position::new(0.0, 1.0, 0.0)]
        );

        let config = replay_config(&dataset).unwrap();
        assert_eq!(config.total_steps(), 3);
        assert_eq!(config.step_duration_ms(), REPLAY_STEP_DURATION_MS);
    }

    #[test]
    fn test_build_dataset_without_usable_objects() {
        let objects = vec![ObjectTelemetry {
            id: "1".to_string(),
            samples: vec![TelemetrySample::new(0.0, 0.0, 0.0, 0.0)],
        }];
        assert!(matches!(
            build_dataset(&objects, &IngestOptions::default()),
            Err(DataError::EmptyDataset)
        ));
    }
}
