//! Step timing: how wall-clock time maps onto the dataset's step grid.

use crate::error::DataError;
use crate::trajectory::Dataset;
use serde::{Deserialize, Serialize};

/// One step per second.
pub const DEFAULT_STEP_DURATION_MS: f64 = 1000.0;

/// Suggested polling interval (20 updates per second).
pub const DEFAULT_UPDATE_INTERVAL_MS: f64 = 50.0;

/// One-second samples replayed at 30x speed.
pub const REPLAY_STEP_DURATION_MS: f64 = 33.33;

/// Timing parameters for a dataset. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawStepConfig")]
pub struct StepConfig {
    step_duration_ms: f64,
    total_steps: usize,
    update_interval_ms: f64,
}

// Unchecked wire form; converted through `StepConfig::new`.
#[derive(Deserialize)]
struct RawStepConfig {
    step_duration_ms: f64,
    total_steps: usize,
    update_interval_ms: f64,
}

impl TryFrom<RawStepConfig> for StepConfig {
    type Error = DataError;

    fn try_from(raw: RawStepConfig) -> Result<Self, Self::Error> {
        Self::new(raw.step_duration_ms, raw.total_steps, raw.update_interval_ms)
    }
}

impl StepConfig {
    pub fn new(
        step_duration_ms: f64,
        total_steps: usize,
        update_interval_ms: f64,
    ) -> Result<Self, DataError> {
        if !(step_duration_ms.is_finite() && step_duration_ms > 0.0) {
            return Err(DataError::InvalidConfig(format!(
                "step duration must be positive, got {step_duration_ms}"
            )));
        }
        if total_steps == 0 {
            return Err(DataError::InvalidConfig(
                "total steps must be non-zero".to_string(),
            ));
        }
        if !(update_interval_ms.is_finite() && update_interval_ms > 0.0) {
            return Err(DataError::InvalidConfig(format!(
                "update interval must be positive, got {update_interval_ms}"
            )));
        }
        Ok(Self {
            step_duration_ms,
            total_steps,
            update_interval_ms,
        })
    }

    /// Config whose step count is taken from `dataset`.
    pub fn for_dataset(
        dataset: &Dataset,
        step_duration_ms: f64,
        update_interval_ms: f64,
    ) -> Result<Self, DataError> {
        Self::new(step_duration_ms, dataset.step_count(), update_interval_ms)
    }

    pub fn step_duration_ms(&self) -> f64 {
        self.step_duration_ms
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn update_interval_ms(&self) -> f64 {
        self.update_interval_ms
    }

    /// Time taken to play every step once.
    pub fn cycle_duration_ms(&self) -> f64 {
        self.step_duration_ms * self.total_steps as f64
    }

    /// Number of whole steps elapsed since time zero, without looping.
    pub fn absolute_step_from_time(&self, elapsed_ms: f64) -> Result<u64, DataError> {
        if !elapsed_ms.is_finite() || elapsed_ms < 0.0 {
            return Err(DataError::InvalidInput(format!(
                "elapsed time must be finite and non-negative, got {elapsed_ms}"
            )));
        }
        // Saturates for absurdly large times rather than wrapping.
        Ok((elapsed_ms / self.step_duration_ms).floor() as u64)
    }

    /// Step active at `elapsed_ms`, looping over the step grid.
    ///
    /// A time exactly on a boundary belongs to the step that starts there.
    pub fn current_step_from_time(&self, elapsed_ms: f64) -> Result<usize, DataError> {
        let absolute = self.absolute_step_from_time(elapsed_ms)?;
        Ok((absolute % self.total_steps as u64) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> StepConfig {
        StepConfig::new(1000.0, 11, 50.0).unwrap()
    }

    #[test]
    fn test_zero_is_first_step() {
        assert_eq!(config().current_step_from_time(0.0).unwrap(), 0);
    }

    #[test]
    fn test_boundary_rounds_into_new_step() {
        let c = config();
        assert_eq!(c.current_step_from_time(999.999).unwrap(), 0);
        assert_eq!(c.current_step_from_time(1000.0).unwrap(), 1);
        assert_eq!(c.current_step_from_time(2500.0).unwrap(), 2);
    }

    #[test]
    fn test_wraps_after_full_cycle() {
        let c = config();
        assert_eq!(c.cycle_duration_ms(), 11000.0);
        assert_eq!(c.current_step_from_time(c.cycle_duration_ms()).unwrap(), 0);
        assert_eq!(
            c.current_step_from_time(c.cycle_duration_ms() - 1.0).unwrap(),
            10
        );
        assert_eq!(c.current_step_from_time(3.0 * 11000.0 + 4200.0).unwrap(), 4);
    }

    #[test]
    fn test_result_always_in_range() {
        let c = StepConfig::new(33.33, 7, 50.0).unwrap();
        let mut t = 0.0;
        while t < 10_000.0 {
            assert!(c.current_step_from_time(t).unwrap() < 7);
            t += 12.5;
        }
    }

    #[test]
    fn test_rejects_negative_and_non_finite_time() {
        let c = config();
        assert!(matches!(
            c.current_step_from_time(-1.0),
            Err(DataError::InvalidInput(_))
        ));
        assert!(c.current_step_from_time(f64::NAN).is_err());
        assert!(c.current_step_from_time(f64::INFINITY).is_err());
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert!(matches!(
            StepConfig::new(0.0, 11, 50.0),
            Err(DataError::InvalidConfig(_))
        ));
        assert!(StepConfig::new(1000.0, 0, 50.0).is_err());
        assert!(StepConfig::new(1000.0, 11, -5.0).is_err());
        assert!(StepConfig::new(f64::NAN, 11, 50.0).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let zero_steps = r#"{"step_duration_ms":1000.0,"total_steps":0,"update_interval_ms":50.0}"#;
        assert!(serde_json::from_str::<StepConfig>(zero_steps).is_err());

        let negative = r#"{"step_duration_ms":-1.0,"total_steps":11,"update_interval_ms":50.0}"#;
        assert!(serde_json::from_str::<StepConfig>(negative).is_err());

        let json = serde_json::to_string(&config()).unwrap();
        let parsed: StepConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config());
        assert_eq!(parsed.current_step_from_time(2500.0).unwrap(), 2);
    }

    #[test]
    fn test_absolute_step_does_not_loop() {
        let c = config();
        assert_eq!(c.absolute_step_from_time(0.0).unwrap(), 0);
        assert_eq!(c.absolute_step_from_time(23_500.0).unwrap(), 23);
        assert!(c.absolute_step_from_time(-0.5).is_err());
    }
}
