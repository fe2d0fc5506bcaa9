//! Step tracking for a polled replay.

use cubetrack_data::{DataError, Dataset, Position, StepConfig};

/// Positions for a step that just became active.
#[derive(Debug, Clone, PartialEq)]
pub struct StepChange {
    pub step: usize,
    /// Number of completed cycles before this step.
    pub cycle: u64,
    pub positions: Vec<Position>,
}

/// Tracks which step is showing and reports only when it changes.
pub struct Replay<'a> {
    dataset: &'a Dataset,
    config: StepConfig,
    current: Option<usize>,
}

impl<'a> Replay<'a> {
    pub fn new(dataset: &'a Dataset, config: StepConfig) -> Self {
        Self {
            dataset,
            config,
            current: None,
        }
    }

    /// Poll at `elapsed_ms`. Returns the new step's positions if the step changed.
    pub fn poll(&mut self, elapsed_ms: f64) -> Result<Option<StepChange>, DataError> {
        // Step and cycle both come from one absolute index so they never disagree.
        let absolute = self.config.absolute_step_from_time(elapsed_ms)?;
        let total = self.config.total_steps() as u64;
        let step = (absolute % total) as usize;
        if self.current == Some(step) {
            return Ok(None);
        }
        self.current = Some(step);

        let positions = self.dataset.coordinates_at_step(step)?;
        Ok(Some(StepChange {
            step,
            cycle: absolute / total,
            positions,
        }))
    }

    /// True once `elapsed_ms` covers `cycles` full cycles.
    pub fn finished(&self, elapsed_ms: f64, cycles: u32) -> bool {
        elapsed_ms >= self.config.cycle_duration_ms() * f64::from(cycles)
    }
}
