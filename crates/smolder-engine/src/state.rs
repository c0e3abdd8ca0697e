//! Iteration state and the final run report.

use smolder_core::Grid;

/// Progress of one run: iteration count and the current convergence
/// metric (mean absolute temperature change per cell).
///
/// The state is an explicit value threaded through the iteration loop,
/// returned and passed rather than mutated from multiple call sites. It
/// exists only for the duration of a run; afterwards the final value is
/// all that persists.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunState {
    /// Completed iterations.
    pub iterations: u32,
    /// Convergence metric after the last completed iteration.
    pub metric: f32,
}

impl RunState {
    /// State before the first iteration: zero iterations and a metric
    /// strictly above `threshold`, so the loop condition always admits at
    /// least one iteration (subject to the iteration cap).
    pub fn initial(threshold: f32) -> Self {
        Self {
            iterations: 0,
            metric: threshold + 1.0,
        }
    }

    /// Successor state after an iteration that produced `metric`.
    pub fn advance(self, metric: f32) -> Self {
        Self {
            iterations: self.iterations + 1,
            metric,
        }
    }

    /// Whether the loop should run another iteration.
    pub fn continues(&self, max_iterations: u32, threshold: f32) -> bool {
        self.iterations < max_iterations && self.metric > threshold
    }
}

/// Final statistics of a run, for display and for the encoder.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunReport {
    /// Completed iterations.
    pub iterations: u32,
    /// Final convergence metric.
    pub metric: f32,
    /// Coldest temperature in the final grid.
    pub min_temperature: f32,
    /// Hottest temperature in the final grid.
    pub max_temperature: f32,
}

impl RunReport {
    /// Build a report from the final grid and run state.
    pub fn from_run(grid: &Grid, state: RunState) -> Self {
        let (min_temperature, max_temperature) = grid.temperature_range();
        Self {
            iterations: state.iterations,
            metric: state.metric,
            min_temperature,
            max_temperature,
        }
    }
}
