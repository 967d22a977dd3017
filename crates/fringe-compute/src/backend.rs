//! Sample backend trait and device abstraction.
//!
//! The [`SampleBackend`] trait abstracts over execution strategies for the
//! per-cell sampling loop so that the physics code in `fringe-core` remains
//! agnostic of how the grid is walked.

use thiserror::Error;

/// Errors originating from compute backends.
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("Backend not available: {0}")]
    Unavailable(String),

    #[error("Grid shape error: {0}")]
    Shape(String),
}

/// Describes the execution strategy of a backend.
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub name: String,
    pub backend_type: BackendType,
    pub threads: Option<usize>,
}

/// The type of compute backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    Serial,
    Parallel,
}

/// Abstraction over grid-sampling execution strategies.
///
/// The sampling loop is embarrassingly parallel: every grid cell is an
/// independent closed-form evaluation with no shared mutable state.
/// Implementations choose how to traverse the flattened index space; they
/// must not change what is computed per cell.
pub trait SampleBackend: Send + Sync {
    /// Return information about the execution strategy.
    fn device_info(&self) -> DeviceInfo;

    /// Fill a `rows x cols` grid of three-channel cells.
    ///
    /// `fill_fn` receives `(row, col)` and returns the channel values for
    /// that cell. The result is the flattened grid in row-major order.
    fn grid_fill(
        &self,
        rows: usize,
        cols: usize,
        fill_fn: &(dyn Fn(usize, usize) -> [f64; 3] + Send + Sync),
    ) -> Result<Vec<[f64; 3]>, ComputeError>;
}
