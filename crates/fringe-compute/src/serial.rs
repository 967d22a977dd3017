//! Serial backend: a plain run-to-completion loop on the calling thread.

use crate::backend::{BackendType, ComputeError, DeviceInfo, SampleBackend};

/// Baseline backend that walks the grid cell by cell.
///
/// One full pass is bounded (grid sides of a few hundred samples) and each
/// cell is O(1) closed-form arithmetic, so the serial path stays fast
/// relative to interaction latency.
pub struct SerialBackend;

impl SampleBackend for SerialBackend {
    fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            name: "Serial".to_string(),
            backend_type: BackendType::Serial,
            threads: Some(1),
        }
    }

    fn grid_fill(
        &self,
        rows: usize,
        cols: usize,
        fill_fn: &(dyn Fn(usize, usize) -> [f64; 3] + Send + Sync),
    ) -> Result<Vec<[f64; 3]>, ComputeError> {
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(fill_fn(row, col));
            }
        }
        Ok(cells)
    }
}
