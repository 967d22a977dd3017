//! Parallel CPU backend using Rayon for shared-memory fork-join.

use crate::backend::{BackendType, ComputeError, DeviceInfo, SampleBackend};

/// CPU backend that parallelises the sampling loop across threads via Rayon.
pub struct CpuBackend {
    num_threads: usize,
}

impl CpuBackend {
    /// Create a new CPU backend using all available threads.
    pub fn new() -> Self {
        Self {
            num_threads: rayon::current_num_threads(),
        }
    }

    /// Create a CPU backend with a specified thread count.
    pub fn with_threads(num_threads: usize) -> Self {
        Self { num_threads }
    }
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleBackend for CpuBackend {
    fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            name: format!("CPU ({} threads)", self.num_threads),
            backend_type: BackendType::Parallel,
            threads: Some(self.num_threads),
        }
    }

    fn grid_fill(
        &self,
        rows: usize,
        cols: usize,
        fill_fn: &(dyn Fn(usize, usize) -> [f64; 3] + Send + Sync),
    ) -> Result<Vec<[f64; 3]>, ComputeError> {
        use rayon::prelude::*;

        let cells: Vec<[f64; 3]> = (0..rows * cols)
            .into_par_iter()
            .map(|idx| {
                let row = idx / cols;
                let col = idx % cols;
                fill_fn(row, col)
            })
            .collect();

        Ok(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serial::SerialBackend;

    #[test]
    fn test_cpu_matches_serial() {
        let fill = |row: usize, col: usize| {
            let r = row as f64;
            let c = col as f64;
            [r + c, r * c, (r - c).abs()]
        };

        let serial = SerialBackend.grid_fill(17, 23, &fill).unwrap();
        let parallel = CpuBackend::new().grid_fill(17, 23, &fill).unwrap();

        assert_eq!(serial, parallel);
    }

    #[test]
    fn test_cpu_fill_is_row_major() {
        let cells = CpuBackend::new()
            .grid_fill(3, 2, &|row, col| [row as f64, col as f64, 0.0])
            .unwrap();

        assert_eq!(cells.len(), 6);
        assert_eq!(cells[4], [2.0, 0.0, 0.0]);
    }
}
