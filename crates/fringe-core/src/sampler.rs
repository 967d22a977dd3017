//! Two-beam interference sampling over a square grid.
//!
//! Each pass evaluates both beams at every point of a uniform grid spanning
//! the field of view, applies the configured phase offset to the second
//! beam, and combines the fields according to the coherence rule: when the
//! wavelengths match to within [`COHERENCE_TOLERANCE_NM`] the complex
//! fields superpose before squaring; otherwise the intensities add. This is
//! a hard branch with no partial-coherence interpolation.

use ndarray::Array2;
use num_complex::Complex64;
use thiserror::Error;

use fringe_compute::{ComputeError, SampleBackend};

use crate::beam::GaussianBeam;
use crate::types::{InterferencePattern, SceneParams};

/// Wavelength difference (nm) below which two beams are treated as
/// mutually coherent.
pub const COHERENCE_TOLERANCE_NM: f64 = 0.1;

/// Errors from the scene sampler.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Field of view must be positive, got {field_of_view_um} um")]
    NonPositiveFieldOfView { field_of_view_um: f64 },

    #[error("Compute backend error: {0}")]
    Compute(#[from] ComputeError),

    #[error("Grid assembly error: {0}")]
    Shape(String),
}

/// Whether two beams combine coherently.
pub fn is_coherent(beam1: &GaussianBeam, beam2: &GaussianBeam) -> bool {
    (beam1.wavelength_nm() - beam2.wavelength_nm()).abs() < COHERENCE_TOLERANCE_NM
}

/// Sample the interference of two beams across the transverse plane z = 0.
///
/// Grid indices map to scene coordinates centred on the field of view:
/// `x = (col/res - 0.5) * fov`, `y = (row/res - 0.5) * fov`, so the grids
/// are row-major with row = y and column = x, matching the raster encoder's
/// pixel order. The per-cell loop is delegated to the [`SampleBackend`];
/// every cell is independent, so the backend choice never changes the
/// result.
///
/// The pass owns its grids exclusively and either returns a complete
/// pattern or an error; a failed pass leaves any previously computed
/// pattern untouched.
pub fn sample_interference(
    beam1: &GaussianBeam,
    beam2: &GaussianBeam,
    scene: &SceneParams,
    backend: &dyn SampleBackend,
) -> Result<InterferencePattern, SceneError> {
    if scene.field_of_view_um <= 0.0 {
        return Err(SceneError::NonPositiveFieldOfView {
            field_of_view_um: scene.field_of_view_um,
        });
    }
    let resolution = scene.resolution.max(1);
    let fov_m = scene.field_of_view_um * 1e-6;
    let coherent = is_coherent(beam1, beam2);
    let phase_rotation = Complex64::from_polar(1.0, scene.relative_phase_rad);

    let cells = backend.grid_fill(resolution, resolution, &|row, col| {
        let x = (col as f64 / resolution as f64 - 0.5) * fov_m;
        let y = (row as f64 / resolution as f64 - 0.5) * fov_m;
        let point = [x, y, 0.0];

        let e1 = beam1.field_at(&point);
        let e2 = beam2.field_at(&point) * phase_rotation;

        let i1 = e1.norm_sqr();
        let i2 = e2.norm_sqr();
        let combined = if coherent {
            (e1 + e2).norm_sqr()
        } else {
            i1 + i2
        };

        [i1, i2, combined]
    })?;

    let mut intensities1 = Vec::with_capacity(cells.len());
    let mut intensities2 = Vec::with_capacity(cells.len());
    let mut combined = Vec::with_capacity(cells.len());
    let mut peak_combined = 0.0_f64;

    for cell in &cells {
        intensities1.push(cell[0]);
        intensities2.push(cell[1]);
        combined.push(cell[2]);
        peak_combined = peak_combined.max(cell[2]);
    }

    let shape = (resolution, resolution);
    let beam1_grid = Array2::from_shape_vec(shape, intensities1)
        .map_err(|e| SceneError::Shape(e.to_string()))?;
    let beam2_grid = Array2::from_shape_vec(shape, intensities2)
        .map_err(|e| SceneError::Shape(e.to_string()))?;
    let combined_grid = Array2::from_shape_vec(shape, combined)
        .map_err(|e| SceneError::Shape(e.to_string()))?;

    Ok(InterferencePattern {
        beam1: beam1_grid,
        beam2: beam2_grid,
        combined: combined_grid,
        peak_combined,
        coherent,
        field_of_view_um: scene.field_of_view_um,
    })
}
