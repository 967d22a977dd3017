//! Core types shared across the Fringe simulator.
//!
//! This module defines the fundamental data structures of the sampling
//! pipeline: beam parameters, scene parameters, and the sampled pattern.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Physical parameters of a single focused Gaussian beam.
///
/// All fields are value-typed and immutable per evaluation; validation and
/// unit conversion happen once, at [`GaussianBeam`](crate::beam::GaussianBeam)
/// construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamParameters {
    /// Vacuum wavelength (nanometres). Must be positive.
    pub wavelength_nm: f64,
    /// Waist radius w0 at the focus (micrometres). Must be positive.
    pub waist_radius_um: f64,
    /// Position of the beam focus (metres).
    pub waist_position: [f64; 3],
    /// Tilt of the propagation axis from the scene z-axis, as independent
    /// x and y components (degrees).
    pub tilt_deg: [f64; 2],
    /// Field amplitude, the square root of the configured intensity.
    /// Must be non-negative.
    pub amplitude: f64,
}

impl Default for BeamParameters {
    /// A 532 nm beam with a 15 um waist at the origin, propagating along
    /// +z at unit intensity.
    fn default() -> Self {
        Self {
            wavelength_nm: 532.0,
            waist_radius_um: 15.0,
            waist_position: [0.0, 0.0, 0.0],
            tilt_deg: [0.0, 0.0],
            amplitude: 1.0,
        }
    }
}

/// Sampling parameters for one interference pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneParams {
    /// Side length of the square field of view (micrometres). Must be
    /// positive.
    pub field_of_view_um: f64,
    /// Grid side length in samples. A value of 0 is clamped to 1.
    pub resolution: usize,
    /// Phase offset applied to the second beam's field (radians).
    pub relative_phase_rad: f64,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            field_of_view_um: 100.0,
            resolution: 200,
            relative_phase_rad: 0.0,
        }
    }
}

/// Sampled intensity grids from one interference pass.
///
/// All three grids share dimensions and indexing: row-major, row = y,
/// column = x, top-left origin. `combined` is always derived from the two
/// component fields at the same point, never computed independently.
#[derive(Debug, Clone)]
pub struct InterferencePattern {
    /// Intensity of beam 1 alone at each grid point.
    pub beam1: Array2<f64>,
    /// Intensity of beam 2 alone (relative phase applied) at each grid point.
    pub beam2: Array2<f64>,
    /// Combined intensity at each grid point.
    pub combined: Array2<f64>,
    /// Maximum of `combined`, the shared normalisation peak for all three
    /// rasters of this pass.
    pub peak_combined: f64,
    /// Whether the pass superposed fields (true) or summed intensities.
    pub coherent: bool,
    /// Side length of the sampled field of view (micrometres).
    pub field_of_view_um: f64,
}

impl InterferencePattern {
    /// Grid side length in samples.
    pub fn resolution(&self) -> usize {
        self.combined.nrows()
    }
}
