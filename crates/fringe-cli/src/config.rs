//! TOML job configuration for simulation runs.
//!
//! Every field carries a default matching the simulator's canonical
//! starting configuration, so an empty file is a valid job.

use serde::Deserialize;

/// Top-level job configuration.
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    #[serde(default)]
    pub beams: BeamsConfig,
    #[serde(default)]
    pub geometry: GeometryConfig,
    #[serde(default)]
    pub image: ImageConfig,
    #[serde(default)]
    pub compute: ComputeConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Laser parameters for the two beams.
#[derive(Debug, Deserialize)]
pub struct BeamsConfig {
    /// Wavelength of beam 1 (nm).
    #[serde(default = "default_wavelength")]
    pub wavelength1_nm: f64,
    /// Wavelength of beam 2 (nm).
    #[serde(default = "default_wavelength")]
    pub wavelength2_nm: f64,
    /// Waist radius of beam 1 (um).
    #[serde(default = "default_waist")]
    pub waist1_um: f64,
    /// Waist radius of beam 2 (um).
    #[serde(default = "default_waist")]
    pub waist2_um: f64,
    /// Relative intensity of beam 1.
    #[serde(default = "default_intensity")]
    pub intensity1: f64,
    /// Relative intensity of beam 2.
    #[serde(default = "default_intensity")]
    pub intensity2: f64,
}

impl Default for BeamsConfig {
    fn default() -> Self {
        Self {
            wavelength1_nm: default_wavelength(),
            wavelength2_nm: default_wavelength(),
            waist1_um: default_waist(),
            waist2_um: default_waist(),
            intensity1: default_intensity(),
            intensity2: default_intensity(),
        }
    }
}

fn default_wavelength() -> f64 {
    532.0
}
fn default_waist() -> f64 {
    15.0
}
fn default_intensity() -> f64 {
    1.0
}

/// Setup geometry: beam separation, focus positions, phase offset.
#[derive(Debug, Deserialize)]
pub struct GeometryConfig {
    /// Full angle between the two propagation axes (degrees). Each beam
    /// tilts by half of it, in opposite directions about x.
    #[serde(default = "default_angle_separation")]
    pub angle_separation_deg: f64,
    /// Longitudinal position of beam 1's focus (mm).
    #[serde(default = "default_z_position")]
    pub z_position1_mm: f64,
    /// Longitudinal position of beam 2's focus (mm).
    #[serde(default = "default_z_position")]
    pub z_position2_mm: f64,
    /// Phase offset applied to beam 2 (degrees).
    #[serde(default)]
    pub relative_phase_deg: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            angle_separation_deg: default_angle_separation(),
            z_position1_mm: default_z_position(),
            z_position2_mm: default_z_position(),
            relative_phase_deg: 0.0,
        }
    }
}

fn default_angle_separation() -> f64 {
    5.0
}
fn default_z_position() -> f64 {
    -2.0
}

/// Raster sampling settings.
#[derive(Debug, Deserialize)]
pub struct ImageConfig {
    /// Side length of the square field of view (um).
    #[serde(default = "default_field_of_view")]
    pub field_of_view_um: f64,
    /// Image side length in pixels.
    #[serde(default = "default_resolution")]
    pub resolution: usize,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            field_of_view_um: default_field_of_view(),
            resolution: default_resolution(),
        }
    }
}

fn default_field_of_view() -> f64 {
    100.0
}
fn default_resolution() -> usize {
    200
}

/// Compute backend selection.
#[derive(Debug, Deserialize)]
pub struct ComputeConfig {
    /// Execution backend: "auto", "serial", or "parallel". Default: "auto".
    #[serde(default = "default_backend")]
    pub backend: String,
}

impl Default for ComputeConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
        }
    }
}

fn default_backend() -> String {
    "auto".into()
}

/// Output configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Output directory (default: "./output").
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Whether to save the three PNG rasters (default: true).
    #[serde(default = "default_true")]
    pub save_images: bool,
    /// Whether to save the intensity grids as CSV (default: false).
    #[serde(default)]
    pub save_csv: bool,
    /// Whether to save a JSON run summary (default: false).
    #[serde(default)]
    pub save_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            save_images: true,
            save_csv: false,
            save_json: false,
        }
    }
}

fn default_output_dir() -> String {
    "./output".into()
}
fn default_true() -> bool {
    true
}

/// Load and parse a TOML job configuration file.
pub fn load_config(path: &std::path::Path) -> anyhow::Result<JobConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: JobConfig = toml::from_str(&content)?;
    Ok(config)
}
