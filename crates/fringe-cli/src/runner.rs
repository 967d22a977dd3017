//! Simulation runner: ties together configuration, beams, sampler, and the
//! raster and data writers.

use std::path::Path;

use anyhow::{Context, Result};

use fringe_compute::{SampleBackend, SerialBackend};
use fringe_core::beam::GaussianBeam;
use fringe_core::sampler::{sample_interference, COHERENCE_TOLERANCE_NM};
use fringe_core::types::{BeamParameters, InterferencePattern, SceneParams};
use fringe_render::{encode_rgba, PixelBuffer, COMBINED_WEIGHTS, SINGLE_BEAM_WEIGHTS};

use crate::config::JobConfig;

/// Results from a simulation run: the sampled pattern and the three
/// encoded rasters.
pub struct RunOutput {
    pub pattern: InterferencePattern,
    pub beam1: PixelBuffer,
    pub beam2: PixelBuffer,
    pub combined: PixelBuffer,
}

/// Translate the job record into core parameters.
///
/// This is the single place where the configuration units convert: beam
/// tilts split the separation angle symmetrically about x, amplitudes are
/// the square roots of the configured intensities, focus positions convert
/// mm to metres, and the phase offset converts degrees to radians.
pub fn build_scene(job: &JobConfig) -> Result<(BeamParameters, BeamParameters, SceneParams)> {
    anyhow::ensure!(
        job.beams.intensity1 >= 0.0,
        "intensity1 must be non-negative, got {}",
        job.beams.intensity1
    );
    anyhow::ensure!(
        job.beams.intensity2 >= 0.0,
        "intensity2 must be non-negative, got {}",
        job.beams.intensity2
    );

    let half_angle = job.geometry.angle_separation_deg / 2.0;

    let beam1 = BeamParameters {
        wavelength_nm: job.beams.wavelength1_nm,
        waist_radius_um: job.beams.waist1_um,
        waist_position: [0.0, 0.0, job.geometry.z_position1_mm * 1e-3],
        tilt_deg: [-half_angle, 0.0],
        amplitude: job.beams.intensity1.sqrt(),
    };
    let beam2 = BeamParameters {
        wavelength_nm: job.beams.wavelength2_nm,
        waist_radius_um: job.beams.waist2_um,
        waist_position: [0.0, 0.0, job.geometry.z_position2_mm * 1e-3],
        tilt_deg: [half_angle, 0.0],
        amplitude: job.beams.intensity2.sqrt(),
    };
    let scene = SceneParams {
        field_of_view_um: job.image.field_of_view_um,
        resolution: job.image.resolution,
        relative_phase_rad: job.geometry.relative_phase_deg.to_radians(),
    };

    Ok((beam1, beam2, scene))
}

/// Check a job without sampling: beam construction performs the domain
/// validation, and the scene bounds are checked as the sampler would.
pub fn validate_job(job: &JobConfig) -> Result<()> {
    let (params1, params2, scene) = build_scene(job)?;
    GaussianBeam::new(&params1).context("beam 1")?;
    GaussianBeam::new(&params2).context("beam 2")?;
    anyhow::ensure!(
        scene.field_of_view_um > 0.0,
        "field_of_view_um must be positive, got {}",
        scene.field_of_view_um
    );
    Ok(())
}

/// Predicted two-beam fringe period (um), when the setup can produce
/// fringes: coherent beams at a non-zero separation angle.
pub fn fringe_period_um(job: &JobConfig) -> Option<f64> {
    let coherent = (job.beams.wavelength1_nm - job.beams.wavelength2_nm).abs()
        < COHERENCE_TOLERANCE_NM;
    let half_angle_rad = (job.geometry.angle_separation_deg / 2.0).to_radians();
    if !coherent || half_angle_rad <= 0.0 {
        return None;
    }
    let mean_wavelength_um =
        (job.beams.wavelength1_nm + job.beams.wavelength2_nm) / 2.0 * 1e-3;
    Some(mean_wavelength_um / (2.0 * half_angle_rad.sin()))
}

/// Run a full simulation pass from a parsed job configuration.
pub fn run_simulation(job: &JobConfig) -> Result<RunOutput> {
    let (params1, params2, scene) = build_scene(job)?;
    let beam1 = GaussianBeam::new(&params1).context("beam 1")?;
    let beam2 = GaussianBeam::new(&params2).context("beam 2")?;

    let backend = create_backend(&job.compute.backend);
    println!("Backend: {}", backend.device_info().name);
    println!(
        "Sampling {res}x{res} grid over {fov} um",
        res = scene.resolution.max(1),
        fov = scene.field_of_view_um
    );

    let pattern = sample_interference(&beam1, &beam2, &scene, backend.as_ref())?;

    println!(
        "Regime: {}",
        if pattern.coherent {
            "coherent interference"
        } else {
            "incoherent addition"
        }
    );
    if let Some(period) = fringe_period_um(job) {
        println!("Predicted fringe period: {period:.3} um");
    }
    println!("Peak combined intensity: {:.6e}", pattern.peak_combined);

    let beam1_px = encode_rgba(&pattern.beam1, pattern.peak_combined, &SINGLE_BEAM_WEIGHTS);
    let beam2_px = encode_rgba(&pattern.beam2, pattern.peak_combined, &SINGLE_BEAM_WEIGHTS);
    let combined_px = encode_rgba(&pattern.combined, pattern.peak_combined, &COMBINED_WEIGHTS);

    Ok(RunOutput {
        pattern,
        beam1: beam1_px,
        beam2: beam2_px,
        combined: combined_px,
    })
}

/// Create a sample backend based on the user's preference string.
///
/// - `"serial"` — always sample on the calling thread.
/// - `"parallel"` — require the Rayon backend, fail if unavailable.
/// - `"auto"` (default) — the Rayon backend when built in, serial otherwise.
pub fn create_backend(preference: &str) -> Box<dyn SampleBackend> {
    match preference {
        "serial" => Box::new(SerialBackend),
        "parallel" => {
            #[cfg(feature = "parallel")]
            {
                Box::new(fringe_compute::CpuBackend::new())
            }
            #[cfg(not(feature = "parallel"))]
            {
                eprintln!(
                    "Parallel backend requested but binary was built without --features parallel. Aborting."
                );
                std::process::exit(1);
            }
        }
        _ => {
            // "auto" or any unrecognised value
            #[cfg(feature = "parallel")]
            {
                return Box::new(fringe_compute::CpuBackend::new());
            }
            #[cfg(not(feature = "parallel"))]
            {
                Box::new(SerialBackend)
            }
        }
    }
}

/// Write the three PNG rasters to the output directory.
pub fn write_images(output: &RunOutput, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    write_png(&output.beam1, &dir.join("beam1.png"))?;
    write_png(&output.beam2, &dir.join("beam2.png"))?;
    write_png(&output.combined, &dir.join("combined.png"))?;
    Ok(())
}

fn write_png(buffer: &PixelBuffer, path: &Path) -> Result<()> {
    let img = image::RgbaImage::from_vec(
        buffer.width as u32,
        buffer.height as u32,
        buffer.data.clone(),
    )
    .context("pixel buffer does not match raster dimensions")?;
    img.save(path)
        .with_context(|| format!("writing {}", path.display()))?;

    println!("Image written to: {}", path.display());
    Ok(())
}

/// Write the sampled intensity grids to a CSV file with a metadata header.
pub fn write_pattern_csv(pattern: &InterferencePattern, path: &Path) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = std::fs::File::create(path)?;
    let resolution = pattern.resolution();

    writeln!(file, "# Fringe — Interference Intensity Map")?;
    writeln!(file, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(file, "# Grid: {resolution}x{resolution}")?;
    writeln!(file, "# Field of view: {} um", pattern.field_of_view_um)?;
    writeln!(
        file,
        "# Regime: {}",
        if pattern.coherent { "coherent" } else { "incoherent" }
    )?;
    writeln!(file, "#")?;
    writeln!(file, "x_um,y_um,intensity1,intensity2,combined")?;

    for ((row, col), &combined) in pattern.combined.indexed_iter() {
        let x = (col as f64 / resolution as f64 - 0.5) * pattern.field_of_view_um;
        let y = (row as f64 / resolution as f64 - 0.5) * pattern.field_of_view_um;
        writeln!(
            file,
            "{:.4},{:.4},{:.6e},{:.6e},{:.6e}",
            x,
            y,
            pattern.beam1[[row, col]],
            pattern.beam2[[row, col]],
            combined
        )?;
    }

    println!("Intensity map written to: {}", path.display());
    Ok(())
}

/// Summary of one run, for the JSON export.
#[derive(Debug, serde::Serialize)]
pub struct RunSummary {
    pub wavelength1_nm: f64,
    pub wavelength2_nm: f64,
    pub angle_separation_deg: f64,
    pub coherent: bool,
    pub resolution: usize,
    pub field_of_view_um: f64,
    pub peak_combined_intensity: f64,
    pub predicted_fringe_period_um: Option<f64>,
}

/// Write the run summary to a JSON file.
pub fn write_summary_json(
    job: &JobConfig,
    pattern: &InterferencePattern,
    path: &Path,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let summary = RunSummary {
        wavelength1_nm: job.beams.wavelength1_nm,
        wavelength2_nm: job.beams.wavelength2_nm,
        angle_separation_deg: job.geometry.angle_separation_deg,
        coherent: pattern.coherent,
        resolution: pattern.resolution(),
        field_of_view_um: pattern.field_of_view_um,
        peak_combined_intensity: pattern.peak_combined,
        predicted_fringe_period_um: fringe_period_um(job),
    };

    let json = serde_json::to_string_pretty(&summary)
        .map_err(|e| anyhow::anyhow!("JSON serialisation error: {}", e))?;
    std::fs::write(path, json)?;

    println!("Summary written to: {}", path.display());
    Ok(())
}
