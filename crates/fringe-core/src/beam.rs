//! Analytic Gaussian-beam field evaluation.
//!
//! A focused beam is described by its complex parameter $q(z_L) = z_L + i z_R$,
//! where $z_L$ is the longitudinal coordinate along the propagation axis and
//! $z_R$ the Rayleigh range. The field at transverse offset $\rho$ is
//!
//! $$
//! E = A \, \frac{i z_R}{q} \exp\!\left(-\frac{i k \rho^2}{2 q} - i k z_L\right)
//! $$
//!
//! In the waist plane ($z_L = 0$) this reduces to the standard Gaussian
//! profile $A \exp(-\rho^2 / w_0^2)$.

use num_complex::Complex64;
use thiserror::Error;

use crate::types::BeamParameters;

/// Errors from beam construction.
#[derive(Debug, Error)]
pub enum BeamError {
    #[error("Wavelength must be positive, got {wavelength_nm} nm")]
    NonPositiveWavelength { wavelength_nm: f64 },

    #[error("Waist radius must be positive, got {waist_radius_um} um")]
    NonPositiveWaist { waist_radius_um: f64 },

    #[error("Amplitude must be non-negative, got {amplitude}")]
    NegativeAmplitude { amplitude: f64 },
}

/// A validated, prepared Gaussian beam.
///
/// Construction performs every unit conversion exactly once (nm and um to
/// metres, degrees to radians). Evaluation is a pure closed-form function
/// of the query point with no hidden state, safe to call concurrently for
/// independent points.
#[derive(Debug, Clone)]
pub struct GaussianBeam {
    /// Wavenumber k = 2*pi/lambda (m^-1).
    wavenumber: f64,
    /// Rayleigh range z_R = pi*w0^2/lambda (m).
    rayleigh_range: f64,
    /// Unit propagation axis.
    axis: [f64; 3],
    /// Waist (focus) position (m).
    waist: [f64; 3],
    /// Field amplitude.
    amplitude: f64,
    /// Source wavelength (nm), retained for the coherence test.
    wavelength_nm: f64,
}

impl GaussianBeam {
    /// Validate parameters and prepare a beam for evaluation.
    ///
    /// Non-positive wavelengths or waist radii would leave the wavenumber
    /// and Rayleigh range undefined, so they are rejected here rather than
    /// propagating a division by zero into the field formula.
    pub fn new(params: &BeamParameters) -> Result<Self, BeamError> {
        if params.wavelength_nm <= 0.0 {
            return Err(BeamError::NonPositiveWavelength {
                wavelength_nm: params.wavelength_nm,
            });
        }
        if params.waist_radius_um <= 0.0 {
            return Err(BeamError::NonPositiveWaist {
                waist_radius_um: params.waist_radius_um,
            });
        }
        if params.amplitude < 0.0 {
            return Err(BeamError::NegativeAmplitude {
                amplitude: params.amplitude,
            });
        }

        let wavelength = params.wavelength_nm * 1e-9;
        let waist_radius = params.waist_radius_um * 1e-6;
        let wavenumber = 2.0 * std::f64::consts::PI / wavelength;
        let rayleigh_range = std::f64::consts::PI * waist_radius * waist_radius / wavelength;

        // Independent x/y sine components renormalised to unit length.
        // This is a small-angle style decomposition, not a spherical
        // rotation; it is the calibrated behaviour for the tilt ranges in
        // use (up to ~45 degrees).
        let tx = params.tilt_deg[0].to_radians();
        let ty = params.tilt_deg[1].to_radians();
        let axis = normalise(&[tx.sin(), ty.sin(), tx.cos() * ty.cos()]);

        Ok(Self {
            wavenumber,
            rayleigh_range,
            axis,
            waist: params.waist_position,
            amplitude: params.amplitude,
            wavelength_nm: params.wavelength_nm,
        })
    }

    /// Source wavelength (nm).
    pub fn wavelength_nm(&self) -> f64 {
        self.wavelength_nm
    }

    /// Rayleigh range (m).
    pub fn rayleigh_range(&self) -> f64 {
        self.rayleigh_range
    }

    /// Unit propagation axis.
    pub fn axis(&self) -> [f64; 3] {
        self.axis
    }

    /// Complex field amplitude at a query point (metres).
    pub fn field_at(&self, point: &[f64; 3]) -> Complex64 {
        let d = [
            point[0] - self.waist[0],
            point[1] - self.waist[1],
            point[2] - self.waist[2],
        ];

        // Longitudinal coordinate along the axis and squared transverse
        // distance from it.
        let z_l = d[0] * self.axis[0] + d[1] * self.axis[1] + d[2] * self.axis[2];
        let rho_sq = (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]) - z_l * z_l;

        let q = Complex64::new(z_l, self.rayleigh_range);

        // On-axis amplitude factor A * i*z_R/q.
        let factor = Complex64::new(0.0, self.rayleigh_range) / q * self.amplitude;

        // Curvature/Gouy term plus plane-wave phase: -i*k*(rho^2/(2q) + z_L).
        let exponent = -Complex64::i() * self.wavenumber * (rho_sq / (2.0 * q) + z_l);

        factor * exponent.exp()
    }
}

fn normalise(v: &[f64; 3]) -> [f64; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    [v[0] / len, v[1] / len, v[2] / len]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_waist_plane_reduces_to_gaussian_profile() {
        // In the waist plane the field must collapse to A*exp(-rho^2/w0^2),
        // i.e. intensity A^2*exp(-2*rho^2/w0^2).
        let beam = GaussianBeam::new(&BeamParameters::default()).unwrap();
        let w0 = 15.0e-6;

        for &rho_um in &[0.0, 2.0, 5.0, 10.0, 20.0] {
            let rho = rho_um * 1e-6;
            let intensity = beam.field_at(&[rho, 0.0, 0.0]).norm_sqr();
            let expected = (-2.0 * rho * rho / (w0 * w0)).exp();
            assert_abs_diff_eq!(intensity, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_on_axis_peak_equals_amplitude_squared() {
        let params = BeamParameters {
            amplitude: 3.0,
            ..Default::default()
        };
        let beam = GaussianBeam::new(&params).unwrap();
        let peak = beam.field_at(&[0.0, 0.0, 0.0]).norm_sqr();
        assert_abs_diff_eq!(peak, 9.0, epsilon = 1e-12);
    }

    #[test]
    fn test_intensity_falls_monotonically_in_waist_plane() {
        let beam = GaussianBeam::new(&BeamParameters::default()).unwrap();
        let mut prev = f64::INFINITY;
        for step in 0..20 {
            let rho = step as f64 * 2.0e-6;
            let intensity = beam.field_at(&[0.0, rho, 0.0]).norm_sqr();
            assert!(
                intensity < prev,
                "Intensity must decay away from the axis (rho = {rho} m)"
            );
            prev = intensity;
        }
    }

    #[test]
    fn test_tilted_axis_is_unit_length() {
        let params = BeamParameters {
            tilt_deg: [22.5, 10.0],
            ..Default::default()
        };
        let beam = GaussianBeam::new(&params).unwrap();
        let a = beam.axis();
        let len = (a[0] * a[0] + a[1] * a[1] + a[2] * a[2]).sqrt();
        assert_abs_diff_eq!(len, 1.0, epsilon = 1e-14);
    }

    #[test]
    fn test_tilt_preserves_focus_peak() {
        // The query point at the focus has z_L = 0 and rho = 0 regardless
        // of the tilt, so the field there is exactly the amplitude.
        let params = BeamParameters {
            tilt_deg: [17.0, -4.0],
            amplitude: 0.7,
            ..Default::default()
        };
        let beam = GaussianBeam::new(&params).unwrap();
        let field = beam.field_at(&[0.0, 0.0, 0.0]);
        assert_abs_diff_eq!(field.re, 0.7, epsilon = 1e-12);
        assert_abs_diff_eq!(field.im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_non_positive_wavelength() {
        let params = BeamParameters {
            wavelength_nm: 0.0,
            ..Default::default()
        };
        let err = GaussianBeam::new(&params).unwrap_err();
        assert!(matches!(err, BeamError::NonPositiveWavelength { .. }));
    }

    #[test]
    fn test_rejects_non_positive_waist() {
        let params = BeamParameters {
            waist_radius_um: -1.0,
            ..Default::default()
        };
        let err = GaussianBeam::new(&params).unwrap_err();
        assert!(matches!(err, BeamError::NonPositiveWaist { .. }));
    }

    #[test]
    fn test_rejects_negative_amplitude() {
        let params = BeamParameters {
            amplitude: -0.5,
            ..Default::default()
        };
        let err = GaussianBeam::new(&params).unwrap_err();
        assert!(matches!(err, BeamError::NegativeAmplitude { .. }));
    }

    #[test]
    fn test_rayleigh_range_value() {
        // z_R = pi * w0^2 / lambda = pi * (15 um)^2 / 532 nm ~= 1.329 mm.
        let beam = GaussianBeam::new(&BeamParameters::default()).unwrap();
        assert_abs_diff_eq!(beam.rayleigh_range(), 1.3287e-3, epsilon = 1e-6);
    }
}
