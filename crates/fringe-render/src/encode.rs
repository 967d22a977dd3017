//! Intensity normalisation and RGBA8 buffer assembly.

use ndarray::Array2;

use crate::palette::ChannelWeights;

/// Display scale applied after peak normalisation. Values saturate at the
/// 8-bit ceiling, which deliberately overexposes the bright core so the
/// dimmer fringe structure stays visible.
pub const DISPLAY_SCALE: f64 = 1000.0;

/// Floor for the normalisation divisor. A degenerate pass in which every
/// sampled intensity is zero encodes to an all-black image instead of
/// dividing by zero.
pub const MIN_PEAK_INTENSITY: f64 = 1e-30;

/// A flat RGBA8 raster: 4 interleaved bytes per pixel (R, G, B, A = 255),
/// row-major, top-left origin.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    /// Width in pixels (grid columns).
    pub width: usize,
    /// Height in pixels (grid rows).
    pub height: usize,
    /// `width * height * 4` channel bytes.
    pub data: Vec<u8>,
}

/// Encode one intensity grid against the shared normalisation peak.
///
/// Each raw intensity is scaled by `DISPLAY_SCALE / max(peak, epsilon)`,
/// clamped to the 8-bit range, and spread across the color channels by the
/// fixed palette weights. The caller passes the same `peak` (the combined
/// grid's maximum) for every raster of a pass.
pub fn encode_rgba(grid: &Array2<f64>, peak: f64, weights: &ChannelWeights) -> PixelBuffer {
    let (rows, cols) = grid.dim();
    let scale = DISPLAY_SCALE / peak.max(MIN_PEAK_INTENSITY);

    let mut data = Vec::with_capacity(rows * cols * 4);
    for &raw in grid.iter() {
        let value = (raw * scale).min(255.0);
        data.push((value * weights.red) as u8);
        data.push((value * weights.green) as u8);
        data.push((value * weights.blue) as u8);
        data.push(255);
    }

    PixelBuffer {
        width: cols,
        height: rows,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{COMBINED_WEIGHTS, SINGLE_BEAM_WEIGHTS};
    use ndarray::array;

    #[test]
    fn test_buffer_layout_is_row_major_rgba() {
        let grid = array![[0.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
        let buffer = encode_rgba(&grid, 1.0, &SINGLE_BEAM_WEIGHTS);

        assert_eq!(buffer.width, 3);
        assert_eq!(buffer.height, 2);
        assert_eq!(buffer.data.len(), 24);

        // The bright cell (row 1, col 2) starts at byte (1 * 3 + 2) * 4.
        let idx = (1 * 3 + 2) * 4;
        assert_eq!(buffer.data[idx], 255);
        assert!(buffer.data[idx + 1] > 0);
        // Every other pixel is black.
        assert_eq!(&buffer.data[0..4], &[0, 0, 0, 255]);
    }

    #[test]
    fn test_saturates_at_channel_ceiling() {
        // The peak sample scales to DISPLAY_SCALE and must clamp to 255
        // before the palette weights apply.
        let grid = array![[2.0]];
        let buffer = encode_rgba(&grid, 2.0, &COMBINED_WEIGHTS);
        assert_eq!(buffer.data, vec![255, 127, 25, 255]);
    }

    #[test]
    fn test_degenerate_zero_grid_encodes_black() {
        let grid = Array2::<f64>::zeros((4, 4));
        let buffer = encode_rgba(&grid, 0.0, &COMBINED_WEIGHTS);

        for pixel in buffer.data.chunks(4) {
            assert_eq!(pixel, &[0, 0, 0, 255]);
        }
    }

    #[test]
    fn test_normalisation_cancels_common_intensity_scale() {
        // Scaling every intensity and the peak by the same constant leaves
        // the encoded bytes unchanged: the pattern is shape, not absolute
        // power. A power-of-two factor keeps the check exact.
        let grid = array![[0.1, 0.25], [0.5, 1.0]];
        let scaled = grid.mapv(|v| v * 4.0);

        let reference = encode_rgba(&grid, 1.0, &COMBINED_WEIGHTS);
        let rescaled = encode_rgba(&scaled, 4.0, &COMBINED_WEIGHTS);

        assert_eq!(reference.data, rescaled.data);
    }

    #[test]
    fn test_alpha_is_always_opaque() {
        let grid = array![[0.0, 0.3], [0.9, 0.05]];
        let buffer = encode_rgba(&grid, 0.9, &SINGLE_BEAM_WEIGHTS);
        for pixel in buffer.data.chunks(4) {
            assert_eq!(pixel[3], 255);
        }
    }
}
