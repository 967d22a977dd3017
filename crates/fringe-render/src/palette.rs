//! Fixed pseudo-color palette for intensity display.
//!
//! The weightings are a presentation convention, not configuration: a warm
//! amber ramp for the individual beams and a slightly hotter ramp for the
//! combined pattern, both fully opaque.

/// Linear weighting of a scaled intensity across the three color channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelWeights {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

/// Ramp used for the individual beam images.
pub const SINGLE_BEAM_WEIGHTS: ChannelWeights = ChannelWeights {
    red: 1.0,
    green: 0.3,
    blue: 0.1,
};

/// Ramp used for the combined pattern image.
pub const COMBINED_WEIGHTS: ChannelWeights = ChannelWeights {
    red: 1.0,
    green: 0.5,
    blue: 0.1,
};
