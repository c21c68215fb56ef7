//! Parameter checks and 3 dB band edges shared by both designers

use contour_core::{ContourError, Result};
use tracing::debug;

/// Lowest band edge allowed when band limiting is on (Hz)
pub const MIN_BAND_EDGE_HZ: f64 = 0.1;

/// Reject a sample rate that is not a positive, finite number
pub(crate) fn check_sample_rate(sample_rate_hz: f64) -> Result<()> {
    if sample_rate_hz > 0.0 && sample_rate_hz.is_finite() {
        Ok(())
    } else {
        debug!(sample_rate_hz, "rejected sample rate");
        Err(ContourError::invalid_parameter(
            "sample_rate_hz",
            sample_rate_hz,
            "must be greater than 0",
        ))
    }
}

/// Reject a Q factor that is not positive
pub(crate) fn check_q_factor(q_factor: f64) -> Result<()> {
    if q_factor > 0.0 && q_factor.is_finite() {
        Ok(())
    } else {
        debug!(q_factor, "rejected Q factor");
        Err(ContourError::invalid_parameter(
            "q_factor",
            q_factor,
            "must be greater than 0",
        ))
    }
}

/// Reject a center frequency outside (0, fs/2]
pub(crate) fn check_center_frequency(center_freq_hz: f64, sample_rate_hz: f64) -> Result<()> {
    if center_freq_hz > 0.0 && center_freq_hz <= sample_rate_hz / 2.0 {
        Ok(())
    } else {
        debug!(center_freq_hz, sample_rate_hz, "rejected center frequency");
        Err(ContourError::invalid_parameter(
            "center_freq_hz",
            center_freq_hz,
            format!("must be within (0, {}] Hz", sample_rate_hz / 2.0),
        ))
    }
}

/// Lower and upper 3 dB edges of a band with quality `q_factor` around `center_freq_hz`
///
/// `f = fc·(√(1 + 1/(4Q²)) ∓ 1/(2Q))`, so `f1·f2 = fc²` and `fc/(f2 - f1) = Q`.
pub fn band_edges(center_freq_hz: f64, q_factor: f64) -> (f64, f64) {
    let root = (1.0 + 1.0 / (4.0 * q_factor * q_factor)).sqrt();
    let offset = 1.0 / (2.0 * q_factor);
    (center_freq_hz * (root - offset), center_freq_hz * (root + offset))
}

/// Keep an edge frequency inside [0.1 Hz, fs/2]
#[inline]
pub(crate) fn limit_edge(edge_hz: f64, sample_rate_hz: f64) -> f64 {
    // max then min: never panics when fs/2 drops below the lower bound
    edge_hz.max(MIN_BAND_EDGE_HZ).min(sample_rate_hz / 2.0)
}
