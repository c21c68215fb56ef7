//! dB ↔ linear amplitude conversion
//!
//! Pure and total: an exact zero is replaced by [`ZERO_FLOOR`] before the
//! logarithm, so silence maps to -240 dB instead of -inf.

/// Value substituted for an exact zero before taking the logarithm
pub const ZERO_FLOOR: f64 = 1e-12;

/// Convert a linear amplitude to dB (`20·log10(x)`)
#[inline]
pub fn amplitude_to_db(amplitude: f64) -> f64 {
    let amplitude = if amplitude == 0.0 { ZERO_FLOOR } else { amplitude };
    20.0 * amplitude.log10()
}

/// Convert a dB value to linear amplitude (`10^(x/20)`)
#[inline]
pub fn db_to_amplitude(db: f64) -> f64 {
    10.0_f64.powf(db / 20.0)
}

/// Convert a buffer of linear amplitudes to dB
pub fn to_db(samples: &[f64]) -> Vec<f64> {
    samples.iter().map(|&x| amplitude_to_db(x)).collect()
}

/// Convert a buffer of dB values to linear amplitudes
pub fn to_linear(levels_db: &[f64]) -> Vec<f64> {
    levels_db.iter().map(|&x| db_to_amplitude(x)).collect()
}
