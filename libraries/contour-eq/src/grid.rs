//! Log-spaced frequency grids for response evaluation

/// Exponent of the first point of the first-order grid (10^0.1 ≈ 1.26 Hz)
pub const FIRST_ORDER_START_EXP: f64 = 0.1;

/// Exponent of the first point of the second-order grid (1 Hz)
pub const SECOND_ORDER_START_EXP: f64 = 0.0;

/// Number of grid points for a sample rate: one per Hz up to Nyquist
#[inline]
pub fn grid_len(sample_rate_hz: f64) -> usize {
    (sample_rate_hz / 2.0).floor() as usize
}

/// Log10-spaced frequencies from `10^start_exp` Hz to Nyquist
///
/// Both ends are included. The grid has `floor(fs/2)` points; a single
/// point grid holds only the start frequency.
pub fn log_frequency_grid(start_exp: f64, sample_rate_hz: f64) -> Vec<f64> {
    let num = grid_len(sample_rate_hz);
    let stop_exp = (sample_rate_hz / 2.0).log10();

    match num {
        0 => Vec::new(),
        1 => vec![10.0_f64.powf(start_exp)],
        _ => {
            let step = (stop_exp - start_exp) / (num - 1) as f64;
            (0..num)
                .map(|i| {
                    let exp = if i == num - 1 {
                        stop_exp
                    } else {
                        start_exp + i as f64 * step
                    };
                    10.0_f64.powf(exp)
                })
                .collect()
        }
    }
}
