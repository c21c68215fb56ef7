/// Second-order peaking filter
///
/// Second-order all-pass
/// `A(z) = (z⁻² + b(1+a)·z⁻¹ + a) / (1 + b(1+a)·z⁻¹ + a·z⁻²)`
/// mixed as `½(1 + A) + ½K(1 − A)`. At the center frequency `A = −1`, so the
/// response there is exactly `K`; far from it `A → 1` and the gain is unity.
/// `a` sets the bandwidth, `b` the center.
use contour_core::{db_to_amplitude, Result, DEFAULT_SAMPLE_RATE};
use rustfft::num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::trace;

use crate::grid::{log_frequency_grid, SECOND_ORDER_START_EXP};
use crate::params::{
    band_edges, check_center_frequency, check_q_factor, check_sample_rate, limit_edge,
};
use crate::response::FrequencyResponse;

/// Q factor used when a caller does not pick one
pub const DEFAULT_Q_FACTOR: f64 = 5.0;

/// Second-order peaking filter design parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecondOrderSettings {
    /// Center frequency in Hz, within (0, fs/2]
    pub center_freq_hz: f64,
    /// Gain at the center frequency in dB (negative for a notch)
    pub gain_db: f64,
    /// Q factor, center frequency over 3 dB bandwidth
    pub q_factor: f64,
    /// Sample rate in Hz
    pub sample_rate_hz: f64,
    /// Keep both band edges within [0.1 Hz, fs/2]
    pub band_limit: bool,
}

impl Default for SecondOrderSettings {
    fn default() -> Self {
        Self {
            center_freq_hz: 1000.0,
            gain_db: 0.0,
            q_factor: DEFAULT_Q_FACTOR,
            sample_rate_hz: DEFAULT_SAMPLE_RATE,
            band_limit: true,
        }
    }
}

impl SecondOrderSettings {
    /// Create a peaking band with the default Q, 48 kHz and band limiting on
    pub fn peaking(center_freq_hz: f64, gain_db: f64) -> Self {
        Self {
            center_freq_hz,
            gain_db,
            ..Self::default()
        }
    }

    /// Use a different Q factor
    pub fn with_q(mut self, q_factor: f64) -> Self {
        self.q_factor = q_factor;
        self
    }

    /// Use a different sample rate
    pub fn with_sample_rate(mut self, sample_rate_hz: f64) -> Self {
        self.sample_rate_hz = sample_rate_hz;
        self
    }

    /// Validate the parameters and derive the all-pass coefficients
    pub fn coefficients(&self) -> Result<SecondOrderCoefficients> {
        let fs = self.sample_rate_hz;
        check_sample_rate(fs)?;
        check_q_factor(self.q_factor)?;
        check_center_frequency(self.center_freq_hz, fs)?;

        let (lower, upper) = band_edges(self.center_freq_hz, self.q_factor);
        let (lower, upper) = if self.band_limit {
            (limit_edge(lower, fs), limit_edge(upper, fs))
        } else {
            (lower, upper)
        };

        // Bandwidth in rad/s, prewarped: tan(Ω/(2fs))
        let band = 2.0 * PI * (upper - lower);
        let t = (band / (2.0 * fs)).tan();

        let coeffs = SecondOrderCoefficients {
            a: (1.0 - t) / (1.0 + t),
            b: -(2.0 * PI * self.center_freq_hz / fs).cos(),
            k: db_to_amplitude(self.gain_db),
            sample_rate_hz: fs,
        };

        trace!(
            lower_hz = lower,
            upper_hz = upper,
            a = coeffs.a,
            b = coeffs.b,
            "second-order coefficients"
        );
        Ok(coeffs)
    }

    /// Frequency response on the second-order grid
    pub fn design(&self) -> Result<FrequencyResponse> {
        let coeffs = self.coefficients()?;
        let grid = log_frequency_grid(SECOND_ORDER_START_EXP, self.sample_rate_hz);
        Ok(FrequencyResponse::evaluate(grid, |f| coeffs.response_at(f)))
    }
}

/// Designed second-order peaking filter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecondOrderCoefficients {
    /// Bandwidth coefficient
    pub a: f64,
    /// Center frequency coefficient, `-cos(ω0)`
    pub b: f64,
    /// Linear gain at the center frequency
    pub k: f64,
    /// Sample rate the coefficients were derived for
    pub sample_rate_hz: f64,
}

impl SecondOrderCoefficients {
    /// All-pass response at one frequency
    #[inline]
    pub fn allpass_at(&self, freq_hz: f64) -> Complex64 {
        let z_inv = Complex64::from_polar(1.0, -2.0 * PI * freq_hz / self.sample_rate_hz);
        let z_inv2 = z_inv * z_inv;
        let d = self.b * (1.0 + self.a);
        (z_inv2 + d * z_inv + self.a) / (1.0 + d * z_inv + self.a * z_inv2)
    }

    /// Peaking response at one frequency
    pub fn response_at(&self, freq_hz: f64) -> Complex64 {
        let a = self.allpass_at(freq_hz);
        let one = Complex64::new(1.0, 0.0);
        0.5 * (one + a) + 0.5 * self.k * (one - a)
    }
}

/// Design a second-order peaking filter
///
/// # Arguments
/// * `center_freq_hz` - Center frequency, within (0, fs/2]
/// * `gain_db` - Gain at the center frequency
/// * `q_factor` - Center frequency over bandwidth, greater than 0
/// * `sample_rate_hz` - Sample rate, greater than 0
/// * `band_limit` - Keep both band edges within [0.1 Hz, fs/2]
///
/// # Returns
/// `floor(fs/2)` log-spaced frequencies from 1 Hz to fs/2 and the complex
/// response at each, or `InvalidParameter` without computing anything.
pub fn design_second_order(
    center_freq_hz: f64,
    gain_db: f64,
    q_factor: f64,
    sample_rate_hz: f64,
    band_limit: bool,
) -> Result<FrequencyResponse> {
    SecondOrderSettings {
        center_freq_hz,
        gain_db,
        q_factor,
        sample_rate_hz,
        band_limit,
    }
    .design()
}

/// Time-domain realisation of a peaking filter
///
/// Direct form all-pass
/// `y[n] = a·x[n] + d·x[n-1] + x[n-2] - d·y[n-1] - a·y[n-2]` with `d = b(1+a)`.
#[derive(Debug, Clone)]
pub struct PeakingFilter {
    coeffs: SecondOrderCoefficients,
    d: f64,
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl PeakingFilter {
    /// Create a filter with cleared state
    pub fn new(coeffs: SecondOrderCoefficients) -> Self {
        Self {
            coeffs,
            d: coeffs.b * (1.0 + coeffs.a),
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Coefficients in use
    pub fn coefficients(&self) -> SecondOrderCoefficients {
        self.coeffs
    }

    /// Filter one sample
    #[inline]
    pub fn process_sample(&mut self, input: f64) -> f64 {
        let a = self.coeffs.a;
        let allpass = a * input + self.d * self.x1 + self.x2 - self.d * self.y1 - a * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = allpass;

        0.5 * (input + allpass) + 0.5 * self.coeffs.k * (input - allpass)
    }

    /// Filter a buffer in place
    pub fn process(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }

    /// Reset filter state (but preserve coefficients)
    pub fn reset(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}
