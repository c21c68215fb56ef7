/// First-order shelving filter
///
/// A first-order all-pass `A(z) = (z⁻¹ + a) / (1 + a·z⁻¹)` mixed with the
/// direct signal (Regalia and Mitra, "Tunable Digital Frequency Response
/// Equalization Filters"). Sum and difference of the two paths split the
/// band at the all-pass corner; one of them is scaled by the shelf gain.
use contour_core::{db_to_amplitude, Result, DEFAULT_SAMPLE_RATE};
use rustfft::num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::trace;

use crate::grid::{log_frequency_grid, FIRST_ORDER_START_EXP};
use crate::params::{band_edges, check_center_frequency, check_sample_rate, limit_edge};
use crate::response::FrequencyResponse;

/// Q used to place the shelf corner relative to the center frequency
pub const SHELF_Q_FACTOR: f64 = 5.0;

/// Gain of the attenuated side of the shelf (dB)
pub const SHELF_GAIN_DB: f64 = -20.0;

/// Which side of the corner keeps unity gain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShelfKind {
    /// Passes highs, shelves the lows down
    #[default]
    Highpass,
    /// Passes lows, shelves the highs down
    Lowpass,
}

/// First-order shelving filter design parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirstOrderSettings {
    /// Center frequency in Hz, within (0, fs/2]
    pub center_freq_hz: f64,
    /// Sample rate in Hz
    pub sample_rate_hz: f64,
    /// Shelf direction
    pub kind: ShelfKind,
    /// Keep the corner frequency within [0.1 Hz, fs/2]
    pub band_limit: bool,
}

impl Default for FirstOrderSettings {
    fn default() -> Self {
        Self {
            center_freq_hz: 1000.0,
            sample_rate_hz: DEFAULT_SAMPLE_RATE,
            kind: ShelfKind::Highpass,
            band_limit: true,
        }
    }
}

impl FirstOrderSettings {
    /// Create settings with band limiting on
    pub fn new(center_freq_hz: f64, sample_rate_hz: f64, kind: ShelfKind) -> Self {
        Self {
            center_freq_hz,
            sample_rate_hz,
            kind,
            band_limit: true,
        }
    }

    /// Validate the parameters and derive the all-pass coefficient
    pub fn coefficients(&self) -> Result<FirstOrderCoefficients> {
        let fs = self.sample_rate_hz;
        check_sample_rate(fs)?;
        check_center_frequency(self.center_freq_hz, fs)?;

        let (lower, upper) = band_edges(self.center_freq_hz, SHELF_Q_FACTOR);
        let corner = match self.kind {
            ShelfKind::Highpass => upper,
            ShelfKind::Lowpass => lower,
        };
        let corner = if self.band_limit {
            limit_edge(corner, fs)
        } else {
            corner
        };

        // Bilinear transform of the corner: tan(ω/2) with ω = 2π·f/fs
        let t = (PI * corner / fs).tan();
        let coeffs = FirstOrderCoefficients {
            a: (t - 1.0) / (t + 1.0),
            k: db_to_amplitude(SHELF_GAIN_DB),
            kind: self.kind,
            sample_rate_hz: fs,
        };

        trace!(corner_hz = corner, a = coeffs.a, "first-order coefficients");
        Ok(coeffs)
    }

    /// Frequency response on the first-order grid
    pub fn design(&self) -> Result<FrequencyResponse> {
        let coeffs = self.coefficients()?;
        let grid = log_frequency_grid(FIRST_ORDER_START_EXP, self.sample_rate_hz);
        Ok(FrequencyResponse::evaluate(grid, |f| coeffs.response_at(f)))
    }
}

/// Designed first-order shelf
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FirstOrderCoefficients {
    /// All-pass coefficient
    pub a: f64,
    /// Linear shelf gain
    pub k: f64,
    /// Shelf direction
    pub kind: ShelfKind,
    /// Sample rate the coefficient was derived for
    pub sample_rate_hz: f64,
}

impl FirstOrderCoefficients {
    /// All-pass response at one frequency
    #[inline]
    pub fn allpass_at(&self, freq_hz: f64) -> Complex64 {
        let z_inv = Complex64::from_polar(1.0, -2.0 * PI * freq_hz / self.sample_rate_hz);
        (z_inv + self.a) / (1.0 + self.a * z_inv)
    }

    /// Shelf response at one frequency
    pub fn response_at(&self, freq_hz: f64) -> Complex64 {
        let a = self.allpass_at(freq_hz);
        let one = Complex64::new(1.0, 0.0);
        match self.kind {
            ShelfKind::Highpass => 0.5 * (one - a) + 0.5 * self.k * (one + a),
            ShelfKind::Lowpass => 0.5 * (one + a) + 0.5 * self.k * (one - a),
        }
    }
}

/// Design a first-order shelving filter
///
/// # Arguments
/// * `center_freq_hz` - Center frequency, within (0, fs/2]
/// * `sample_rate_hz` - Sample rate, greater than 0
/// * `kind` - Shelf direction
/// * `band_limit` - Keep the corner within [0.1 Hz, fs/2]
///
/// # Returns
/// `floor(fs/2)` log-spaced frequencies from 10^0.1 Hz to fs/2 and the
/// complex response at each, or `InvalidParameter` without computing anything.
pub fn design_first_order(
    center_freq_hz: f64,
    sample_rate_hz: f64,
    kind: ShelfKind,
    band_limit: bool,
) -> Result<FrequencyResponse> {
    FirstOrderSettings {
        center_freq_hz,
        sample_rate_hz,
        kind,
        band_limit,
    }
    .design()
}

/// Time-domain realisation of a first-order shelf
///
/// Direct form all-pass `y[n] = a·x[n] + x[n-1] - a·y[n-1]`, mixed with the
/// input exactly as the designed response.
#[derive(Debug, Clone)]
pub struct ShelvingFilter {
    coeffs: FirstOrderCoefficients,
    x1: f64,
    y1: f64,
}

impl ShelvingFilter {
    /// Create a filter with cleared state
    pub fn new(coeffs: FirstOrderCoefficients) -> Self {
        Self {
            coeffs,
            x1: 0.0,
            y1: 0.0,
        }
    }

    /// Coefficients in use
    pub fn coefficients(&self) -> FirstOrderCoefficients {
        self.coeffs
    }

    /// Filter one sample
    #[inline]
    pub fn process_sample(&mut self, input: f64) -> f64 {
        let a = self.coeffs.a;
        let allpass = a * input + self.x1 - a * self.y1;
        self.x1 = input;
        self.y1 = allpass;

        let k = self.coeffs.k;
        match self.coeffs.kind {
            ShelfKind::Highpass => 0.5 * (input - allpass) + 0.5 * k * (input + allpass),
            ShelfKind::Lowpass => 0.5 * (input + allpass) + 0.5 * k * (input - allpass),
        }
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
        self.y1 = 0.0;
    }
}
