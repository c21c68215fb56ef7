/// Dynamic Range Compressor
///
/// Bundles the compressor parameters with a detector topology so a caller
/// can configure once and process many buffers.
use contour_core::DEFAULT_SAMPLE_RATE;
use serde::{Deserialize, Serialize};

use crate::level_detector::MIN_TIME_CONSTANT_S;
use crate::topology::Topology;

/// Compressor settings
///
/// Values are never rejected. [`Compressor::process`] runs on
/// [`CompressorSettings::sanitized`], which corrects out-of-range ratio,
/// knee and time constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressorSettings {
    /// Threshold in dB
    /// Signals above this level will be compressed
    pub threshold_db: f64,

    /// Ratio (e.g., 4.0 means 4:1 compression)
    pub ratio: f64,

    /// Attack time in seconds
    pub attack_s: f64,

    /// Release time in seconds
    pub release_s: f64,

    /// Knee width in dB (0 = hard knee, >0 = soft knee)
    pub knee_width_db: f64,

    /// Makeup gain in dB, applied after compression
    pub makeup_gain_db: f64,

    /// Sample rate in Hz
    pub sample_rate_hz: f64,
}

impl CompressorSettings {
    /// Create default compressor settings
    /// - Threshold: -20 dB
    /// - Ratio: 4:1
    /// - Attack: 5 ms
    /// - Release: 50 ms
    /// - Soft knee: 6 dB
    /// - Makeup gain: 0 dB
    /// - Sample rate: 48 kHz
    pub fn new() -> Self {
        Self {
            threshold_db: -20.0,
            ratio: 4.0,
            attack_s: 0.005,
            release_s: 0.05,
            knee_width_db: 6.0,
            makeup_gain_db: 0.0,
            sample_rate_hz: DEFAULT_SAMPLE_RATE,
        }
    }

    /// Create settings for gentle compression (vocals, acoustic)
    pub fn gentle() -> Self {
        Self {
            threshold_db: -15.0,
            ratio: 2.5,
            attack_s: 0.01,
            release_s: 0.1,
            knee_width_db: 8.0,
            makeup_gain_db: 3.0,
            ..Self::new()
        }
    }

    /// Create settings for moderate compression (mix bus)
    pub fn moderate() -> Self {
        Self {
            threshold_db: -18.0,
            makeup_gain_db: 4.0,
            ..Self::new()
        }
    }

    /// Create settings for aggressive compression (limiting)
    pub fn aggressive() -> Self {
        Self {
            threshold_db: -12.0,
            ratio: 10.0,
            attack_s: 0.001,
            release_s: 0.03,
            knee_width_db: 2.0,
            makeup_gain_db: 6.0,
            ..Self::new()
        }
    }

    /// Use a different sample rate
    pub fn with_sample_rate(mut self, sample_rate_hz: f64) -> Self {
        self.sample_rate_hz = sample_rate_hz;
        self
    }

    /// Settings with the permissive corrections applied
    ///
    /// - ratio <= 0 becomes 1
    /// - negative knee width becomes 0 (a zero knee is evaluated with a tiny
    ///   width internally, but reported here as 0)
    /// - attack/release <= 0 become 1 ms
    pub fn sanitized(mut self) -> Self {
        if self.ratio <= 0.0 {
            self.ratio = 1.0;
        }
        self.knee_width_db = self.knee_width_db.max(0.0);
        if self.attack_s <= 0.0 {
            self.attack_s = MIN_TIME_CONSTANT_S;
        }
        if self.release_s <= 0.0 {
            self.release_s = MIN_TIME_CONSTANT_S;
        }
        self
    }
}

impl Default for CompressorSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Dynamic Range Compressor
///
/// Stateless between calls: every buffer starts with a fresh detector, so
/// independent buffers can be processed on separate threads.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Compressor {
    settings: CompressorSettings,
    topology: Topology,
}

impl Compressor {
    /// Create a return-to-zero compressor with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create compressor with specific settings
    pub fn with_settings(settings: CompressorSettings, topology: Topology) -> Self {
        Self { settings, topology }
    }

    /// Get current settings
    pub fn settings(&self) -> CompressorSettings {
        self.settings
    }

    /// Update compressor settings
    pub fn set_settings(&mut self, settings: CompressorSettings) {
        self.settings = settings;
    }

    /// Detector topology
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Change the detector topology
    pub fn set_topology(&mut self, topology: Topology) {
        self.topology = topology;
    }

    /// Compress a buffer, returning a new one of the same length
    pub fn process(&self, input: &[f64]) -> Vec<f64> {
        let s = self.settings.sanitized();
        self.topology.process(
            input,
            s.attack_s,
            s.release_s,
            s.threshold_db,
            s.ratio,
            s.makeup_gain_db,
            s.knee_width_db,
            s.sample_rate_hz,
        )
    }

    /// Compress a buffer in place
    pub fn process_in_place(&self, buffer: &mut [f64]) {
        let output = self.process(buffer);
        buffer.copy_from_slice(&output);
    }
}
