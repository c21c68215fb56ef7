/// Compressor topologies
///
/// Three placements of the level detector relative to the gain computer
/// (Giannoulis, Massberg and Reiss, "Digital Dynamic Range Compressor
/// Design", Fig. 7 a-c). Each takes a linear buffer and returns the
/// compressed buffer, same length.
use contour_core::{amplitude_to_db, db_to_amplitude};
use serde::{Deserialize, Serialize};

use crate::gain_computer::compute_gain;
use crate::level_detector::LevelDetector;

/// Where the level detector sits in the side chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    /// Detector on |x|, relaxes toward zero between peaks
    #[default]
    ReturnToZero,
    /// Detector on x - threshold, relaxes toward the threshold
    ReturnToThreshold,
    /// Detector smooths the gain reduction in the dB domain
    LogDomain,
}

impl Topology {
    /// All topologies, in figure order
    pub const ALL: [Topology; 3] = [
        Topology::ReturnToZero,
        Topology::ReturnToThreshold,
        Topology::LogDomain,
    ];

    /// Run this topology over a buffer
    pub fn process(
        self,
        input: &[f64],
        attack_s: f64,
        release_s: f64,
        threshold_db: f64,
        ratio: f64,
        makeup_gain_db: f64,
        knee_width_db: f64,
        sample_rate_hz: f64,
    ) -> Vec<f64> {
        let f = match self {
            Topology::ReturnToZero => return_to_zero,
            Topology::ReturnToThreshold => return_to_threshold,
            Topology::LogDomain => log_domain,
        };
        f(
            input,
            attack_s,
            release_s,
            threshold_db,
            ratio,
            makeup_gain_db,
            knee_width_db,
            sample_rate_hz,
        )
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Topology::ReturnToZero => "Return-to-zero",
            Topology::ReturnToThreshold => "Return-to-threshold",
            Topology::LogDomain => "Log-domain",
        }
    }
}

/// Multiply the input by `10^(gain / 20)` sample by sample
fn apply_control(input: &[f64], gain_db: impl Iterator<Item = f64>) -> Vec<f64> {
    input
        .iter()
        .zip(gain_db)
        .map(|(&x, gain)| x * db_to_amplitude(gain))
        .collect()
}

/// Run a detected level (dB) through the static curve and apply
/// `level - curve + makeup` as the control gain
///
/// The detector-first variants add the level-to-curve difference back on,
/// so a level above the threshold raises the gain rather than lowering it.
fn compress_detected_level(
    input: &[f64],
    level_db: &[f64],
    threshold_db: f64,
    ratio: f64,
    makeup_gain_db: f64,
    knee_width_db: f64,
) -> Vec<f64> {
    let curve_db = compute_gain(level_db, threshold_db, ratio, knee_width_db);
    let gain_db = level_db
        .iter()
        .zip(&curve_db)
        .map(|(level, out)| level - out + makeup_gain_db);
    apply_control(input, gain_db)
}

/// Return-to-zero detector (Fig. 7a)
///
/// |x| → level detector → dB → gain computer. The envelope falls back to
/// zero between peaks.
pub fn return_to_zero(
    input: &[f64],
    attack_s: f64,
    release_s: f64,
    threshold_db: f64,
    ratio: f64,
    makeup_gain_db: f64,
    knee_width_db: f64,
    sample_rate_hz: f64,
) -> Vec<f64> {
    let detector = LevelDetector::new(attack_s, release_s, sample_rate_hz);

    let rectified: Vec<f64> = input.iter().map(|x| x.abs()).collect();
    let level_db: Vec<f64> = detector
        .process(&rectified)
        .into_iter()
        .map(amplitude_to_db)
        .collect();

    compress_detected_level(input, &level_db, threshold_db, ratio, makeup_gain_db, knee_width_db)
}

/// Return-to-threshold detector (Fig. 7b)
///
/// The threshold is subtracted from the signed input in the linear domain
/// before the detector and added back in the dB domain afterwards, so the
/// envelope rests at the threshold instead of at zero. Samples below the
/// threshold, negative half-cycles included, only drive the release branch.
pub fn return_to_threshold(
    input: &[f64],
    attack_s: f64,
    release_s: f64,
    threshold_db: f64,
    ratio: f64,
    makeup_gain_db: f64,
    knee_width_db: f64,
    sample_rate_hz: f64,
) -> Vec<f64> {
    let detector = LevelDetector::new(attack_s, release_s, sample_rate_hz);
    let threshold_linear = db_to_amplitude(threshold_db);

    let shifted: Vec<f64> = input.iter().map(|x| x - threshold_linear).collect();
    // The estimate never goes negative: it starts at 0, attack only moves it
    // toward a larger input and release scales it down.
    let level_db: Vec<f64> = detector
        .process(&shifted)
        .into_iter()
        .map(|level| amplitude_to_db(level) + threshold_db)
        .collect();

    compress_detected_level(input, &level_db, threshold_db, ratio, makeup_gain_db, knee_width_db)
}

/// Log-domain detector (Fig. 7c)
///
/// |x| → dB → gain computer, then the detector smooths the gain reduction
/// itself, so attack/release shape the gain change rather than the level.
/// The control gain is `makeup - smoothed reduction`. The detector runs at
/// `sample_rate_hz` like the other two variants, not at a fixed 48 kHz.
pub fn log_domain(
    input: &[f64],
    attack_s: f64,
    release_s: f64,
    threshold_db: f64,
    ratio: f64,
    makeup_gain_db: f64,
    knee_width_db: f64,
    sample_rate_hz: f64,
) -> Vec<f64> {
    let detector = LevelDetector::new(attack_s, release_s, sample_rate_hz);

    let input_db: Vec<f64> = input.iter().map(|x| amplitude_to_db(x.abs())).collect();
    let curve_db = compute_gain(&input_db, threshold_db, ratio, knee_width_db);
    let reduction: Vec<f64> = input_db.iter().zip(&curve_db).map(|(x, y)| x - y).collect();

    let smoothed = detector.process(&reduction);
    apply_control(input, smoothed.into_iter().map(|r| makeup_gain_db - r))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FS: f64 = 48000.0;

    #[test]
    fn unity_ratio_passes_single_sample() {
        for topology in Topology::ALL {
            let out = topology.process(&[1.0], 0.01, 0.1, -10.0, 1.0, 0.0, 0.0, FS);
            assert_eq!(out.len(), 1);
            assert!((out[0] - 1.0).abs() < 1e-9, "{}: {}", topology.name(), out[0]);
        }
    }

    #[test]
    fn unity_ratio_applies_only_makeup() {
        let input: Vec<f64> = (0..256).map(|i| (i as f64 * 0.1).sin() * 0.9).collect();
        let makeup = db_to_amplitude(6.0);

        for topology in Topology::ALL {
            let out = topology.process(&input, 0.005, 0.05, -30.0, 1.0, 6.0, 0.0, FS);
            for (x, y) in input.iter().zip(&out) {
                assert!((x * makeup - y).abs() < 1e-9, "{}", topology.name());
            }
        }
    }

    #[test]
    fn detector_first_variants_raise_gain_above_threshold() {
        // Steady 12 dBFS, 4:1 above -20 dB, hard knee
        let input = vec![4.0; 4800];
        let level_db = 20.0 * 4.0_f64.log10();

        // Return-to-zero settles on |x|: gain is 3/4 of the overshoot
        let out = return_to_zero(&input, 0.001, 0.1, -20.0, 4.0, 0.0, 0.0, FS);
        let expected = 4.0 * db_to_amplitude((level_db + 20.0) * 0.75);
        assert!((out[4799] - expected).abs() < 1e-9, "got {}, expected {}", out[4799], expected);

        // Return-to-threshold settles on x - 0.1, shifted back by -20 dB
        let shifted_db = 20.0 * 3.9_f64.log10() - 20.0;
        let out = return_to_threshold(&input, 0.001, 0.1, -20.0, 4.0, 0.0, 0.0, FS);
        let expected = 4.0 * db_to_amplitude((shifted_db + 20.0) * 0.75);
        assert!((out[4799] - expected).abs() < 1e-9, "got {}, expected {}", out[4799], expected);
        assert!(out[4799] > 4.0);
    }

    #[test]
    fn log_domain_lowers_gain_above_threshold() {
        let input = vec![4.0; 4800];
        let out = log_domain(&input, 0.001, 0.1, -20.0, 4.0, 0.0, 0.0, FS);
        let tail = out[4799];
        assert!(tail < 4.0, "did not compress: {}", tail);
        assert!(tail > 0.0, "inverted the signal");
    }

    #[test]
    fn return_to_threshold_ignores_negative_input() {
        // x - 0.1 = -2.1 never exceeds the zero estimate, so the detector stays at rest
        let input = vec![-2.0; 4800];
        let out = return_to_threshold(&input, 0.001, 0.1, -20.0, 4.0, 0.0, 0.0, FS);
        assert_eq!(out, input);

        // The rectified magnitude of the same buffer would have moved the gain
        let positive = vec![2.0; 4800];
        let out = return_to_threshold(&positive, 0.001, 0.1, -20.0, 4.0, 0.0, 0.0, FS);
        assert!(out[4799] > 2.0);
    }

    #[test]
    fn quiet_signal_is_untouched() {
        // -60 dBFS is far below a -20 dB threshold
        let input = vec![0.001; 1000];

        for topology in [Topology::ReturnToZero, Topology::LogDomain] {
            let out = topology.process(&input, 0.005, 0.05, -20.0, 4.0, 0.0, 6.0, FS);
            assert!(out.iter().all(|&y| (y - 0.001).abs() < 1e-15), "{}", topology.name());
        }
    }

    #[test]
    fn log_domain_smooths_gain_reduction() {
        // Steady 0 dBFS, 4:1 above -20 dB: static reduction is 15 dB
        let input = vec![1.0; 48000];
        let out = log_domain(&input, 0.01, 0.1, -20.0, 4.0, 0.0, 0.0, FS);

        // First sample only sees (1 - alpha_attack) of the reduction
        assert!(out[0] > 0.99);
        let settled = db_to_amplitude(-15.0);
        assert!((out[47999] - settled).abs() < 1e-6, "got {}", out[47999]);
    }

    #[test]
    fn sign_is_preserved() {
        let input = [0.8, -0.8, 0.8, -0.8];
        let out = return_to_zero(&input, 0.001, 0.05, -20.0, 4.0, 0.0, 0.0, FS);
        assert!(out[0] > 0.0 && out[1] < 0.0 && out[2] > 0.0 && out[3] < 0.0);
    }
}
