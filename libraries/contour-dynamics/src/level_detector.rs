/// Peak level detector
///
/// One-pole smoothing with separate attack and release coefficients,
/// operating on linear amplitudes. On release the estimate decays toward
/// zero at a fixed rate rather than toward the input, so it behaves like a
/// peak follower.
use tracing::debug;

/// Time constant used when a caller passes a zero (or negative) attack/release
pub const MIN_TIME_CONSTANT_S: f64 = 1e-3;

/// Attack/release coefficients for a given sample rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelDetector {
    attack_coeff: f64,
    release_coeff: f64,
}

impl LevelDetector {
    /// Create a detector from attack/release times in seconds
    ///
    /// Uses the standard formula `coeff = exp(-1 / (time * sample_rate))`.
    /// Times that are not positive fall back to [`MIN_TIME_CONSTANT_S`].
    pub fn new(attack_s: f64, release_s: f64, sample_rate_hz: f64) -> Self {
        let attack_s = sanitize_time("attack_s", attack_s);
        let release_s = sanitize_time("release_s", release_s);

        Self {
            attack_coeff: (-1.0 / (attack_s * sample_rate_hz)).exp(),
            release_coeff: (-1.0 / (release_s * sample_rate_hz)).exp(),
        }
    }

    /// Attack smoothing coefficient
    pub fn attack_coeff(&self) -> f64 {
        self.attack_coeff
    }

    /// Release smoothing coefficient
    pub fn release_coeff(&self) -> f64 {
        self.release_coeff
    }

    /// Advance the detector by one sample
    ///
    /// Takes the previous estimate and returns the new one.
    #[inline]
    pub fn step(&self, previous: f64, input: f64) -> f64 {
        if input > previous {
            self.attack_coeff * previous + (1.0 - self.attack_coeff) * input
        } else {
            self.release_coeff * previous
        }
    }

    /// Run the detector over a buffer, starting from a zero estimate
    pub fn process(&self, input: &[f64]) -> Vec<f64> {
        input
            .iter()
            .scan(0.0, |level, &x| {
                *level = self.step(*level, x);
                Some(*level)
            })
            .collect()
    }
}

fn sanitize_time(name: &'static str, seconds: f64) -> f64 {
    if seconds <= 0.0 {
        debug!(parameter = name, seconds, "time constant must be positive, using 1 ms");
        MIN_TIME_CONSTANT_S
    } else {
        seconds
    }
}

/// Smooth a buffer of linear levels with attack/release ballistics
///
/// # Arguments
/// * `input` - Linear-domain levels
/// * `attack_s` - Attack time in seconds (0 is treated as 1 ms)
/// * `release_s` - Release time in seconds (0 is treated as 1 ms)
/// * `sample_rate_hz` - Sample rate in Hz
///
/// The estimate before the first sample is 0.
pub fn smooth(input: &[f64], attack_s: f64, release_s: f64, sample_rate_hz: f64) -> Vec<f64> {
    LevelDetector::new(attack_s, release_s, sample_rate_hz).process(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coefficients_follow_time_constants() {
        let det = LevelDetector::new(0.005, 0.05, 48000.0);
        assert!((det.attack_coeff() - (-1.0_f64 / 240.0).exp()).abs() < 1e-15);
        assert!((det.release_coeff() - (-1.0_f64 / 2400.0).exp()).abs() < 1e-15);
    }

    #[test]
    fn zero_times_use_one_millisecond() {
        let zero = LevelDetector::new(0.0, 0.0, 48000.0);
        let one_ms = LevelDetector::new(1e-3, 1e-3, 48000.0);
        assert_eq!(zero, one_ms);
    }

    #[test]
    fn first_sample_starts_from_zero() {
        let det = LevelDetector::new(0.01, 0.1, 48000.0);
        let out = det.process(&[1.0, 0.0]);
        assert!((out[0] - (1.0 - det.attack_coeff())).abs() < 1e-15);

        // A buffer that ends loud must not leak into the first sample
        let out = det.process(&[0.0, 1.0, 1.0]);
        assert_eq!(out[0], 0.0);
    }

    #[test]
    fn release_decays_toward_zero() {
        let det = LevelDetector::new(0.001, 0.01, 48000.0);
        let mut input = vec![1.0; 100];
        input.extend(vec![0.5; 10]);
        let out = det.process(&input);

        // Below the estimate the input is ignored and the level just decays
        for pair in out[99..].windows(2) {
            assert!((pair[1] - det.release_coeff() * pair[0]).abs() < 1e-15);
        }
    }

    #[test]
    fn output_length_matches_input() {
        assert_eq!(smooth(&[0.1; 17], 0.01, 0.1, 44100.0).len(), 17);
        assert!(smooth(&[], 0.01, 0.1, 44100.0).is_empty());
    }
}
