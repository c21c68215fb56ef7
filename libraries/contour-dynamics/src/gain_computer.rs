/// Soft-knee gain computer
///
/// Static compression curve in the dB domain. Maps an input level to the
/// level the compressor wants at its output; the difference is the gain
/// reduction the topologies apply.
use tracing::debug;

/// Knee width substituted for an exact zero, the knee blend divides by it
pub const MIN_KNEE_WIDTH_DB: f64 = 1e-5;

/// Ratio and knee width after the permissive corrections
///
/// - ratio <= 0 becomes 1 (no compression)
/// - negative knee width becomes 0
/// - a zero knee width becomes [`MIN_KNEE_WIDTH_DB`]
#[inline]
pub(crate) fn sanitize_curve(ratio: f64, knee_width_db: f64) -> (f64, f64) {
    let ratio = if ratio <= 0.0 {
        debug!(ratio, "ratio must be positive, using 1:1");
        1.0
    } else {
        ratio
    };

    let knee_width_db = if knee_width_db < 0.0 {
        debug!(knee_width_db, "negative knee width, using hard knee");
        0.0
    } else {
        knee_width_db
    };

    let knee_width_db = if knee_width_db == 0.0 {
        MIN_KNEE_WIDTH_DB
    } else {
        knee_width_db
    };

    (ratio, knee_width_db)
}

/// Evaluate the curve for one level with already sanitized parameters
#[inline]
fn curve(input_db: f64, threshold_db: f64, ratio: f64, knee_width_db: f64) -> f64 {
    let overshoot = input_db - threshold_db;

    if 2.0 * overshoot < -knee_width_db {
        // Below the knee, unity gain
        input_db
    } else if 2.0 * overshoot.abs() <= knee_width_db {
        // Inside the knee, quadratic blend between the two slopes
        let x = overshoot + knee_width_db / 2.0;
        input_db + (1.0 / ratio - 1.0) * x * x / (2.0 * knee_width_db)
    } else {
        threshold_db + overshoot / ratio
    }
}

/// Output level (dB) of the static curve for a single input level (dB)
///
/// Invalid `ratio` and `knee_width_db` are corrected the same way as in
/// [`compute_gain`].
pub fn gain_curve(input_db: f64, threshold_db: f64, ratio: f64, knee_width_db: f64) -> f64 {
    let (ratio, knee_width_db) = sanitize_curve(ratio, knee_width_db);
    curve(input_db, threshold_db, ratio, knee_width_db)
}

/// Apply the static curve to a buffer of levels in dB
///
/// # Arguments
/// * `input_db` - Input levels in dB
/// * `threshold_db` - Level where compression starts
/// * `ratio` - Input/output ratio above the threshold (<= 0 is treated as 1)
/// * `knee_width_db` - Width of the soft knee (negative is treated as 0)
///
/// # Returns
/// Output levels in dB, same length as the input
pub fn compute_gain(input_db: &[f64], threshold_db: f64, ratio: f64, knee_width_db: f64) -> Vec<f64> {
    let (ratio, knee_width_db) = sanitize_curve(ratio, knee_width_db);

    input_db
        .iter()
        .map(|&x| curve(x, threshold_db, ratio, knee_width_db))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_below_knee() {
        let out = compute_gain(&[-60.0, -40.0, -25.0], -20.0, 4.0, 6.0);
        assert_eq!(out, vec![-60.0, -40.0, -25.0]);
    }

    #[test]
    fn hard_knee_above_threshold() {
        // At -16dB (4dB above threshold), 4:1 ratio gives -19dB
        let out = compute_gain(&[-16.0, -10.0], -20.0, 4.0, 0.0);
        assert!((out[0] - (-19.0)).abs() < 1e-9, "got {}", out[0]);
        assert!((out[1] - (-17.5)).abs() < 1e-9, "got {}", out[1]);
    }

    #[test]
    fn hard_knee_is_discontinuous_slope_at_threshold() {
        let just_below = gain_curve(-20.001, -20.0, 4.0, 0.0);
        let just_above = gain_curve(-19.999, -20.0, 4.0, 0.0);
        assert_eq!(just_below, -20.001);
        assert!((just_above - (-20.0 + 0.001 / 4.0)).abs() < 1e-9);
    }

    #[test]
    fn soft_knee_is_continuous_at_edges() {
        let (t, r, w) = (-20.0, 4.0, 6.0);
        let lower = t - w / 2.0;
        let upper = t + w / 2.0;

        assert!((gain_curve(lower, t, r, w) - lower).abs() < 1e-9);
        assert!((gain_curve(upper, t, r, w) - (t + (upper - t) / r)).abs() < 1e-9);
    }

    #[test]
    fn soft_knee_midpoint() {
        // At the threshold: x + (1/r - 1) * (W/2)^2 / (2W) = -20 - 0.75 * 9 / 12
        let out = gain_curve(-20.0, -20.0, 4.0, 6.0);
        assert!((out - (-20.5625)).abs() < 1e-9, "got {}", out);
    }

    #[test]
    fn invalid_ratio_means_no_compression() {
        for ratio in [0.0, -3.0] {
            let out = compute_gain(&[-30.0, 0.0, 12.0], -20.0, ratio, 0.0);
            assert_eq!(out, vec![-30.0, 0.0, 12.0]);
        }
    }

    #[test]
    fn negative_knee_acts_as_hard_knee() {
        let soft = compute_gain(&[-10.0], -20.0, 4.0, -5.0);
        let hard = compute_gain(&[-10.0], -20.0, 4.0, 0.0);
        assert_eq!(soft, hard);
    }

    #[test]
    fn empty_input() {
        assert!(compute_gain(&[], -20.0, 4.0, 6.0).is_empty());
    }
}
