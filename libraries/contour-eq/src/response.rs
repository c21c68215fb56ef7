/// Complex frequency response on a frequency grid
use rustfft::num_complex::Complex64;

/// Frequencies (Hz) paired with the complex gain of a filter at each one
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyResponse {
    frequencies: Vec<f64>,
    response: Vec<Complex64>,
}

impl FrequencyResponse {
    /// Evaluate `transfer` at every frequency of `frequencies`
    pub(crate) fn evaluate(frequencies: Vec<f64>, transfer: impl Fn(f64) -> Complex64) -> Self {
        let response = frequencies.iter().map(|&f| transfer(f)).collect();
        Self {
            frequencies,
            response,
        }
    }

    /// Frequencies in Hz, ascending
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Complex gain at each frequency
    pub fn response(&self) -> &[Complex64] {
        &self.response
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// True when the grid has no points
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Iterate over (frequency, gain) pairs
    pub fn iter(&self) -> impl Iterator<Item = (f64, Complex64)> + '_ {
        self.frequencies.iter().copied().zip(self.response.iter().copied())
    }

    /// Magnitude of each point in dB
    pub fn magnitude_db(&self) -> Vec<f64> {
        self.response
            .iter()
            .map(|h| contour_core::amplitude_to_db(h.norm()))
            .collect()
    }

    /// Phase of each point in radians
    pub fn phase(&self) -> Vec<f64> {
        self.response.iter().map(|h| h.arg()).collect()
    }

    /// Grid point closest to `freq_hz`
    pub fn nearest(&self, freq_hz: f64) -> Option<(f64, Complex64)> {
        let idx = self.frequencies.partition_point(|&f| f < freq_hz);

        let candidates = [idx.checked_sub(1), Some(idx)];
        candidates
            .into_iter()
            .flatten()
            .filter(|&i| i < self.len())
            .min_by(|&a, &b| {
                let da = (self.frequencies[a] - freq_hz).abs();
                let db = (self.frequencies[b] - freq_hz).abs();
                da.total_cmp(&db)
            })
            .map(|i| (self.frequencies[i], self.response[i]))
    }

    /// Split into the frequency and response vectors
    pub fn into_parts(self) -> (Vec<f64>, Vec<Complex64>) {
        (self.frequencies, self.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(frequencies: Vec<f64>, gain: f64) -> FrequencyResponse {
        FrequencyResponse::evaluate(frequencies, |_| Complex64::new(gain, 0.0))
    }

    #[test]
    fn nearest_picks_closest_point() {
        let resp = flat(vec![10.0, 100.0, 1000.0], 1.0);
        assert_eq!(resp.nearest(40.0).map(|p| p.0), Some(10.0));
        assert_eq!(resp.nearest(60.0).map(|p| p.0), Some(100.0));
        assert_eq!(resp.nearest(5000.0).map(|p| p.0), Some(1000.0));
        assert_eq!(resp.nearest(1.0).map(|p| p.0), Some(10.0));
    }

    #[test]
    fn nearest_on_empty_response() {
        assert!(flat(Vec::new(), 1.0).nearest(100.0).is_none());
    }

    #[test]
    fn magnitude_and_phase() {
        let resp = FrequencyResponse::evaluate(vec![1.0, 2.0], |f| Complex64::new(0.0, f / 10.0));
        let mag = resp.magnitude_db();
        assert!((mag[0] + 20.0).abs() < 1e-9);
        let phase = resp.phase();
        assert!((phase[1] - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn into_parts_keeps_order() {
        let (f, h) = flat(vec![1.0, 2.0, 3.0], 0.5).into_parts();
        assert_eq!(f, vec![1.0, 2.0, 3.0]);
        assert!(h.iter().all(|c| c.re == 0.5 && c.im == 0.0));
    }
}
