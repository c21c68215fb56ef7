//! Property-based tests for level conversion
//!
//! These tests use proptest to verify invariants across many random inputs.

use contour_core::{amplitude_to_db, db_to_amplitude, to_db, ZERO_FLOOR};
use proptest::prelude::*;

proptest! {
    /// Property: linear -> dB -> linear returns the original amplitude
    #[test]
    fn round_trip_is_identity(x in 1e-9f64..100.0) {
        let back = db_to_amplitude(amplitude_to_db(x));
        prop_assert!((back - x).abs() <= x * 1e-10, "{} became {}", x, back);
    }

    /// Property: dB conversion never produces NaN or Inf for non-negative input
    #[test]
    fn to_db_is_total(samples in prop::collection::vec(0.0f64..10.0, 0..256)) {
        let db = to_db(&samples);
        prop_assert_eq!(db.len(), samples.len());
        prop_assert!(db.iter().all(|v| v.is_finite()));
    }

    /// Property: conversion is monotonic
    #[test]
    fn to_db_is_monotonic(a in 1e-9f64..10.0, b in 1e-9f64..10.0) {
        prop_assume!(a < b);
        prop_assert!(amplitude_to_db(a) < amplitude_to_db(b));
    }
}

#[test]
fn silence_maps_to_floor() {
    assert_eq!(to_db(&[0.0]), vec![20.0 * ZERO_FLOOR.log10()]);
}
