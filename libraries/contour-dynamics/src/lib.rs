//! Contour Dynamics
//!
//! Feed-forward dynamic range compression built from three parts:
//! - **Gain computer**: soft-knee static curve in the dB domain
//! - **Level detector**: one-pole attack/release peak follower
//! - **Topologies**: return-to-zero, return-to-threshold and log-domain
//!   placements of the detector
//!
//! Parameters are never rejected. A ratio <= 0 becomes 1, a negative knee
//! becomes a hard knee, and zero attack/release times become 1 ms.
//!
//! # Architecture
//!
//! ```text
//! return-to-zero:      x ─► |x| ─► detector ─► dB ─► gain computer ─┐
//! return-to-threshold: x ─► x - T ─► detector ─► dB + T ─► gain computer ─┤
//! log-domain:          x ─► |x| ─► dB ─► gain computer ─► detector ─┤
//!                      x ──────────────────────────────────────────► × ─► y
//! ```
//!
//! The detector-first variants apply `level - curve + makeup` as the control
//! gain; log-domain applies `makeup - smoothed reduction`.
//!
//! # Example
//!
//! ```rust
//! use contour_dynamics::{Compressor, CompressorSettings, Topology};
//!
//! let comp = Compressor::with_settings(CompressorSettings::moderate(), Topology::LogDomain);
//!
//! let input: Vec<f64> = (0..1024).map(|i| (i as f64 * 0.03).sin()).collect();
//! let output = comp.process(&input);
//! assert_eq!(output.len(), input.len());
//! ```

#![forbid(unsafe_code)]

mod compressor;
mod gain_computer;
mod level_detector;
mod topology;

pub use compressor::{Compressor, CompressorSettings};
pub use gain_computer::{compute_gain, gain_curve, MIN_KNEE_WIDTH_DB};
pub use level_detector::{smooth, LevelDetector, MIN_TIME_CONSTANT_S};
pub use topology::{log_domain, return_to_threshold, return_to_zero, Topology};

// Converters live in contour-core, re-exported for callers that only pull this crate
pub use contour_core::{to_db, to_linear};
