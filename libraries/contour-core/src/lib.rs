//! Contour Core
//!
//! Shared building blocks for the Contour dynamics and EQ libraries.
//!
//! This crate provides:
//! - **Error Handling**: `ContourError` and the `Result` alias used by the
//!   fail-fast filter designers
//! - **Level Conversion**: dB ↔ linear amplitude, scalar and buffer forms
//!
//! # Example
//!
//! ```rust
//! use contour_core::{to_db, to_linear};
//!
//! let levels = to_db(&[1.0, 0.5, 0.0]);
//! assert_eq!(levels[0], 0.0);
//! assert!(levels[2].is_finite()); // zero is floored, never -inf
//!
//! let back = to_linear(&levels[..2]);
//! assert!((back[1] - 0.5).abs() < 1e-12);
//! ```

#![forbid(unsafe_code)]

pub mod convert;
pub mod error;

pub use convert::{amplitude_to_db, db_to_amplitude, to_db, to_linear, ZERO_FLOOR};
pub use error::{ContourError, Result};

/// Sample rate assumed when a caller does not pick one (Hz)
pub const DEFAULT_SAMPLE_RATE: f64 = 48_000.0;
