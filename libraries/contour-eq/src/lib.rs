//! Contour EQ
//!
//! Shelving and peaking filter design from all-pass prototypes:
//! - **First order**: shelf with a fixed -20 dB step, corner placed from
//!   the center frequency with Q = 5
//! - **Second order**: peak/notch with gain and Q at a center frequency
//!
//! Designers return the complex frequency response on a log-spaced grid up
//! to Nyquist. Unlike the compressor, they are strict: an invalid sample
//! rate, center frequency or Q is reported as
//! [`ContourError::InvalidParameter`] and nothing is computed.
//!
//! Each design can also be realised as a time-domain filter
//! ([`ShelvingFilter`], [`PeakingFilter`]) whose impulse response matches
//! the designed response.
//!
//! # Example
//!
//! ```rust
//! use contour_eq::{design_second_order, ContourError};
//!
//! let response = design_second_order(1000.0, 6.0, 5.0, 48000.0, true)?;
//! let (freq, gain) = response.nearest(1000.0).unwrap();
//! assert!((freq - 1000.0).abs() < 1.0);
//! assert!((gain.norm() - 1.995).abs() < 0.1);
//!
//! assert!(design_second_order(1000.0, 6.0, 0.0, 48000.0, true).is_err());
//! # Ok::<(), ContourError>(())
//! ```

#![forbid(unsafe_code)]

mod first_order;
mod grid;
mod params;
mod response;
mod second_order;

pub use first_order::{
    design_first_order, FirstOrderCoefficients, FirstOrderSettings, ShelfKind, ShelvingFilter,
    SHELF_GAIN_DB, SHELF_Q_FACTOR,
};
pub use grid::{grid_len, log_frequency_grid, FIRST_ORDER_START_EXP, SECOND_ORDER_START_EXP};
pub use params::{band_edges, MIN_BAND_EDGE_HZ};
pub use response::FrequencyResponse;
pub use second_order::{
    design_second_order, PeakingFilter, SecondOrderCoefficients, SecondOrderSettings,
    DEFAULT_Q_FACTOR,
};

pub use contour_core::{ContourError, Result};
pub use rustfft::num_complex::Complex64;
