/// Core error types for Contour
use thiserror::Error;

/// Result type alias using `ContourError`
pub type Result<T> = std::result::Result<T, ContourError>;

/// Core error type for Contour
///
/// Only the filter designers report errors. The compressor path corrects
/// its parameters instead and never produces one of these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContourError {
    /// A design parameter is outside the range the formulas accept
    #[error("Invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        /// Argument name as the caller knows it
        name: &'static str,
        /// Rejected value
        value: f64,
        /// Accepted range, in words
        reason: String,
    },
}

impl ContourError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(name: &'static str, value: f64, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason: reason.into(),
        }
    }

    /// Name of the offending argument
    pub fn parameter(&self) -> &'static str {
        match self {
            Self::InvalidParameter { name, .. } => name,
        }
    }
}
