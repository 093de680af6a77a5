//! Ruler error types

use thiserror::Error;

/// Errors raised while setting up a ruler
///
/// Only construction can fail. Runtime input that does not fit the widget
/// (out-of-range values, stray pointer events) is clamped or ignored instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RulerError {
    /// The value range contains no ticks
    #[error("Empty value range: min {min} must be less than max {max}")]
    EmptyRange { min: i32, max: i32 },

    /// A geometric or tuning constant is out of range
    #[error("Invalid configuration for `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

impl RulerError {
    /// Shorthand for a field that must be strictly positive
    pub fn not_positive(field: &'static str, value: f32) -> Self {
        RulerError::InvalidConfig {
            field,
            reason: format!("must be a finite value > 0, got {value}"),
        }
    }

    /// Shorthand for a field that must be zero or positive
    pub fn negative(field: &'static str, value: f32) -> Self {
        RulerError::InvalidConfig {
            field,
            reason: format!("must be a finite value >= 0, got {value}"),
        }
    }
}

/// Result type for ruler operations
pub type Result<T> = std::result::Result<T, RulerError>;

/// Check that `value` is finite and strictly positive
pub fn ensure_positive(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RulerError::not_positive(field, value))
    }
}

/// Check that `value` is finite and not negative
pub fn ensure_non_negative(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(RulerError::negative(field, value))
    }
}
