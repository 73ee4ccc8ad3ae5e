//! Validation errors raised by the payback engine.

use thiserror::Error;

/// Input rejected before any payback arithmetic is attempted.
///
/// Errors are deterministic functions of the input; nothing here is retryable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Monthly household consumption was zero, negative or NaN.
    #[error("monthly consumption must be greater than 0, got {0}")]
    NonPositiveConsumption(f64),
    /// Storage capacity was zero, negative or NaN.
    #[error("storage size must be greater than 0, got {0}")]
    NonPositiveStorage(f64),
}

impl ValidationError {
    /// Dotted field path of the offending input.
    pub fn field(&self) -> &'static str {
        match self {
            Self::NonPositiveConsumption(_) => "household.monthly_consumption_kwh",
            Self::NonPositiveStorage(_) => "household.storage_size_kwh",
        }
    }
}
