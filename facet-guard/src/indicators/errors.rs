//! Error types for the indicator engine.

use thiserror::Error;

/// Result type for indicator operations.
pub type IndicatorResult<T> = std::result::Result<T, IndicatorError>;

/// Errors that can occur during indicator computation.
#[derive(Error, Debug)]
pub enum IndicatorError {
    /// Invalid configuration or parameters.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Data type mismatch or invalid data.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Arrow computation error.
    #[error("Arrow computation failed: {0}")]
    ArrowComputation(#[from] arrow::error::ArrowError),

    /// Generic indicator error with custom message.
    #[error("{0}")]
    Custom(String),
}

impl IndicatorError {
    /// Creates an invalid configuration error with the given message.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Creates an invalid data error with the given message.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Creates a custom error with the given message.
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }
}
