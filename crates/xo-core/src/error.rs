//! # AppError
//!
//! Centralized error handling for the xrponline services.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all xo-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Validation failure (e.g., malformed body, missing query parameter)
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Admin credential missing or wrong
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Infrastructure failure (e.g., poisoned store lock)
    #[error("internal service error: {0}")]
    Internal(String),
}

/// A specialized Result type for xrponline logic.
pub type Result<T> = std::result::Result<T, AppError>;
