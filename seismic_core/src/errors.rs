//! # Error Types
//!
//! Structured error types for seismic_core. Every failure carries enough
//! context (field, offending value, reason) for a caller to show a useful
//! message or to fix the input programmatically.
//!
//! The taxonomy is small:
//!
//! - [`CalcError::Domain`] - a numeric input outside the formula's domain
//!   (period ≤ 0, plan dimension ≤ 0, R = 0, all storey weights zero)
//! - [`CalcError::KeyNotFound`] - a reference-table lookup for a pair the
//!   table does not list
//! - [`CalcError::Validation`] - storey geometry or array shapes that break
//!   an invariant
//!
//! The remaining variants belong to the job-file and export layer.
//!
//! ## Example
//!
//! ```rust
//! use seismic_core::errors::{CalcError, CalcResult};
//!
//! fn validate_height(height_m: f64) -> CalcResult<()> {
//!     if height_m <= 0.0 {
//!         return Err(CalcError::domain(
//!             "height_m",
//!             height_m.to_string(),
//!             "Building height must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert_eq!(validate_height(-3.0).unwrap_err().error_code(), "DOMAIN_ERROR");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for seismic_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A numeric input lies outside the domain of the formula
    #[error("Domain error for '{field}': {value} - {reason}")]
    Domain {
        field: String,
        value: String,
        reason: String,
    },

    /// A lookup key is not present in a closed reference table
    #[error("Key not found in {table}: {key}")]
    KeyNotFound { table: String, key: String },

    /// Input data violates a structural invariant (ordering, lengths)
    #[error("Validation failed for '{field}': {reason}")]
    Validation { field: String, reason: String },

    /// A pipeline stage was invoked before the stage it depends on
    #[error("Not computed: {stage} must be computed first")]
    NotComputed { stage: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create a Domain error
    pub fn domain(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::Domain {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a KeyNotFound error
    pub fn key_not_found(table: impl Into<String>, key: impl Into<String>) -> Self {
        CalcError::KeyNotFound {
            table: table.into(),
            key: key.into(),
        }
    }

    /// Create a Validation error
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a NotComputed error
    pub fn not_computed(stage: impl Into<String>) -> Self {
        CalcError::NotComputed {
            stage: stage.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by the numbers or shapes the caller supplied,
    /// as opposed to I/O or export failures.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CalcError::Domain { .. } | CalcError::KeyNotFound { .. } | CalcError::Validation { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::Domain { .. } => "DOMAIN_ERROR",
            CalcError::KeyNotFound { .. } => "KEY_NOT_FOUND",
            CalcError::Validation { .. } => "VALIDATION_ERROR",
            CalcError::NotComputed { .. } => "NOT_COMPUTED",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::SerializationError { reason: e.to_string() }
    }
}
