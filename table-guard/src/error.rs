//! Error types for the table-guard validation library.
//!
//! This module provides the error handling strategy using `thiserror`
//! for automatic error trait implementations. Every fallible operation in
//! the crate returns a [`GuardError`].
//!
//! Errors fall in two groups:
//!
//! - **Build time**: [`GuardError::Configuration`] is raised while a guard is
//!   being built, never deferred to the first call.
//! - **Call time**: [`GuardError::Validation`] carries the
//!   [`ViolationReport`] of a failed check. The remaining variants describe
//!   checks that could not be evaluated at all (unknown column, badly typed
//!   parameter, Arrow kernel failure); those are always fatal, even for
//!   guards in warn mode.

use crate::core::ViolationReport;
use thiserror::Error;

/// The main error type for the table-guard library.
#[derive(Error, Debug)]
pub enum GuardError {
    /// A guard or check was configured in a way that can never be bound.
    #[error("Configuration error in '{check}': {message}")]
    Configuration {
        /// Name of the check being configured
        check: String,
        /// Detailed error message
        message: String,
    },

    /// A check found data violating its invariant.
    #[error("Validation failed: {0}")]
    Validation(Box<ViolationReport>),

    /// A bound parameter is missing or does not have the expected shape.
    #[error("Invalid parameter '{parameter}' for '{check}': {message}")]
    InvalidParameter {
        /// Name of the check receiving the parameter
        check: String,
        /// Name of the parameter
        parameter: String,
        /// Detailed error message
        message: String,
    },

    /// Error when a required column is not found in the dataset.
    #[error("Column '{column}' not found in dataset")]
    ColumnNotFound { column: String },

    /// Error when a column does not have the type a check needs.
    #[error("Type mismatch for column '{column}': expected {expected}, found {found}")]
    TypeMismatch {
        column: String,
        expected: String,
        found: String,
    },

    /// Error from Arrow operations.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Error from serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A type alias for `Result<T, GuardError>`.
///
/// This is the standard `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, GuardError>;

impl GuardError {
    /// Creates a new configuration error.
    pub fn configuration(check: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            check: check.into(),
            message: message.into(),
        }
    }

    /// Creates a new invalid parameter error.
    pub fn invalid_parameter(
        check: impl Into<String>,
        parameter: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            check: check.into(),
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Creates a column-not-found error.
    pub fn column_not_found(column: impl Into<String>) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
        }
    }

    /// Returns the violation report if this error is a failed validation.
    pub fn violation(&self) -> Option<&ViolationReport> {
        match self {
            Self::Validation(report) => Some(&**report),
            _ => None,
        }
    }

    /// Returns true if this error is a failed validation.
    pub fn is_violation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<ViolationReport> for GuardError {
    fn from(report: ViolationReport) -> Self {
        Self::Validation(Box::new(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error() {
        let err = GuardError::configuration("is_shape", "2 positional values for 1 parameter");
        assert_eq!(
            err.to_string(),
            "Configuration error in 'is_shape': 2 positional values for 1 parameter"
        );
        assert!(!err.is_violation());
    }

    #[test]
    fn test_validation_error_carries_report() {
        let report = ViolationReport::new("none_missing", "1 missing value")
            .with_rows(vec![1])
            .with_columns(vec!["a".to_string()]);
        let err = GuardError::from(report.clone());

        assert!(err.is_violation());
        assert_eq!(err.violation(), Some(&report));
        assert!(err.to_string().starts_with("Validation failed: none_missing"));
    }

    #[test]
    fn test_column_not_found() {
        let err = GuardError::column_not_found("user_id");
        assert_eq!(err.to_string(), "Column 'user_id' not found in dataset");
    }

    #[test]
    fn test_type_mismatch() {
        let err = GuardError::TypeMismatch {
            column: "name".to_string(),
            expected: "numeric".to_string(),
            found: "Utf8".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Type mismatch for column 'name': expected numeric, found Utf8"
        );
    }

    #[test]
    fn test_invalid_parameter() {
        let err = GuardError::invalid_parameter("within_n_std", "n", "expected a number");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'n' for 'within_n_std': expected a number"
        );
    }
}
