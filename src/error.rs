//! Error types for the Attendance Engine.
//!
//! The calculation itself never fails; these errors come from the layers
//! around it: configuration loading, roster lookups, the key-value store,
//! and validation of records submitted through the API.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Attendance Engine.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound {
///     id: "42".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: 42");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A policy value is outside its permitted range.
    #[error("Invalid policy field '{field}': {message}")]
    InvalidPolicy {
        /// The policy field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// No employee with the given id exists in the roster.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The employee id that was looked up.
        id: String,
    },

    /// The key-value store failed to read or write a key.
    #[error("Storage error for key '{key}': {message}")]
    StorageError {
        /// The storage key involved.
        key: String,
        /// A description of the failure.
        message: String,
    },

    /// A submitted timesheet entry or leave request was rejected.
    #[error("Invalid entry for {date}: {message}")]
    InvalidEntry {
        /// The date of the rejected record.
        date: NaiveDate,
        /// A description of what made the record invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
