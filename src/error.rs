//! Error types for the duty compliance engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while evaluating compliance.
//! Missing attendance is never an error; it is reported as an outcome.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the duty compliance engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use duty_compliance::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/policy.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/policy.yaml");
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

    /// Work-location code was not found in the policy configuration.
    #[error("Work location not found: {code}")]
    UnknownLocation {
        /// The location code that was not found.
        code: String,
    },

    /// No threshold row is configured for a role.
    #[error("No standards configured for role '{role}'")]
    UnknownRole {
        /// The role label.
        role: String,
    },

    /// A shift template was invalid.
    #[error("Invalid shift template '{template_id}': {message}")]
    InvalidShiftTemplate {
        /// The ID of the invalid template.
        template_id: String,
        /// A description of what made the template invalid.
        message: String,
    },

    /// A scheduled duty was invalid or contained inconsistent data.
    #[error("Invalid duty '{duty_id}': {message}")]
    InvalidDuty {
        /// The ID of the invalid duty.
        duty_id: String,
        /// A description of what made the duty invalid.
        message: String,
    },

    /// Two duties share the same staff, date and sequence.
    #[error("Duplicate duty for staff '{staff_id}' on {date} with sequence {sequence}")]
    DuplicateDuty {
        /// The staff member.
        staff_id: String,
        /// The duty date.
        date: NaiveDate,
        /// The repeated sequence number.
        sequence: u32,
    },

    /// An attendance record was invalid or contained inconsistent data.
    #[error("Invalid attendance '{attendance_id}': {message}")]
    InvalidAttendance {
        /// The ID of the invalid record.
        attendance_id: String,
        /// A description of what made the record invalid.
        message: String,
    },

    /// A reporting period was invalid.
    #[error("Invalid period: {message}")]
    InvalidPeriod {
        /// A description of what made the period invalid.
        message: String,
    },

    /// The roster source failed to supply data.
    #[error("Roster source error: {message}")]
    SourceError {
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
