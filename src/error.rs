//! Error types for the Settlement Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading rate tables or
//! calculating a termination settlement.
//!
//! An invalid admission/termination date range is deliberately not an error:
//! it is reported through [`crate::models::SettlementStatus::InvalidDateRange`].

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Settlement Engine.
///
/// # Example
///
/// ```
/// use settlement_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
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

    /// No rate table set is effective on the requested date.
    #[error("No rate tables effective on {date}")]
    RateTableNotFound {
        /// The date for which rate tables were requested.
        date: NaiveDate,
    },

    /// A rate table violated one of its structural invariants.
    #[error("Invalid rate table '{table}': {message}")]
    InvalidRateTable {
        /// The name of the offending table.
        table: String,
        /// A description of the violated invariant.
        message: String,
    },

    /// An employment fact failed boundary validation.
    #[error("Invalid employment fact field '{field}': {message}")]
    InvalidEmploymentFact {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
