//! Error types for weeder
//!
//! Every failure the retention engine can report is a variant of
//! [`WeederError`]. Identifiers that simply don't carry a date are not
//! errors: they are logged and left out of the decision.

use chrono::NaiveDate;
use thiserror::Error;

/// Main error type for the weeder library
#[derive(Error, Debug)]
pub enum WeederError {
    /// Two distinct identifiers map to the same date
    #[error("files '{first}' and '{second}' have the same date: {date}")]
    DuplicateDate {
        date: NaiveDate,
        first: String,
        second: String,
    },

    /// Malformed or non-positive policy tier
    #[error("{0}")]
    InvalidPolicy(String),

    /// Date extraction pattern doesn't compile or has the wrong shape
    #[error("error parsing format: {0}")]
    InvalidPattern(String),

    /// Identifier matched the pattern but doesn't name a calendar date
    #[error("the file doesn't represent a valid date: {0}")]
    InvalidDate(String),

    /// Date arithmetic left the representable calendar
    #[error("date out of range: {0}")]
    DateOutOfRange(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for weeder operations
pub type Result<T> = std::result::Result<T, WeederError>;
