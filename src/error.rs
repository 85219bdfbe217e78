//! Error types for mistranslate.
//!
//! All fallible operations return [`MistranslateError`] through the crate-wide
//! [`Result`] alias.
//!
//! # Examples
//!
//! ```
//! use mistranslate::error::{MistranslateError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(MistranslateError::invalid_argument("error_probability must be within [0, 1]"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for mistranslate operations.
#[derive(Error, Debug)]
pub enum MistranslateError {
    /// Invalid configuration or argument (probability out of range, empty table key, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Malformed conversation input
    #[error("Conversation error: {0}")]
    Conversation(String),

    /// A substitution table could not be compiled into a matcher
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// I/O errors (loading conversations or table overrides)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with MistranslateError.
pub type Result<T> = std::result::Result<T, MistranslateError>;

impl MistranslateError {
    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        MistranslateError::InvalidArgument(msg.into())
    }

    /// Create a new conversation (structural) error.
    pub fn conversation<S: Into<String>>(msg: S) -> Self {
        MistranslateError::Conversation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = MistranslateError::invalid_argument("probability 1.5");
        assert_eq!(error.to_string(), "Invalid argument: probability 1.5");

        let error = MistranslateError::conversation("turn 2 has no speaker");
        assert_eq!(error.to_string(), "Conversation error: turn 2 has no speaker");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = MistranslateError::from(io_error);

        match error {
            MistranslateError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = MistranslateError::from(json_error);
        assert!(matches!(error, MistranslateError::Json(_)));
    }
}
