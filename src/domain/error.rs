//! Error types for the zatlas plugin.
//!
//! This module defines the centralized error type [`ZatlasError`] and a type alias
//! [`Result`] used throughout the plugin. All errors are implemented with the
//! `thiserror` crate.
//!
//! None of these errors is fatal: fetch failures degrade to a "failed to load" or
//! "not found" view, validation failures are shown inline, and storage failures
//! are logged and treated as an empty store.

use thiserror::Error;

/// The main error type for zatlas operations.
///
/// # Examples
///
/// ```
/// use zatlas::ZatlasError;
///
/// fn login(email: &str) -> Result<(), ZatlasError> {
///     if email.contains('@') {
///         Ok(())
///     } else {
///         Err(ZatlasError::Validation("email must contain '@'".to_string()))
///     }
/// }
///
/// assert!(login("a@b.com").is_ok());
/// assert!(login("nope").is_err());
/// ```
#[derive(Debug, Error)]
pub enum ZatlasError {
    /// Storage operation failed.
    ///
    /// Occurs when reading from or writing to the storage backend fails, or
    /// the stored document cannot be parsed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An HTTP read could not be completed (transport-level failure).
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// The data source answered, but with a non-2xx status or no records.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The response body was not a country payload.
    #[error("Decode error: {0}")]
    Decode(String),

    /// User input was rejected (e.g. a login email without `@`).
    #[error("Validation error: {0}")]
    Validation(String),
}

impl ZatlasError {
    /// Returns `true` for errors that mean "the data source has nothing for
    /// this request", as opposed to a broken transport or payload.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// A specialized `Result` type for zatlas operations.
pub type Result<T> = std::result::Result<T, ZatlasError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ZatlasError::Validation("bad".to_string()).to_string(),
            "Validation error: bad"
        );
        assert_eq!(
            ZatlasError::NotFound("alpha/XYZ".to_string()).to_string(),
            "Not found: alpha/XYZ"
        );
    }

    #[test]
    fn test_io_error_converts() {
        fn read() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))?;
            Ok(())
        }

        assert!(matches!(read(), Err(ZatlasError::Io(_))));
    }

    #[test]
    fn test_is_not_found() {
        assert!(ZatlasError::NotFound(String::new()).is_not_found());
        assert!(!ZatlasError::Decode(String::new()).is_not_found());
    }
}
