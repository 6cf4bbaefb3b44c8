//! # Flyweight Error Types
//!
//! All errors that can occur while building intrinsic state or loading the
//! scenarios that feed a pool. The pool itself never fails.

use thiserror::Error;

/// Errors that can occur around a flyweight pool.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlyweightError {
    /// Intrinsic state was rejected at construction, before any pool access.
    #[error("invalid intrinsic state: {reason}")]
    InvalidIntrinsicState {
        /// Why the state was rejected.
        reason: String,
    },

    /// A scenario file could not be parsed or validated.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A scenario file could not be read.
    #[error("io error: {0}")]
    Io(String),
}

impl FlyweightError {
    /// Shorthand for [`FlyweightError::InvalidIntrinsicState`].
    #[must_use]
    pub fn invalid_state(reason: impl Into<String>) -> Self {
        Self::InvalidIntrinsicState {
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for FlyweightError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type for flyweight operations.
pub type FlyweightResult<T> = Result<T, FlyweightError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = FlyweightError::invalid_state("field 1 is empty");
        assert_eq!(err.to_string(), "invalid intrinsic state: field 1 is empty");

        let err = FlyweightError::Config("missing [forest]".into());
        assert_eq!(err.to_string(), "invalid configuration: missing [forest]");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "scenario.toml");
        let err: FlyweightError = io.into();
        assert!(matches!(err, FlyweightError::Io(ref msg) if msg.contains("scenario.toml")));
    }
}
