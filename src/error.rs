//! Centralized error handling for the search engine
//!
//! "No match" is never an error in this crate: every search and probe
//! returns an `Option` and callers branch on it explicitly. The `Error`
//! type covers the genuine failure modes: pattern compilation, oversized
//! substitutions, and preference persistence.

use log::warn;
use std::fmt;
use std::io;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Custom Result Type Alias
// ─────────────────────────────────────────────────────────────────────────────

/// A specialized `Result` type for the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The centralized error type for the crate.
#[derive(Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────
    // Search Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// A regular expression failed to compile or re-match. At the matcher
    /// boundary this is downgraded to "no match"; it only surfaces from
    /// substitution paths.
    Pattern { message: String },

    /// A template substitution expanded past the internal maximum length.
    /// Carries the clipped result so a truncated-substitution policy can
    /// still choose to apply it, an explicit, policy-gated data-loss path.
    SubstitutionTooLong { truncated: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Preference Persistence Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Generic I/O error wrapper
    Io(io::Error),

    /// Failed to load the preferences file
    ConfigLoad {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to save the preferences file
    ConfigSave {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to parse the preferences file (invalid JSON/format)
    ConfigParse {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration directory not found or inaccessible
    ConfigDirNotFound,
}

// Implement From traits for convenient error conversion
impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<regress::Error> for Error {
    fn from(err: regress::Error) -> Self {
        Error::Pattern {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigParse {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Display trait implementation for user-friendly error messages
// ─────────────────────────────────────────────────────────────────────────────
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Search Errors
            Error::Pattern { message } => write!(f, "Invalid pattern: {}", message),
            Error::SubstitutionTooLong { truncated } => {
                write!(
                    f,
                    "Substitution result exceeded the internal limit (kept {} bytes)",
                    truncated.len()
                )
            }

            // Preference Persistence Errors
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::ConfigLoad { path, source } => {
                write!(
                    f,
                    "Failed to load preferences from '{}': {}",
                    path.display(),
                    source
                )
            }
            Error::ConfigSave { path, source } => {
                write!(
                    f,
                    "Failed to save preferences to '{}': {}",
                    path.display(),
                    source
                )
            }
            Error::ConfigParse { message, .. } => {
                write!(f, "Invalid preferences format: {}", message)
            }
            Error::ConfigDirNotFound => {
                write!(f, "Configuration directory not found")
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// std::error::Error trait implementation for error chaining
// ─────────────────────────────────────────────────────────────────────────────
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::ConfigLoad { source, .. } => Some(source.as_ref()),
            Error::ConfigSave { source, .. } => Some(source.as_ref()),
            Error::ConfigParse { source, .. } => source
                .as_ref()
                .map(|s| s.as_ref() as &(dyn std::error::Error + 'static)),
            Error::Pattern { .. }
            | Error::SubstitutionTooLong { .. }
            | Error::ConfigDirNotFound => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Graceful Degradation Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for Result to support graceful degradation.
pub trait ResultExt<T> {
    /// If the result is an error, log it at warning level and return the provided default.
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T;
}

impl<T> ResultExt<T> for Result<T> {
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                warn!("{}: {}. Using default.", context, err);
                default
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_error_from_regress() {
        let err = regress::Regex::new("(oops").unwrap_err();
        let err = Error::from(err);
        assert!(matches!(err, Error::Pattern { .. }));
        assert!(format!("{}", err).contains("Invalid pattern"));
    }

    #[test]
    fn test_substitution_too_long_keeps_truncated_text() {
        let err = Error::SubstitutionTooLong {
            truncated: "abc".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("3 bytes"));
        match err {
            Error::SubstitutionTooLong { truncated } => assert_eq!(truncated, "abc"),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err = Error::from(io_err);
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_result: std::result::Result<String, _> = serde_json::from_str("not json");
        let err = Error::from(json_result.unwrap_err());
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error as StdError;
        let err = Error::Io(io::Error::new(io::ErrorKind::Other, "disk full"));
        assert!(err.source().is_some());

        let err = Error::Pattern {
            message: "bad".to_string(),
        };
        assert!(err.source().is_none());
    }

    #[test]
    fn test_unwrap_or_warn_default() {
        let ok: Result<i32> = Ok(7);
        assert_eq!(ok.unwrap_or_warn_default(0, "ctx"), 7);

        let err: Result<i32> = Err(Error::ConfigDirNotFound);
        assert_eq!(err.unwrap_or_warn_default(0, "ctx"), 0);
    }
}
