//! Error types for the i-vis core
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for the i-vis core
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Version Errors
    // ============================================================================
    #[error("Could not parse version from '{input}'")]
    VersionParse { input: String },

    #[error("Could not parse date from '{input}' with format '{format}'")]
    DateParse { input: String, format: String },

    #[error("Cannot compare {left} version against {right} version")]
    Incomparable {
        left: &'static str,
        right: &'static str,
    },

    // ============================================================================
    // Remote Detection Errors
    // ============================================================================
    #[error("HTTP {status} from {url}")]
    BadStatus { status: u16, url: String },

    #[error("No match for selector '{selector}' at {url}")]
    NoMatch { selector: String, url: String },

    #[error("Invalid selector: {selector}")]
    InvalidSelector { selector: String },

    #[error("No Last-Modified date available from {url}")]
    NoLastModified { url: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Missing required variable: {variable}")]
    MissingVariable { variable: String },

    #[error("Variable already registered: {variable}")]
    DuplicateVariable { variable: String },

    // ============================================================================
    // Pagination Errors
    // ============================================================================
    #[error("Page size {size} outside allowed range 1..={max_size}")]
    SizeOutOfRange { size: usize, max_size: usize },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a version parse error
    pub fn version_parse(input: impl Into<String>) -> Self {
        Self::VersionParse {
            input: input.into(),
        }
    }

    /// Create a date parse error
    pub fn date_parse(input: impl Into<String>, format: impl Into<String>) -> Self {
        Self::DateParse {
            input: input.into(),
            format: format.into(),
        }
    }

    /// Create a comparison mismatch error
    pub fn incomparable(left: &'static str, right: &'static str) -> Self {
        Self::Incomparable { left, right }
    }

    /// Create a bad status error
    pub fn bad_status(status: u16, url: impl Into<String>) -> Self {
        Self::BadStatus {
            status,
            url: url.into(),
        }
    }

    /// Create a no-match error
    pub fn no_match(selector: impl Into<String>, url: impl Into<String>) -> Self {
        Self::NoMatch {
            selector: selector.into(),
            url: url.into(),
        }
    }

    /// Create an invalid selector error
    pub fn invalid_selector(selector: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
        }
    }

    /// Create a missing Last-Modified error
    pub fn no_last_modified(url: impl Into<String>) -> Self {
        Self::NoLastModified { url: url.into() }
    }

    /// Create a missing variable error
    pub fn missing_variable(variable: impl Into<String>) -> Self {
        Self::MissingVariable {
            variable: variable.into(),
        }
    }

    /// Create a duplicate variable error
    pub fn duplicate_variable(variable: impl Into<String>) -> Self {
        Self::DuplicateVariable {
            variable: variable.into(),
        }
    }

    /// Create a size-out-of-range error
    pub fn size_out_of_range(size: usize, max_size: usize) -> Self {
        Self::SizeOutOfRange { size, max_size }
    }

    /// Check if this error is retryable
    ///
    /// The crate itself never retries; callers wrapping remote detection
    /// with their own retry policy can use this to classify failures.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_) => true,
            Error::BadStatus { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Result type alias for the i-vis core
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::version_parse("abc");
        assert_eq!(err.to_string(), "Could not parse version from 'abc'");

        let err = Error::missing_variable("I_VIS_SECRET");
        assert_eq!(err.to_string(), "Missing required variable: I_VIS_SECRET");

        let err = Error::bad_status(404, "https://example.com/releases");
        assert_eq!(
            err.to_string(),
            "HTTP 404 from https://example.com/releases"
        );

        let err = Error::size_out_of_range(500, 100);
        assert_eq!(
            err.to_string(),
            "Page size 500 outside allowed range 1..=100"
        );
    }

    #[test]
    fn test_is_retryable() {
        assert!(Error::bad_status(429, "u").is_retryable());
        assert!(Error::bad_status(500, "u").is_retryable());
        assert!(Error::bad_status(503, "u").is_retryable());

        assert!(!Error::bad_status(400, "u").is_retryable());
        assert!(!Error::bad_status(404, "u").is_retryable());
        assert!(!Error::version_parse("x").is_retryable());
        assert!(!Error::missing_variable("v").is_retryable());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::version_parse("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Could not parse version from 'inner'"));
    }
}
