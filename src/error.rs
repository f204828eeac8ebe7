//! Error types for the Ticket Tailor MCP server.
//!
//! This module defines `TailorError`, the unified error type used throughout
//! the crate.
//!
//! # Security
//!
//! The API key doubles as the Basic-Auth username, so it can end up inside
//! transport error messages. Use `sanitize_message()` before logging or
//! returning any message built from an external source.

use std::time::Duration;
use thiserror::Error;

/// Unified error type for all Ticket Tailor operations.
#[derive(Error, Debug)]
pub enum TailorError {
    /// Configuration error - missing or invalid environment variables.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP request failed during transmission (DNS, connect, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// HTTP response returned a non-success status code.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// The HTTP status code returned.
        status: reqwest::StatusCode,
        /// The response body, truncated.
        body: String,
    },

    /// Request timed out.
    #[error("request timed out after {duration:?} - the API may be slow or unreachable")]
    Timeout {
        /// How long we waited before timing out.
        duration: Duration,
        /// The operation that timed out.
        operation: String,
    },

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A date string could not be parsed as ISO 8601.
    #[error("invalid date {input:?}: {message}")]
    InvalidDate {
        /// The rejected input.
        input: String,
        /// Parser diagnostic.
        message: String,
    },

    /// Authentication failed - likely an invalid API key.
    #[error("authentication failed - check TICKET_TAILOR_API_KEY")]
    Authentication,

    /// Connection test failed.
    #[error("connection test failed: {message}")]
    ConnectionTest {
        /// Details about why the connection test failed.
        message: String,
    },
}

impl TailorError {
    /// Creates a configuration error for a missing environment variable.
    pub fn missing_env(var_name: &str) -> Self {
        TailorError::Config(format!(
            "missing required environment variable: {}",
            var_name
        ))
    }

    /// Creates a configuration error for an invalid value.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        TailorError::Config(message.into())
    }

    /// Creates a date parsing error.
    pub fn invalid_date(input: impl Into<String>, message: impl Into<String>) -> Self {
        TailorError::InvalidDate {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Creates a timeout error.
    pub fn timeout(duration: Duration, operation: impl Into<String>) -> Self {
        TailorError::Timeout {
            duration,
            operation: operation.into(),
        }
    }

    /// Creates a connection test error.
    pub fn connection_test(message: impl Into<String>) -> Self {
        TailorError::ConnectionTest {
            message: message.into(),
        }
    }

    /// Returns true if the upstream answered with an HTTP error status.
    ///
    /// The fetch layer folds these into an empty result; everything else
    /// (transport, decode) is surfaced to the caller.
    #[must_use]
    pub fn is_http_status(&self) -> bool {
        matches!(self, TailorError::HttpStatus { .. })
    }

    /// Sanitizes an error message to remove any occurrence of the API key.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to sanitize
    /// * `api_key` - The API key to strip from the message
    ///
    /// # Returns
    ///
    /// The message with any occurrence of the API key replaced with `[REDACTED]`
    #[must_use]
    pub fn sanitize_message(message: &str, api_key: &str) -> String {
        if api_key.is_empty() {
            return message.to_string();
        }
        message.replace(api_key, "[REDACTED]")
    }

    /// Creates a sanitized version of this error's display message.
    #[must_use]
    pub fn sanitized_display(&self, api_key: &str) -> String {
        Self::sanitize_message(&self.to_string(), api_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_env_error() {
        let err = TailorError::missing_env("TICKET_TAILOR_API_KEY");
        assert!(err.to_string().contains("TICKET_TAILOR_API_KEY"));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_invalid_date_error() {
        let err = TailorError::invalid_date("yesterday", "input contains invalid characters");
        let msg = err.to_string();
        assert!(msg.contains("\"yesterday\""));
        assert!(msg.contains("invalid characters"));
    }

    #[test]
    fn test_timeout_error() {
        let err = TailorError::timeout(Duration::from_secs(30), "GET events");
        let msg = err.to_string();
        assert!(msg.contains("timed out"));
        assert!(msg.contains("30s"));
    }

    #[test]
    fn test_is_http_status() {
        let err = TailorError::HttpStatus {
            status: reqwest::StatusCode::NOT_FOUND,
            body: String::new(),
        };
        assert!(err.is_http_status());
        assert!(!TailorError::Authentication.is_http_status());
        assert!(!TailorError::timeout(Duration::from_secs(1), "x").is_http_status());
    }

    #[test]
    fn test_sanitize_message_removes_api_key() {
        let api_key = "sk_live_12345";
        let message = format!("error sending request for url (https://{}:@api)", api_key);
        let sanitized = TailorError::sanitize_message(&message, api_key);
        assert!(!sanitized.contains(api_key));
        assert!(sanitized.contains("[REDACTED]"));
    }

    #[test]
    fn test_sanitize_message_empty_key() {
        let message = "Some error message";
        assert_eq!(TailorError::sanitize_message(message, ""), message);
    }

    #[test]
    fn test_sanitized_display() {
        let err = TailorError::connection_test("rejected key sk_live_12345");
        let shown = err.sanitized_display("sk_live_12345");
        assert_eq!(shown, "connection test failed: rejected key [REDACTED]");
    }
}
