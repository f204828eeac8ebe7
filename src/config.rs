//! Configuration management for the Ticket Tailor MCP server.
//!
//! This module handles loading configuration from environment variables,
//! with validation to ensure all required values are present. The resulting
//! [`Config`] is immutable and is handed to the client at construction time.

use crate::error::TailorError;
use std::env;
use url::Url;

/// Production API root used when `TICKET_TAILOR_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://api.tickettailor.com/v1";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "TICKET_TAILOR_API_KEY";

/// Environment variable overriding the API root.
pub const BASE_URL_ENV: &str = "TICKET_TAILOR_BASE_URL";

/// Configuration for connecting to Ticket Tailor.
///
/// The API key is stored but never logged or exposed in error messages.
#[derive(Clone)]
pub struct Config {
    /// API root without trailing slash (e.g., `https://api.tickettailor.com/v1`).
    pub base_url: String,

    /// API key, used as the Basic-Auth username.
    api_key: String,
}

impl Config {
    /// Builds a configuration from explicit values, applying the same
    /// validation as [`Config::from_env`].
    ///
    /// # Errors
    ///
    /// Returns `TailorError::Config` if the key is blank or a placeholder, or
    /// if the base URL is not an absolute http(s) URL.
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self, TailorError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(TailorError::missing_env(API_KEY_ENV));
        }
        Self::validate_api_key(&api_key)?;
        let base_url = Self::validate_base_url(base_url.into())?;

        Ok(Config { base_url, api_key })
    }

    /// Loads configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `TICKET_TAILOR_API_KEY` (required): the account API key
    /// - `TICKET_TAILOR_BASE_URL` (optional): API root, defaults to [`DEFAULT_BASE_URL`]
    ///
    /// # Errors
    ///
    /// Returns `TailorError::Config` if the key is missing or if values fail
    /// validation. The server must not start in that case.
    ///
    /// # Example
    ///
    /// ```ignore
    /// dotenvy::dotenv().ok();
    /// let config = Config::from_env()?;
    /// ```
    pub fn from_env() -> Result<Self, TailorError> {
        let api_key = Self::get_required_env(API_KEY_ENV)?;
        let base_url = env::var(BASE_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self::new(api_key, base_url)
    }

    /// Returns the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Gets a required environment variable, returning an error if missing or empty.
    fn get_required_env(name: &str) -> Result<String, TailorError> {
        env::var(name)
            .map_err(|_| TailorError::missing_env(name))
            .and_then(|value| {
                if value.trim().is_empty() {
                    Err(TailorError::missing_env(name))
                } else {
                    Ok(value)
                }
            })
    }

    /// Validates and normalizes the base URL.
    fn validate_base_url(url: String) -> Result<String, TailorError> {
        let url = url.trim().trim_end_matches('/').to_string();

        let parsed = Url::parse(&url).map_err(|e| {
            TailorError::invalid_config(format!("{} is not a valid URL: {}", BASE_URL_ENV, e))
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(TailorError::invalid_config(format!(
                "{} must start with http:// or https://",
                BASE_URL_ENV
            )));
        }

        Ok(url)
    }

    /// Validates the API key is not a placeholder value.
    fn validate_api_key(key: &str) -> Result<(), TailorError> {
        let key_lower = key.to_lowercase();
        let placeholder_patterns = ["your_api_key", "your_key", "placeholder", "changeme"];

        for pattern in placeholder_patterns {
            if key_lower.contains(pattern) {
                return Err(TailorError::invalid_config(format!(
                    "{} appears to be a placeholder value",
                    API_KEY_ENV
                )));
            }
        }

        Ok(())
    }
}
