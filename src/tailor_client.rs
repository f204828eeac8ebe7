//! HTTP client for the Ticket Tailor API.
//!
//! This module provides the `TailorClient` struct for making authenticated,
//! read-only requests to the Ticket Tailor REST API.
//!
//! # Failure policy
//!
//! List fetches degrade to an empty result when the API answers with an
//! HTTP error status: the error is logged and the caller gets no records.
//! Transport failures (DNS, refused connection, timeout) and undecodable
//! bodies are returned as errors so they can be reported to the tool caller.
//!
//! # Security
//!
//! The API key is never logged. All error messages are sanitized before logging.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::config::Config;
use crate::error::TailorError;
use crate::models::ListResponse;
use crate::params::QueryParams;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The Accept header value for the Ticket Tailor API.
const JSON_ACCEPT_HEADER: &str = "application/json";

/// Maximum length for HTTP error response bodies kept in errors and logs.
const MAX_ERROR_BODY_LEN: usize = 500;

/// Path of the events collection.
pub const EVENTS_ENDPOINT: &str = "events";

/// Path of the orders collection.
pub const ORDERS_ENDPOINT: &str = "orders";

/// Builds the headers sent with every API request.
///
/// Ticket Tailor uses HTTP Basic auth with the API key as username and an
/// empty password.
///
/// # Errors
///
/// Returns `TailorError::Config` if the encoded value is not a valid header.
pub fn build_auth_headers(api_key: &str) -> Result<HeaderMap, TailorError> {
    let encoded = STANDARD.encode(format!("{}:", api_key));
    let mut authorization = HeaderValue::from_str(&format!("Basic {}", encoded))
        .map_err(|_| TailorError::invalid_config("API key cannot be sent as a header value"))?;
    authorization.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, authorization);
    headers.insert(ACCEPT, HeaderValue::from_static(JSON_ACCEPT_HEADER));
    Ok(headers)
}

/// HTTP client for the Ticket Tailor API.
///
/// # Example
///
/// ```ignore
/// let config = Config::from_env()?;
/// let client = TailorClient::new(&config)?;
///
/// let params = QueryParams::new().with("status", Some("published"));
/// let events = client.list_events(&params).await?;
/// ```
#[derive(Clone)]
pub struct TailorClient {
    /// The underlying HTTP client (cloning is cheap).
    http: Client,

    /// API root without trailing slash.
    base_url: String,

    /// API key for authentication.
    /// SECURITY: Never log this value!
    api_key: String,
}

impl TailorClient {
    /// Creates a new client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `TailorError::HttpClient` if the HTTP client fails to initialize.
    pub fn new(config: &Config) -> Result<Self, TailorError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(TailorError::HttpClient)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key().to_string(),
        })
    }

    /// Returns a reference to the API key for sanitization purposes.
    ///
    /// This should ONLY be used for sanitizing error messages, never for logging.
    pub(crate) fn api_key_for_sanitization(&self) -> &str {
        &self.api_key
    }

    /// Authentication headers for this client's key, recomputed on each call.
    pub fn auth_headers(&self) -> Result<HeaderMap, TailorError> {
        build_auth_headers(&self.api_key)
    }

    /// Full URL for an endpoint path such as `"events"`.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// Tests connectivity and credentials against the API.
    ///
    /// Unlike [`TailorClient::fetch`], HTTP error statuses are reported here.
    ///
    /// # Errors
    ///
    /// Returns `TailorError::ConnectionTest` describing the failure.
    pub async fn test_connection(&self) -> Result<(), TailorError> {
        tracing::debug!("Testing connection to Ticket Tailor");

        let first_page = QueryParams::new().with("limit", Some("1"));
        match self.get_list(EVENTS_ENDPOINT, &first_page).await {
            Ok(_) => {
                tracing::info!("Connection test successful");
                Ok(())
            }
            Err(TailorError::HttpStatus { status, .. })
                if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN =>
            {
                Err(TailorError::connection_test(format!(
                    "{} - verify TICKET_TAILOR_API_KEY is correct",
                    TailorError::Authentication
                )))
            }
            Err(TailorError::Timeout { duration, .. }) => Err(TailorError::connection_test(format!(
                "Connection timed out after {:?} - verify TICKET_TAILOR_BASE_URL and network access",
                duration
            ))),
            Err(e) => Err(TailorError::connection_test(e.sanitized_display(&self.api_key))),
        }
    }

    /// Fetches one page of records from a list endpoint.
    ///
    /// `params` is sent as given; filter it first with
    /// [`QueryParams::filtered`]. An HTTP error status is logged and yields
    /// an empty list, so callers cannot tell it apart from "no records".
    ///
    /// # Errors
    ///
    /// Returns an error for transport failures, timeouts, and bodies that are
    /// not a JSON list envelope.
    pub async fn fetch(&self, endpoint: &str, params: &QueryParams) -> Result<Vec<Value>, TailorError> {
        match self.get_list(endpoint, params).await {
            Ok(response) => Ok(response.into_data()),
            Err(e) if e.is_http_status() => {
                tracing::error!(
                    endpoint = %endpoint,
                    error = %e,
                    "HTTP error while accessing endpoint, returning no records"
                );
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Lists events matching `params`.
    pub async fn list_events(&self, params: &QueryParams) -> Result<Vec<Value>, TailorError> {
        self.fetch(EVENTS_ENDPOINT, params).await
    }

    /// Lists orders matching `params`.
    pub async fn list_orders(&self, params: &QueryParams) -> Result<Vec<Value>, TailorError> {
        self.fetch(ORDERS_ENDPOINT, params).await
    }

    /// Issues the GET and decodes the list envelope, reporting HTTP error
    /// statuses as `TailorError::HttpStatus`.
    async fn get_list(&self, endpoint: &str, params: &QueryParams) -> Result<ListResponse, TailorError> {
        let url = self.endpoint_url(endpoint);
        let query = params.to_pairs();

        tracing::debug!(
            endpoint = %endpoint,
            params = ?query,
            "Making Ticket Tailor API request"
        );

        let response = self
            .http
            .get(&url)
            .headers(self.auth_headers()?)
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    return TailorError::timeout(
                        Duration::from_secs(DEFAULT_TIMEOUT_SECS),
                        format!("GET {}", endpoint),
                    );
                }
                TailorError::Http(e)
            })?;
        let status = response.status();

        if !status.is_success() {
            return Err(self.handle_http_error(status, response).await);
        }

        let body = response.text().await.map_err(TailorError::Http)?;

        tracing::trace!(body = %body, "Ticket Tailor API response");

        serde_json::from_str(&body).map_err(TailorError::Serialization)
    }

    /// Converts a non-success response into `TailorError::HttpStatus`.
    async fn handle_http_error(&self, status: StatusCode, response: reqwest::Response) -> TailorError {
        let body = response.text().await.unwrap_or_default();
        let body = TailorError::sanitize_message(&body, &self.api_key);
        let body = if body.len() > MAX_ERROR_BODY_LEN {
            let mut end = MAX_ERROR_BODY_LEN;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... [truncated]", &body[..end])
        } else {
            body
        };

        TailorError::HttpStatus { status, body }
    }
}
