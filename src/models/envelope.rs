//! Response envelope shared by Ticket Tailor list endpoints.

use serde::Deserialize;
use serde_json::Value;

/// Body of a list response such as `GET /v1/events`.
///
/// Records are kept as raw JSON and passed through to tool callers unchanged.
/// Pagination `links` are not followed and are left undecoded.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListResponse {
    /// Records on this page. Absent or `null` reads as empty.
    #[serde(default)]
    pub data: Option<Vec<Value>>,
}

impl ListResponse {
    /// Consumes the envelope, returning its records.
    pub fn into_data(self) -> Vec<Value> {
        self.data.unwrap_or_default()
    }
}
