//! Tool input parameter structs for MCP tools.
//!
//! This module defines the input types for each MCP tool, with
//! JSON Schema derivation for MCP tool discovery.
//!
//! # Input Sanitization
//!
//! All input structs implement `sanitize()` which trims whitespace
//! from string fields. This should be called before processing input.
//!
//! Fields that carry a default (`status`, `limit`, `page`) keep an explicit
//! empty string: "unset" selects the default, while `""` drops the filter.

use rmcp::schemars::{self, JsonSchema};
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

/// Helper function to trim an optional string, mapping blank to `None`.
fn trim_option(s: &Option<String>) -> Option<String> {
    s.as_ref().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Helper function to trim an optional string, keeping blank as `Some("")`.
fn trim_keep_empty(s: &Option<String>) -> Option<String> {
    s.as_ref().map(|s| s.trim().to_string())
}

/// Accepts a JSON string or number for fields the API takes as text.
///
/// Models often send `limit: 10` rather than `limit: "10"`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected a string or number, got {}",
            other
        ))),
    }
}

/// Input parameters for the get_events tool.
///
/// All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct EventsInput {
    /// Only events starting on or after this time (ISO 8601, e.g. "2024-01-01T00:00:00Z"). Defaults to now.
    #[serde(default)]
    pub start_date: Option<String>,

    /// Only events ending on or before this time (ISO 8601). Defaults to 60 days after start_date.
    #[serde(default)]
    pub end_date: Option<String>,

    /// Maximum number of events to return (default: "20").
    #[serde(default, deserialize_with = "lenient_string")]
    #[schemars(with = "Option<String>")]
    pub limit: Option<String>,

    /// Event status, e.g. "published", "draft", "cancelled" (default: "published"). Pass "" for any status.
    #[serde(default)]
    pub status: Option<String>,
}

impl EventsInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            start_date: trim_option(&self.start_date),
            end_date: trim_option(&self.end_date),
            limit: trim_keep_empty(&self.limit),
            status: trim_keep_empty(&self.status),
        }
    }
}

/// Input parameters for the get_orders tool.
///
/// All fields are optional; `event_id` is the usual starting point.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct OrdersInput {
    /// Only orders for this event ID (e.g. "ev_1234").
    #[serde(default)]
    pub event_id: Option<String>,

    /// Order status, e.g. "completed", "pending", "cancelled" (default: "completed"). Pass "" for any status.
    #[serde(default)]
    pub status: Option<String>,

    /// Maximum number of orders per page (default: "50").
    #[serde(default, deserialize_with = "lenient_string")]
    #[schemars(with = "Option<String>")]
    pub limit: Option<String>,

    /// Page number (default: "1").
    #[serde(default, deserialize_with = "lenient_string")]
    #[schemars(with = "Option<String>")]
    pub page: Option<String>,

    /// Orders created on or after this time (ISO 8601).
    #[serde(default)]
    pub created_at_min: Option<String>,

    /// Orders created on or before this time (ISO 8601).
    #[serde(default)]
    pub created_at_max: Option<String>,

    /// Orders updated on or after this time (ISO 8601).
    #[serde(default)]
    pub updated_at_min: Option<String>,

    /// Orders updated on or before this time (ISO 8601).
    #[serde(default)]
    pub updated_at_max: Option<String>,

    /// Comma-separated related resources to include (e.g. "tickets").
    #[serde(default)]
    pub include: Option<String>,

    /// Field to sort by (e.g. "created_at").
    #[serde(default)]
    pub sort_field: Option<String>,

    /// Sort direction: "asc" or "desc".
    #[serde(default)]
    pub sort_direction: Option<String>,

    /// Free-text search across buyer name, email and similar fields.
    #[serde(default)]
    pub search: Option<String>,

    /// Only orders containing this ticket type ID.
    #[serde(default)]
    pub ticket_type_id: Option<String>,

    /// Email address used at checkout.
    #[serde(default)]
    pub checkout_email: Option<String>,

    /// Buyer's email address.
    #[serde(default)]
    pub email: Option<String>,

    /// Buyer's phone number.
    #[serde(default)]
    pub phone: Option<String>,

    /// Payment method (e.g. "stripe", "paypal").
    #[serde(default)]
    pub payment_method: Option<String>,

    /// Offline payment status (e.g. "paid", "unpaid").
    #[serde(default)]
    pub offline_payment_status: Option<String>,

    /// Order tag.
    #[serde(default)]
    pub tag: Option<String>,

    /// Buyer's name.
    #[serde(default)]
    pub name: Option<String>,
}

impl OrdersInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            event_id: trim_option(&self.event_id),
            status: trim_keep_empty(&self.status),
            limit: trim_keep_empty(&self.limit),
            page: trim_keep_empty(&self.page),
            created_at_min: trim_option(&self.created_at_min),
            created_at_max: trim_option(&self.created_at_max),
            updated_at_min: trim_option(&self.updated_at_min),
            updated_at_max: trim_option(&self.updated_at_max),
            include: trim_option(&self.include),
            sort_field: trim_option(&self.sort_field),
            sort_direction: trim_option(&self.sort_direction),
            search: trim_option(&self.search),
            ticket_type_id: trim_option(&self.ticket_type_id),
            checkout_email: trim_option(&self.checkout_email),
            email: trim_option(&self.email),
            phone: trim_option(&self.phone),
            payment_method: trim_option(&self.payment_method),
            offline_payment_status: trim_option(&self.offline_payment_status),
            tag: trim_option(&self.tag),
            name: trim_option(&self.name),
        }
    }
}

/// Input parameters for the get_current_datetime tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct CurrentDateTimeInput {
    /// One of "iso", "date", "unix", or "all" (default: "iso").
    #[serde(default)]
    pub format: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_events_input_accepts_numeric_limit() {
        let input: EventsInput = serde_json::from_value(json!({"limit": 5})).unwrap();
        assert_eq!(input.limit.as_deref(), Some("5"));

        let input: EventsInput = serde_json::from_value(json!({"limit": "7"})).unwrap();
        assert_eq!(input.limit.as_deref(), Some("7"));
    }

    #[test]
    fn test_orders_input_rejects_object_page() {
        let result: Result<OrdersInput, _> = serde_json::from_value(json!({"page": {"n": 1}}));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_object_deserializes_to_defaults() {
        let input: OrdersInput = serde_json::from_value(json!({})).unwrap();
        assert!(input.event_id.is_none());
        assert!(input.limit.is_none());
        assert!(input.page.is_none());
    }

    #[test]
    fn test_events_sanitize() {
        let input = EventsInput {
            start_date: Some("  2024-01-01T00:00:00Z ".to_string()),
            end_date: Some("   ".to_string()),
            limit: Some(" 10 ".to_string()),
            status: Some("  ".to_string()),
        }
        .sanitize();

        assert_eq!(input.start_date.as_deref(), Some("2024-01-01T00:00:00Z"));
        assert_eq!(input.end_date, None);
        assert_eq!(input.limit.as_deref(), Some("10"));
        assert_eq!(input.status.as_deref(), Some(""));
    }

    #[test]
    fn test_orders_sanitize() {
        let input = OrdersInput {
            event_id: Some(" ev_42 ".to_string()),
            email: Some("\tbuyer@example.com\n".to_string()),
            tag: Some(" ".to_string()),
            ..Default::default()
        }
        .sanitize();

        assert_eq!(input.event_id.as_deref(), Some("ev_42"));
        assert_eq!(input.email.as_deref(), Some("buyer@example.com"));
        assert_eq!(input.tag, None);
        assert_eq!(input.status, None);
    }
}
