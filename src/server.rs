//! MCP server implementation for Ticket Tailor.
//!
//! This module defines the `TailorServer` struct that implements the MCP
//! `ServerHandler` trait, exposing read-only Ticket Tailor queries as tools.

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use serde_json::Value;

use crate::dates::{current_datetime, DateTimeFormat};
use crate::error::TailorError;
use crate::tailor_client::TailorClient;
use crate::tools::{CurrentDateTimeInput, EventsInput, OrdersInput};

/// The Ticket Tailor MCP server.
#[derive(Clone)]
pub struct TailorServer {
    /// Client for API operations.
    client: TailorClient,
    /// Tool router for MCP tool dispatch.
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl TailorServer {
    /// Creates a new server instance around a configured client.
    pub fn new(client: TailorClient) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }

    /// A simple ping tool to verify the server is running.
    #[tool(description = "Test connectivity to the Ticket Tailor MCP server. Returns 'pong' if the server is running correctly.")]
    pub fn ping(&self) -> String {
        tracing::debug!("ping tool called");
        "pong".to_string()
    }

    /// List Ticket Tailor events in a date window.
    ///
    /// The window defaults to the next 60 days. Records are returned as the
    /// API sent them, serialized as a JSON array.
    #[tool(description = "Retrieve Ticket Tailor events. start_date and end_date are ISO 8601 (e.g. 2024-01-01T00:00:00Z); start defaults to now and end to 60 days after start. limit defaults to 20 and status to 'published'. Returns a JSON array of event objects.")]
    pub async fn get_events(
        &self,
        Parameters(input): Parameters<EventsInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(?input, "get_events tool called");

        let params = input.to_query();
        let events = self.client.list_events(&params).await.map_err(|e| {
            let sanitized = self.sanitize_error(&e);
            tracing::error!(error = %sanitized, "Failed to fetch events");
            format!("Failed to fetch events: {}", sanitized)
        })?;

        tracing::debug!(count = events.len(), "get_events returning records");
        format_records(&events)
    }

    /// List Ticket Tailor orders with optional filters.
    ///
    /// Date bounds are only applied when given, so the default is the full
    /// order history for the selected status.
    #[tool(description = "Retrieve Ticket Tailor orders. Filter by event_id, status (default 'completed'), created/updated date bounds (ISO 8601), buyer email, phone or name, checkout email, ticket type, payment method, tag, or free-text search. limit defaults to 50 and page to 1. Returns a JSON array of order objects.")]
    pub async fn get_orders(
        &self,
        Parameters(input): Parameters<OrdersInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(event_id = ?input.event_id, "get_orders tool called");

        let params = input.to_query();
        let orders = self.client.list_orders(&params).await.map_err(|e| {
            let sanitized = self.sanitize_error(&e);
            tracing::error!(error = %sanitized, event_id = ?input.event_id, "Failed to fetch orders");
            format!("Failed to fetch orders: {}", sanitized)
        })?;

        tracing::debug!(count = orders.len(), "get_orders returning records");
        format_records(&orders)
    }

    /// Report the current date and time.
    ///
    /// Useful before building date filters, since the caller may not know
    /// today's date.
    #[tool(description = "Get the current date and time. format: 'iso' (default), 'date' (YYYY-MM-DD), 'unix' (seconds), or 'all' (every format plus today's start/end). Call this before building date filters.")]
    pub fn get_current_datetime(
        &self,
        Parameters(input): Parameters<CurrentDateTimeInput>,
    ) -> Result<String, String> {
        let format = DateTimeFormat::from_name(input.format.as_deref().unwrap_or("iso"));
        tracing::debug!(?format, "get_current_datetime tool called");

        serde_json::to_string_pretty(&current_datetime(format))
            .map_err(|e| format!("Failed to encode date: {}", e))
    }

    /// Sanitizes an error message to remove any API key.
    fn sanitize_error(&self, error: &TailorError) -> String {
        error.sanitized_display(self.client.api_key_for_sanitization())
    }
}

#[tool_handler]
impl ServerHandler for TailorServer {
    /// Returns server information for the MCP initialize handshake.
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Read-only access to Ticket Tailor. Use get_current_datetime first to \
                 learn today's date, get_events to list events in a date window, and \
                 get_orders to list orders (usually filtered by event_id). Start with \
                 'ping' to verify connectivity."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Serializes pass-through records as the tool's text result.
fn format_records(records: &[Value]) -> Result<String, String> {
    serde_json::to_string_pretty(records).map_err(|e| format!("Failed to encode records: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde_json::json;

    fn test_server() -> TailorServer {
        let config = Config::new("sk_test_key", "http://127.0.0.1:9").unwrap();
        TailorServer::new(TailorClient::new(&config).unwrap())
    }

    #[test]
    fn test_format_records_empty() {
        assert_eq!(format_records(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_format_records_passes_fields_through() {
        let records = vec![json!({
            "id": "or_1",
            "status": "completed",
            "buyer": {"name": "Ada", "email": "ada@example.com"},
            "total_paid": 2500,
            "tickets": [{"id": "it_1"}]
        })];
        let text = format_records(&records).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_ping() {
        assert_eq!(test_server().ping(), "pong");
    }

    #[test]
    fn test_get_current_datetime_all() {
        let text = test_server()
            .get_current_datetime(Parameters(CurrentDateTimeInput {
                format: Some("all".to_string()),
            }))
            .unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        let start = value["today_start_unix"].as_i64().unwrap();
        let end = value["today_end_unix"].as_i64().unwrap();
        assert_eq!(end - start, 86400);
        assert!(value["iso"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_get_current_datetime_unknown_format_is_iso() {
        let text = test_server()
            .get_current_datetime(Parameters(CurrentDateTimeInput {
                format: Some("epoch-millis".to_string()),
            }))
            .unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("iso"));
    }

    #[test]
    fn test_get_info_enables_tools() {
        let info = test_server().get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.unwrap().contains("get_orders"));
    }
}
