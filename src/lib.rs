//! # Ticket Tailor MCP
//!
//! An MCP (Model Context Protocol) server exposing read-only Ticket Tailor
//! queries as tools, so AI assistants can look up events and orders in
//! natural language.
//!
//! ## Tools
//!
//! - `get_events`: events in a date window (defaults to the next 60 days)
//! - `get_orders`: orders filtered by event, status, dates, buyer, and more
//! - `get_current_datetime`: today's date in several formats
//! - `ping`: liveness check
//!
//! ## Architecture
//!
//! - [`config`] - Configuration loading from environment variables
//! - [`error`] - Error types with API key sanitization
//! - [`dates`] - Lenient ISO 8601 to Unix timestamp conversion
//! - [`params`] - Query parameter sets and empty-value filtering
//! - [`tailor_client`] - HTTP client for the Ticket Tailor API
//! - [`server`] - MCP server implementation with tool routing
//! - [`models`] - Response envelope
//! - [`tools`] - Tool input structs and query assembly
//!
//! ## Configuration
//!
//! - `TICKET_TAILOR_API_KEY` (required): API key, sent as the Basic-Auth username
//! - `TICKET_TAILOR_BASE_URL` (optional): defaults to `https://api.tickettailor.com/v1`
//! - `RUST_LOG` (optional): log filter, e.g. `ticket_tailor_mcp=debug`
//!
//! ## Failure behaviour
//!
//! An HTTP error status from the API yields an empty list (and an error log
//! line). Transport failures surface as tool errors. Malformed dates fall
//! back to the current time.
//!
//! ## Example
//!
//! ```ignore
//! use ticket_tailor_mcp::config::Config;
//! use ticket_tailor_mcp::tailor_client::TailorClient;
//! use ticket_tailor_mcp::tools::EventsInput;
//!
//! async fn example() -> Result<(), ticket_tailor_mcp::error::TailorError> {
//!     let config = Config::from_env()?;
//!     let client = TailorClient::new(&config)?;
//!
//!     let input = EventsInput {
//!         start_date: Some("2024-01-01T00:00:00Z".to_string()),
//!         ..Default::default()
//!     };
//!     for event in client.list_events(&input.to_query()).await? {
//!         println!("{} {}", event["id"], event["name"]);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod dates;
pub mod error;
pub mod models;
pub mod params;
pub mod server;
pub mod tailor_client;
pub mod tools;
