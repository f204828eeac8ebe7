//! Ticket Tailor MCP server binary.
//!
//! Runs as an MCP server on stdio transport so Claude Desktop or any other
//! MCP client can query Ticket Tailor events and orders.
//!
//! # Configuration
//!
//! Set the following environment variables (or use a `.env` file):
//!
//! - `TICKET_TAILOR_API_KEY`: API key (required)
//! - `TICKET_TAILOR_BASE_URL`: API root (optional)
//!
//! # Usage
//!
//! ```bash
//! TICKET_TAILOR_API_KEY=sk_xxx ./ticket-tailor-mcp
//! ```

use anyhow::{Context, Result};
use rmcp::{transport::stdio, ServiceExt};
use tracing_subscriber::{fmt, EnvFilter};

use ticket_tailor_mcp::{config, server, tailor_client};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    // stdout is reserved for MCP JSON-RPC messages
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ticket_tailor_mcp=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!(
        "Starting Ticket Tailor MCP server v{}",
        env!("CARGO_PKG_VERSION")
    );

    // A missing API key aborts here, before any tool is callable.
    let config = config::Config::from_env().context("Failed to load configuration")?;

    tracing::debug!("Configuration loaded, base_url: {}", config.base_url);

    let client =
        tailor_client::TailorClient::new(&config).context("Failed to create Ticket Tailor client")?;

    tracing::info!("Testing connection to Ticket Tailor...");
    if let Err(e) = client.test_connection().await {
        tracing::error!(error = %e, "Connection test failed");
        tracing::warn!(
            "Server will start but may not be able to reach Ticket Tailor. \
             Check configuration and network connectivity."
        );
    }

    let server = server::TailorServer::new(client);

    tracing::info!("Server initialized, starting stdio transport");

    let service = server
        .serve(stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("serving error: {:?}", e);
        })
        .context("Failed to start server")?;

    tracing::info!("Server running, waiting for requests");

    service
        .waiting()
        .await
        .context("Server error during operation")?;

    tracing::info!("Server shutting down");

    Ok(())
}
