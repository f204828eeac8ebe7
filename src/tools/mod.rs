//! MCP tool inputs for the Ticket Tailor server.
//!
//! This module contains the input types for each tool and the mapping from
//! those inputs to upstream query parameters.

mod inputs;
mod query;

pub use inputs::*;
pub use query::*;
