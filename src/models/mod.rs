//! Data models for the Ticket Tailor API.
//!
//! Events and orders are passed through as raw JSON, so only the list
//! envelope is modelled.

mod envelope;

pub use envelope::*;
