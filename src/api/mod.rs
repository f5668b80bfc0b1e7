//! Company API client.
//!
//! Wraps the four remote endpoints the bot reads from and validates every record
//! at the boundary, so the rest of the crate only sees typed records.

/// HTTP client for the company API
pub mod client;
/// Per-element decoding of JSON arrays
pub mod records;

pub use client::ApiClient;
