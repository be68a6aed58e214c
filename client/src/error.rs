//! Error types for the todo API gateway.
//!
//! # Design
//! `NotFound` gets a dedicated variant because deleting an item that is
//! already gone must be a defined failure, not a generic one. Every other
//! non-2xx response lands in `UnexpectedStatus` with the raw status code
//! and body for the logs — the UI itself never distinguishes 4xx from 5xx.

use thiserror::Error;

/// Errors returned by `TodoGateway` build and parse methods.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The server returned 404 — the requested todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The request payload could not be serialized to JSON.
    #[error("failed to encode request body: {0}")]
    Serialize(String),

    /// The response body could not be deserialized into the expected type.
    #[error("failed to decode response body: {0}")]
    Deserialize(String),
}
