//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The
//! client crate builds `HttpRequest` values and parses `HttpResponse`
//! values without ever touching the network — the host (the terminal UI,
//! a test harness) is responsible for executing the actual I/O. This
//! separation keeps the core deterministic and easy to test.
//!
//! All fields use owned types (`String`, `Vec`) so values can be handed
//! across threads or stored without lifetime concerns.

use thiserror::Error;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// An HTTP request described as plain data.
///
/// Built by `TodoGateway::build_*` methods. The host is responsible for
/// executing this request against the network and returning the
/// corresponding `HttpResponse`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Constructed by the host after executing an `HttpRequest`, then passed
/// back for parsing.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is in the 2xx success range. The backend makes
    /// no promises about exact codes (its create returns 200, its delete
    /// returns 200 with a body), so everything in the range counts.
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

/// The round-trip itself failed: connection refused, DNS failure, broken
/// pipe. There is no `HttpResponse` to parse in this case; the host hands
/// this to `Session::resolve` instead.
#[derive(Debug, Clone, Error)]
#[error("transport failure: {0}")]
pub struct TransportError(pub String);
