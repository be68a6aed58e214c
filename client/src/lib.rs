//! Deterministic client core for the todo service.
//!
//! # Overview
//! Everything a todo UI needs except the I/O: wire DTOs, HTTP requests and
//! responses as plain data, a stateless request gateway, the in-memory todo
//! store, and the session state machine that ties them together. The host
//! (the terminal UI, a test harness) executes every HTTP round-trip
//! (host-does-IO pattern), which keeps this crate fully deterministic and
//! testable without a network.
//!
//! # Design
//! - `TodoGateway` is stateless — it holds only `base_url`. Each CRUD
//!   operation is split into `build_*` (produces a request) and `parse_*`
//!   (consumes a response), so the I/O boundary is explicit.
//! - `Session` owns all mutable UI state (store, draft, edit buffer, error
//!   overlay) and speaks to the host in actions, effects, and resolutions.
//! - Types use owned `String` / `Vec` fields so values move freely between
//!   the session and the host.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod error;
pub mod gateway;
pub mod http;
pub mod session;
pub mod store;
pub mod types;

pub use error::GatewayError;
pub use gateway::{TodoGateway, DEFAULT_BASE_URL};
pub use http::{HttpMethod, HttpRequest, HttpResponse, TransportError};
pub use session::{
    Action, Draft, EditBuffer, EditState, Effect, OpKind, Rejected, RequestToken, Resolution,
    Session,
};
pub use store::TodoStore;
pub use types::{CreateTodo, Todo, TodoId, UpdateTodo};
