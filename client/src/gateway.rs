//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoGateway` holds only a `base_url` and carries no mutable state
//! between calls. Each of the four REST operations is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. The caller executes the actual HTTP
//! round-trip in between, keeping this layer deterministic and free of
//! I/O dependencies.
//!
//! The backend accepts the collection path with a trailing slash
//! (`/todos/`) and item paths without one (`/todos/{id}`); both are
//! reproduced here verbatim. Any status in the 2xx range counts as
//! success — the server returns 200 for create and 200 with the deleted
//! item as body for delete, and neither is worth distinguishing.

use crate::error::GatewayError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, Todo, TodoId, UpdateTodo};

/// Base URL used when no override is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Synchronous, stateless gateway for the todo API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The caller is responsible for executing the HTTP
/// round-trip between `build_*` and `parse_*`; no cache is consulted or
/// updated here — callers refresh their own state.
#[derive(Debug, Clone)]
pub struct TodoGateway {
    base_url: String,
}

impl TodoGateway {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection_path(&self) -> String {
        format!("{}/todos/", self.base_url)
    }

    fn item_path(&self, id: TodoId) -> String {
        format!("{}/todos/{id}", self.base_url)
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection_path(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// POST a new item composed from the two input fields. `completed`
    /// always starts out `false`; an empty description is not sent at all.
    pub fn build_create_todo(
        &self,
        title: &str,
        description: Option<&str>,
    ) -> Result<HttpRequest, GatewayError> {
        let input = CreateTodo {
            title: title.to_string(),
            description: description
                .filter(|d| !d.is_empty())
                .map(|d| d.to_string()),
            completed: false,
        };
        let body =
            serde_json::to_string(&input).map_err(|e| GatewayError::Serialize(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.collection_path(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    /// PUT a partial update. Only the populated fields of `input` appear
    /// in the body; the server leaves omitted fields unchanged. No
    /// optimistic locking — last write wins.
    pub fn build_update_todo(
        &self,
        id: TodoId,
        input: &UpdateTodo,
    ) -> Result<HttpRequest, GatewayError> {
        let body =
            serde_json::to_string(input).map_err(|e| GatewayError::Serialize(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.item_path(id),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_delete_todo(&self, id: TodoId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.item_path(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, GatewayError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| GatewayError::Deserialize(e.to_string()))
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, GatewayError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| GatewayError::Deserialize(e.to_string()))
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, GatewayError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| GatewayError::Deserialize(e.to_string()))
    }

    /// The backend answers DELETE with the removed item as body; nothing
    /// in it is needed, so any 2xx is simply success.
    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), GatewayError> {
        check_status(&response)?;
        Ok(())
    }
}

impl Default for TodoGateway {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Map non-success status codes to the appropriate `GatewayError` variant.
fn check_status(response: &HttpResponse) -> Result<(), GatewayError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(GatewayError::NotFound);
    }
    Err(GatewayError::UnexpectedStatus {
        status: response.status,
        body: response.body.clone(),
    })
}
