//! In-process stand-in for the external todo backend.
//!
//! Mirrors the real service's observable contract: the collection lives at
//! `/todos/` (trailing slash), items at `/todos/{id}`, ids are sequential
//! integers starting at 1, every success is a plain 200 (create included),
//! delete answers with the removed item as body, and an unknown id yields
//! `404 {"detail": "Todo not found"}`. The DTOs here are defined
//! independently of the client crate; the integration tests catch drift.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub type TodoId = i64;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

/// Todos keyed by id plus the id counter. A `BTreeMap` keeps the listing
/// order deterministic (ascending id, matching insertion order).
#[derive(Default)]
pub struct Store {
    todos: BTreeMap<TodoId, Todo>,
    next_id: TodoId,
}

impl Store {
    fn assign_id(&mut self) -> TodoId {
        self.next_id += 1;
        self.next_id
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/todos/", get(list_todos).post(create_todo))
        .route("/todos/{id}", delete(delete_todo).put(update_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({"detail": "Todo not found"})))
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    let store = db.read().await;
    Json(store.todos.values().cloned().collect())
}

async fn create_todo(State(db): State<Db>, Json(input): Json<CreateTodo>) -> Json<Todo> {
    let mut store = db.write().await;
    let todo = Todo {
        id: store.assign_id(),
        title: input.title,
        description: input.description,
        completed: input.completed,
    };
    store.todos.insert(todo.id, todo.clone());
    tracing::debug!(id = todo.id, "todo created");
    Json(todo)
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<TodoId>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, (StatusCode, Json<Value>)> {
    let mut store = db.write().await;
    let todo = store.todos.get_mut(&id).ok_or_else(not_found)?;
    if let Some(title) = input.title {
        todo.title = title;
    }
    if let Some(description) = input.description {
        todo.description = Some(description);
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    Ok(Json(todo.clone()))
}

/// The real backend echoes the deleted item back with a 200.
async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<TodoId>,
) -> Result<Json<Todo>, (StatusCode, Json<Value>)> {
    let mut store = db.write().await;
    store.todos.remove(&id).map(Json).ok_or_else(not_found)
}
