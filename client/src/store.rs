//! The client-side list of todos.
//!
//! # Design
//! `TodoStore` always holds exactly what the last successful list fetch
//! returned, in the server's order. There is no incremental patching and
//! no merging with prior contents: every mutation is followed by a full
//! refresh, and `replace` swaps the whole list. Views are direct
//! projections of this data.

use crate::types::{Todo, TodoId};

/// In-memory list of todos, replaced wholesale on every refresh.
#[derive(Debug, Clone, Default)]
pub struct TodoStore {
    items: Vec<Todo>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a freshly fetched list, discarding everything held before.
    pub fn replace(&mut self, items: Vec<Todo>) {
        self.items = items;
    }

    pub fn as_slice(&self) -> &[Todo] {
        &self.items
    }

    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.items.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
