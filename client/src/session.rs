//! The UI session state machine.
//!
//! # Design
//! `Session` is the stateful half of the client: it owns the todo store,
//! the two creation input fields, the edit buffer, and the error overlay.
//! Like the gateway it never performs I/O. The host dispatches an
//! [`Action`]; network actions come back as an [`Effect`] (a correlation
//! token plus a ready-to-send `HttpRequest`), the host executes the
//! round-trip however it likes, and feeds the outcome into
//! [`Session::resolve`]. Mutations that succeed hand the host a follow-up
//! effect carrying the list refresh, so the store always reflects server
//! truth after every write.
//!
//! At most one request is in flight per session. A network action
//! dispatched while the slot is occupied is rejected outright rather than
//! queued, which is what keeps a double-pressed delete from reaching the
//! wire twice. Responses are matched against the pending token; anything
//! else is discarded as stale.
//!
//! Failures all collapse to one of four fixed user-facing strings. The
//! underlying cause is logged before it is flattened, and the overlay is
//! only cleared again by a later success of the same category.

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

use crate::error::GatewayError;
use crate::gateway::TodoGateway;
use crate::http::{HttpRequest, HttpResponse, TransportError};
use crate::store::TodoStore;
use crate::types::{Todo, TodoId, UpdateTodo};

/// The four operation categories a request can belong to. Each maps to
/// one fixed failure string, and errors are cleared per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Load,
    Create,
    Update,
    Delete,
}

impl OpKind {
    /// The user-facing string surfaced when an operation of this kind
    /// fails. These are fixed; the real cause goes to the log instead.
    pub fn failure_message(self) -> &'static str {
        match self {
            OpKind::Load => "Failed to load todos",
            OpKind::Create => "Failed to create todo",
            OpKind::Update => "Failed to update todo",
            OpKind::Delete => "Failed to delete todo",
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OpKind::Load => "load",
            OpKind::Create => "create",
            OpKind::Update => "update",
            OpKind::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Opaque correlation token tying a response back to the request the
/// session issued. The host never constructs one, it only echoes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(Uuid);

impl RequestToken {
    fn fresh() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A request the host must execute and resolve back into the session.
#[derive(Debug, Clone)]
pub struct Effect {
    pub token: RequestToken,
    pub request: HttpRequest,
}

/// A network action was dispatched while another request was in flight.
/// The action had no effect; nothing was sent.
#[derive(Debug, Clone, Error)]
#[error("a {pending} request is already in flight")]
pub struct Rejected {
    pub pending: OpKind,
}

/// Everything the user can do to the session.
#[derive(Debug, Clone)]
pub enum Action {
    /// Fetch the list. Dispatched once on startup and for manual refresh.
    Load,
    SetDraftTitle(String),
    SetDraftDescription(String),
    /// POST a new todo composed from the draft, exactly as typed.
    Create,
    /// Start editing the given item, seeding the buffer from the store.
    BeginEdit(TodoId),
    SetEditTitle(String),
    SetEditDescription(String),
    /// PUT the fields changed since `BeginEdit`, then refresh.
    SaveEdit,
    /// Drop the edit buffer and return to idle, unconditionally.
    CancelEdit,
    /// Flip completion. `completed` is the flag as currently rendered;
    /// the request carries its negation.
    ToggleCompleted { id: TodoId, completed: bool },
    Delete(TodoId),
}

/// The two creation input fields. Cleared only when a create succeeds.
#[derive(Debug, Clone, Default)]
pub struct Draft {
    pub title: String,
    pub description: String,
}

impl Draft {
    fn clear(&mut self) {
        self.title.clear();
        self.description.clear();
    }
}

/// The client-held copy of an item being edited. `seed` is the item as it
/// stood when editing began; saving sends only the fields that differ
/// from it, so an untouched description or completion flag never appears
/// in the PUT body.
#[derive(Debug, Clone)]
pub struct EditBuffer {
    seed: Todo,
    title: String,
    description: String,
}

impl EditBuffer {
    fn seeded(todo: &Todo) -> Self {
        Self {
            title: todo.title.clone(),
            description: todo.description.clone().unwrap_or_default(),
            seed: todo.clone(),
        }
    }

    pub fn id(&self) -> TodoId {
        self.seed.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    fn to_update(&self) -> UpdateTodo {
        let mut update = UpdateTodo::default();
        if self.title != self.seed.title {
            update.title = Some(self.title.clone());
        }
        if self.description != self.seed.description.clone().unwrap_or_default() {
            update.description = Some(self.description.clone());
        }
        update
    }
}

/// Whether an item is being edited, as a tagged union: the buffer exists
/// exactly when an edit is underway, so no item can be in two edit states
/// and no stale buffer can outlive its editing state.
#[derive(Debug, Clone, Default)]
pub enum EditState {
    #[default]
    Idle,
    Editing(EditBuffer),
}

/// What the pending request is, so its outcome can be interpreted.
#[derive(Debug, Clone)]
enum InFlightOp {
    List,
    Create,
    SaveEdit(TodoId),
    Toggle(TodoId),
    Delete(TodoId),
}

impl InFlightOp {
    fn kind(&self) -> OpKind {
        match self {
            InFlightOp::List => OpKind::Load,
            InFlightOp::Create => OpKind::Create,
            InFlightOp::SaveEdit(_) | InFlightOp::Toggle(_) => OpKind::Update,
            InFlightOp::Delete(_) => OpKind::Delete,
        }
    }
}

#[derive(Debug)]
struct InFlight {
    token: RequestToken,
    op: InFlightOp,
}

/// Outcome of resolving a response into the session.
#[derive(Debug)]
pub enum Resolution {
    /// The pending request finished; no further work is required.
    Settled,
    /// The pending request finished and the session wants one more
    /// round-trip (the refresh that follows a successful mutation).
    FollowUp(Effect),
    /// The token did not match the pending request. Nothing changed.
    Stale,
}

/// The todo client session: store, draft, edit buffer, error overlay and
/// the single in-flight request slot.
pub struct Session {
    gateway: TodoGateway,
    store: TodoStore,
    draft: Draft,
    edit_state: EditState,
    error: Option<OpKind>,
    in_flight: Option<InFlight>,
}

impl Session {
    pub fn new(gateway: TodoGateway) -> Self {
        Self {
            gateway,
            store: TodoStore::new(),
            draft: Draft::default(),
            edit_state: EditState::Idle,
            error: None,
            in_flight: None,
        }
    }

    pub fn todos(&self) -> &[Todo] {
        self.store.as_slice()
    }

    pub fn store(&self) -> &TodoStore {
        &self.store
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn edit_state(&self) -> &EditState {
        &self.edit_state
    }

    /// The buffer of the item under edit, if any.
    pub fn editing(&self) -> Option<&EditBuffer> {
        match &self.edit_state {
            EditState::Editing(buffer) => Some(buffer),
            EditState::Idle => None,
        }
    }

    pub fn error_kind(&self) -> Option<OpKind> {
        self.error
    }

    /// The fixed error string currently overlaid, if any.
    pub fn error_message(&self) -> Option<&'static str> {
        self.error.map(OpKind::failure_message)
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn pending_kind(&self) -> Option<OpKind> {
        self.in_flight.as_ref().map(|p| p.op.kind())
    }

    /// Apply a user action. Local actions (typing, starting or cancelling
    /// an edit) always succeed and return `Ok(None)`. Network actions
    /// return the effect the host must execute, or `Rejected` when a
    /// request is already in flight.
    pub fn dispatch(&mut self, action: Action) -> Result<Option<Effect>, Rejected> {
        match action {
            Action::Load => {
                self.ensure_idle()?;
                let request = self.gateway.build_list_todos();
                Ok(Some(self.begin(InFlightOp::List, request)))
            }
            Action::SetDraftTitle(title) => {
                self.draft.title = title;
                Ok(None)
            }
            Action::SetDraftDescription(description) => {
                self.draft.description = description;
                Ok(None)
            }
            Action::Create => {
                self.ensure_idle()?;
                let built = self
                    .gateway
                    .build_create_todo(&self.draft.title, Some(&self.draft.description));
                match built {
                    Ok(request) => Ok(Some(self.begin(InFlightOp::Create, request))),
                    Err(e) => {
                        self.settle_failure(OpKind::Create, &e);
                        Ok(None)
                    }
                }
            }
            Action::BeginEdit(id) => {
                match self.store.get(id) {
                    Some(todo) => self.edit_state = EditState::Editing(EditBuffer::seeded(todo)),
                    None => tracing::debug!(id, "cannot edit a todo that is not in the store"),
                }
                Ok(None)
            }
            Action::SetEditTitle(title) => {
                if let EditState::Editing(buffer) = &mut self.edit_state {
                    buffer.title = title;
                }
                Ok(None)
            }
            Action::SetEditDescription(description) => {
                if let EditState::Editing(buffer) = &mut self.edit_state {
                    buffer.description = description;
                }
                Ok(None)
            }
            Action::SaveEdit => {
                self.ensure_idle()?;
                let (id, update) = match self.editing() {
                    Some(buffer) => (buffer.id(), buffer.to_update()),
                    None => {
                        tracing::debug!("save requested with nothing being edited");
                        return Ok(None);
                    }
                };
                match self.gateway.build_update_todo(id, &update) {
                    Ok(request) => Ok(Some(self.begin(InFlightOp::SaveEdit(id), request))),
                    Err(e) => {
                        self.settle_failure(OpKind::Update, &e);
                        Ok(None)
                    }
                }
            }
            Action::CancelEdit => {
                self.edit_state = EditState::Idle;
                Ok(None)
            }
            Action::ToggleCompleted { id, completed } => {
                self.ensure_idle()?;
                let update = UpdateTodo {
                    completed: Some(!completed),
                    ..UpdateTodo::default()
                };
                match self.gateway.build_update_todo(id, &update) {
                    Ok(request) => Ok(Some(self.begin(InFlightOp::Toggle(id), request))),
                    Err(e) => {
                        self.settle_failure(OpKind::Update, &e);
                        Ok(None)
                    }
                }
            }
            Action::Delete(id) => {
                self.ensure_idle()?;
                let request = self.gateway.build_delete_todo(id);
                Ok(Some(self.begin(InFlightOp::Delete(id), request)))
            }
        }
    }

    /// Feed the outcome of an executed effect back into the session.
    ///
    /// The token must match the pending request; anything else is
    /// discarded as [`Resolution::Stale`] without touching state. A
    /// transport failure counts the same as a bad status: the operation's
    /// fixed error string is overlaid and the cause goes to the log.
    pub fn resolve(
        &mut self,
        token: RequestToken,
        outcome: Result<HttpResponse, TransportError>,
    ) -> Resolution {
        let Some(in_flight) = self.in_flight.take() else {
            tracing::debug!(%token, "response arrived with no request in flight; discarding");
            return Resolution::Stale;
        };
        if in_flight.token != token {
            tracing::debug!(%token, "response token does not match the pending request; discarding");
            self.in_flight = Some(in_flight);
            return Resolution::Stale;
        }

        let response = match outcome {
            Ok(response) => response,
            Err(e) => return self.settle_failure(in_flight.op.kind(), &e),
        };

        match in_flight.op {
            InFlightOp::List => match self.gateway.parse_list_todos(response) {
                Ok(todos) => {
                    tracing::debug!(count = todos.len(), "todo list refreshed");
                    self.store.replace(todos);
                    self.clear_error_for(OpKind::Load);
                    self.reconcile_edit_state();
                    Resolution::Settled
                }
                Err(e) => self.settle_failure(OpKind::Load, &e),
            },
            InFlightOp::Create => match self.gateway.parse_create_todo(response) {
                Ok(todo) => {
                    tracing::info!(id = todo.id, "todo created");
                    self.draft.clear();
                    self.clear_error_for(OpKind::Create);
                    Resolution::FollowUp(self.begin_refresh())
                }
                Err(e) => self.settle_failure(OpKind::Create, &e),
            },
            InFlightOp::SaveEdit(id) => match self.gateway.parse_update_todo(response) {
                Ok(todo) => {
                    tracing::info!(id = todo.id, "todo updated");
                    if self.editing().is_some_and(|buffer| buffer.id() == id) {
                        self.edit_state = EditState::Idle;
                    }
                    self.clear_error_for(OpKind::Update);
                    Resolution::FollowUp(self.begin_refresh())
                }
                Err(e) => self.settle_failure(OpKind::Update, &e),
            },
            InFlightOp::Toggle(id) => match self.gateway.parse_update_todo(response) {
                Ok(todo) => {
                    tracing::debug!(id, completed = todo.completed, "todo toggled");
                    self.clear_error_for(OpKind::Update);
                    Resolution::FollowUp(self.begin_refresh())
                }
                Err(e) => self.settle_failure(OpKind::Update, &e),
            },
            InFlightOp::Delete(id) => match self.gateway.parse_delete_todo(response) {
                Ok(()) => {
                    tracing::info!(id, "todo deleted");
                    self.clear_error_for(OpKind::Delete);
                    Resolution::FollowUp(self.begin_refresh())
                }
                Err(e) => self.settle_failure(OpKind::Delete, &e),
            },
        }
    }

    fn ensure_idle(&self) -> Result<(), Rejected> {
        match &self.in_flight {
            Some(pending) => {
                let pending = pending.op.kind();
                tracing::debug!(%pending, "action rejected while a request is in flight");
                Err(Rejected { pending })
            }
            None => Ok(()),
        }
    }

    fn begin(&mut self, op: InFlightOp, request: HttpRequest) -> Effect {
        let token = RequestToken::fresh();
        self.in_flight = Some(InFlight { token, op });
        Effect { token, request }
    }

    fn begin_refresh(&mut self) -> Effect {
        let request = self.gateway.build_list_todos();
        self.begin(InFlightOp::List, request)
    }

    fn settle_failure(&mut self, kind: OpKind, cause: &dyn fmt::Display) -> Resolution {
        tracing::warn!(op = %kind, %cause, "request failed");
        self.error = Some(kind);
        Resolution::Settled
    }

    /// A success clears the overlay only when the error is of the same
    /// category; an older failure of another kind stays visible.
    fn clear_error_for(&mut self, kind: OpKind) {
        if self.error == Some(kind) {
            self.error = None;
        }
    }

    /// After a refresh, an edit buffer whose item no longer exists on the
    /// server points at nothing the user can save to; drop back to idle.
    fn reconcile_edit_state(&mut self) {
        if let EditState::Editing(buffer) = &self.edit_state {
            if !self.store.contains(buffer.id()) {
                tracing::debug!(id = buffer.id(), "edited todo disappeared; abandoning edit");
                self.edit_state = EditState::Idle;
            }
        }
    }
}
