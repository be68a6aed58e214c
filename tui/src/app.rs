//! Main TUI application state and logic.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use todo_client::{Action, Effect, Resolution, Session};

use crate::theme::Theme;
use crate::transport::Transport;

/// How saving an edit is driven: via explicit [Save]/[Cancel] controls, or
/// inline where Enter anywhere in the editor saves immediately. Both modes
/// drive the same session actions; the difference is purely flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Confirm,
    Inline,
}

/// Which input of the new-todo form has the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddField {
    Title,
    Description,
}

impl AddField {
    fn next(self) -> Self {
        match self {
            AddField::Title => AddField::Description,
            AddField::Description => AddField::Title,
        }
    }
}

/// Which control of the editor has the cursor. `Save` and `Cancel` are only
/// reachable in confirm mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Title,
    Description,
    Save,
    Cancel,
}

impl EditField {
    fn next(self, mode: EditMode) -> Self {
        match mode {
            EditMode::Confirm => match self {
                EditField::Title => EditField::Description,
                EditField::Description => EditField::Save,
                EditField::Save => EditField::Cancel,
                EditField::Cancel => EditField::Title,
            },
            EditMode::Inline => match self {
                EditField::Title => EditField::Description,
                _ => EditField::Title,
            },
        }
    }
}

/// Where keystrokes currently go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Add(AddField),
    Edit(EditField),
}

/// The main application state: the session plus everything that is purely
/// presentational (focus, selection, quit flag).
pub struct App {
    pub session: Session,
    pub theme: &'static Theme,
    pub edit_mode: EditMode,
    pub focus: Focus,
    pub selected: usize,
    transport: Transport,
    should_quit: bool,
}

impl App {
    pub fn new(
        session: Session,
        transport: Transport,
        theme: &'static Theme,
        edit_mode: EditMode,
    ) -> Self {
        App {
            session,
            theme,
            edit_mode,
            focus: Focus::List,
            selected: 0,
            transport,
            should_quit: false,
        }
    }

    /// Run the TUI application.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        // "On mount": fetch the list before the first draw.
        self.pump(Action::Load);

        loop {
            terminal.draw(|f| crate::ui::render(f, self))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(200))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Dispatch an action and, if it produced a request, execute it to
    /// completion, follow-up refresh included. A rejection (a request
    /// already in flight) drops the action; the session stays consistent.
    fn pump(&mut self, action: Action) {
        match self.session.dispatch(action) {
            Ok(Some(effect)) => self.drive(effect),
            Ok(None) => {}
            Err(rejected) => tracing::debug!(%rejected, "key ignored"),
        }
        self.reconcile();
    }

    fn drive(&mut self, mut effect: Effect) {
        loop {
            let outcome = self.transport.execute(&effect.request);
            match self.session.resolve(effect.token, outcome) {
                Resolution::FollowUp(next) => effect = next,
                Resolution::Settled | Resolution::Stale => break,
            }
        }
    }

    /// Keep the presentational state in step with the session: the
    /// selection stays within the list, and the editor focus is dropped
    /// when the session is no longer editing (save succeeded, edit
    /// cancelled, or the item vanished in a refresh).
    fn reconcile(&mut self) {
        let len = self.session.todos().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
        if matches!(self.focus, Focus::Edit(_)) && self.session.editing().is_none() {
            self.focus = Focus::List;
        }
    }

    /// Handle keyboard events.
    fn handle_key_event(&mut self, key: KeyEvent) {
        match self.focus {
            Focus::List => self.handle_list_key(key),
            Focus::Add(field) => self.handle_add_key(key, field),
            Focus::Edit(field) => self.handle_edit_key(key, field),
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                let len = self.session.todos().len();
                if len > 0 && self.selected + 1 < len {
                    self.selected += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Char('a') => {
                self.focus = Focus::Add(AddField::Title);
            }
            KeyCode::Char('e') => {
                if let Some(todo) = self.session.todos().get(self.selected) {
                    let id = todo.id;
                    self.pump(Action::BeginEdit(id));
                    if self.session.editing().is_some() {
                        self.focus = Focus::Edit(EditField::Title);
                    }
                }
            }
            KeyCode::Char(' ') => {
                if let Some(todo) = self.session.todos().get(self.selected) {
                    let (id, completed) = (todo.id, todo.completed);
                    self.pump(Action::ToggleCompleted { id, completed });
                }
            }
            KeyCode::Char('d') => {
                if let Some(todo) = self.session.todos().get(self.selected) {
                    let id = todo.id;
                    self.pump(Action::Delete(id));
                }
            }
            KeyCode::Char('r') => {
                self.pump(Action::Load);
            }
            _ => {}
        }
    }

    fn handle_add_key(&mut self, key: KeyEvent, field: AddField) {
        match key.code {
            // Leaving the form does NOT clear it; only a successful create does.
            KeyCode::Esc => {
                self.focus = Focus::List;
            }
            KeyCode::Tab => {
                self.focus = Focus::Add(field.next());
            }
            KeyCode::Enter => {
                self.pump(Action::Create);
                self.focus = Focus::List;
            }
            KeyCode::Backspace => {
                let mut value = self.current_add_value(field);
                value.pop();
                self.set_add_value(field, value);
            }
            KeyCode::Char(c) => {
                let mut value = self.current_add_value(field);
                value.push(c);
                self.set_add_value(field, value);
            }
            _ => {}
        }
    }

    fn current_add_value(&self, field: AddField) -> String {
        match field {
            AddField::Title => self.session.draft().title.clone(),
            AddField::Description => self.session.draft().description.clone(),
        }
    }

    fn set_add_value(&mut self, field: AddField, value: String) {
        let action = match field {
            AddField::Title => Action::SetDraftTitle(value),
            AddField::Description => Action::SetDraftDescription(value),
        };
        self.pump(action);
    }

    fn handle_edit_key(&mut self, key: KeyEvent, field: EditField) {
        match key.code {
            KeyCode::Esc => {
                self.pump(Action::CancelEdit);
                self.focus = Focus::List;
            }
            KeyCode::Tab => {
                self.focus = Focus::Edit(field.next(self.edit_mode));
            }
            KeyCode::Enter => match (self.edit_mode, field) {
                // Inline: Enter anywhere in the editor saves immediately.
                (EditMode::Inline, _) => self.pump(Action::SaveEdit),
                (EditMode::Confirm, EditField::Save) => self.pump(Action::SaveEdit),
                (EditMode::Confirm, EditField::Cancel) => {
                    self.pump(Action::CancelEdit);
                    self.focus = Focus::List;
                }
                // Enter in a text field walks toward the [Save] control.
                (EditMode::Confirm, _) => {
                    self.focus = Focus::Edit(field.next(self.edit_mode));
                }
            },
            KeyCode::Backspace => {
                if let Some(mut value) = self.current_edit_value(field) {
                    value.pop();
                    self.set_edit_value(field, value);
                }
            }
            KeyCode::Char(c) => {
                if let Some(mut value) = self.current_edit_value(field) {
                    value.push(c);
                    self.set_edit_value(field, value);
                }
            }
            _ => {}
        }
    }

    fn current_edit_value(&self, field: EditField) -> Option<String> {
        let buffer = self.session.editing()?;
        match field {
            EditField::Title => Some(buffer.title().to_string()),
            EditField::Description => Some(buffer.description().to_string()),
            EditField::Save | EditField::Cancel => None,
        }
    }

    fn set_edit_value(&mut self, field: EditField, value: String) {
        let action = match field {
            EditField::Title => Action::SetEditTitle(value),
            EditField::Description => Action::SetEditDescription(value),
            EditField::Save | EditField::Cancel => return,
        };
        self.pump(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_fields_alternate() {
        assert_eq!(AddField::Title.next(), AddField::Description);
        assert_eq!(AddField::Description.next(), AddField::Title);
    }

    #[test]
    fn confirm_mode_cycles_through_the_buttons() {
        let mode = EditMode::Confirm;
        assert_eq!(EditField::Title.next(mode), EditField::Description);
        assert_eq!(EditField::Description.next(mode), EditField::Save);
        assert_eq!(EditField::Save.next(mode), EditField::Cancel);
        assert_eq!(EditField::Cancel.next(mode), EditField::Title);
    }

    #[test]
    fn inline_mode_only_visits_the_text_fields() {
        let mode = EditMode::Inline;
        assert_eq!(EditField::Title.next(mode), EditField::Description);
        assert_eq!(EditField::Description.next(mode), EditField::Title);
    }
}
