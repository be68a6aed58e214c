//! Layout and widget rendering: header, error overlay, the new-todo form,
//! the item list, the editor, and the status bar.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use todo_client::Todo;

use crate::app::{AddField, App, EditField, EditMode, Focus};
use crate::theme::Theme;

pub fn render(frame: &mut Frame, app: &App) {
    let editing = app.session.editing().is_some();

    let mut constraints = vec![
        Constraint::Length(1), // header
        Constraint::Length(1), // error overlay
        Constraint::Length(4), // new-todo form
    ];
    if editing {
        constraints.push(Constraint::Length(5)); // editor
    }
    constraints.push(Constraint::Min(0)); // list
    constraints.push(Constraint::Length(1)); // status bar

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    render_header(frame, chunks[0], app);
    render_error_line(frame, chunks[1], app);
    render_add_form(frame, chunks[2], app);
    if editing {
        render_editor(frame, chunks[3], app);
    }
    let list_area = if editing { chunks[4] } else { chunks[3] };
    let status_area = if editing { chunks[5] } else { chunks[4] };
    render_list(frame, list_area, app);
    render_status_bar(frame, status_area, app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let count = app.session.todos().len();
    let header = Line::from(vec![
        Span::styled(
            " Todos ",
            Style::default()
                .fg(app.theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("({count}) "), Style::default().fg(app.theme.muted)),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// The error overlay. It coexists with every other state and persists until
/// a later success of the same category clears it.
fn render_error_line(frame: &mut Frame, area: Rect, app: &App) {
    if let Some(message) = app.session.error_message() {
        let line = Line::from(Span::styled(
            format!(" {message} "),
            Style::default()
                .fg(app.theme.error)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// A labelled text input line. The focused field carries a block cursor.
fn input_line<'a>(label: &'a str, value: &'a str, focused: bool, theme: &Theme) -> Line<'a> {
    let mut spans = vec![
        Span::styled(format!(" {label}: "), Style::default().fg(theme.muted)),
        Span::styled(value, Style::default().fg(theme.fg)),
    ];
    if focused {
        spans.push(Span::styled(
            "█",
            Style::default().fg(theme.border_focused),
        ));
    }
    Line::from(spans)
}

fn render_add_form(frame: &mut Frame, area: Rect, app: &App) {
    let focused_field = match app.focus {
        Focus::Add(field) => Some(field),
        _ => None,
    };
    let border = if focused_field.is_some() {
        app.theme.border_focused
    } else {
        app.theme.border_normal
    };

    let draft = app.session.draft();
    let lines = vec![
        input_line(
            "Title",
            &draft.title,
            focused_field == Some(AddField::Title),
            app.theme,
        ),
        input_line(
            "Description",
            &draft.description,
            focused_field == Some(AddField::Description),
            app.theme,
        ),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" new todo ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_editor(frame: &mut Frame, area: Rect, app: &App) {
    let Some(buffer) = app.session.editing() else {
        return;
    };
    let focused_field = match app.focus {
        Focus::Edit(field) => Some(field),
        _ => None,
    };

    let mut lines = vec![
        input_line(
            "Title",
            buffer.title(),
            focused_field == Some(EditField::Title),
            app.theme,
        ),
        input_line(
            "Description",
            buffer.description(),
            focused_field == Some(EditField::Description),
            app.theme,
        ),
    ];

    match app.edit_mode {
        EditMode::Confirm => {
            lines.push(Line::from(vec![
                Span::raw(" "),
                button("[ Save ]", focused_field == Some(EditField::Save), app.theme),
                Span::raw("  "),
                button(
                    "[ Cancel ]",
                    focused_field == Some(EditField::Cancel),
                    app.theme,
                ),
            ]));
        }
        EditMode::Inline => {
            lines.push(Line::from(Span::styled(
                " Enter saves · Esc cancels",
                Style::default().fg(app.theme.muted),
            )));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border_focused))
        .title(format!(" edit #{} ", buffer.id()));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn button<'a>(label: &'a str, focused: bool, theme: &Theme) -> Span<'a> {
    let style = if focused {
        Style::default()
            .fg(theme.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.muted)
    };
    Span::styled(label, style)
}

fn todo_line<'a>(todo: &'a Todo, selected: bool, theme: &Theme) -> Line<'a> {
    let checkbox = if todo.completed { "[x] " } else { "[ ] " };
    let checkbox_style = if todo.completed {
        Style::default().fg(theme.success)
    } else {
        Style::default().fg(theme.fg)
    };
    let title_style = if todo.completed {
        Style::default()
            .fg(theme.muted)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(theme.fg)
    };

    let mut line = Line::from(vec![
        Span::raw(" "),
        Span::styled(checkbox, checkbox_style),
        Span::styled(todo.title.as_str(), title_style),
        Span::styled(
            format!("  {}", todo.display_description()),
            Style::default().fg(theme.muted),
        ),
    ]);
    if selected {
        line = line.style(Style::default().bg(theme.selection_bg));
    }
    line
}

fn render_list(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if app.focus == Focus::List {
            app.theme.border_focused
        } else {
            app.theme.border_normal
        }))
        .title(" items ");

    if app.session.todos().is_empty() {
        let empty = Line::from(Span::styled(
            " nothing to do",
            Style::default().fg(app.theme.muted),
        ));
        frame.render_widget(Paragraph::new(empty).block(block), area);
        return;
    }

    let lines: Vec<Line> = app
        .session
        .todos()
        .iter()
        .enumerate()
        .map(|(i, todo)| todo_line(todo, i == app.selected && app.focus == Focus::List, app.theme))
        .collect();
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let keys = match app.focus {
        Focus::List => {
            " j/k select · a add · e edit · space toggle · d delete · r refresh · q quit "
        }
        Focus::Add(_) => " tab switch field · enter submit · esc back ",
        Focus::Edit(_) => match app.edit_mode {
            EditMode::Confirm => " tab cycle · enter activate · esc cancel ",
            EditMode::Inline => " tab switch field · enter save · esc cancel ",
        },
    };
    let line = Line::from(Span::styled(keys, Style::default().fg(app.theme.muted)));
    frame.render_widget(Paragraph::new(line), area);
}
