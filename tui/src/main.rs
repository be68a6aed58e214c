mod app;
mod theme;
mod transport;
mod ui;

use std::io;

use clap::{Parser, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use todo_client::{Session, TodoGateway};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{App, EditMode};
use theme::{COLOR_THEME, PLAIN_THEME};
use transport::Transport;

#[derive(Clone, Copy, ValueEnum)]
enum ThemeChoice {
    Color,
    Plain,
}

#[derive(Clone, Copy, ValueEnum)]
enum EditModeChoice {
    /// Tab to the [Save]/[Cancel] controls and press Enter.
    Confirm,
    /// Enter anywhere in the editor saves immediately.
    Inline,
}

/// Terminal client for the todo service.
#[derive(Parser)]
#[command(name = "todo-tui", version)]
struct Args {
    /// Base URL of the todo backend.
    #[arg(long, env = "TODO_API_URL", default_value = todo_client::DEFAULT_BASE_URL)]
    base_url: String,

    #[arg(long, value_enum, default_value_t = ThemeChoice::Color)]
    theme: ThemeChoice,

    #[arg(long, value_enum, default_value_t = EditModeChoice::Confirm)]
    edit_mode: EditModeChoice,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs default to off so nothing bleeds into the alternate screen;
    // RUST_LOG still turns them on for debugging (they go to stderr).
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "off".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let theme = match args.theme {
        ThemeChoice::Color => &COLOR_THEME,
        ThemeChoice::Plain => &PLAIN_THEME,
    };
    let edit_mode = match args.edit_mode {
        EditModeChoice::Confirm => EditMode::Confirm,
        EditModeChoice::Inline => EditMode::Inline,
    };

    let session = Session::new(TodoGateway::new(&args.base_url));
    let mut app = App::new(session, Transport::new(), theme, edit_mode);

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}
