//! Terminal User Interface Module
//!
//! Terminal front-end for the resume assistant, built with Ratatui. Drives
//! the same `SessionController` as the web front-end over a single session.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │        Nursing Resume Assistant  gpt-4  •  2 document(s)        │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─ Conversation ──────────────────────────────────────────┐   │
//! │  │ User:                                                    │   │
//! │  │   Who has ICU experience?                                │   │
//! │  │ AI:                                                      │   │
//! │  │   ...                                                    │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │  ┌─ Query ─────────────────────────────────────────────────┐   │
//! │  │ /upload resumes/alice.pdf                                │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │  Ready │ [Enter] Send [Ctrl+Q] Quit [F1] Help                  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::{App, Command, Status, View};
pub use event::{AppAction, EventHandler};

use crate::config::Config;
use crate::session::SessionController;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::time::Duration;
use tracing::{error, info};

/// Type alias for our terminal backend
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> anyhow::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal(terminal: &mut Tui) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the TUI application
pub async fn run(config: Config) -> anyhow::Result<()> {
    info!("Starting TUI mode");

    let controller = SessionController::from_config(&config);
    let mut app = App::new(controller);

    let mut terminal = init_terminal()?;
    let mut events = EventHandler::new(Duration::from_millis(250));

    let result = run_app(&mut terminal, &mut app, &mut events).await;

    if let Err(e) = restore_terminal(&mut terminal) {
        error!("Failed to restore terminal: {}", e);
    }

    result
}

/// Main application loop
async fn run_app(terminal: &mut Tui, app: &mut App, events: &mut EventHandler) -> anyhow::Result<()> {
    while !app.should_quit {
        let size = terminal.size()?;
        let viewport = ui::messages_viewport(ratatui::layout::Rect::new(0, 0, size.width, size.height));
        let content_height = ui::message_lines(app, viewport.width).len();
        app.update_scroll_bounds(
            u16::try_from(content_height).unwrap_or(u16::MAX),
            viewport.height,
        );

        terminal.draw(|frame| ui::render(frame, app))?;

        // Events run one at a time; input waits until the current one finishes.
        if let Some(command) = app.take_pending() {
            app.run_command(command).await;
            continue;
        }

        match events.next().await {
            Some(action) => app.handle_action(action),
            None => break,
        }
    }

    info!("TUI exited normally");
    Ok(())
}
