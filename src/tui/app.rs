//! Application State
//!
//! Owns the terminal session and turns submitted input into controller events.

use crate::documents::UploadedFile;
use crate::session::{Notice, RenderModel, Session, SessionController};
use crate::tui::event::AppAction;
use std::path::PathBuf;
use tracing::{info, warn};
use tui_textarea::TextArea;

const INPUT_PLACEHOLDER: &str = "Ask about the uploaded resumes, or /upload <path>...";
const UPLOAD_COMMAND: &str = "/upload";

/// What the status bar shows
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Status {
    #[default]
    Idle,
    /// An event is being processed
    Working(String),
}

/// Current view/screen
#[derive(Debug, Clone, PartialEq, Default)]
pub enum View {
    #[default]
    Chat,
    Help,
}

/// A submitted input line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Upload(Vec<PathBuf>),
    Query(String),
}

/// `/upload a.pdf "My Resume.docx"` uploads files, anything else is a query.
/// Blank lines are ignored.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    match trimmed.strip_prefix(UPLOAD_COMMAND) {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => Some(
            Command::Upload(split_paths(rest).into_iter().map(PathBuf::from).collect()),
        ),
        _ => Some(Command::Query(line.to_string())),
    }
}

/// Split on whitespace, keeping single- or double-quoted runs together.
fn split_paths(args: &str) -> Vec<String> {
    let mut paths = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for ch in args.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_token = true;
            }
            None if ch.is_whitespace() => {
                if in_token {
                    paths.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(ch);
                in_token = true;
            }
        }
    }
    if in_token {
        paths.push(current);
    }
    paths
}

/// Read files from disk for upload. Unreadable paths become error notices.
pub async fn load_files(paths: &[PathBuf]) -> (Vec<UploadedFile>, Vec<Notice>) {
    let mut files = Vec::new();
    let mut notices = Vec::new();

    for path in paths {
        match tokio::fs::read(path).await {
            Ok(data) => {
                let filename = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                files.push(UploadedFile::new(filename, None, data));
            }
            Err(e) => {
                warn!("Could not read {}: {}", path.display(), e);
                notices.push(Notice::error(format!("Could not read {}: {}", path.display(), e)));
            }
        }
    }

    (files, notices)
}

/// Main application state
pub struct App {
    // UI State
    pub view: View,
    pub should_quit: bool,
    pub status: Status,

    // Session State
    pub session: Session,
    controller: SessionController,
    pub render: RenderModel,

    // Input and scrolling
    pub input: TextArea<'static>,
    pub scroll_offset: u16,
    pub max_scroll: u16,
    follow_output: bool,

    pending: Option<Command>,
}

impl App {
    /// Create a new application instance
    pub fn new(controller: SessionController) -> Self {
        let session = Session::new();
        let render = session.snapshot(Vec::new());

        Self {
            view: View::Chat,
            should_quit: false,
            status: Status::Idle,
            session,
            controller,
            render,
            input: Self::empty_input(),
            scroll_offset: 0,
            max_scroll: 0,
            follow_output: true,
            pending: None,
        }
    }

    fn empty_input() -> TextArea<'static> {
        let mut input = TextArea::default();
        input.set_cursor_line_style(ratatui::style::Style::default());
        input.set_placeholder_text(INPUT_PLACEHOLDER);
        input
    }

    pub fn model(&self) -> &str {
        self.controller.model()
    }

    /// Handle a user action
    pub fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::Quit | AppAction::ForceQuit => {
                self.should_quit = true;
            }
            AppAction::Submit => {
                if self.view == View::Chat {
                    self.submit_input();
                }
            }
            AppAction::ToggleHelp => {
                self.view = if self.view == View::Help {
                    View::Chat
                } else {
                    View::Help
                };
            }
            AppAction::Escape => {
                self.view = View::Chat;
            }
            AppAction::ScrollUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                self.follow_output = false;
            }
            AppAction::ScrollDown => {
                self.scroll_offset = (self.scroll_offset + 1).min(self.max_scroll);
                self.follow_output = self.scroll_offset == self.max_scroll;
            }
            AppAction::ScrollPageUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(10);
                self.follow_output = false;
            }
            AppAction::ScrollPageDown => {
                self.scroll_offset = (self.scroll_offset + 10).min(self.max_scroll);
                self.follow_output = self.scroll_offset == self.max_scroll;
            }
            AppAction::Input(key_event) => {
                if self.view == View::Help {
                    self.view = View::Chat;
                } else if self.pending.is_none() {
                    self.input.input(key_event);
                }
            }
            AppAction::Tick => {}
        }
    }

    /// Queue the input line; it runs after the next frame so the
    /// "working" status is visible while the event blocks.
    fn submit_input(&mut self) {
        if self.pending.is_some() {
            return;
        }
        let line = self.input.lines().join("\n");
        let Some(command) = parse_command(&line) else {
            return;
        };

        self.status = Status::Working(match &command {
            Command::Upload(paths) => format!("Extracting {} file(s)...", paths.len()),
            Command::Query(_) => "Waiting for the AI...".to_string(),
        });
        self.pending = Some(command);
    }

    pub fn take_pending(&mut self) -> Option<Command> {
        self.pending.take()
    }

    /// Run one event to completion against the session.
    pub async fn run_command(&mut self, command: Command) {
        match command {
            Command::Upload(paths) => {
                let (files, mut read_errors) = load_files(&paths).await;
                let mut model = self.controller.on_files_uploaded(&mut self.session, files);
                model.notices.append(&mut read_errors);
                self.render = model;
            }
            Command::Query(query) => {
                self.render = self.controller.on_query_submitted(&mut self.session, &query).await;
            }
        }

        info!(
            "Session {}: {} turns, {} documents",
            self.session.id,
            self.render.turns.len(),
            self.render.document_count
        );

        self.input = Self::empty_input();
        self.input.insert_str(&self.render.input);
        self.status = Status::Idle;
        self.follow_output = true;
    }

    /// Update max scroll based on content
    pub fn update_scroll_bounds(&mut self, content_height: u16, viewport_height: u16) {
        self.max_scroll = content_height.saturating_sub(viewport_height);
        if self.follow_output || self.scroll_offset > self.max_scroll {
            self.scroll_offset = self.max_scroll;
        }
    }
}
