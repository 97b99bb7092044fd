//! UI Rendering
//!
//! Main UI layout and rendering logic for the TUI.

use crate::session::{NoticeKind, Speaker};
use crate::tui::app::{App, Status, View};
use crate::tui::theme::{Icons, Theme};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const INDENT: &str = "  ";

fn main_layout(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(6),    // Messages
            Constraint::Length(3), // Input
            Constraint::Length(1), // Status bar
        ])
        .split(area)
}

fn messages_block(app: &App) -> Block<'static> {
    Block::default()
        .title(" Conversation ")
        .borders(Borders::ALL)
        .border_style(if app.view == View::Chat {
            Theme::border_focused()
        } else {
            Theme::border()
        })
}

/// Inner area of the conversation pane for a given terminal area
pub fn messages_viewport(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(main_layout(area)[1])
}

/// Render the main UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = main_layout(frame.area());

    render_header(frame, chunks[0], app);
    render_messages(frame, chunks[1], app);
    render_input(frame, chunks[2], app);
    render_status_bar(frame, chunks[3], app);

    if app.view == View::Help {
        render_help(frame);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let title_text = vec![Line::from(vec![
        Span::styled("Nursing Resume Assistant", Theme::title()),
        Span::raw("  "),
        Span::styled(app.model().to_string(), Theme::text_secondary()),
        Span::raw("  "),
        Span::styled(Icons::DOT, Theme::text_dim()),
        Span::raw("  "),
        Span::styled(
            format!("{} document(s)", app.render.document_count),
            if app.render.document_count > 0 {
                Theme::success()
            } else {
                Theme::text_dim()
            },
        ),
    ])];

    let title = Paragraph::new(title_text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        );

    frame.render_widget(title, area);
}

/// Build the conversation pane content, wrapped to `width` columns.
pub fn message_lines(app: &App, width: u16) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    let max_width = (width as usize).saturating_sub(INDENT.len()).max(1);

    if app.render.turns.is_empty() {
        lines.push(Line::from(Span::styled(
            "Upload resumes with /upload <path>... then ask a question.",
            Theme::text_dim(),
        )));
        lines.push(Line::from(""));
    }

    for turn in &app.render.turns {
        let style = match turn.speaker {
            Speaker::User => Theme::user_message(),
            Speaker::Assistant => Theme::assistant_message(),
        };
        lines.push(Line::from(Span::styled(format!("{}:", turn.speaker.label()), style)));

        for line in turn.text.lines() {
            for chunk in wrap_text(line, max_width) {
                lines.push(Line::from(vec![
                    Span::raw(INDENT),
                    Span::styled(chunk, Theme::text()),
                ]));
            }
        }
        lines.push(Line::from(""));
    }

    if let Status::Working(_) = app.status {
        lines.push(Line::from(vec![
            Span::styled("AI: ", Theme::assistant_message()),
            Span::styled(Icons::CURSOR, Theme::active()),
        ]));
    }

    for notice in &app.render.notices {
        let (icon, style) = match notice.kind {
            NoticeKind::Info => (Icons::COMPLETE, Theme::success()),
            NoticeKind::Error => (Icons::ERROR, Theme::error()),
        };
        for (i, chunk) in wrap_text(&notice.message, max_width).into_iter().enumerate() {
            let lead = if i == 0 { format!("{} ", icon) } else { INDENT.to_string() };
            lines.push(Line::from(vec![Span::styled(lead, style), Span::styled(chunk, style)]));
        }
    }

    lines
}

/// Word-wrap a single line, hard-splitting words longer than `width`.
pub fn wrap_text(line: &str, width: usize) -> Vec<String> {
    if line.is_empty() {
        return vec![String::new()];
    }

    let mut out = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in line.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > width {
            if current_len > 0 {
                out.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            out.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
        if needed > width && current_len > 0 {
            out.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }

    if current_len > 0 || out.is_empty() {
        out.push(current);
    }
    out
}

fn render_messages(frame: &mut Frame, area: Rect, app: &App) {
    let block = messages_block(app);
    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let paragraph = Paragraph::new(message_lines(app, inner_area.width)).scroll((app.scroll_offset, 0));
    frame.render_widget(paragraph, inner_area);
}

fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Query ")
        .borders(Borders::ALL)
        .border_style(if app.view == View::Chat {
            Theme::border_focused()
        } else {
            Theme::border()
        });

    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(&app.input, inner);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let status = match &app.status {
        Status::Idle => Span::styled("Ready", Theme::text_secondary()),
        Status::Working(message) => Span::styled(message.clone(), Theme::active()),
    };

    let shortcuts = vec![
        Span::styled(" [Enter]", Theme::shortcut_key()),
        Span::styled(" Send ", Theme::shortcut_desc()),
        Span::styled("[Ctrl+Q]", Theme::shortcut_key()),
        Span::styled(" Quit ", Theme::shortcut_desc()),
        Span::styled("[F1]", Theme::shortcut_key()),
        Span::styled(" Help", Theme::shortcut_desc()),
    ];

    let line = Line::from(
        std::iter::once(status)
            .chain(std::iter::once(Span::raw(" │ ")))
            .chain(shortcuts)
            .collect::<Vec<_>>(),
    );

    frame.render_widget(Paragraph::new(line), area);
}

fn render_help(frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let entry = |key: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(key, Theme::shortcut_key()),
            Span::styled(desc, Theme::text()),
        ])
    };

    let help_lines = vec![
        Line::from(Span::styled("Commands", Theme::heading())),
        Line::from(""),
        entry("/upload <path>...  ", "Add PDF, DOCX or TXT resumes"),
        entry("                   ", "Quote paths with spaces: \"My Resume.pdf\""),
        entry("<anything else>    ", "Ask the AI about the uploaded resumes"),
        Line::from(""),
        Line::from(Span::styled("Keyboard Shortcuts", Theme::heading())),
        Line::from(""),
        entry("Enter              ", "Submit"),
        entry("Ctrl+Q             ", "Quit application"),
        entry("Ctrl+C             ", "Force quit"),
        entry("↑/↓                ", "Scroll conversation"),
        entry("PageUp/Down        ", "Scroll page"),
        entry("Esc                ", "Close help"),
        entry("F1 / Ctrl+H        ", "Show this help"),
        Line::from(""),
        Line::from(Span::styled("Press any key to close", Theme::text_dim())),
    ];

    let paragraph = Paragraph::new(help_lines).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Theme::border_focused()),
    );

    frame.render_widget(paragraph, area);
}

/// Helper to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
