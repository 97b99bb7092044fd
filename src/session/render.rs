//! Render model
//!
//! Snapshot of a session returned after every event. Front-ends redraw from
//! it instead of reading session state directly.

use super::conversation::ConversationTurn;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Info,
    Error,
}

/// A user-visible message produced by the last event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderModel {
    pub session_id: Uuid,
    pub turns: Vec<ConversationTurn>,
    /// The turns as labelled text blocks.
    pub transcript: String,
    pub document_count: usize,
    /// Current value of the query input.
    pub input: String,
    pub notices: Vec<Notice>,
}

impl RenderModel {
    pub fn errors(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter().filter(|n| n.is_error())
    }
}
