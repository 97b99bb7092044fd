//! Session state and the controller that reacts to user events.
//!
//! A [`Session`] owns everything one user builds up while the assistant is
//! open: uploaded document texts, the conversation, and the pending query
//! input. It is created by a front-end at start-up and passed explicitly
//! into [`SessionController`] handlers; nothing here is global.

pub mod conversation;
pub mod render;

pub use conversation::{ConversationLog, ConversationTurn, Speaker};
pub use render::{Notice, NoticeKind, RenderModel};

use crate::config::Config;
use crate::documents::{self, DocumentStore, UploadedFile};
use crate::llm::{ChatCompletion, CompletionRequest, OpenAIAdapter};
use crate::prompt;
use crate::types::NO_RESPONSE_MESSAGE;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    documents: DocumentStore,
    conversation: ConversationLog,
    input: String,
}

impl Session {
    pub fn new() -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            documents: DocumentStore::new(),
            conversation: ConversationLog::new(),
            input: String::new(),
        };
        info!("Session {} started", session.id);
        session
    }

    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    pub fn conversation(&self) -> &ConversationLog {
        &self.conversation
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    pub fn snapshot(&self, notices: Vec<Notice>) -> RenderModel {
        RenderModel {
            session_id: self.id,
            turns: self.conversation.all().to_vec(),
            transcript: self.conversation.render(),
            document_count: self.documents.len(),
            input: self.input.clone(),
            notices,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Wires extraction, prompt assembly and the completion client together.
///
/// Holds no session state of its own, so one controller can serve whichever
/// session a front-end hands it.
#[derive(Clone)]
pub struct SessionController {
    client: Arc<dyn ChatCompletion>,
    model: String,
    max_tokens: u32,
}

impl SessionController {
    pub fn new(client: Arc<dyn ChatCompletion>, model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            client,
            model: model.into(),
            max_tokens,
        }
    }

    /// A `Config` only exists once the API key has been found, so the
    /// key check happens exactly once, before any controller is built.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(OpenAIAdapter::from_config(&config.llm)),
            config.llm.model.clone(),
            config.llm.max_tokens,
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Extract every file of the batch, in order, into the document store.
    ///
    /// A file that fails to decode is reported and skipped; it never stops
    /// the rest of the batch.
    pub fn on_files_uploaded(&self, session: &mut Session, files: Vec<UploadedFile>) -> RenderModel {
        let total = files.len();
        let mut added = 0usize;
        let mut notices = Vec::new();

        for file in files {
            match documents::extract(&file) {
                Ok(text) => {
                    info!(
                        "Session {}: added {} ({} chars)",
                        session.id,
                        file.filename,
                        text.len()
                    );
                    session.documents.append(text);
                    added += 1;
                }
                Err(e) => {
                    warn!("Session {}: {}", session.id, e);
                    notices.push(Notice::error(e.to_string()));
                }
            }
        }

        if total > 0 {
            notices.insert(
                0,
                Notice::info(format!("Added {} of {} uploaded file(s)", added, total)),
            );
        }

        session.snapshot(notices)
    }

    /// Ask the completion API about the stored documents.
    ///
    /// The user turn is always recorded; the assistant turn only when an
    /// answer came back. The input value is cleared either way.
    pub async fn on_query_submitted(&self, session: &mut Session, query: &str) -> RenderModel {
        session.set_input(query);
        session.conversation.append_user(query);

        let prompt = prompt::assemble(session.documents.all(), query);
        let request = CompletionRequest::new(self.model.clone(), prompt, self.max_tokens);

        let mut notices = Vec::new();
        match self.client.create_chat_completion(&request).await {
            Ok(answer) => {
                info!("Session {}: answer received ({} chars)", session.id, answer.len());
                session.conversation.append_assistant(answer);
            }
            Err(failure) => {
                warn!("Session {}: completion failed: {}", session.id, failure);
                notices.push(Notice::error(NO_RESPONSE_MESSAGE));
            }
        }

        session.set_input(String::new());
        session.snapshot(notices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::ScriptedCompletion;
    use crate::types::CompletionFailure;

    fn controller(client: Arc<ScriptedCompletion>) -> SessionController {
        SessionController::new(client, "gpt-4-1106-preview", 1000)
    }

    fn text_file(name: &str, body: &str) -> UploadedFile {
        UploadedFile::new(name, Some("text/plain".into()), body.as_bytes().to_vec())
    }

    #[test]
    fn test_upload_keeps_order_and_skips_failures() {
        let controller = controller(ScriptedCompletion::new(vec![]));
        let mut session = Session::new();

        let files = vec![
            text_file("a.txt", "Alice, RN"),
            UploadedFile::new("bad.txt", Some("text/plain".into()), vec![0xff, 0xfe]),
            UploadedFile::new("broken.pdf", Some("application/pdf".into()), b"garbage".to_vec()),
            text_file("b.txt", "Bob, LPN"),
        ];
        let model = controller.on_files_uploaded(&mut session, files);

        assert_eq!(session.documents().all(), ["Alice, RN", "Bob, LPN"]);
        assert_eq!(model.document_count, 2);

        let errors: Vec<&Notice> = model.errors().collect();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].message.contains("bad.txt"));
        assert!(errors[1].message.contains("broken.pdf"));
    }

    #[test]
    fn test_failed_batch_keeps_earlier_documents() {
        let controller = controller(ScriptedCompletion::new(vec![]));
        let mut session = Session::new();

        controller.on_files_uploaded(&mut session, vec![text_file("a.txt", "first")]);
        let model = controller.on_files_uploaded(
            &mut session,
            vec![UploadedFile::new("bad.txt", None, vec![0xc3])],
        );

        assert_eq!(session.documents().all(), ["first"]);
        assert_eq!(model.errors().count(), 1);
    }

    #[test]
    fn test_zero_files_is_a_no_op() {
        let controller = controller(ScriptedCompletion::new(vec![]));
        let mut session = Session::new();

        let model = controller.on_files_uploaded(&mut session, Vec::new());

        assert!(session.documents().is_empty());
        assert!(model.notices.is_empty());
        assert_eq!(model.document_count, 0);
    }

    #[tokio::test]
    async fn test_query_builds_prompt_from_documents() {
        let client = ScriptedCompletion::new(vec![Ok("Alice".into())]);
        let controller = controller(client.clone());
        let mut session = Session::new();
        controller.on_files_uploaded(&mut session, vec![text_file("a.txt", "A"), text_file("b.txt", "B")]);

        controller.on_query_submitted(&mut session, "Q").await;

        let requests = client.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].prompt,
            "Based on the nursing resume knowledge base:\n\nA\n\nB\n\nUser: Q\nAI:"
        );
        assert_eq!(requests[0].model, "gpt-4-1106-preview");
        assert_eq!(requests[0].max_tokens, 1000);
    }

    #[tokio::test]
    async fn test_two_cycles_yield_four_ordered_turns() {
        let client = ScriptedCompletion::new(vec![Ok("answer one".into()), Ok("answer two".into())]);
        let controller = controller(client);
        let mut session = Session::new();

        controller.on_query_submitted(&mut session, "question one").await;
        let model = controller.on_query_submitted(&mut session, "question two").await;

        let turns = session.conversation().all();
        assert_eq!(turns.len(), 4);
        assert_eq!(
            turns.iter().map(|t| (t.speaker, t.text.as_str())).collect::<Vec<_>>(),
            vec![
                (Speaker::User, "question one"),
                (Speaker::Assistant, "answer one"),
                (Speaker::User, "question two"),
                (Speaker::Assistant, "answer two"),
            ]
        );
        assert_eq!(model.turns.len(), 4);
        assert!(model.notices.is_empty());
    }

    #[tokio::test]
    async fn test_failed_completion_appends_no_assistant_turn() {
        let client = ScriptedCompletion::new(vec![Err(CompletionFailure::MalformedPayload(
            "response has no choices".into(),
        ))]);
        let controller = controller(client);
        let mut session = Session::new();

        let model = controller.on_query_submitted(&mut session, "anyone?").await;

        assert_eq!(session.conversation().len(), 1);
        assert_eq!(session.conversation().all()[0].speaker, Speaker::User);
        assert_eq!(model.notices, vec![Notice::error(NO_RESPONSE_MESSAGE)]);
    }

    #[tokio::test]
    async fn test_input_cleared_after_query() {
        let client = ScriptedCompletion::new(vec![Err(CompletionFailure::Transport("refused".into()))]);
        let controller = controller(client);
        let mut session = Session::new();
        session.set_input("draft");

        let model = controller.on_query_submitted(&mut session, "draft").await;

        assert_eq!(session.input(), "");
        assert_eq!(model.input, "");
    }

    #[tokio::test]
    async fn test_blank_query_still_runs_a_full_cycle() {
        let client = ScriptedCompletion::new(vec![Ok("Please ask a question.".into())]);
        let controller = controller(client.clone());
        let mut session = Session::new();

        let model = controller.on_query_submitted(&mut session, "   ").await;

        assert_eq!(
            session.conversation().all()[0],
            ConversationTurn { speaker: Speaker::User, text: "   ".into() }
        );
        assert_eq!(model.turns.len(), 2);
        assert_eq!(client.requests()[0].prompt, "Based on the nursing resume knowledge base:\n\n\n\nUser:    \nAI:");
        assert_eq!(model.input, "");
    }

    #[tokio::test]
    async fn test_snapshot_transcript_matches_log() {
        let client = ScriptedCompletion::new(vec![Ok("Yes.".into())]);
        let controller = controller(client);
        let mut session = Session::new();

        let model = controller.on_query_submitted(&mut session, "Any RNs?").await;

        assert_eq!(model.transcript, "User:\nAny RNs?\n\nAI:\nYes.");
        assert_eq!(model.session_id, session.id);
    }
}
