use crate::config::Config;
use crate::session::{Session, SessionController};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared state of the web front-end.
///
/// The server hosts exactly one session. Handlers hold the lock for the whole
/// event, so uploads and queries run one at a time, to completion.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub controller: SessionController,
    pub session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new(config: Config, controller: SessionController) -> Self {
        Self {
            config,
            controller,
            session: Arc::new(Mutex::new(Session::new())),
        }
    }
}

// API Request/Response types

#[derive(Debug, serde::Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub session_id: uuid::Uuid,
    pub session_started_at: String,
    pub documents: usize,
    pub model: String,
}
