// Nursing Resume Assistant - question answering over uploaded resumes

pub mod config;
pub mod documents; // Upload decoding and the per-session document store
pub mod llm;
pub mod middleware;
pub mod models;
pub mod prompt;
pub mod routes;
pub mod session; // Session state and the event controller
pub mod tui; // Terminal User Interface
pub mod types;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;
pub use session::{Session, SessionController};

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
