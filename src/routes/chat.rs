use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use crate::models::{AppState, QueryRequest};
use crate::session::RenderModel;
use tracing::info;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/session", get(get_session))
        .route("/api/query", post(post_query))
        .with_state(state)
}

async fn get_session(State(state): State<AppState>) -> Json<RenderModel> {
    let session = state.session.lock().await;
    Json(session.snapshot(Vec::new()))
}

pub async fn post_query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Json<RenderModel> {
    info!("Received query ({} chars)", request.query.len());

    let mut session = state.session.lock().await;
    Json(
        state
            .controller
            .on_query_submitted(&mut session, &request.query)
            .await,
    )
}
