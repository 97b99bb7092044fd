use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use crate::documents::UploadedFile;
use crate::models::AppState;
use crate::session::RenderModel;
use tracing::{info, warn};

/// Resumes are small, but scanned PDFs can be several megabytes.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/files", post(upload_files))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

/// Accepts any number of `file` parts in one multipart request.
async fn upload_files(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<RenderModel>, StatusCode> {
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        warn!("Malformed multipart upload: {}", e);
        StatusCode::BAD_REQUEST
    })? {
        // Non-file form fields carry no file name.
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(|e| {
            warn!("Failed to read upload {}: {}", filename, e);
            StatusCode::BAD_REQUEST
        })?;

        // An empty file input still submits one nameless, empty part.
        if filename.is_empty() && data.is_empty() {
            continue;
        }
        files.push(UploadedFile::new(filename, content_type, data));
    }

    info!("File upload request received ({} files)", files.len());

    let mut session = state.session.lock().await;
    Ok(Json(state.controller.on_files_uploaded(&mut session, files)))
}
