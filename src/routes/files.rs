use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tower_http::services::ServeDir;
use uuid::Uuid;

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Serialize)]
pub struct UploadResponse {
    pub file_url: String,
}

pub fn routes(upload_dir: PathBuf) -> Router {
    Router::new()
        .route("/upload", post(upload_file))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .nest_service("/files", ServeDir::new(&upload_dir))
        .with_state(upload_dir)
}

/// Stores a multipart `file` field under a fresh name and returns the URL
/// it will be served from.
async fn upload_file(
    State(upload_dir): State<PathBuf>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, (StatusCode, String)> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("❌ Malformed multipart body: {}", e);
        (StatusCode::BAD_REQUEST, "Malformed upload".into())
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let original_name = field.file_name().unwrap_or("upload.bin").to_owned();
        let extension = Path::new(&original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("bin");
        let stored_name = format!("{}.{}", Uuid::new_v4(), extension);

        let bytes = field.bytes().await.map_err(|e| {
            tracing::error!("❌ Failed to read upload: {}", e);
            (StatusCode::BAD_REQUEST, "Could not read file".into())
        })?;

        tokio::fs::create_dir_all(&upload_dir).await.map_err(|e| {
            tracing::error!("❌ Failed to create upload dir: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Storage error".into())
        })?;
        tokio::fs::write(upload_dir.join(&stored_name), &bytes)
            .await
            .map_err(|e| {
                tracing::error!("❌ Failed to write upload: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Storage error".into())
            })?;

        return Ok(Json(UploadResponse {
            file_url: format!("/files/{stored_name}"),
        }));
    }

    Err((StatusCode::BAD_REQUEST, "Missing 'file' field".into()))
}
