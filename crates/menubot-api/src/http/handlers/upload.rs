//! Standalone file upload handler.

use axum::Json;
use axum::extract::{Multipart, State};
use serde_json::{Value, json};

use menubot_core::storage::upload_store::{UploadStore, accept_upload};
use menubot_types::error::UploadError;

use crate::http::error::AppError;
use crate::http::multipart::read_file_part;
use crate::state::AppState;

/// POST /api/upload -- multipart part `file`.
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let (raw_name, data) = read_file_part(multipart, "file")
        .await?
        .ok_or(UploadError::MissingFile)?;

    let filename = accept_upload(&raw_name)?;
    let stored = state.menu_service.uploads().save(&filename, &data).await?;
    tracing::info!(filename = %stored.filename, bytes = data.len(), "File uploaded");

    Ok(Json(json!({
        "message": "File uploaded successfully",
        "filename": stored.filename,
        "url": format!("/uploads/{}", stored.filename),
    })))
}
