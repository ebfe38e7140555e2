//! Menu item CRUD handlers.

use axum::Json;
use axum::extract::{Multipart, Path, State};
use serde_json::{Value, json};

use menubot_types::menu::MenuItem;

use crate::http::error::AppError;
use crate::http::multipart::read_menu_form;
use crate::state::AppState;

/// GET /api/menu
pub async fn list_menu(State(state): State<AppState>) -> Result<Json<Vec<MenuItem>>, AppError> {
    Ok(Json(state.menu_service.list_items().await?))
}

/// POST /api/menu -- multipart form with optional `modelFile` / `imageFile`.
pub async fn create_menu_item(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let (form, files) = read_menu_form(multipart).await?;
    let item = state.menu_service.create_item(form, files).await?;
    Ok(Json(json!({
        "message": "Menu item added successfully",
        "item": item,
    })))
}

/// PUT /api/menu/{id} -- merges submitted fields into the stored item.
pub async fn update_menu_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let (form, files) = read_menu_form(multipart).await?;
    let item = state.menu_service.update_item(&id, form, files).await?;
    Ok(Json(json!({
        "message": "Menu item updated successfully",
        "item": item,
    })))
}

/// DELETE /api/menu/{id}
pub async fn delete_menu_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    state.menu_service.delete_item(&id).await?;
    Ok(Json(json!({
        "message": "Menu item deleted successfully",
        "id": id,
    })))
}
