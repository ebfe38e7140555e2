//! Category and subcategory handlers.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};

use menubot_types::menu::{SubcategoryAdded, SubcategoryRemoval};

use crate::http::error::AppError;
use crate::state::AppState;

/// Request body for POST /api/categories.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryRequest {
    pub name: Option<String>,
}

/// Request body for POST /api/subcategories.
#[derive(Debug, Default, Deserialize)]
pub struct SubcategoryRequest {
    pub category: Option<String>,
    pub name: Option<String>,
}

/// GET /api/categories
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(state.category_service.list_categories().await?))
}

/// POST /api/categories
///
/// An unparseable body is treated like an empty one so the caller gets the
/// "name is required" message.
pub async fn add_category(
    State(state): State<AppState>,
    body: Result<Json<CategoryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let body = body.map(|Json(body)| body).unwrap_or_default();
    let name = state.category_service.add_category(body.name.as_deref()).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Category added successfully",
            "category": name,
        })),
    ))
}

/// DELETE /api/categories/{name} -- also removes its subcategories.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, AppError> {
    state.category_service.delete_category(&name).await?;
    Ok(Json(json!({
        "message": "Category deleted successfully",
        "category": name,
    })))
}

/// GET /api/subcategories
pub async fn list_subcategories(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, Vec<String>>>, AppError> {
    Ok(Json(state.category_service.list_subcategories().await?))
}

/// POST /api/subcategories
pub async fn add_subcategory(
    State(state): State<AppState>,
    body: Result<Json<SubcategoryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let body = body.map(|Json(body)| body).unwrap_or_default();
    let (category, name, outcome) = state
        .category_service
        .add_subcategory(body.category.as_deref(), body.name.as_deref())
        .await?;

    let (status, message) = match outcome {
        SubcategoryAdded::Added => (StatusCode::CREATED, "Subcategory added successfully"),
        SubcategoryAdded::AlreadyExists => (StatusCode::OK, "Subcategory already exists"),
        SubcategoryAdded::AddedWithNewCategory => (
            StatusCode::CREATED,
            "Subcategory added successfully and new category entry created",
        ),
    };
    Ok((
        status,
        Json(json!({
            "message": message,
            "category": category,
            "subcategory": name,
        })),
    ))
}

/// DELETE /api/subcategories/{category}/{name}
pub async fn delete_subcategory(
    State(state): State<AppState>,
    Path((category, name)): Path<(String, String)>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let outcome = state
        .category_service
        .delete_subcategory(&category, &name)
        .await?;

    let (status, message) = match outcome {
        SubcategoryRemoval::Removed => (StatusCode::OK, "Subcategory deleted successfully"),
        SubcategoryRemoval::NotFound => (StatusCode::NOT_FOUND, "Subcategory not found"),
        SubcategoryRemoval::CategoryNotFound => {
            (StatusCode::NOT_FOUND, "Category for subcategory not found")
        }
    };
    Ok((status, Json(json!({ "message": message }))))
}
