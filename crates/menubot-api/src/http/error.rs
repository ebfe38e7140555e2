//! Application error type mapping to HTTP status codes and `{"error": ...}` bodies.

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use menubot_types::error::{CategoryError, MenuError, RecommendError, UploadError};

/// Message for recommendation requests when no provider is configured.
pub const RECOMMEND_UNAVAILABLE: &str = "AI recommendations are not available.";

/// Message for any recommendation failure whose detail must stay server-side.
pub const RECOMMEND_FAILED: &str = "An error occurred while processing your request.";

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Menu item errors.
    Menu(MenuError),
    /// Category and subcategory errors.
    Category(CategoryError),
    /// Standalone upload errors.
    Upload(UploadError),
    /// Recommendation chat errors.
    Recommend(RecommendError),
    /// Malformed request body.
    Validation(String),
}

impl From<MenuError> for AppError {
    fn from(e: MenuError) -> Self {
        AppError::Menu(e)
    }
}

impl From<CategoryError> for AppError {
    fn from(e: CategoryError) -> Self {
        AppError::Category(e)
    }
}

impl From<UploadError> for AppError {
    fn from(e: UploadError) -> Self {
        AppError::Upload(e)
    }
}

impl From<RecommendError> for AppError {
    fn from(e: RecommendError) -> Self {
        AppError::Recommend(e)
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::Validation(format!("Invalid multipart body: {}", e.body_text()))
    }
}

fn upload_status(e: &UploadError) -> (StatusCode, String) {
    match e {
        UploadError::MissingFile | UploadError::EmptyFilename | UploadError::DisallowedType => {
            (StatusCode::BAD_REQUEST, e.to_string())
        }
        UploadError::FileSystem(detail) => {
            tracing::error!(error = %detail, "Upload storage failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to store uploaded file".to_string(),
            )
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Menu(MenuError::NotFound) => {
                (StatusCode::NOT_FOUND, "Menu item not found".to_string())
            }
            AppError::Menu(MenuError::Invalid(msg)) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Menu(MenuError::Upload(e)) => upload_status(e),
            AppError::Menu(MenuError::Storage(e)) => {
                tracing::error!(error = %e, "Menu storage failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Menu storage error".to_string())
            }
            AppError::Category(CategoryError::Invalid(msg)) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::Category(CategoryError::Storage(e)) => {
                tracing::error!(error = %e, "Category storage failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Category storage error".to_string())
            }
            AppError::Upload(e) => upload_status(e),
            AppError::Recommend(RecommendError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::Recommend(RecommendError::ServiceUnavailable) => {
                (StatusCode::SERVICE_UNAVAILABLE, RECOMMEND_UNAVAILABLE.to_string())
            }
            AppError::Recommend(e @ (RecommendError::Upstream(_) | RecommendError::Internal(_))) => {
                tracing::error!(error = %e, "Recommendation request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, RECOMMEND_FAILED.to_string())
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
