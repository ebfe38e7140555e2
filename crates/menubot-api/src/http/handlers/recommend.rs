//! Conversational dish recommendation handler.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use menubot_core::recommend::service::NO_MESSAGE;
use menubot_types::chat::SessionKey;
use menubot_types::error::RecommendError;

use crate::http::error::AppError;
use crate::state::AppState;

/// Response header carrying a server-issued session key.
pub const SESSION_HEADER: &str = "x-session-id";

/// Request body for POST /api/recommend.
#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub message: Option<String>,
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub response: String,
}

/// POST /api/recommend
///
/// Without a `session_id` the request starts a fresh session whose key is
/// returned in the `x-session-id` header.
pub async fn recommend(
    State(state): State<AppState>,
    body: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected recommend body");
        RecommendError::Validation(NO_MESSAGE.to_string())
    })?;

    let (key, issued) = match body.session_id.filter(|id| !id.trim().is_empty()) {
        Some(id) => (SessionKey::new(id), false),
        None => (SessionKey::generate(), true),
    };

    let reply = state
        .recommendation_service
        .recommend(&key, body.message.as_deref())
        .await?;

    let mut response = Json(RecommendResponse { response: reply }).into_response();
    if issued {
        if let Ok(value) = HeaderValue::from_str(key.as_str()) {
            response.headers_mut().insert(SESSION_HEADER, value);
        }
    }
    Ok(response)
}
