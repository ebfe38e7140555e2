//! HTTP/REST API layer for menubot.
//!
//! Axum-based REST API under `/api/` with CORS, request tracing and static
//! serving of uploaded files.

pub mod error;
pub mod handlers;
pub mod multipart;
pub mod router;
