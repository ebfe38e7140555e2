//! Axum router configuration with middleware.
//!
//! JSON API under `/api/`, uploaded files under `/uploads/`.
//! Middleware: CORS, request tracing, upload body limit.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderName;
use axum::routing::{delete, get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use menubot_core::storage::upload_store::UploadStore;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([HeaderName::from_static(handlers::recommend::SESSION_HEADER)]);

    let uploads = ServeDir::new(state.menu_service.uploads().dir());
    let body_limit = DefaultBodyLimit::max(state.config.server.max_upload_bytes);

    let api_routes = Router::new()
        // Menu
        .route(
            "/menu",
            get(handlers::menu::list_menu).post(handlers::menu::create_menu_item),
        )
        .route(
            "/menu/{id}",
            put(handlers::menu::update_menu_item).delete(handlers::menu::delete_menu_item),
        )
        // Uploads
        .route("/upload", post(handlers::upload::upload_file))
        // Recommendations
        .route("/recommend", post(handlers::recommend::recommend))
        // Categories
        .route(
            "/categories",
            get(handlers::category::list_categories).post(handlers::category::add_category),
        )
        .route("/categories/{name}", delete(handlers::category::delete_category))
        .route(
            "/subcategories",
            get(handlers::category::list_subcategories)
                .post(handlers::category::add_subcategory),
        )
        .route(
            "/subcategories/{category}/{name}",
            delete(handlers::category::delete_subcategory),
        );

    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health_check))
        .nest("/api", api_routes)
        .nest_service("/uploads", uploads)
        .layer(body_limit)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
