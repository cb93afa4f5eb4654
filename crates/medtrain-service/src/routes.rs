//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{admin, ai, cards, categories, engagement, health, uploads};
use crate::state::AppState;

// ============================================================================
// Concurrency Limiting Constants
// ============================================================================

/// Maximum concurrent requests for API endpoints.
const API_MAX_CONCURRENT_REQUESTS: usize = 50;

/// Maximum concurrent uploads. Each one may buffer a large body.
const UPLOAD_MAX_CONCURRENT_REQUESTS: usize = 4;

/// Time allowed for receiving and storing one upload.
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(600);

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
/// - `GET /uploads/*path` - Uploaded media
///
/// ## Catalog
/// - `GET|POST /api/categories`, `PUT|DELETE /api/categories/:id`
/// - `GET|POST /api/cards`, `GET|PUT|DELETE /api/cards/:id`
///
/// ## Engagement
/// - `POST /api/cards/:id/like` - Toggle a like
/// - `GET|POST /api/cards/:id/comments` - Comments
/// - `GET /api/stats` - Catalog statistics
///
/// ## Admin
/// - `POST /api/admin/login`, `/verify`, `/logout`
///
/// ## Collaborators
/// - `POST /api/ai/chat` - Ask the assistant about a card
/// - `POST /api/upload/:file_type` - Multipart media upload
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let max_upload_bytes = state.config.max_upload_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;
    let upload_root = state.upload_root();

    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    // Uploads get their own, much larger body limit and deadline.
    let upload_routes = Router::new()
        .route("/upload/:file_type", post(uploads::upload_file))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload_bytes))
        .layer(TimeoutLayer::new(UPLOAD_TIMEOUT))
        .layer(ConcurrencyLimitLayer::new(UPLOAD_MAX_CONCURRENT_REQUESTS));

    let api_routes = Router::new()
        // Categories
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categories/:id",
            put(categories::update_category).delete(categories::delete_category),
        )
        // Cards
        .route("/cards", get(cards::list_cards).post(cards::create_card))
        .route(
            "/cards/:id",
            get(cards::get_card)
                .put(cards::update_card)
                .delete(cards::delete_card),
        )
        // Engagement
        .route("/cards/:id/like", post(engagement::toggle_like))
        .route(
            "/cards/:id/comments",
            get(engagement::list_comments).post(engagement::add_comment),
        )
        .route("/stats", get(engagement::get_stats))
        // Admin sessions
        .route("/admin/login", post(admin::login))
        .route("/admin/verify", post(admin::verify))
        .route("/admin/logout", post(admin::logout))
        // AI assistant
        .route("/ai/chat", post(ai::chat))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .merge(upload_routes)
        .layer(ConcurrencyLimitLayer::new(API_MAX_CONCURRENT_REQUESTS));

    Router::new()
        // Health (public, no rate limit)
        .route("/health", get(health::health))
        // API routes (rate limited)
        .nest("/api", api_routes)
        // Uploaded media, confined to the upload root
        .nest_service("/uploads", ServeDir::new(upload_root))
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
