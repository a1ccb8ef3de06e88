use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{
    dto::MessageDto,
    handlers::{create_post, generate_image, generation_info, list_posts},
    middleware::{RateLimitConfig, RateLimitLayer},
};
use crate::ports::services::{GenerationService, PostService};

/// Generous ceiling so publish bodies carrying inline images fit
pub const JSON_BODY_LIMIT: usize = 50 * 1024 * 1024;

/// Application state containing all services
#[derive(Clone)]
pub struct AppState {
    pub generation_service: Arc<dyn GenerationService>,
    pub post_service: Arc<dyn PostService>,
}

/// Handle the server root greeting
async fn root() -> Json<MessageDto> {
    Json(MessageDto::new("AI image gallery server is running"))
}

/// Create the main application router with all endpoints.
///
/// The rate limit applies to the post routes only, matching the published
/// API contract; CORS is permissive and the body ceiling accommodates
/// inline images.
pub fn create_router(state: AppState, rate_limit: RateLimitConfig) -> Router {
    let post_routes = Router::new()
        .route("/", get(list_posts).post(create_post))
        .layer(RateLimitLayer::new(rate_limit));

    Router::new()
        .route("/", get(root))
        .route("/api/v1/dalle", get(generation_info).post(generate_image))
        .nest("/api/v1/post", post_routes)
        .layer(DefaultBodyLimit::max(JSON_BODY_LIMIT))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
