//! Router configuration for the HTTP API.
//!
//! This module sets up all routes and middleware (request tracing, optional
//! CORS) and creates the axum router ready for serving.

use axum::{
    http::HeaderValue,
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/posts",
            get(handlers::list_posts).post(handlers::create_post),
        )
        .route(
            "/posts/{id}",
            get(handlers::get_post)
                .put(handlers::update_post)
                .delete(handlers::delete_post),
        )
        .route("/posts/{id}/views", patch(handlers::increment_views))
        .route("/posts/{id}/comments", post(handlers::add_comment))
        .route(
            "/posts/{id}/comments/{comment_id}",
            delete(handlers::delete_comment),
        )
}

/// Build the CORS policy for a single trusted origin.
///
/// Methods and headers are mirrored from the preflight request, which is how
/// "allow everything" is expressed when credentials are permitted.
pub fn cors_layer(origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Create the application router without a cross-origin policy.
pub fn create_router(state: AppState) -> Router {
    routes()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Create the application router, admitting cross-origin requests from `origin`.
pub fn create_router_with_cors(state: AppState, origin: HeaderValue) -> Router {
    routes()
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(origin))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use std::sync::Arc;

    #[test]
    fn test_router_creation() {
        let repo = Arc::new(LocalRepository::new()) as Arc<dyn crate::db::FullRepository>;
        let _router = create_router(AppState::new(repo));
    }

    #[test]
    fn test_router_with_cors_creation() {
        let repo = Arc::new(LocalRepository::new()) as Arc<dyn crate::db::FullRepository>;
        let origin = HeaderValue::from_static("http://localhost:3000");
        let _router = create_router_with_cors(AppState::new(repo), origin);
    }
}
