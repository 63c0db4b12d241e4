pub mod health;
pub mod sessions;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::keywords::handlers as clustering;
use crate::research::handlers as research;
use crate::state::AppState;
use crate::writing::handlers as writing;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Sessions
        .route("/api/v1/sessions", post(sessions::handle_create_session))
        .route("/api/v1/sessions/:id", delete(sessions::handle_end_session))
        // Clustering tool
        .route(
            "/api/v1/sessions/:id/clustering",
            get(clustering::handle_view),
        )
        .route(
            "/api/v1/sessions/:id/clustering/load",
            post(clustering::handle_load),
        )
        .route(
            "/api/v1/sessions/:id/clustering/reset",
            post(clustering::handle_reset),
        )
        .route(
            "/api/v1/sessions/:id/clustering/selected/:index",
            delete(clustering::handle_remove),
        )
        // Outline tool
        .route(
            "/api/v1/sessions/:id/outline",
            post(writing::handle_generate_outline),
        )
        .route(
            "/api/v1/sessions/:id/outline/revise",
            post(writing::handle_revise_outline),
        )
        // Blog tool
        .route(
            "/api/v1/sessions/:id/blog",
            post(writing::handle_generate_blog),
        )
        .route(
            "/api/v1/sessions/:id/blog/download",
            get(writing::handle_download_blog),
        )
        // Keyword research tool
        .route(
            "/api/v1/keyword-research",
            post(research::handle_keyword_research),
        )
        .with_state(state)
}
