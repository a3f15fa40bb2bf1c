use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::{make_span_with_request_id, request_id_middleware};

/// Creates the widget router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/state", get(handlers::get_state))
        // Search box
        .route("/input", post(handlers::input))
        .route("/focus", post(handlers::focus))
        .route("/pointer", post(handlers::pointer))
        .route("/search", post(handlers::search))
        .route("/suggestions/select", post(handlers::select_suggestion))
        // Results
        .route("/results/select", post(handlers::select_result))
        // Player bridge
        .route(
            "/player",
            axum::routing::delete(handlers::unmount_player),
        )
        .route("/player/mount", post(handlers::mount_player))
        .route("/player/sdk-ready", post(handlers::sdk_ready))
        .route("/player/events", post(handlers::player_event))
        .route("/player/commands", get(handlers::drain_commands))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
