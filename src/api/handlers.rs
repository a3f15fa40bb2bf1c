use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{PlayerEvent, PointerTarget},
    player::PlayerCommand,
    services::WidgetSnapshot,
};

use super::AppState;

// Request types

#[derive(Debug, Deserialize)]
pub struct InputRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct PointerRequest {
    pub target: PointerTarget,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    /// Searches the current input text when absent
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionSelectRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ResultSelectRequest {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct MountRequest {
    pub container_id: String,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Current view state
pub async fn get_state(State(state): State<AppState>) -> Json<WidgetSnapshot> {
    Json(state.controller.snapshot().await)
}

/// Search input changed
pub async fn input(
    State(state): State<AppState>,
    Json(request): Json<InputRequest>,
) -> Json<WidgetSnapshot> {
    state.controller.on_input_change(&request.text).await;
    Json(state.controller.snapshot().await)
}

/// Search input gained focus
pub async fn focus(State(state): State<AppState>) -> Json<WidgetSnapshot> {
    state.controller.on_input_focus().await;
    Json(state.controller.snapshot().await)
}

/// Pointer pressed somewhere on the page
pub async fn pointer(
    State(state): State<AppState>,
    Json(request): Json<PointerRequest>,
) -> Json<WidgetSnapshot> {
    state.controller.on_pointer_down(request.target).await;
    Json(state.controller.snapshot().await)
}

/// Search form submitted
pub async fn search(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<SearchRequest>,
) -> Json<WidgetSnapshot> {
    tracing::info!(
        request_id = %request_id,
        explicit_query = request.query.is_some(),
        "Processing search"
    );

    match request.query {
        Some(query) => state.controller.submit_search(&query).await,
        None => state.controller.submit_form().await,
    }

    Json(state.controller.snapshot().await)
}

/// Suggestion clicked
pub async fn select_suggestion(
    State(state): State<AppState>,
    Json(request): Json<SuggestionSelectRequest>,
) -> Json<WidgetSnapshot> {
    state.controller.on_suggestion_select(&request.text).await;
    Json(state.controller.snapshot().await)
}

/// Result clicked
pub async fn select_result(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<ResultSelectRequest>,
) -> AppResult<Json<WidgetSnapshot>> {
    tracing::info!(request_id = %request_id, video_id = %request.id, "Result selected");
    state.controller.select_result_by_id(&request.id).await?;
    Ok(Json(state.controller.snapshot().await))
}

/// Player container rendered on the page
pub async fn mount_player(
    State(state): State<AppState>,
    Json(request): Json<MountRequest>,
) -> AppResult<Json<WidgetSnapshot>> {
    if request.container_id.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Container id cannot be empty".to_string(),
        ));
    }
    state.controller.mount_player(&request.container_id).await;
    Ok(Json(state.controller.snapshot().await))
}

/// Player container removed from the page
pub async fn unmount_player(State(state): State<AppState>) -> Json<WidgetSnapshot> {
    state.controller.unmount_player().await;
    Json(state.controller.snapshot().await)
}

/// The IFrame API finished loading
pub async fn sdk_ready(State(state): State<AppState>) -> Json<WidgetSnapshot> {
    state.controller.sdk_ready().await;
    Json(state.controller.snapshot().await)
}

/// Notification from a player instance
pub async fn player_event(
    State(state): State<AppState>,
    Json(event): Json<PlayerEvent>,
) -> Json<WidgetSnapshot> {
    state.bridge.observe(&event);
    state.controller.on_player_event(event).await;
    Json(state.controller.snapshot().await)
}

/// Player commands for the page to execute, oldest first
pub async fn drain_commands(State(state): State<AppState>) -> Json<Vec<PlayerCommand>> {
    Json(state.bridge.drain())
}
