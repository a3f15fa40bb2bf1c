use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use crate::models::PlaybackError;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External API error: {0}")]
    ExternalApi(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::ExternalApi(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::HttpClient(_) => (StatusCode::BAD_GATEWAY, self.to_string()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Errors shown to the user by the widget.
///
/// Only one is visible at a time; the most recent one replaces the previous.
/// `Suggestion` is never stored, it only exists so the degrade path can be
/// logged with the same vocabulary.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum WidgetError {
    #[error("YouTube API key is missing or still set to the placeholder. Search will not work.")]
    Configuration,

    #[error("Search failed: {0}")]
    Search(String),

    #[error("No YouTube results found for \"{query}\".")]
    NoResults { query: String },

    #[error("Suggestion fetch failed: {0}")]
    Suggestion(String),

    #[error("{0}")]
    Playback(PlaybackError),
}

/// Tag used by the view layer to decide where a message is rendered
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WidgetErrorKind {
    Configuration,
    Search,
    NoResults,
    Suggestion,
    Playback,
}

impl WidgetError {
    pub fn kind(&self) -> WidgetErrorKind {
        match self {
            WidgetError::Configuration => WidgetErrorKind::Configuration,
            WidgetError::Search(_) => WidgetErrorKind::Search,
            WidgetError::NoResults { .. } => WidgetErrorKind::NoResults,
            WidgetError::Suggestion(_) => WidgetErrorKind::Suggestion,
            WidgetError::Playback(_) => WidgetErrorKind::Playback,
        }
    }
}
