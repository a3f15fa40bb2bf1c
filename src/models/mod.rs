use serde::{Deserialize, Serialize};

pub mod player;

pub use player::{PlaybackError, PlaybackErrorKind, PlayerEvent, PlayerHandle, PlayerState};

/// One matched video, as listed to the user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    /// YouTube video id
    pub id: String,
    pub title: String,
    /// Channel name
    pub artist: String,
}

impl SearchResult {
    pub fn thumbnail_url(&self) -> String {
        format!("https://img.youtube.com/vi/{}/mqdefault.jpg", self.id)
    }
}

/// The single video currently selected for playback
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PlaybackTarget {
    pub result: SearchResult,
    pub is_playing: bool,
}

impl PlaybackTarget {
    pub fn new(result: SearchResult) -> Self {
        Self {
            result,
            is_playing: true,
        }
    }

    pub fn video_id(&self) -> &str {
        &self.result.id
    }
}

/// Where a pointer-down landed relative to the search widget
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PointerTarget {
    InsideSearch,
    Outside,
}

// ============================================================================
// YouTube Data API Types
// ============================================================================

/// Response from GET /youtube/v3/search
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSearchResponse {
    #[serde(default)]
    pub items: Vec<ApiSearchItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSearchItem {
    pub id: ApiResourceId,
    pub snippet: ApiSnippet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResourceId {
    #[serde(default)]
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSnippet {
    pub title: String,
    #[serde(default)]
    pub channel_title: String,
}

impl ApiSearchItem {
    /// Channel and playlist hits carry no video id and are skipped
    pub fn into_result(self) -> Option<SearchResult> {
        let id = self.id.video_id.filter(|id| !id.is_empty())?;
        Some(SearchResult {
            id,
            title: self.snippet.title,
            artist: self.snippet.channel_title,
        })
    }
}

/// Error envelope returned by Google APIs on non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorEnvelope {
    /// Most specific message available: first detail, then the top-level message
    pub fn best_message(&self) -> Option<&str> {
        self.error
            .errors
            .first()
            .and_then(|detail| detail.message.as_deref())
            .or(self.error.message.as_deref())
            .filter(|message| !message.is_empty())
    }
}
