use serde::Serialize;

use crate::{
    error::{WidgetError, WidgetErrorKind},
    models::{PlaybackTarget, SearchResult},
    player::PlayerPhase,
};

/// Everything a page needs to render the widget
#[derive(Debug, Clone, Serialize)]
pub struct WidgetSnapshot {
    pub search_term: String,
    pub last_search_term: Option<String>,
    pub is_loading: bool,
    /// Whether the search button accepts a submit
    pub search_enabled: bool,
    pub suggestions: Vec<String>,
    pub show_suggestions: bool,
    pub suggestions_loading: bool,
    pub results: Vec<ResultView>,
    pub error: Option<ErrorView>,
    pub now_playing: Option<PlaybackTarget>,
    pub player_area: PlayerArea,
    pub player: PlayerPhase,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResultView {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub thumbnail_url: String,
    pub indicator: Option<Indicator>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    Playing,
    Paused,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ErrorView {
    pub kind: WidgetErrorKind,
    pub message: String,
}

impl From<&WidgetError> for ErrorView {
    fn from(error: &WidgetError) -> Self {
        Self {
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// What the player panel shows
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlayerArea {
    /// Nothing searched yet
    Idle,
    NoVideosFound { query: String },
    SelectVideo,
    PlayerError { message: String },
    /// An error unrelated to the current video is shown next to the results
    SeeErrorAbove,
    NowPlaying { title: String, artist: String },
}

impl PlayerArea {
    pub fn derive(
        last_search_term: &str,
        results: &[SearchResult],
        error: Option<&WidgetError>,
        playback: Option<&PlaybackTarget>,
    ) -> Self {
        match (error, playback) {
            (Some(error), Some(_)) => PlayerArea::PlayerError {
                message: error.to_string(),
            },
            (Some(_), None) => PlayerArea::SeeErrorAbove,
            (None, Some(target)) => PlayerArea::NowPlaying {
                title: target.result.title.clone(),
                artist: target.result.artist.clone(),
            },
            (None, None) if last_search_term.is_empty() => PlayerArea::Idle,
            (None, None) if results.is_empty() => PlayerArea::NoVideosFound {
                query: last_search_term.to_string(),
            },
            (None, None) => PlayerArea::SelectVideo,
        }
    }
}

pub(crate) fn result_views(
    results: &[SearchResult],
    playback: Option<&PlaybackTarget>,
) -> Vec<ResultView> {
    results
        .iter()
        .map(|result| {
            let indicator = playback
                .filter(|target| target.result.id == result.id)
                .map(|target| {
                    if target.is_playing {
                        Indicator::Playing
                    } else {
                        Indicator::Paused
                    }
                });

            ResultView {
                id: result.id.clone(),
                title: result.title.clone(),
                artist: result.artist.clone(),
                thumbnail_url: result.thumbnail_url(),
                indicator,
            }
        })
        .collect()
}
