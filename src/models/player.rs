use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Opaque identifier of one embedded player instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerHandle(pub u64);

impl Display for PlayerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player-{}", self.0)
    }
}

/// Playback state as reported by the IFrame player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerState {
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    Cued,
    Unknown,
}

impl PlayerState {
    pub fn from_code(code: i64) -> Self {
        match code {
            -1 => PlayerState::Unstarted,
            0 => PlayerState::Ended,
            1 => PlayerState::Playing,
            2 => PlayerState::Paused,
            3 => PlayerState::Buffering,
            5 => PlayerState::Cued,
            _ => PlayerState::Unknown,
        }
    }
}

/// Category of an SDK-reported playback failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackErrorKind {
    InvalidParameter,
    Html5,
    NotFound,
    Restricted,
    Unknown,
    /// The SDK constructor itself failed
    CreationFailed,
}

impl PlaybackErrorKind {
    pub fn from_code(code: i64) -> Self {
        match code {
            2 => PlaybackErrorKind::InvalidParameter,
            5 => PlaybackErrorKind::Html5,
            100 => PlaybackErrorKind::NotFound,
            101 | 150 => PlaybackErrorKind::Restricted,
            _ => PlaybackErrorKind::Unknown,
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            PlaybackErrorKind::InvalidParameter => "Invalid parameter.",
            PlaybackErrorKind::Html5 => "HTML5 Player error.",
            PlaybackErrorKind::NotFound => "Video not found.",
            PlaybackErrorKind::Restricted => "Playback restricted.",
            PlaybackErrorKind::Unknown => "Unknown player error.",
            PlaybackErrorKind::CreationFailed => "Player creation failed.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlaybackError {
    /// Raw SDK code, absent when creation failed before any code was reported
    pub code: Option<i64>,
    pub kind: PlaybackErrorKind,
}

impl PlaybackError {
    pub fn from_code(code: i64) -> Self {
        Self {
            code: Some(code),
            kind: PlaybackErrorKind::from_code(code),
        }
    }

    pub fn creation_failed() -> Self {
        Self {
            code: None,
            kind: PlaybackErrorKind::CreationFailed,
        }
    }
}

impl Display for PlaybackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.code {
            Some(code) => write!(f, "Player Error ({}): {}", code, self.kind.describe()),
            None => write!(f, "Player Error: {}", self.kind.describe()),
        }
    }
}

/// Asynchronous notification from an embedded player instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayerEvent {
    Ready { handle: PlayerHandle },
    StateChange { handle: PlayerHandle, data: i64 },
    Error { handle: PlayerHandle, data: i64 },
}

impl PlayerEvent {
    pub fn handle(&self) -> PlayerHandle {
        match self {
            PlayerEvent::Ready { handle }
            | PlayerEvent::StateChange { handle, .. }
            | PlayerEvent::Error { handle, .. } => *handle,
        }
    }
}
