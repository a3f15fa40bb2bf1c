use serde::Serialize;

use crate::models::{PlayerHandle, PlayerState};

/// Player variables passed to the SDK constructor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerOptions {
    pub video_id: String,
    pub playsinline: bool,
    pub autoplay: bool,
    pub controls: bool,
}

impl PlayerOptions {
    pub fn new(video_id: impl Into<String>, autoplay: bool) -> Self {
        Self {
            video_id: video_id.into(),
            playsinline: true,
            autoplay,
            controls: true,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SdkError {
    #[error("Embed SDK is not available")]
    Unavailable,

    #[error("Unknown player instance: {0}")]
    UnknownHandle(PlayerHandle),

    #[error("Embed SDK call failed: {0}")]
    Call(String),
}

/// Imperative surface of the embeddable video player SDK.
///
/// Lifecycle notifications (ready, state change, error) travel the other way
/// and are delivered to [`crate::player::PlayerAdapter`] by whoever hosts the SDK.
#[cfg_attr(test, mockall::automock)]
pub trait EmbedSdk: Send + Sync {
    /// Inserts the SDK script into the page
    fn inject_script(&self, src: &str) -> Result<(), SdkError>;

    /// Constructs a player bound to the container element with the given id
    fn create_player(
        &self,
        container_id: &str,
        options: &PlayerOptions,
    ) -> Result<PlayerHandle, SdkError>;

    fn load_video(&self, handle: PlayerHandle, video_id: &str) -> Result<(), SdkError>;

    fn stop_video(&self, handle: PlayerHandle) -> Result<(), SdkError>;

    fn play_video(&self, handle: PlayerHandle) -> Result<(), SdkError>;

    fn pause_video(&self, handle: PlayerHandle) -> Result<(), SdkError>;

    /// Last playback state reported by the instance
    fn player_state(&self, handle: PlayerHandle) -> Result<PlayerState, SdkError>;

    fn destroy(&self, handle: PlayerHandle) -> Result<(), SdkError>;
}
