//! Lifecycle of a single embedded player bound to one container element.

use std::sync::Arc;

use serde::Serialize;

use crate::{
    models::{PlaybackError, PlayerHandle, PlayerState},
    player::{EmbedSdk, PlayerOptions, SdkLoader},
};

/// Where the adapter's player instance is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", content = "handle", rename_all = "snake_case")]
pub enum PlayerPhase {
    /// No instance exists
    Unbound,
    /// Instance requested, ready notification pending
    Creating(PlayerHandle),
    /// Accepts load, play and pause commands
    Ready(PlayerHandle),
    /// Last operation failed; unusable until a new video forces recreation
    Errored(PlayerHandle),
}

impl PlayerPhase {
    pub fn handle(&self) -> Option<PlayerHandle> {
        match self {
            PlayerPhase::Unbound => None,
            PlayerPhase::Creating(h) | PlayerPhase::Ready(h) | PlayerPhase::Errored(h) => Some(*h),
        }
    }

    /// Constructor returned `handle`. Only valid from `Unbound`.
    pub fn created(self, handle: PlayerHandle) -> Self {
        match self {
            PlayerPhase::Unbound => PlayerPhase::Creating(handle),
            other => other,
        }
    }

    /// Ready notification for `handle`. Notifications for other instances are ignored.
    pub fn ready(self, handle: PlayerHandle) -> Self {
        match self {
            PlayerPhase::Creating(h) if h == handle => PlayerPhase::Ready(h),
            other => other,
        }
    }

    /// Error notification for `handle`
    pub fn errored(self, handle: PlayerHandle) -> Self {
        match self {
            PlayerPhase::Creating(h) | PlayerPhase::Ready(h) if h == handle => {
                PlayerPhase::Errored(h)
            }
            other => other,
        }
    }
}

/// Owns the one embedded player instance and translates the widget's desired
/// state (video id + playing intent) into SDK commands.
pub struct PlayerAdapter {
    sdk: Arc<dyn EmbedSdk>,
    loader: Arc<SdkLoader>,
    container_id: Option<String>,
    phase: PlayerPhase,
    /// Video the widget wants shown
    requested: Option<String>,
    /// Video the live instance was last told to show
    bound: Option<String>,
    should_play: bool,
}

impl PlayerAdapter {
    pub fn new(sdk: Arc<dyn EmbedSdk>, loader: Arc<SdkLoader>) -> Self {
        Self {
            sdk,
            loader,
            container_id: None,
            phase: PlayerPhase::Unbound,
            requested: None,
            bound: None,
            should_play: false,
        }
    }

    pub fn phase(&self) -> PlayerPhase {
        self.phase
    }

    /// Video id the live instance is tracking
    pub fn video_id(&self) -> Option<&str> {
        self.bound.as_deref()
    }

    pub fn loader(&self) -> &Arc<SdkLoader> {
        &self.loader
    }

    /// Binds the adapter to its container and makes sure the SDK script is on the page
    pub fn mount(&mut self, container_id: impl Into<String>) -> Result<(), PlaybackError> {
        let container_id = container_id.into();
        tracing::debug!(container_id = %container_id, "Player container mounted");
        self.container_id = Some(container_id);

        if self.loader.request_script() {
            if let Err(e) = self.sdk.inject_script(self.loader.script_src()) {
                tracing::error!(error = %e, "Failed to inject embed SDK script");
            }
        }

        self.try_create()
    }

    /// The SDK finished loading
    pub fn on_sdk_ready(&mut self) -> Result<(), PlaybackError> {
        self.try_create()
    }

    /// Sets the video to show; `None` stops playback but keeps the instance
    pub fn set_video(&mut self, video_id: Option<String>) -> Result<(), PlaybackError> {
        self.requested = video_id;
        self.reconcile_video()
    }

    /// Sets the playing intent. Acted on only while `Ready`.
    pub fn set_playing(&mut self, playing: bool) {
        self.should_play = playing;
        self.apply_playing_intent();
    }

    pub fn on_ready(&mut self, handle: PlayerHandle) -> Result<(), PlaybackError> {
        let next = self.phase.ready(handle);
        if next == self.phase {
            tracing::debug!(handle = %handle, phase = ?self.phase, "Ignoring ready notification");
            return Ok(());
        }
        self.phase = next;
        tracing::info!(handle = %handle, video_id = ?self.bound, "Player ready");

        // The video may have changed while the instance was being created
        self.reconcile_video()?;

        if self.should_play && self.bound.is_some() {
            self.command(handle, "play", |sdk| sdk.play_video(handle));
        }
        Ok(())
    }

    /// Returns the decoded state if the notification belongs to the live instance
    pub fn on_state_change(&self, handle: PlayerHandle, code: i64) -> Option<PlayerState> {
        if self.phase.handle() != Some(handle) {
            tracing::debug!(handle = %handle, code, "Ignoring state change from stale player");
            return None;
        }
        let state = PlayerState::from_code(code);
        tracing::debug!(handle = %handle, state = ?state, "Player state changed");
        Some(state)
    }

    /// Moves to `Errored` and returns the categorised error to surface
    pub fn on_error(&mut self, handle: PlayerHandle, code: i64) -> Option<PlaybackError> {
        let next = self.phase.errored(handle);
        if next == self.phase {
            tracing::debug!(handle = %handle, code, "Ignoring error from stale player");
            return None;
        }
        self.phase = next;

        let error = PlaybackError::from_code(code);
        tracing::error!(
            handle = %handle,
            code,
            kind = ?error.kind,
            video_id = ?self.bound,
            "Player reported an error"
        );

        self.bound = None;
        self.requested = None;
        Some(error)
    }

    /// Destroys the instance if any and forgets everything
    pub fn teardown(&mut self) {
        if let Some(handle) = self.phase.handle() {
            match self.sdk.destroy(handle) {
                Ok(()) => tracing::info!(handle = %handle, "Player destroyed"),
                Err(e) => tracing::error!(handle = %handle, error = %e, "Error destroying player"),
            }
        }

        self.phase = PlayerPhase::Unbound;
        self.container_id = None;
        self.requested = None;
        self.bound = None;
        self.should_play = false;
    }

    fn try_create(&mut self) -> Result<(), PlaybackError> {
        if self.phase != PlayerPhase::Unbound {
            return Ok(());
        }
        if !self.loader.is_ready() {
            tracing::debug!("Embed SDK not ready yet, deferring player creation");
            return Ok(());
        }
        let (Some(container_id), Some(video_id)) = (&self.container_id, &self.requested) else {
            return Ok(());
        };

        let options = PlayerOptions::new(video_id.clone(), self.should_play);
        match self.sdk.create_player(container_id, &options) {
            Ok(handle) => {
                tracing::info!(
                    handle = %handle,
                    container_id = %container_id,
                    video_id = %video_id,
                    "Player instance created"
                );
                self.phase = self.phase.created(handle);
                self.bound = Some(video_id.clone());
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, video_id = %video_id, "Player creation failed");
                Err(PlaybackError::creation_failed())
            }
        }
    }

    fn reconcile_video(&mut self) -> Result<(), PlaybackError> {
        match self.phase {
            PlayerPhase::Unbound => self.try_create(),
            // Picked up by on_ready
            PlayerPhase::Creating(_) => Ok(()),
            PlayerPhase::Ready(handle) => {
                match (self.requested.clone(), self.bound.is_some()) {
                    (Some(video_id), _) if self.bound.as_deref() != Some(video_id.as_str()) => {
                        tracing::info!(handle = %handle, video_id = %video_id, "Loading video");
                        self.command(handle, "load", |sdk| sdk.load_video(handle, &video_id));
                        self.bound = Some(video_id);
                    }
                    (None, true) => {
                        tracing::info!(handle = %handle, "Video cleared, stopping playback");
                        self.command(handle, "stop", |sdk| sdk.stop_video(handle));
                        self.bound = None;
                    }
                    _ => {}
                }
                Ok(())
            }
            PlayerPhase::Errored(handle) => {
                if self.requested.is_none() {
                    return Ok(());
                }
                tracing::info!(handle = %handle, "Recreating player after error");
                if let Err(e) = self.sdk.destroy(handle) {
                    tracing::warn!(handle = %handle, error = %e, "Error destroying failed player");
                }
                self.phase = PlayerPhase::Unbound;
                self.bound = None;
                self.try_create()
            }
        }
    }

    fn apply_playing_intent(&self) {
        let PlayerPhase::Ready(handle) = self.phase else {
            return;
        };

        let state = match self.sdk.player_state(handle) {
            Ok(state) => state,
            Err(e) => {
                tracing::error!(handle = %handle, error = %e, "Error reading player state");
                return;
            }
        };

        if self.should_play && state != PlayerState::Playing {
            self.command(handle, "play", |sdk| sdk.play_video(handle));
        } else if !self.should_play && state == PlayerState::Playing {
            self.command(handle, "pause", |sdk| sdk.pause_video(handle));
        }
    }

    fn command<F>(&self, handle: PlayerHandle, name: &'static str, f: F)
    where
        F: FnOnce(&dyn EmbedSdk) -> Result<(), crate::player::SdkError>,
    {
        if let Err(e) = f(self.sdk.as_ref()) {
            tracing::error!(handle = %handle, command = name, error = %e, "Player command failed");
        }
    }
}
