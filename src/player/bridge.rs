use std::{
    collections::{HashMap, VecDeque},
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex, MutexGuard,
    },
};

use serde::Serialize;

use crate::{
    models::{PlayerEvent, PlayerHandle, PlayerState},
    player::{EmbedSdk, PlayerOptions, SdkError},
};

/// Imperative SDK call waiting to be executed by the page hosting the real player
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum PlayerCommand {
    InjectScript {
        src: String,
    },
    Create {
        handle: PlayerHandle,
        container_id: String,
        options: PlayerOptions,
    },
    Load {
        handle: PlayerHandle,
        video_id: String,
    },
    Stop {
        handle: PlayerHandle,
    },
    Play {
        handle: PlayerHandle,
    },
    Pause {
        handle: PlayerHandle,
    },
    Destroy {
        handle: PlayerHandle,
    },
}

#[derive(Default)]
struct BridgeInner {
    queue: VecDeque<PlayerCommand>,
    /// Live instances and their last reported state
    players: HashMap<PlayerHandle, PlayerState>,
}

/// [`EmbedSdk`] that queues commands for a remote page to drain.
///
/// The page executes each command against the IFrame API and posts the SDK's
/// notifications back; state changes are recorded here so `player_state` can
/// answer without a round trip.
#[derive(Default)]
pub struct CommandQueueSdk {
    inner: Mutex<BridgeInner>,
    next_handle: AtomicU64,
}

impl CommandQueueSdk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every queued command in issue order
    pub fn drain(&self) -> Vec<PlayerCommand> {
        match self.inner.lock() {
            Ok(mut inner) => inner.queue.drain(..).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Records what the page reported before it is handed to the adapter
    pub fn observe(&self, event: &PlayerEvent) {
        if let PlayerEvent::StateChange { handle, data } = event {
            if let Ok(mut inner) = self.inner.lock() {
                if let Some(state) = inner.players.get_mut(handle) {
                    *state = PlayerState::from_code(*data);
                }
            }
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, BridgeInner>, SdkError> {
        self.inner
            .lock()
            .map_err(|_| SdkError::Call("command queue poisoned".to_string()))
    }

    /// Queues a command addressed to a live instance
    fn push_for(&self, handle: PlayerHandle, command: PlayerCommand) -> Result<(), SdkError> {
        let mut inner = self.lock()?;
        if !inner.players.contains_key(&handle) {
            return Err(SdkError::UnknownHandle(handle));
        }
        inner.queue.push_back(command);
        Ok(())
    }
}

impl EmbedSdk for CommandQueueSdk {
    fn inject_script(&self, src: &str) -> Result<(), SdkError> {
        self.lock()?.queue.push_back(PlayerCommand::InjectScript {
            src: src.to_string(),
        });
        Ok(())
    }

    fn create_player(
        &self,
        container_id: &str,
        options: &PlayerOptions,
    ) -> Result<PlayerHandle, SdkError> {
        let handle = PlayerHandle(self.next_handle.fetch_add(1, Ordering::SeqCst) + 1);
        let mut inner = self.lock()?;
        inner.players.insert(handle, PlayerState::Unstarted);
        inner.queue.push_back(PlayerCommand::Create {
            handle,
            container_id: container_id.to_string(),
            options: options.clone(),
        });
        Ok(handle)
    }

    fn load_video(&self, handle: PlayerHandle, video_id: &str) -> Result<(), SdkError> {
        self.push_for(
            handle,
            PlayerCommand::Load {
                handle,
                video_id: video_id.to_string(),
            },
        )
    }

    fn stop_video(&self, handle: PlayerHandle) -> Result<(), SdkError> {
        self.push_for(handle, PlayerCommand::Stop { handle })
    }

    fn play_video(&self, handle: PlayerHandle) -> Result<(), SdkError> {
        self.push_for(handle, PlayerCommand::Play { handle })
    }

    fn pause_video(&self, handle: PlayerHandle) -> Result<(), SdkError> {
        self.push_for(handle, PlayerCommand::Pause { handle })
    }

    fn player_state(&self, handle: PlayerHandle) -> Result<PlayerState, SdkError> {
        self.lock()?
            .players
            .get(&handle)
            .copied()
            .ok_or(SdkError::UnknownHandle(handle))
    }

    fn destroy(&self, handle: PlayerHandle) -> Result<(), SdkError> {
        let mut inner = self.lock()?;
        if inner.players.remove(&handle).is_none() {
            return Err(SdkError::UnknownHandle(handle));
        }
        inner.queue.push_back(PlayerCommand::Destroy { handle });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_drain_in_order() {
        let sdk = CommandQueueSdk::new();
        sdk.inject_script("https://www.youtube.com/iframe_api").unwrap();
        let handle = sdk
            .create_player("ytplayer-1", &PlayerOptions::new("abc", true))
            .unwrap();
        sdk.play_video(handle).unwrap();

        let commands = sdk.drain();
        assert_eq!(commands.len(), 3);
        assert!(matches!(commands[0], PlayerCommand::InjectScript { .. }));
        assert!(matches!(commands[1], PlayerCommand::Create { handle: h, .. } if h == handle));
        assert_eq!(commands[2], PlayerCommand::Play { handle });
        assert!(sdk.drain().is_empty());
    }

    #[test]
    fn test_handles_are_unique() {
        let sdk = CommandQueueSdk::new();
        let first = sdk.create_player("a", &PlayerOptions::new("x", false)).unwrap();
        let second = sdk.create_player("b", &PlayerOptions::new("y", false)).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_state_tracks_reported_changes() {
        let sdk = CommandQueueSdk::new();
        let handle = sdk.create_player("a", &PlayerOptions::new("x", false)).unwrap();
        assert_eq!(sdk.player_state(handle).unwrap(), PlayerState::Unstarted);

        sdk.observe(&PlayerEvent::StateChange { handle, data: 1 });
        assert_eq!(sdk.player_state(handle).unwrap(), PlayerState::Playing);
    }

    #[test]
    fn test_destroyed_instance_rejects_commands() {
        let sdk = CommandQueueSdk::new();
        let handle = sdk.create_player("a", &PlayerOptions::new("x", false)).unwrap();
        sdk.destroy(handle).unwrap();

        assert_eq!(sdk.play_video(handle), Err(SdkError::UnknownHandle(handle)));
        assert_eq!(sdk.destroy(handle), Err(SdkError::UnknownHandle(handle)));
        assert_eq!(
            sdk.player_state(handle),
            Err(SdkError::UnknownHandle(handle))
        );
    }

    #[test]
    fn test_command_serialization() {
        let json = serde_json::to_value(PlayerCommand::Load {
            handle: PlayerHandle(2),
            video_id: "abc".to_string(),
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"command": "load", "handle": 2, "video_id": "abc"})
        );
    }
}
