//! Page-level widget state: search text, debounced suggestions, results and
//! the current playback target.

use std::sync::Arc;

use tokio::{
    sync::{Mutex, RwLock},
    task::JoinHandle,
};

use crate::{
    config::Config,
    error::{AppError, AppResult, WidgetError},
    models::{PlaybackError, PlaybackTarget, PlayerEvent, PlayerState, PointerTarget, SearchResult},
    player::PlayerAdapter,
    services::{
        debounce::Debouncer,
        providers::{SuggestionProvider, VideoSearchProvider},
        view::{result_views, ErrorView, PlayerArea, WidgetSnapshot},
    },
};

#[derive(Debug, Default)]
struct WidgetState {
    search_term: String,
    last_search_term: String,
    results: Vec<SearchResult>,
    is_loading: bool,
    error: Option<WidgetError>,

    suggestions: Vec<String>,
    suggestions_loading: bool,
    show_suggestions: bool,
    /// Bumped on every keystroke; suggestion responses carrying an older value are dropped
    suggestion_generation: u64,

    playback: Option<PlaybackTarget>,
    /// Click-outside detection is active until teardown
    listening: bool,
}

impl WidgetState {
    /// Clears the visible error, except the credential error which lasts for the session
    fn clear_error(&mut self) {
        if !matches!(self.error, Some(WidgetError::Configuration)) {
            self.error = None;
        }
    }

    fn invalidate_suggestions(&mut self) {
        self.suggestion_generation += 1;
        self.suggestions.clear();
        self.suggestions_loading = false;
        self.show_suggestions = false;
    }
}

/// Drives the search widget.
///
/// Cheap to clone; clones share the same state, player and timer.
#[derive(Clone)]
pub struct SearchController {
    state: Arc<RwLock<WidgetState>>,
    debouncer: Arc<Mutex<Debouncer>>,
    player: Arc<Mutex<PlayerAdapter>>,
    sdk_waiter: Arc<Mutex<Option<JoinHandle<()>>>>,
    search_provider: Arc<dyn VideoSearchProvider>,
    suggestion_provider: Arc<dyn SuggestionProvider>,
    search_configured: bool,
}

impl SearchController {
    pub fn new(
        config: &Config,
        search_provider: Arc<dyn VideoSearchProvider>,
        suggestion_provider: Arc<dyn SuggestionProvider>,
        player: PlayerAdapter,
    ) -> Self {
        let search_configured = config.api_key_configured();

        let mut state = WidgetState {
            listening: true,
            ..WidgetState::default()
        };
        if !search_configured {
            tracing::error!("YouTube API key is missing or invalid, search is disabled");
            state.error = Some(WidgetError::Configuration);
        }

        Self {
            state: Arc::new(RwLock::new(state)),
            debouncer: Arc::new(Mutex::new(Debouncer::new(config.suggest_debounce()))),
            player: Arc::new(Mutex::new(player)),
            sdk_waiter: Arc::new(Mutex::new(None)),
            search_provider,
            suggestion_provider,
            search_configured,
        }
    }

    pub fn search_configured(&self) -> bool {
        self.search_configured
    }

    // ------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------

    /// Runs one search. Empty queries and a missing API key are silent no-ops.
    pub async fn submit_search(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        if !self.search_configured {
            tracing::warn!(query = %query, "Search ignored, API key not configured");
            return;
        }

        {
            let mut state = self.state.write().await;
            state.invalidate_suggestions();
            state.clear_error();
            state.results.clear();
            state.last_search_term = query.to_string();
            state.is_loading = true;
        }
        self.debouncer.lock().await.cancel();

        tracing::info!(query = %query, provider = self.search_provider.name(), "Searching");
        let outcome = self.search_provider.search_videos(query).await;

        let mut state = self.state.write().await;
        match outcome {
            Ok(results) if results.is_empty() => {
                tracing::info!(query = %query, "Search returned no results");
                state.error = Some(WidgetError::NoResults {
                    query: query.to_string(),
                });
            }
            Ok(results) => {
                state.results = results;
            }
            Err(e) => {
                tracing::error!(query = %query, error = %e, "Search failed");
                let message = match e {
                    AppError::ExternalApi(message) => message,
                    other => other.to_string(),
                };
                state.error = Some(WidgetError::Search(message));
            }
        }
        state.is_loading = false;
    }

    /// Form submit: searches for the current text
    pub async fn submit_form(&self) {
        let term = {
            let mut state = self.state.write().await;
            if state.search_term.trim().is_empty() {
                return;
            }
            // A stale player error should not linger over a fresh search
            if state.error.is_some() && state.playback.is_some() {
                state.clear_error();
            }
            state.search_term.clone()
        };

        self.submit_search(&term).await;
    }

    // ------------------------------------------------------------------
    // Suggestions
    // ------------------------------------------------------------------

    pub async fn on_input_change(&self, text: &str) {
        let scheduled = {
            let mut state = self.state.write().await;
            state.search_term = text.to_string();
            state.suggestion_generation += 1;
            state.suggestions.clear();

            let trimmed = text.trim();
            if trimmed.chars().count() <= 1 {
                state.suggestions_loading = false;
                state.show_suggestions = false;
                None
            } else {
                state.suggestions_loading = true;
                state.show_suggestions = true;
                Some((state.suggestion_generation, trimmed.to_string()))
            }
        };

        let mut debouncer = self.debouncer.lock().await;
        match scheduled {
            Some((generation, snapshot)) => {
                let controller = self.clone();
                debouncer.schedule(async move {
                    controller.fetch_suggestions(snapshot, generation).await;
                });
            }
            None => {
                debouncer.cancel();
            }
        }
    }

    async fn fetch_suggestions(&self, query: String, generation: u64) {
        let outcome = self.suggestion_provider.suggest(&query).await;

        let mut state = self.state.write().await;
        if state.suggestion_generation != generation {
            tracing::debug!(query = %query, "Dropping stale suggestions");
            return;
        }

        match outcome {
            Ok(suggestions) => state.suggestions = suggestions,
            Err(e) => {
                let error = WidgetError::Suggestion(e.to_string());
                tracing::warn!(query = %query, error = %error, "Suggestions unavailable");
                state.suggestions.clear();
            }
        }
        state.suggestions_loading = false;
    }

    pub async fn on_suggestion_select(&self, suggestion: &str) {
        {
            let mut state = self.state.write().await;
            state.search_term = suggestion.to_string();
            state.invalidate_suggestions();
        }
        self.submit_search(suggestion).await;
    }

    /// Re-opens the suggestion box if there is something to show
    pub async fn on_input_focus(&self) {
        let mut state = self.state.write().await;
        if !state.search_term.is_empty() && !state.suggestions.is_empty() {
            state.show_suggestions = true;
        }
    }

    pub async fn on_pointer_down(&self, target: PointerTarget) {
        let mut state = self.state.write().await;
        if state.listening && target == PointerTarget::Outside {
            state.show_suggestions = false;
        }
    }

    // ------------------------------------------------------------------
    // Playback
    // ------------------------------------------------------------------

    /// Same result toggles play/pause; a different one becomes the new target
    pub async fn on_result_select(&self, result: SearchResult) {
        {
            let mut state = self.state.write().await;
            let same_video = state
                .playback
                .as_ref()
                .is_some_and(|target| target.result.id == result.id);

            if same_video {
                if let Some(target) = state.playback.as_mut() {
                    target.is_playing = !target.is_playing;
                    tracing::info!(video_id = %result.id, playing = target.is_playing, "Toggled playback");
                }
            } else {
                tracing::info!(video_id = %result.id, "Video selected");
                state.clear_error();
                state.playback = Some(PlaybackTarget::new(result));
            }
        }

        self.sync_player().await;
    }

    /// Selects a result from the current list by video id
    pub async fn select_result_by_id(&self, id: &str) -> AppResult<()> {
        let result = {
            let state = self.state.read().await;
            state.results.iter().find(|r| r.id == id).cloned()
        };

        match result {
            Some(result) => {
                self.on_result_select(result).await;
                Ok(())
            }
            None => Err(AppError::NotFound(format!("No result with id {}", id))),
        }
    }

    /// Binds the player to its container and waits for the SDK in the background
    pub async fn mount_player(&self, container_id: &str) {
        let outcome = self.player.lock().await.mount(container_id);
        if let Err(error) = outcome {
            self.apply_playback_error(error).await;
        }
        self.sync_player().await;

        let controller = self.clone();
        let waiter = tokio::spawn(async move {
            let loader = controller.player.lock().await.loader().clone();
            loader.wait_ready().await;
            controller.create_when_ready().await;
        });
        if let Some(previous) = self.sdk_waiter.lock().await.replace(waiter) {
            previous.abort();
        }
    }

    /// The page reports the SDK has loaded
    pub async fn sdk_ready(&self) {
        let loader = self.player.lock().await.loader().clone();
        loader.mark_ready();
        self.create_when_ready().await;
    }

    async fn create_when_ready(&self) {
        let outcome = self.player.lock().await.on_sdk_ready();
        if let Err(error) = outcome {
            self.apply_playback_error(error).await;
        }
    }

    pub async fn unmount_player(&self) {
        if let Some(waiter) = self.sdk_waiter.lock().await.take() {
            waiter.abort();
        }
        self.player.lock().await.teardown();
    }

    /// Routes an SDK notification to the adapter and reflects it in the widget
    pub async fn on_player_event(&self, event: PlayerEvent) {
        match event {
            PlayerEvent::Ready { handle } => {
                let outcome = self.player.lock().await.on_ready(handle);
                if let Err(error) = outcome {
                    self.apply_playback_error(error).await;
                }
            }
            PlayerEvent::StateChange { handle, data } => {
                let reported = self.player.lock().await.on_state_change(handle, data);
                let playing = match reported {
                    Some(PlayerState::Playing) => true,
                    Some(PlayerState::Paused) | Some(PlayerState::Ended) => false,
                    _ => return,
                };

                {
                    let mut state = self.state.write().await;
                    if let Some(target) = state.playback.as_mut() {
                        target.is_playing = playing;
                    }
                }
                self.sync_player().await;
            }
            PlayerEvent::Error { handle, data } => {
                let reported = self.player.lock().await.on_error(handle, data);
                if let Some(error) = reported {
                    self.apply_playback_error(error).await;
                }
            }
        }
    }

    /// Shows the error and drops the target; the adapter is told to stop
    async fn apply_playback_error(&self, error: PlaybackError) {
        {
            let mut state = self.state.write().await;
            state.error = Some(WidgetError::Playback(error));
            state.playback = None;
        }

        let mut player = self.player.lock().await;
        // Clearing the video never constructs a player
        if let Err(e) = player.set_video(None) {
            tracing::warn!(error = %e, "Unexpected player error while clearing video");
        }
        player.set_playing(false);
    }

    /// Pushes the current target into the adapter
    async fn sync_player(&self) {
        let (video_id, playing) = {
            let state = self.state.read().await;
            match &state.playback {
                Some(target) => (Some(target.video_id().to_string()), target.is_playing),
                None => (None, false),
            }
        };

        let outcome = {
            let mut player = self.player.lock().await;
            let outcome = player.set_video(video_id);
            player.set_playing(playing);
            outcome
        };

        if let Err(error) = outcome {
            self.apply_playback_error(error).await;
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle & view
    // ------------------------------------------------------------------

    /// Stops listening for pointer events, cancels the timer and releases the player
    pub async fn teardown(&self) {
        self.state.write().await.listening = false;
        self.debouncer.lock().await.cancel();
        self.unmount_player().await;
        tracing::info!("Search widget torn down");
    }

    pub async fn snapshot(&self) -> WidgetSnapshot {
        let player = self.player.lock().await.phase();
        let state = self.state.read().await;

        WidgetSnapshot {
            search_term: state.search_term.clone(),
            last_search_term: Some(state.last_search_term.clone()).filter(|t| !t.is_empty()),
            is_loading: state.is_loading,
            search_enabled: self.search_configured
                && !state.is_loading
                && !state.search_term.is_empty(),
            suggestions: state.suggestions.clone(),
            show_suggestions: state.show_suggestions && !state.search_term.is_empty(),
            suggestions_loading: state.suggestions_loading,
            results: result_views(&state.results, state.playback.as_ref()),
            error: state.error.as_ref().map(ErrorView::from),
            now_playing: state.playback.clone(),
            player_area: PlayerArea::derive(
                &state.last_search_term,
                &state.results,
                state.error.as_ref(),
                state.playback.as_ref(),
            ),
            player,
        }
    }
}
