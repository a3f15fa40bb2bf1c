use std::sync::Arc;

use crate::{
    config::Config,
    player::{CommandQueueSdk, PlayerAdapter, SdkLoader},
    services::{
        providers::{SuggestQueriesProvider, SuggestionProvider, VideoSearchProvider, YouTubeSearchProvider},
        SearchController,
    },
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub controller: SearchController,
    /// Player commands waiting for the page, and the states it reported
    pub bridge: Arc<CommandQueueSdk>,
}

impl AppState {
    /// Wires the widget to the real YouTube endpoints
    pub fn new(config: &Config) -> Self {
        Self::with_providers(
            config,
            Arc::new(YouTubeSearchProvider::new(config)),
            Arc::new(SuggestQueriesProvider::new(config)),
        )
    }

    /// Wires the widget to the given providers; the player always goes through the bridge
    pub fn with_providers(
        config: &Config,
        search_provider: Arc<dyn VideoSearchProvider>,
        suggestion_provider: Arc<dyn SuggestionProvider>,
    ) -> Self {
        let bridge = Arc::new(CommandQueueSdk::new());
        let loader = Arc::new(SdkLoader::new(config.iframe_api_url.clone()));
        let player = PlayerAdapter::new(bridge.clone(), loader);

        Self {
            controller: SearchController::new(config, search_provider, suggestion_provider, player),
            bridge,
        }
    }
}
