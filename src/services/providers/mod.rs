/// External data provider abstraction
///
/// The widget talks to two HTTP services: the video search API and the
/// autocomplete endpoint. Both sit behind traits so the controller can be driven
/// by mocks in tests and so the endpoints can be swapped through configuration.
use crate::{error::AppResult, models::SearchResult};

pub mod suggest_queries;
pub mod youtube;

pub use suggest_queries::SuggestQueriesProvider;
pub use youtube::YouTubeSearchProvider;

/// Trait for video search providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait VideoSearchProvider: Send + Sync {
    /// Search for videos matching free text
    ///
    /// Returns an empty list for a valid search with no matches. Transport
    /// failures and provider-reported errors are returned as errors whose
    /// message is ready to show to the user.
    async fn search_videos(&self, query: &str) -> AppResult<Vec<SearchResult>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Trait for autocomplete suggestion providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Fetch completions for a partial query
    ///
    /// Payloads of an unexpected shape yield an empty list rather than an error.
    async fn suggest(&self, query: &str) -> AppResult<Vec<String>>;

    fn name(&self) -> &'static str;
}
