/// YouTube Data API v3 provider
///
/// Only the `search` endpoint is used: `part=snippet`, `type=video`, with the
/// configured result count and region.
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{ApiErrorEnvelope, ApiSearchResponse, SearchResult},
    services::providers::VideoSearchProvider,
};
use reqwest::{Client as HttpClient, StatusCode};

#[derive(Clone)]
pub struct YouTubeSearchProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    max_results: u32,
    region_code: String,
}

impl YouTubeSearchProvider {
    pub fn new(config: &Config) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key: config.youtube_api_key.clone(),
            api_url: config.youtube_search_url.clone(),
            max_results: config.max_results,
            region_code: config.region_code.clone(),
        }
    }

    /// Builds the user-facing message for a failed search response
    fn error_message(status: StatusCode, body: &str) -> String {
        let message = serde_json::from_str::<ApiErrorEnvelope>(body)
            .ok()
            .and_then(|envelope| envelope.best_message().map(str::to_string))
            .unwrap_or_else(|| format!("HTTP error {}", status.as_u16()));

        format!("YouTube API Error: {}", message)
    }

    fn parse_results(response: ApiSearchResponse) -> Vec<SearchResult> {
        response
            .items
            .into_iter()
            .filter_map(|item| item.into_result())
            .collect()
    }
}

#[async_trait::async_trait]
impl VideoSearchProvider for YouTubeSearchProvider {
    async fn search_videos(&self, query: &str) -> AppResult<Vec<SearchResult>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let max_results = self.max_results.to_string();
        let response = self
            .http_client
            .get(&self.api_url)
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("key", self.api_key.as_str()),
                ("maxResults", max_results.as_str()),
                ("type", "video"),
                ("regionCode", self.region_code.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                query = %query,
                status = %status,
                body = %body,
                "YouTube search request failed"
            );
            return Err(AppError::ExternalApi(Self::error_message(status, &body)));
        }

        let payload: ApiSearchResponse = response.json().await?;
        let results = Self::parse_results(payload);

        tracing::info!(
            query = %query,
            results = results.len(),
            provider = self.name(),
            "Video search completed"
        );

        Ok(results)
    }

    fn name(&self) -> &'static str {
        "youtube"
    }
}
