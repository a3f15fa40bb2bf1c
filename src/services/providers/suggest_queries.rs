/// Google autocomplete ("suggestqueries") provider scoped to YouTube
///
/// The endpoint answers `["query", ["s1", "s2", ...], ...]`.
use crate::{
    config::Config,
    error::{AppError, AppResult},
    services::providers::SuggestionProvider,
};
use reqwest::Client as HttpClient;
use serde_json::Value;

#[derive(Clone)]
pub struct SuggestQueriesProvider {
    http_client: HttpClient,
    api_url: String,
}

impl SuggestQueriesProvider {
    pub fn new(config: &Config) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url: config.suggest_url.clone(),
        }
    }

    /// Extracts the suggestion array; any other shape means no suggestions
    fn parse_suggestions(payload: &Value) -> Vec<String> {
        payload
            .get(1)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl SuggestionProvider for SuggestQueriesProvider {
    async fn suggest(&self, query: &str) -> AppResult<Vec<String>> {
        let response = self
            .http_client
            .get(&self.api_url)
            .query(&[("client", "firefox"), ("ds", "yt"), ("q", query)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "Suggestion fetch failed ({})",
                response.status()
            )));
        }

        let payload: Value = response.json().await?;
        let suggestions = Self::parse_suggestions(&payload);

        tracing::debug!(
            query = %query,
            suggestions = suggestions.len(),
            provider = self.name(),
            "Suggestions fetched"
        );

        Ok(suggestions)
    }

    fn name(&self) -> &'static str {
        "suggest_queries"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_suggestions() {
        let payload = json!(["lofi", ["lofi hip hop", "lofi girl", "lofi beats"], [], {}]);
        assert_eq!(
            SuggestQueriesProvider::parse_suggestions(&payload),
            vec!["lofi hip hop", "lofi girl", "lofi beats"]
        );
    }

    #[test]
    fn test_parse_suggestions_wrong_shape() {
        assert!(SuggestQueriesProvider::parse_suggestions(&json!({"q": "lofi"})).is_empty());
        assert!(SuggestQueriesProvider::parse_suggestions(&json!(["lofi"])).is_empty());
        assert!(SuggestQueriesProvider::parse_suggestions(&json!(["lofi", "nope"])).is_empty());
    }

    #[test]
    fn test_parse_suggestions_skips_non_strings() {
        let payload = json!(["lo", ["lofi", 3, null, "lorde"]]);
        assert_eq!(
            SuggestQueriesProvider::parse_suggestions(&payload),
            vec!["lofi", "lorde"]
        );
    }
}
