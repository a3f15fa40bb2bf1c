use serde::Deserialize;
use std::time::Duration;

/// Value shipped in the sample `.env`; treated the same as a missing key.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_YOUTUBE_API_KEY_HERE";

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// YouTube Data API key
    #[serde(default = "default_api_key")]
    pub youtube_api_key: String,

    /// YouTube Data API search endpoint
    #[serde(default = "default_search_url")]
    pub youtube_search_url: String,

    /// Autocomplete endpoint returning `[query, [suggestions...]]`
    #[serde(default = "default_suggest_url")]
    pub suggest_url: String,

    /// IFrame Player API script injected once per page
    #[serde(default = "default_iframe_api_url")]
    pub iframe_api_url: String,

    #[serde(default = "default_max_results")]
    pub max_results: u32,

    #[serde(default = "default_region_code")]
    pub region_code: String,

    /// Quiet period before a suggestion request is issued
    #[serde(default = "default_suggest_debounce_ms")]
    pub suggest_debounce_ms: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_api_key() -> String {
    PLACEHOLDER_API_KEY.to_string()
}

fn default_search_url() -> String {
    "https://www.googleapis.com/youtube/v3/search".to_string()
}

fn default_suggest_url() -> String {
    "https://suggestqueries.google.com/complete/search".to_string()
}

fn default_iframe_api_url() -> String {
    "https://www.youtube.com/iframe_api".to_string()
}

fn default_max_results() -> u32 {
    15
}

fn default_region_code() -> String {
    "IN".to_string()
}

fn default_suggest_debounce_ms() -> u64 {
    350
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            youtube_api_key: default_api_key(),
            youtube_search_url: default_search_url(),
            suggest_url: default_suggest_url(),
            iframe_api_url: default_iframe_api_url(),
            max_results: default_max_results(),
            region_code: default_region_code(),
            suggest_debounce_ms: default_suggest_debounce_ms(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Whether a usable API key is present. Search is disabled otherwise.
    pub fn api_key_configured(&self) -> bool {
        api_key_usable(&self.youtube_api_key)
    }

    pub fn suggest_debounce(&self) -> Duration {
        Duration::from_millis(self.suggest_debounce_ms)
    }
}

fn api_key_usable(key: &str) -> bool {
    let key = key.trim();
    !key.is_empty() && key != PLACEHOLDER_API_KEY
}
