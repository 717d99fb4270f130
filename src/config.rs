use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the word-cloud backend. A single base URL serves
/// generation, storage, and export endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    /// Bounded wait for any single round-trip. There is no other cancellation
    /// primitive for an in-flight generation.
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `WORDCLOUD_BASE_URL` / `WORDCLOUD_TIMEOUT_SECS`.
    /// Loads a `.env` file first when present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();
        if let Ok(url) = std::env::var("WORDCLOUD_BASE_URL") {
            let url = url.trim().trim_end_matches('/');
            if !url.is_empty() {
                config.base_url = url.to_string();
            }
        }
        if let Ok(timeout) = std::env::var("WORDCLOUD_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.trim().parse::<u64>() {
                config.request_timeout_secs = secs;
            }
        }
        config
    }
}
