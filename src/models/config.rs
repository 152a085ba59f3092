//! Configuration model loaded from external sources.

use std::env;
use std::time::Duration;

use config::{Config, ConfigError};
use serde::Deserialize;

fn default_search_debounce_ms() -> u64 {
    300
}

fn default_page_size() -> usize {
    crate::DEFAULT_PAGE_SIZE
}

fn default_detail_limit() -> usize {
    100
}

#[derive(Clone, Debug, Deserialize)]
/// Settings shared by the API client and the list screens.
pub struct ConsoleConfig {
    /// Base URL of the marketplace REST API, e.g. `https://api.example.org/api/v1`.
    pub api_base_url: String,
    /// Per-request timeout. Requests wait indefinitely when unset.
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Maximum rows fetched for each expanded-row collection.
    #[serde(default = "default_detail_limit")]
    pub detail_limit: usize,
    /// JSON file backing UI preferences; kept in memory when unset.
    #[serde(default)]
    pub preferences_path: Option<String>,
}

impl ConsoleConfig {
    /// Loads `config/default`, the optional `config/{APP_ENV}` profile and
    /// `APP_*` environment overrides, in that order.
    pub fn load() -> Result<Self, ConfigError> {
        // Select config profile (defaults to `local`).
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

        Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(config::Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}
