use std::time::Duration;

use hearth_core::{HearthConfig, RateLimitConfig};

/// Public NYC 311 service directory endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.nyc.gov/311/srv/v2";

/// Settings for [`Nyc311Connector`](crate::Nyc311Connector).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nyc311Config {
    /// API root; `/services` is appended.
    pub base_url: String,
    /// Sent as the `ApiKey` header when present.
    pub api_key: Option<String>,
    /// Published quota of the API.
    pub rate_limit: RateLimitConfig,
    /// Page size used when a query asks for zero records.
    pub page_size: u32,
    /// Largest page the API serves.
    pub max_page_size: u32,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for Nyc311Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            rate_limit: RateLimitConfig::new(10_000, 100),
            page_size: 50,
            max_page_size: 100,
            timeout: Duration::from_secs(10),
        }
    }
}

impl Nyc311Config {
    /// Defaults with the URL and key overrides carried by `cfg`.
    #[must_use]
    pub fn from_hearth_config(cfg: &HearthConfig) -> Self {
        let mut out = Self::default();
        if let Some(url) = &cfg.nyc311_api_url {
            out.base_url.clone_from(url);
        }
        out.api_key.clone_from(&cfg.nyc311_api_key);
        out
    }

    /// Replace the API root.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the API key.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Page size actually requested for a query asking for `limit` records.
    #[must_use]
    pub fn effective_limit(&self, limit: u32) -> u32 {
        if limit == 0 {
            self.page_size
        } else {
            limit.min(self.max_page_size)
        }
    }
}
