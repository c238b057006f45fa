//! Configuration types shared across the orchestrator, cache and connectors.

use core::fmt;
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::error::HearthError;

/// Minimum length accepted for the shared admin secret.
pub const MIN_ADMIN_KEY_LEN: usize = 20;

/// Named cache partitions, each with its own TTL policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheNamespace {
    /// Aggregated resource listings.
    Resources,
    /// Per-source health snapshots.
    SourceStatus,
    /// Sync job progress.
    SyncStatus,
    /// Raw connector responses.
    ExternalServices,
}

impl CacheNamespace {
    /// Every namespace in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Resources,
        Self::SourceStatus,
        Self::SyncStatus,
        Self::ExternalServices,
    ];

    /// Key prefix used for entries in this namespace.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Resources => "resources",
            Self::SourceStatus => "source_status",
            Self::SyncStatus => "sync_status",
            Self::ExternalServices => "external_services",
        }
    }

    /// Built-in TTL policy for this namespace.
    #[must_use]
    pub const fn default_policy(self) -> CachePolicy {
        match self {
            Self::Resources | Self::ExternalServices => CachePolicy::new(
                Duration::from_secs(3600),
                Duration::from_secs(86_400),
            ),
            Self::SourceStatus => {
                CachePolicy::new(Duration::from_secs(300), Duration::from_secs(600))
            }
            Self::SyncStatus => CachePolicy::new(Duration::from_secs(60), Duration::from_secs(120)),
        }
    }
}

impl fmt::Display for CacheNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

impl FromStr for CacheNamespace {
    type Err = HearthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ns| ns.prefix() == s)
            .ok_or_else(|| HearthError::InvalidArg(format!("unknown cache namespace '{s}'")))
    }
}

/// Fresh window and stale grace window for cache entries.
///
/// `max_stale` is measured from the write, not from expiry. When it is not
/// larger than `ttl` the entry has no stale window at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachePolicy {
    /// How long an entry is served as fresh.
    pub ttl: Duration,
    /// How long after the write an expired entry may still be served.
    pub max_stale: Duration,
}

impl CachePolicy {
    /// Construct a policy from its two windows.
    #[must_use]
    pub const fn new(ttl: Duration, max_stale: Duration) -> Self {
        Self { ttl, max_stale }
    }

    /// Keep `max_stale` but replace the fresh window.
    #[must_use]
    pub const fn with_ttl(self, ttl: Duration) -> Self {
        Self {
            ttl,
            max_stale: self.max_stale,
        }
    }

    /// Effective lifetime of an entry, from write to unrecoverable.
    #[must_use]
    pub fn lifetime(&self) -> Duration {
        self.ttl.max(self.max_stale)
    }

    /// Whether entries written under this policy ever enter a stale window.
    #[must_use]
    pub fn has_stale_window(&self) -> bool {
        self.max_stale > self.ttl
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        CacheNamespace::Resources.default_policy()
    }
}

/// Connection settings for the shared REST cache backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteCacheConfig {
    /// Base URL of the REST endpoint.
    pub url: String,
    /// Bearer token sent with every request.
    pub token: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl RemoteCacheConfig {
    /// Settings with the default two-second request timeout.
    #[must_use]
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: token.into(),
            timeout: Duration::from_secs(2),
        }
    }
}

/// Cache store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Policy used for keys outside any known namespace.
    pub default_policy: CachePolicy,
    /// Per-namespace overrides; namespaces missing here use their built-in policy.
    pub namespaces: HashMap<CacheNamespace, CachePolicy>,
    /// Remote shared backend; the in-process backend is used alone when `None`.
    pub remote: Option<RemoteCacheConfig>,
    /// Period of the background eviction sweep.
    pub sweep_interval: Duration,
    /// Capacity of the in-process backend.
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_policy: CachePolicy::default(),
            namespaces: HashMap::new(),
            remote: None,
            sweep_interval: Duration::from_secs(300),
            max_entries: 10_000,
        }
    }
}

impl CacheConfig {
    /// Resolve the policy for a namespace.
    #[must_use]
    pub fn policy_for(&self, ns: CacheNamespace) -> CachePolicy {
        self.namespaces
            .get(&ns)
            .copied()
            .unwrap_or_else(|| ns.default_policy())
    }
}

/// Which rate-limit window tripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateLimitWindow {
    /// Calendar day, resetting at the next local midnight.
    Day,
    /// Rolling minute since the last request.
    Minute,
}

impl fmt::Display for RateLimitWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Day => "day",
            Self::Minute => "minute",
        })
    }
}

/// Request budget for a connector instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum requests per calendar day.
    pub requests_per_day: u64,
    /// Maximum requests within one minute of inactivity-reset.
    pub requests_per_minute: u64,
}

impl RateLimitConfig {
    /// Construct a budget from its two thresholds.
    #[must_use]
    pub const fn new(requests_per_day: u64, requests_per_minute: u64) -> Self {
        Self {
            requests_per_day,
            requests_per_minute,
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::new(1000, 60)
    }
}

/// Snapshot of a connector's rate-limit counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitState {
    /// Requests attempted since the last day reset.
    pub requests_today: u64,
    /// Requests attempted in the current minute window.
    pub requests_this_minute: u64,
    /// Instant the day counter next resets.
    pub day_resets_at: DateTime<Utc>,
    /// Instant of the most recent attempted request.
    pub last_request_at: Option<DateTime<Utc>>,
}

/// Global configuration for the `Hearth` orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HearthConfig {
    /// Shared secret for admin operations; admin calls are refused when unset.
    pub admin_api_key: Option<String>,
    /// Cache store settings.
    pub cache: CacheConfig,
    /// Connector consulted when the local store has nothing to offer.
    pub default_external_source: String,
    /// Upper bound on records requested from a connector per query.
    pub external_limit_cap: u32,
    /// Radius applied when a center point is given without a radius.
    pub default_radius_miles: f64,
    /// Window for the `verified_recently` filter.
    pub verified_recently_window: Duration,
    /// Number of nearby alternatives attached to a resource detail.
    pub detail_alternatives: usize,
    /// Overrides the NYC 311 API base URL.
    pub nyc311_api_url: Option<String>,
    /// NYC 311 API key.
    pub nyc311_api_key: Option<String>,
}

impl Default for HearthConfig {
    fn default() -> Self {
        Self {
            admin_api_key: None,
            cache: CacheConfig::default(),
            default_external_source: "nyc311".to_string(),
            external_limit_cap: 50,
            default_radius_miles: 5.0,
            verified_recently_window: Duration::from_secs(72 * 3600),
            detail_alternatives: 3,
            nyc311_api_url: None,
            nyc311_api_key: None,
        }
    }
}

impl HearthConfig {
    /// Build a configuration from process environment variables.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `HEARTH_ADMIN_API_KEY` is set but shorter
    /// than [`MIN_ADMIN_KEY_LEN`].
    pub fn from_env() -> Result<Self, HearthError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset. The remote cache is configured only
    /// when both its URL and token are present.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an admin key shorter than [`MIN_ADMIN_KEY_LEN`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, HearthError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let admin_api_key = get("HEARTH_ADMIN_API_KEY");
        if let Some(key) = &admin_api_key
            && key.chars().count() < MIN_ADMIN_KEY_LEN
        {
            return Err(HearthError::InvalidArg(format!(
                "HEARTH_ADMIN_API_KEY must be at least {MIN_ADMIN_KEY_LEN} characters"
            )));
        }

        let mut cache = CacheConfig::default();
        if let (Some(url), Some(token)) = (
            get("HEARTH_CACHE_REST_URL"),
            get("HEARTH_CACHE_REST_TOKEN"),
        ) {
            cache.remote = Some(RemoteCacheConfig::new(url, token));
        }

        Ok(Self {
            admin_api_key,
            cache,
            nyc311_api_url: get("NYC311_API_URL"),
            nyc311_api_key: get("NYC311_API_KEY"),
            ..Self::default()
        })
    }

    /// Constant-time check of a presented admin key against the configured one.
    ///
    /// Always false when no key is configured.
    #[must_use]
    pub fn admin_key_matches(&self, presented: &str) -> bool {
        self.admin_api_key.as_deref().is_some_and(|expected| {
            expected.as_bytes().ct_eq(presented.as_bytes()).into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn namespace_policies_match_builtin_table() {
        let cfg = CacheConfig::default();
        assert_eq!(cfg.policy_for(CacheNamespace::Resources).ttl.as_secs(), 3600);
        assert_eq!(
            cfg.policy_for(CacheNamespace::SourceStatus).max_stale.as_secs(),
            600
        );
        assert_eq!(cfg.policy_for(CacheNamespace::SyncStatus).ttl.as_secs(), 60);
    }

    #[test]
    fn policy_without_grace_has_no_stale_window() {
        let p = CachePolicy::new(Duration::from_secs(100), Duration::from_secs(50));
        assert!(!p.has_stale_window());
        assert_eq!(p.lifetime(), Duration::from_secs(100));
    }

    #[test]
    fn short_admin_key_is_rejected() {
        let err = HearthConfig::from_lookup(vars(&[("HEARTH_ADMIN_API_KEY", "short")]));
        assert!(matches!(err, Err(HearthError::InvalidArg(_))));
    }

    #[test]
    fn remote_cache_needs_url_and_token() {
        let cfg =
            HearthConfig::from_lookup(vars(&[("HEARTH_CACHE_REST_URL", "http://cache")])).unwrap();
        assert!(cfg.cache.remote.is_none());

        let cfg = HearthConfig::from_lookup(vars(&[
            ("HEARTH_CACHE_REST_URL", "http://cache"),
            ("HEARTH_CACHE_REST_TOKEN", "tok"),
            ("HEARTH_ADMIN_API_KEY", "0123456789abcdefghij"),
        ]))
        .unwrap();
        assert_eq!(cfg.cache.remote.as_ref().unwrap().url, "http://cache");
        assert!(cfg.admin_key_matches("0123456789abcdefghij"));
        assert!(!cfg.admin_key_matches("0123456789abcdefghiX"));
        assert!(!cfg.admin_key_matches("0123456789abcdefghij0"));
        assert!(!cfg.admin_key_matches(""));
    }

    #[test]
    fn admin_check_fails_closed_without_key() {
        assert!(!HearthConfig::default().admin_key_matches(""));
    }
}
