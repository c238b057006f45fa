use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use hearth_core::TaskHandle;
use hearth_types::{CacheConfig, CacheNamespace, CachePolicy, HearthError};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{CacheLookup, EntryAge, MemoryBackend, RestBackend, StoredEntry};

/// Counters and contents snapshot of a [`CacheStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Entries currently held by the in-process backend.
    pub local_entries: u64,
    /// Keys of in-process entries still inside their fresh window.
    pub fresh_keys: Vec<String>,
    /// Fresh hits served.
    pub hits: u64,
    /// Stale hits served.
    pub stale_hits: u64,
    /// Lookups that found nothing usable.
    pub misses: u64,
    /// In-process entries evicted after their stale window, before this snapshot.
    pub evicted: u64,
    /// Remote operations that failed and fell back to the in-process backend.
    pub remote_failures: u64,
    /// Whether a remote backend is configured.
    pub remote_configured: bool,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    stale_hits: AtomicU64,
    misses: AtomicU64,
    remote_failures: AtomicU64,
}

/// Cache with a remote shared backend and an in-process fallback.
///
/// Every remote operation that fails is logged and retried against the
/// in-process backend, so callers never see backend errors.
pub struct CacheStore {
    config: CacheConfig,
    local: MemoryBackend,
    remote: Option<RestBackend>,
    counters: Counters,
}

impl CacheStore {
    /// Build a store from configuration.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the remote backend URL is unusable.
    pub fn new(config: CacheConfig) -> Result<Self, HearthError> {
        let remote = config.remote.as_ref().map(RestBackend::new).transpose()?;
        Ok(Self {
            local: MemoryBackend::new(config.max_entries),
            remote,
            config,
            counters: Counters::default(),
        })
    }

    /// In-process store with default namespace policies.
    #[must_use]
    pub fn in_memory() -> Self {
        let config = CacheConfig::default();
        Self {
            local: MemoryBackend::new(config.max_entries),
            remote: None,
            config,
            counters: Counters::default(),
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Policy for `key`, resolved from the namespace its prefix names.
    #[must_use]
    pub fn policy_for_key(&self, key: &str) -> CachePolicy {
        let prefix = key.split('?').next().unwrap_or(key);
        CacheNamespace::from_str(prefix)
            .map_or(self.config.default_policy, |ns| self.config.policy_for(ns))
    }

    fn note_remote_failure(&self, op: &'static str, key: &str, err: &HearthError) {
        self.counters.remote_failures.fetch_add(1, Ordering::Relaxed);
        tracing::warn!(op, key, error = %err, "remote cache unavailable; using in-process cache");
    }

    async fn read(&self, key: &str) -> Option<StoredEntry> {
        if let Some(remote) = &self.remote {
            match remote.get(key).await {
                Ok(entry) => return entry,
                Err(e) => self.note_remote_failure("get", key, &e),
            }
        }
        self.local.get(key).await
    }

    async fn write(&self, key: &str, entry: StoredEntry, lifetime: Duration) {
        if let Some(remote) = &self.remote {
            match remote.set(key, &entry, lifetime).await {
                Ok(()) => return,
                Err(e) => self.note_remote_failure("set", key, &e),
            }
        }
        self.local.insert(key, entry).await;
    }

    /// Read `key`, classifying the result as fresh, stale or missing.
    ///
    /// Stale hits emit a warning. Dead and undecodable entries are removed
    /// and reported as misses.
    pub async fn lookup<V: DeserializeOwned>(&self, key: &str) -> CacheLookup<V> {
        let Some(entry) = self.read(key).await else {
            self.counters.misses.fetch_add(1, Ordering::Relaxed);
            return CacheLookup::Miss;
        };

        let age = entry.age_at(Utc::now());
        if age == EntryAge::Dead {
            self.delete(key).await;
            self.counters.misses.fetch_add(1, Ordering::Relaxed);
            return CacheLookup::Miss;
        }

        let value = match serde_json::from_str::<V>(&entry.payload) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding undecodable cache entry");
                self.delete(key).await;
                self.counters.misses.fetch_add(1, Ordering::Relaxed);
                return CacheLookup::Miss;
            }
        };

        if age == EntryAge::Stale {
            self.counters.stale_hits.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(
                key,
                expired_at = %entry.expires_at,
                stale_until = %entry.stale_until,
                "cache returned stale data"
            );
            CacheLookup::Stale(value)
        } else {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
            CacheLookup::Fresh(value)
        }
    }

    /// Fresh or stale value for `key`.
    pub async fn get<V: DeserializeOwned>(&self, key: &str) -> Option<V> {
        self.lookup(key).await.into_value()
    }

    /// Store `value` under `key`.
    ///
    /// `ttl` overrides the fresh window of the key's namespace; the stale
    /// window always comes from the namespace. Values that fail to serialize
    /// are logged and not cached.
    pub async fn set<V: Serialize>(&self, key: &str, value: &V, ttl: Option<Duration>) {
        let payload = match serde_json::to_string(value) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(key, error = %e, "value not cacheable");
                return;
            }
        };
        let mut policy = self.policy_for_key(key);
        if let Some(ttl) = ttl {
            policy = policy.with_ttl(ttl);
        }
        let now = Utc::now();
        let after = |d: Duration| {
            chrono::Duration::from_std(d)
                .ok()
                .and_then(|d| now.checked_add_signed(d))
                .unwrap_or(DateTime::<Utc>::MAX_UTC)
        };
        let expires_at = after(policy.ttl);
        let stale_until = if policy.has_stale_window() {
            after(policy.max_stale)
        } else {
            expires_at
        };
        let entry = StoredEntry {
            payload,
            expires_at,
            stale_until,
        };
        self.write(key, entry, policy.lifetime()).await;
    }

    /// Remove `key` from both backends; true when either held it.
    pub async fn delete(&self, key: &str) -> bool {
        let mut removed = false;
        if let Some(remote) = &self.remote {
            match remote.delete(key).await {
                Ok(r) => removed |= r,
                Err(e) => self.note_remote_failure("del", key, &e),
            }
        }
        removed | self.local.remove(key).await
    }

    /// Cached value for `key`, or the producer's value stored under `key`.
    ///
    /// Returns the value and whether it came from the cache (stale hits
    /// count as cached). Producer errors are returned and nothing is stored.
    /// Concurrent misses each run their own producer.
    ///
    /// # Errors
    /// Propagates the producer's error.
    pub async fn get_or_compute<V, F, Fut>(
        &self,
        key: &str,
        ttl: Option<Duration>,
        producer: F,
    ) -> Result<(V, bool), HearthError>
    where
        V: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, HearthError>>,
    {
        if let Some(v) = self.get(key).await {
            return Ok((v, true));
        }
        let value = producer().await?;
        self.set(key, &value, ttl).await;
        Ok((value, false))
    }

    /// Remove every entry whose key starts with `prefix`; returns the count removed.
    pub async fn invalidate_prefix(&self, prefix: &str) -> usize {
        let mut removed = 0;
        if let Some(remote) = &self.remote {
            match remote.delete_prefix(prefix).await {
                Ok(n) => removed += n,
                Err(e) => self.note_remote_failure("invalidate", prefix, &e),
            }
        }
        removed += self.local.remove_prefix(prefix).await;
        tracing::info!(prefix, removed, "cache invalidated");
        removed
    }

    /// Remove every entry of a namespace.
    pub async fn invalidate_namespace(&self, ns: CacheNamespace) -> usize {
        self.invalidate_prefix(ns.prefix()).await
    }

    /// Remove everything.
    pub async fn clear(&self) {
        if let Some(remote) = &self.remote
            && let Err(e) = remote.delete_prefix("").await
        {
            self.note_remote_failure("clear", "*", &e);
        }
        self.local.clear().await;
    }

    /// Counters and a snapshot of the in-process backend.
    pub async fn stats(&self) -> CacheStats {
        let evicted = self.local.expired_total();
        let now = Utc::now();
        let mut fresh_keys: Vec<String> = self
            .local
            .snapshot()
            .into_iter()
            .filter(|(_, e)| e.age_at(now) == EntryAge::Fresh)
            .map(|(k, _)| k)
            .collect();
        fresh_keys.sort();
        CacheStats {
            local_entries: self.local.len().await,
            evicted,
            fresh_keys,
            hits: self.counters.hits.load(Ordering::Relaxed),
            stale_hits: self.counters.stale_hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            remote_failures: self.counters.remote_failures.load(Ordering::Relaxed),
            remote_configured: self.remote.is_some(),
        }
    }

    /// Evict in-process entries past their stale window; returns the count evicted.
    pub async fn sweep(&self) -> usize {
        let removed = self.local.run_pending().await;
        if removed > 0 {
            tracing::info!(removed, "cache cleanup removed expired entries");
        }
        removed
    }

    /// Start a background task that sweeps every `interval`.
    ///
    /// The task runs until the returned handle is stopped or dropped.
    #[must_use]
    pub fn spawn_sweeper(self: &Arc<Self>, interval: Duration) -> TaskHandle {
        let store = Arc::clone(self);
        let (stop_tx, mut stop_rx) = tokio::sync::oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let interval = interval.max(Duration::from_millis(1));
            let start = tokio::time::Instant::now() + interval;
            let mut ticker = tokio::time::interval_at(start, interval);
            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {
                        store.sweep().await;
                    }
                }
            }
            tracing::debug!("cache sweeper stopped");
        });
        TaskHandle::new(task, stop_tx)
    }
}
