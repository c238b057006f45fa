use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use chrono::Utc;
use moka::Expiry;
use moka::future::Cache;
use moka::notification::RemovalCause;

use super::StoredEntry;

/// Keeps each entry until its `stale_until`.
struct UntilStale;

fn remaining(entry: &StoredEntry) -> Duration {
    (entry.stale_until - Utc::now())
        .to_std()
        .unwrap_or(Duration::ZERO)
}

impl Expiry<String, StoredEntry> for UntilStale {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &StoredEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(remaining(value))
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &StoredEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(remaining(value))
    }
}

/// In-process backend on a bounded `moka` cache.
///
/// Entries expire on their own at `stale_until`; [`MemoryBackend::run_pending`]
/// forces the eviction pass and reports how many entries it expired.
#[derive(Clone)]
pub struct MemoryBackend {
    entries: Cache<String, StoredEntry>,
    expired: Arc<AtomicU64>,
}

impl MemoryBackend {
    /// Backend holding at most `max_entries` entries.
    #[must_use]
    pub fn new(max_entries: u64) -> Self {
        let expired = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&expired);
        let entries = Cache::builder()
            .max_capacity(max_entries)
            .expire_after(UntilStale)
            .eviction_listener(move |_key, _value, cause| {
                if cause == RemovalCause::Expired {
                    counter.fetch_add(1, Ordering::Relaxed);
                }
            })
            .build();
        Self { entries, expired }
    }

    /// Read an entry.
    pub async fn get(&self, key: &str) -> Option<StoredEntry> {
        self.entries.get(key).await
    }

    /// Insert or replace an entry.
    pub async fn insert(&self, key: &str, entry: StoredEntry) {
        self.entries.insert(key.to_string(), entry).await;
    }

    /// Remove an entry; true when it existed.
    pub async fn remove(&self, key: &str) -> bool {
        self.entries.remove(key).await.is_some()
    }

    /// Remove every entry whose key starts with `prefix`.
    pub async fn remove_prefix(&self, prefix: &str) -> usize {
        let keys: Vec<Arc<String>> = self
            .entries
            .iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k)
            .collect();
        let mut removed = 0;
        for key in keys {
            if self.entries.remove(key.as_str()).await.is_some() {
                removed += 1;
            }
        }
        removed
    }

    /// Drop every entry.
    pub async fn clear(&self) {
        self.entries.invalidate_all();
        self.entries.run_pending_tasks().await;
    }

    /// Live entries with their values.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(String, StoredEntry)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_ref().clone(), v))
            .collect()
    }

    /// Run moka's pending maintenance and return the number of entries expired by it.
    pub async fn run_pending(&self) -> usize {
        let before = self.expired.load(Ordering::Relaxed);
        self.entries.run_pending_tasks().await;
        let after = self.expired.load(Ordering::Relaxed);
        usize::try_from(after.saturating_sub(before)).unwrap_or(usize::MAX)
    }

    /// Entries expired by maintenance since the backend was built.
    #[must_use]
    pub fn expired_total(&self) -> u64 {
        self.expired.load(Ordering::Relaxed)
    }

    /// Number of entries after pending maintenance.
    pub async fn len(&self) -> u64 {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count()
    }
}
