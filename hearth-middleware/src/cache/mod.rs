//! Shared key/value cache with a fresh window and a stale grace window.
//!
//! Values are stored as JSON strings inside a [`StoredEntry`] that carries
//! its own deadlines, so both backends agree on freshness. A read between
//! `expires_at` and `stale_until` is served as [`CacheLookup::Stale`]; past
//! `stale_until` the entry is gone.

mod memory;
mod remote;
mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use memory::MemoryBackend;
pub use remote::RestBackend;
pub use store::{CacheStats, CacheStore};

/// A cached payload with its deadlines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEntry {
    /// JSON-encoded value.
    pub payload: String,
    /// End of the fresh window.
    pub expires_at: DateTime<Utc>,
    /// End of the stale window; never earlier than `expires_at`.
    pub stale_until: DateTime<Utc>,
}

/// Age class of a [`StoredEntry`] at some instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryAge {
    /// Inside the fresh window.
    Fresh,
    /// Expired but still servable.
    Stale,
    /// Past the stale window.
    Dead,
}

impl StoredEntry {
    /// Classify the entry at `now`.
    #[must_use]
    pub fn age_at(&self, now: DateTime<Utc>) -> EntryAge {
        if now < self.expires_at {
            EntryAge::Fresh
        } else if now < self.stale_until {
            EntryAge::Stale
        } else {
            EntryAge::Dead
        }
    }
}

/// Outcome of a cache read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup<V> {
    /// Inside the fresh window.
    Fresh(V),
    /// Expired but inside the stale window.
    Stale(V),
    /// Absent, dead or undecodable.
    Miss,
}

impl<V> CacheLookup<V> {
    /// The value for fresh and stale hits.
    pub fn into_value(self) -> Option<V> {
        match self {
            Self::Fresh(v) | Self::Stale(v) => Some(v),
            Self::Miss => None,
        }
    }

    /// Whether a value was found.
    #[must_use]
    pub const fn is_hit(&self) -> bool {
        !matches!(self, Self::Miss)
    }

    /// Whether the value came from the stale window.
    #[must_use]
    pub const fn is_stale(&self) -> bool {
        matches!(self, Self::Stale(_))
    }
}
