// Repository list cache on top of the key-value store.
// Entries are keyed by username and expire after a fixed TTL.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::CacheError;
use crate::github::Repository;

use super::kv::{KeyValueStore, SharedStore};
use super::paths::{REPOS_KEY_PREFIX, repos_key};

/// Freshness window for cached repository lists: 5 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// A cached repository list with its write time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub username: String,
    pub cached_at: DateTime<Utc>,
    pub repos: Vec<Repository>,
}

impl CacheEntry {
    pub fn new(username: &str, repos: Vec<Repository>, now: DateTime<Utc>) -> Self {
        Self {
            username: username.to_string(),
            cached_at: now,
            repos,
        }
    }

    /// Check if this entry has expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let elapsed = now
            .signed_duration_since(self.cached_at)
            .to_std()
            .unwrap_or(Duration::MAX);

        elapsed > ttl
    }
}

/// Best-effort cache of repository lists. Never surfaces an error.
#[derive(Clone)]
pub struct RepoCache {
    store: SharedStore,
    ttl: Duration,
}

impl RepoCache {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            ttl: DEFAULT_TTL,
        }
    }

    /// Cached list for `username`, or `None` when absent, malformed, or stale.
    pub fn get(&self, username: &str) -> Option<Vec<Repository>> {
        self.get_at(username, Utc::now())
    }

    pub fn get_at(&self, username: &str, now: DateTime<Utc>) -> Option<Vec<Repository>> {
        match self.lookup(username, now) {
            Ok(repos) => {
                debug!(username, count = repos.len(), "repo cache hit");
                Some(repos)
            }
            Err(e) => {
                debug!(username, reason = %e, "repo cache miss");
                None
            }
        }
    }

    /// Store `repos` for `username` and prune other users' expired lists.
    ///
    /// Write failures are logged and dropped. Blocks on store I/O.
    pub fn put(&self, username: &str, repos: &[Repository]) {
        self.put_at(username, repos, Utc::now());
    }

    pub fn put_at(&self, username: &str, repos: &[Repository], now: DateTime<Utc>) {
        if let Err(e) = self.write(username, repos, now) {
            warn!(username, error = %e, "failed to cache repositories");
        }
    }

    fn lookup(&self, username: &str, now: DateTime<Utc>) -> Result<Vec<Repository>, CacheError> {
        let raw = {
            let store = self
                .store
                .lock()
                .map_err(|e| CacheError::Unavailable(e.to_string()))?;
            store
                .get(&repos_key(username))
                .map_err(|e| CacheError::Unavailable(e.to_string()))?
        };

        let raw = raw.ok_or_else(|| CacheError::Miss(username.to_string()))?;
        let entry: CacheEntry =
            serde_json::from_str(&raw).map_err(|e| CacheError::Malformed(e.to_string()))?;

        if entry.is_expired_at(now, self.ttl) {
            return Err(CacheError::Expired {
                age_secs: now.signed_duration_since(entry.cached_at).num_seconds(),
            });
        }

        Ok(entry.repos)
    }

    fn write(
        &self,
        username: &str,
        repos: &[Repository],
        now: DateTime<Utc>,
    ) -> Result<(), CacheError> {
        let key = repos_key(username);
        let entry = CacheEntry::new(username, repos.to_vec(), now);
        let json =
            serde_json::to_string(&entry).map_err(|e| CacheError::Malformed(e.to_string()))?;

        let mut store = self
            .store
            .lock()
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;
        store
            .set(&key, &json)
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;

        for stale in stale_keys(&*store, &key, now, self.ttl) {
            store
                .remove(&stale)
                .map_err(|e| CacheError::Unavailable(e.to_string()))?;
            debug!(key = %stale, "pruned expired repo cache entry");
        }
        Ok(())
    }
}

/// Repo list keys other than `keep` that are expired or unreadable at `now`.
fn stale_keys(
    store: &dyn KeyValueStore,
    keep: &str,
    now: DateTime<Utc>,
    ttl: Duration,
) -> Vec<String> {
    store
        .keys()
        .into_iter()
        .filter(|key| key.starts_with(REPOS_KEY_PREFIX) && key != keep)
        .filter(|key| {
            store
                .get(key)
                .ok()
                .flatten()
                .and_then(|raw| serde_json::from_str::<CacheEntry>(&raw).ok())
                .is_none_or(|entry| entry.is_expired_at(now, ttl))
        })
        .collect()
}
