// Repository fetcher.
// Serves repository lists from the cache when fresh, else from the remote.

use std::sync::Arc;

use tracing::{info, warn};

use crate::cache::RepoCache;
use crate::error::Result;
use crate::github::{RepoSource, Repository};

pub struct RepoFetcher {
    source: Arc<dyn RepoSource>,
    cache: RepoCache,
    read_cache: bool,
}

impl RepoFetcher {
    pub fn new(source: Arc<dyn RepoSource>, cache: RepoCache) -> Self {
        Self {
            source,
            cache,
            read_cache: true,
        }
    }

    /// Skip cache reads. Successful fetches are still written back.
    pub fn bypass_cache_reads(mut self) -> Self {
        self.read_cache = false;
        self
    }

    /// Repository list for `username`. Network failures propagate unretried.
    pub async fn fetch(&self, username: &str) -> Result<Vec<Repository>> {
        if self.read_cache {
            if let Some(repos) = self.cache.get(username) {
                return Ok(repos);
            }
        }

        let repos = self.source.list_user_repos(username).await?;
        info!(username, count = repos.len(), "fetched repositories");

        // Store writes hit the disk while holding the store lock
        let cache = self.cache.clone();
        let (owner, cached) = (username.to_string(), repos.clone());
        let write = tokio::task::spawn_blocking(move || cache.put(&owner, &cached));
        if let Err(e) = write.await {
            warn!(username, error = %e, "cache write task failed");
        }
        Ok(repos)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::cache::{MemoryStore, shared};
    use crate::error::FolioError;
    use crate::github::test_repo;

    /// In-memory remote that counts list calls.
    #[derive(Default)]
    pub(crate) struct FakeSource {
        pub repos: HashMap<String, Vec<Repository>>,
        pub readmes: HashMap<String, String>,
        pub status: Option<u16>,
        pub list_calls: Mutex<usize>,
    }

    impl FakeSource {
        pub fn with_repos(username: &str, repos: Vec<Repository>) -> Self {
            let mut source = Self::default();
            source.repos.insert(username.to_string(), repos);
            source
        }

        pub fn failing(status: u16) -> Self {
            Self {
                status: Some(status),
                ..Self::default()
            }
        }

        pub fn calls(&self) -> usize {
            *self.list_calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl RepoSource for FakeSource {
        async fn list_user_repos(&self, username: &str) -> Result<Vec<Repository>> {
            *self.list_calls.lock().unwrap() += 1;
            if let Some(status) = self.status {
                return Err(FolioError::Network {
                    status,
                    reason: "Forbidden".to_string(),
                });
            }
            Ok(self.repos.get(username).cloned().unwrap_or_default())
        }

        async fn readme_raw(&self, owner: &str, repo: &str) -> Result<String> {
            self.readmes
                .get(&format!("{}/{}", owner, repo))
                .cloned()
                .ok_or(FolioError::Network {
                    status: 404,
                    reason: "Not Found".to_string(),
                })
        }
    }

    #[tokio::test]
    async fn test_cache_hit_skips_network() {
        let source = Arc::new(FakeSource::with_repos("alice", vec![test_repo("site")]));
        let fetcher = RepoFetcher::new(source.clone(), RepoCache::new(shared(MemoryStore::new())));

        let first = fetcher.fetch("alice").await.unwrap();
        let second = fetcher.fetch("alice").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_bypass_still_writes_cache() {
        let source = Arc::new(FakeSource::with_repos("alice", vec![test_repo("site")]));
        let cache = RepoCache::new(shared(MemoryStore::new()));
        let fetcher = RepoFetcher::new(source.clone(), cache.clone()).bypass_cache_reads();

        fetcher.fetch("alice").await.unwrap();
        fetcher.fetch("alice").await.unwrap();

        assert_eq!(source.calls(), 2);
        assert!(cache.get("alice").is_some());
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let source = Arc::new(FakeSource::failing(403));
        let cache = RepoCache::new(shared(MemoryStore::new()));
        let fetcher = RepoFetcher::new(source.clone(), cache.clone());

        let err = fetcher.fetch("alice").await.unwrap_err();
        assert!(matches!(err, FolioError::Network { status: 403, .. }));

        fetcher.fetch("alice").await.unwrap_err();
        assert_eq!(source.calls(), 2);
        assert!(cache.get("alice").is_none());
    }

    #[tokio::test]
    async fn test_fetch_over_http_populates_cache() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/users/alice/repos")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"name": "site"}, {"name": "blog", "fork": true}]"#)
            .expect(1)
            .create_async()
            .await;

        let client = crate::github::GitHubClient::new(&server.url(), None).unwrap();
        let cache = RepoCache::new(shared(MemoryStore::new()));
        let fetcher = RepoFetcher::new(Arc::new(client), cache.clone());

        let repos = fetcher.fetch("alice").await.unwrap();
        assert_eq!(repos.len(), 2);
        let again = fetcher.fetch("alice").await.unwrap();
        assert_eq!(again, repos);

        assert_eq!(cache.get("alice").map(|r| r.len()), Some(2));
        mock.assert_async().await;
    }
}
