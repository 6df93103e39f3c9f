// Repository source seam.
// Abstracts the two remote calls the portfolio makes so tests can stub them.

use async_trait::async_trait;

use crate::error::Result;

use super::types::Repository;

#[async_trait]
pub trait RepoSource: Send + Sync {
    /// Up to 100 public repositories for `username`, most recently updated first.
    async fn list_user_repos(&self, username: &str) -> Result<Vec<Repository>>;

    /// Raw readme text for `owner/repo`.
    async fn readme_raw(&self, owner: &str, repo: &str) -> Result<String>;
}
