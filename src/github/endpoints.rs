// GitHub API endpoint functions.
// Implements the repository source on top of the REST client.

use async_trait::async_trait;

use crate::error::Result;

use super::client::{ACCEPT_JSON, ACCEPT_RAW, GitHubClient};
use super::source::RepoSource;
use super::types::Repository;

/// Page size for the repository list; only the first page is fetched.
pub const REPOS_PER_PAGE: u32 = 100;

impl GitHubClient {
    /// Get public repositories for a user, most recently updated first.
    pub async fn get_user_repos(&self, username: &str) -> Result<Vec<Repository>> {
        let params = [
            ("per_page", REPOS_PER_PAGE.to_string()),
            ("sort", "updated".to_string()),
        ];
        let response = self
            .get_with_params(
                &format!("/users/{}/repos", urlencoding::encode(username)),
                &params,
                ACCEPT_JSON,
            )
            .await?;
        let repos: Vec<Repository> = response.json().await?;
        Ok(repos)
    }

    /// Get a repository's readme as raw text.
    pub async fn get_readme(&self, owner: &str, repo: &str) -> Result<String> {
        let response = self
            .get(
                &format!(
                    "/repos/{}/{}/readme",
                    urlencoding::encode(owner),
                    urlencoding::encode(repo)
                ),
                ACCEPT_RAW,
            )
            .await?;
        let text = response.text().await?;
        Ok(text)
    }
}

#[async_trait]
impl RepoSource for GitHubClient {
    async fn list_user_repos(&self, username: &str) -> Result<Vec<Repository>> {
        self.get_user_repos(username).await
    }

    async fn readme_raw(&self, owner: &str, repo: &str) -> Result<String> {
        self.get_readme(owner, repo).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[tokio::test]
    async fn test_get_user_repos_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/users/alice/repos")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("per_page".into(), "100".into()),
                Matcher::UrlEncoded("sort".into(), "updated".into()),
            ]))
            .match_header("accept", ACCEPT_JSON)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"name": "site", "language": "HTML", "fork": false}]"#)
            .create_async()
            .await;

        let client = GitHubClient::new(&server.url(), None).unwrap();
        let repos = client.get_user_repos("alice").await.unwrap();

        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].name, "site");
        assert_eq!(repos[0].language.as_deref(), Some("HTML"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_username_is_path_encoded() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/users/a%20b/repos")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let client = GitHubClient::new(&server.url(), None).unwrap();
        let repos = client.get_user_repos("a b").await.unwrap();

        assert!(repos.is_empty());
        mock.assert_async().await;
    }
}
