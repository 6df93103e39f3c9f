// GitHub API HTTP client.
// Handles optional authentication, rate limit tracking, and status checking.

use std::sync::{Arc, Mutex};

use reqwest::{
    Client, Response,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};
use tracing::debug;

use crate::error::{FolioError, Result};

use super::types::RateLimit;

pub const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// JSON media type for list endpoints.
pub const ACCEPT_JSON: &str = "application/vnd.github.v3+json";
/// Raw media type for file content endpoints.
pub const ACCEPT_RAW: &str = "application/vnd.github.v3.raw";

/// GitHub API client. Cheap to clone; clones share rate limit state.
#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: String,
    rate_limit: Arc<Mutex<RateLimit>>,
}

impl GitHubClient {
    /// Create a client against `base_url`. Public endpoints work without a token.
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();

        if let Some(token) = token.filter(|t| !t.is_empty()) {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| FolioError::Other(e.to_string()))?,
            );
        }
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("folio-tui"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(FolioError::Api)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            rate_limit: Arc::new(Mutex::new(RateLimit::default())),
        })
    }

    /// Get the most recent rate limit information.
    pub fn rate_limit(&self) -> RateLimit {
        self.rate_limit
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Make a GET request with the given `Accept` media type.
    pub async fn get(&self, endpoint: &str, accept: &'static str) -> Result<Response> {
        self.get_with_params(endpoint, &[] as &[(&str, &str)], accept)
            .await
    }

    /// Make a GET request with query parameters.
    pub async fn get_with_params<T: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        params: &T,
        accept: &'static str,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .header(ACCEPT, HeaderValue::from_static(accept))
            .query(params)
            .send()
            .await
            .map_err(FolioError::Api)?;

        self.update_rate_limit(&response);
        Self::check_response(response)
    }

    /// Update rate limit from response headers.
    fn update_rate_limit(&self, response: &Response) {
        let header = |name: &str| -> Option<u64> {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
        };

        let Ok(mut rate_limit) = self.rate_limit.lock() else {
            return;
        };

        if let Some(limit) = header("x-ratelimit-limit") {
            rate_limit.limit = limit;
        }
        if let Some(remaining) = header("x-ratelimit-remaining") {
            rate_limit.remaining = remaining;
        }
        if let Some(reset) = header("x-ratelimit-reset") {
            rate_limit.reset = reset;
        }
    }

    /// Reject any non-success status with its code and reason.
    fn check_response(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        Err(FolioError::Network {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_non_success_maps_to_network_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/users/alice/repos")
            .with_status(403)
            .with_header("x-ratelimit-limit", "60")
            .with_header("x-ratelimit-remaining", "0")
            .create_async()
            .await;

        let client = GitHubClient::new(&server.url(), None).unwrap();
        let err = client
            .get("/users/alice/repos", ACCEPT_JSON)
            .await
            .unwrap_err();

        match err {
            FolioError::Network { status, reason } => {
                assert_eq!(status, 403);
                assert_eq!(reason, "Forbidden");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let rate = client.rate_limit();
        assert_eq!(rate.limit, 60);
        assert_eq!(rate.remaining, 0);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_sends_accept_and_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/alice/kit/readme")
            .match_header("accept", ACCEPT_RAW)
            .match_header("authorization", "Bearer secret")
            .with_status(200)
            .with_body("# kit")
            .create_async()
            .await;

        let client = GitHubClient::new(&format!("{}/", server.url()), Some("secret")).unwrap();
        let response = client
            .get("/repos/alice/kit/readme", ACCEPT_RAW)
            .await
            .unwrap();

        assert_eq!(response.text().await.unwrap(), "# kit");
        mock.assert_async().await;
    }
}
