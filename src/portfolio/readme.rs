// Readme image resolver.
// Best-effort lookup of the first image referenced in a repository's readme.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::debug;

use crate::error::{FolioError, ReadmeResolutionError};
use crate::github::RepoSource;

/// Base for relative readme paths.
pub const RAW_CONTENT_BASE: &str = "https://raw.githubusercontent.com";
/// Branch used when the repository reports none.
pub const DEFAULT_BRANCH: &str = "main";

static MARKDOWN_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)!\[[^\]]*\]\(([^)]+)\)").expect("valid regex"));
static HTML_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<img[^>]+src=["']?([^"' >]+)["']?"#).expect("valid regex")
});
static ABSOLUTE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("valid regex"));

/// First image reference in readme text: a Markdown image, else an `<img src>`.
///
/// A blank Markdown target falls through to the `<img>` search.
pub fn extract_image_ref(text: &str) -> Option<&str> {
    let markdown = first_capture(&MARKDOWN_IMAGE, text);
    markdown.or_else(|| first_capture(&HTML_IMAGE, text))
}

fn first_capture<'t>(pattern: &Regex, text: &'t str) -> Option<&'t str> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
}

/// Turn a readme image reference into an absolute URL.
pub fn resolve_image_url(
    reference: &str,
    owner: &str,
    repo: &str,
    branch: Option<&str>,
    page_protocol: &str,
) -> String {
    if ABSOLUTE_URL.is_match(reference) {
        return reference.to_string();
    }
    if reference.starts_with("//") {
        return format!("{}{}", page_protocol, reference);
    }

    let cleaned = reference.strip_prefix("./").unwrap_or(reference);
    let cleaned = cleaned.strip_prefix('/').unwrap_or(cleaned);
    let branch = branch.filter(|b| !b.is_empty()).unwrap_or(DEFAULT_BRANCH);

    format!("{RAW_CONTENT_BASE}/{owner}/{repo}/{branch}/{cleaned}")
}

/// Resolves card images from readmes. Cheap to clone into spawned tasks.
#[derive(Clone)]
pub struct ReadmeResolver {
    source: Arc<dyn RepoSource>,
    page_protocol: String,
}

impl ReadmeResolver {
    pub fn new(source: Arc<dyn RepoSource>, page_protocol: &str) -> Self {
        Self {
            source,
            page_protocol: page_protocol.to_string(),
        }
    }

    /// Absolute URL of the readme's first image, or `None` on any failure.
    pub async fn resolve(&self, owner: &str, repo: &str, branch: Option<&str>) -> Option<String> {
        match self.try_resolve(owner, repo, branch).await {
            Ok(found) => found,
            Err(e) => {
                debug!(owner, repo, error = %e, "readme image lookup failed");
                None
            }
        }
    }

    async fn try_resolve(
        &self,
        owner: &str,
        repo: &str,
        branch: Option<&str>,
    ) -> Result<Option<String>, ReadmeResolutionError> {
        let text = self
            .source
            .readme_raw(owner, repo)
            .await
            .map_err(|e| match e {
                FolioError::Network { status, .. } => ReadmeResolutionError::Status(status),
                other => ReadmeResolutionError::Transport(other.to_string()),
            })?;

        let Some(reference) = extract_image_ref(&text) else {
            return Ok(None);
        };
        let url = resolve_image_url(reference, owner, repo, branch, &self.page_protocol);
        Ok(Some(url))
    }
}
