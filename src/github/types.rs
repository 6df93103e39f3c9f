// GitHub API response types.
// Only the repository fields the portfolio consumes are modelled.

use serde::{Deserialize, Serialize};

/// Repository owner (user or organization).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Public GitHub repository as returned by `/users/{user}/repos`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub owner: Owner,
    #[serde(default)]
    pub default_branch: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub archived: bool,
    /// Kept as the raw API string so unparseable values can still be shown.
    #[serde(default)]
    pub updated_at: String,
}

impl Repository {
    /// Whether the repository is shown in the portfolio at all.
    pub fn is_displayable(&self) -> bool {
        !self.fork && !self.archived
    }
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Default)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}

#[cfg(test)]
pub fn test_repo(name: &str) -> Repository {
    Repository {
        id: 1,
        name: name.to_string(),
        html_url: format!("https://github.com/alice/{}", name),
        owner: Owner {
            id: 7,
            login: "alice".to_string(),
            avatar_url: None,
        },
        default_branch: Some("main".to_string()),
        updated_at: "2024-03-15T12:00:00Z".to_string(),
        ..Repository::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_api_repo() {
        let json = r#"{
            "id": 42,
            "name": "my-ui-kit",
            "full_name": "alice/my-ui-kit",
            "description": null,
            "language": "JavaScript",
            "html_url": "https://github.com/alice/my-ui-kit",
            "owner": { "login": "alice", "id": 7, "type": "User" },
            "default_branch": "trunk",
            "stargazers_count": 12,
            "fork": false,
            "archived": true,
            "updated_at": "2024-03-15T12:00:00Z"
        }"#;

        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.name, "my-ui-kit");
        assert_eq!(repo.description, None);
        assert_eq!(repo.owner.login, "alice");
        assert_eq!(repo.default_branch.as_deref(), Some("trunk"));
        assert_eq!(repo.stargazers_count, 12);
        assert!(repo.archived);
        assert!(!repo.is_displayable());
    }

    #[test]
    fn test_missing_fields_default() {
        let repo: Repository = serde_json::from_str(r#"{"name": "bare"}"#).unwrap();
        assert_eq!(repo.stargazers_count, 0);
        assert!(!repo.fork);
        assert!(repo.is_displayable());
        assert!(repo.owner.login.is_empty());
    }
}
