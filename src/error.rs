// Error types for folio.
// Covers GitHub API failures, cache and readme faults, and input validation.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("GitHub API error: {status} {reason}")]
    Network { status: u16, reason: String },

    #[error("GitHub request failed: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Readme error: {0}")]
    Readme(#[from] ReadmeResolutionError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl FolioError {
    /// Text shown in the status line when a load fails.
    pub fn user_message(&self) -> String {
        match self {
            FolioError::Network { .. } | FolioError::Api(_) => {
                format!("{}. You may be rate-limited.", self)
            }
            other => other.to_string(),
        }
    }
}

/// Cache faults. Always recovered by treating the lookup as a miss.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("no cached entry for {0}")]
    Miss(String),

    #[error("cached entry is malformed: {0}")]
    Malformed(String),

    #[error("cached entry expired {age_secs}s after write")]
    Expired { age_secs: i64 },

    #[error("cache storage unavailable: {0}")]
    Unavailable(String),
}

/// Readme image lookup faults. Always recovered by keeping the placeholder.
#[derive(Error, Debug)]
pub enum ReadmeResolutionError {
    #[error("readme request returned HTTP {0}")]
    Status(u16),

    #[error("readme request failed: {0}")]
    Transport(String),
}

/// Invalid user input, reported inline before any network call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a GitHub username.")]
    EmptyUsername,

    #[error("Please paste a public Pinterest board URL.")]
    EmptyBoardUrl,

    #[error(
        "Invalid Pinterest board URL. It should look like https://www.pinterest.com/<user>/<board>/"
    )]
    InvalidBoardUrl,
}

pub type Result<T> = std::result::Result<T, FolioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_message_carries_status_and_hint() {
        let err = FolioError::Network {
            status: 403,
            reason: "Forbidden".to_string(),
        };
        let msg = err.user_message();
        assert!(msg.contains("403"));
        assert!(msg.contains("Forbidden"));
        assert!(msg.contains("rate-limited"));
    }

    #[test]
    fn test_validation_message_is_plain() {
        let err = FolioError::from(ValidationError::EmptyUsername);
        assert_eq!(err.user_message(), "Please enter a GitHub username.");
    }
}
