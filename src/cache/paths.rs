// Cache path utilities.
// Resolves where the persisted store and the log file live on disk.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Get the base cache directory (~/.cache/folio on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "folio").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path to the key-value store file inside a data directory.
pub fn store_path(dir: &Path) -> PathBuf {
    dir.join("store.json")
}

/// File name of the application log inside a data directory.
pub const LOG_FILE_NAME: &str = "folio.log";

/// Prefix shared by every cached repository list key.
pub const REPOS_KEY_PREFIX: &str = "gh_repos_";

/// Store key for a user's cached repository list.
pub fn repos_key(username: &str) -> String {
    format!("{}{}", REPOS_KEY_PREFIX, username)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_path() {
        let p = store_path(Path::new("/tmp/folio"));
        assert!(p.ends_with("folio/store.json"));
    }

    #[test]
    fn test_repos_key() {
        assert_eq!(repos_key("alice"), "gh_repos_alice");
    }
}
