// GitHub API module.
// Provides the client, the repository source seam, and response types.

pub mod client;
pub mod endpoints;
pub mod source;
pub mod types;

pub use client::GitHubClient;
pub use source::RepoSource;
pub use types::*;
