// Command line and environment configuration.
// Flags fall back to environment variables, then to built-in defaults.

use std::path::PathBuf;

use clap::Parser;

use crate::cache::paths;
use crate::error::{FolioError, Result};
use crate::github::client::GITHUB_API_BASE;

#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "Browse a GitHub user's public repositories as a portfolio", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// GitHub username to load, overriding the saved one
    #[arg(short, long, env = "FOLIO_USERNAME")]
    pub username: Option<String>,

    /// GitHub API base URL
    #[arg(long, env = "FOLIO_API_URL", default_value = GITHUB_API_BASE)]
    pub api_url: String,

    /// Token for a higher rate limit; public repos need none
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Directory for the saved state and log file
    #[arg(long, env = "FOLIO_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Protocol prefixed to protocol-relative readme image URLs
    #[arg(long, default_value = "https:")]
    pub page_protocol: String,

    /// Always hit the API; responses are still cached
    #[arg(long)]
    pub no_cache: bool,
}

/// Resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub username: Option<String>,
    pub api_url: String,
    pub token: Option<String>,
    pub data_dir: PathBuf,
    pub page_protocol: String,
    pub read_cache: bool,
}

impl Settings {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let data_dir = match cli.data_dir {
            Some(dir) => dir,
            None => paths::cache_dir()
                .ok_or_else(|| FolioError::Other("no cache directory available".to_string()))?,
        };

        Ok(Self {
            username: cli.username,
            api_url: cli.api_url,
            token: cli.token,
            data_dir,
            page_protocol: cli.page_protocol,
            read_cache: !cli.no_cache,
        })
    }

    pub fn store_path(&self) -> PathBuf {
        paths::store_path(&self.data_dir)
    }
}
