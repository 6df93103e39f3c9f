// folio: a terminal portfolio of a GitHub user's public repositories.
// Wires configuration, logging, the persistent store and the TUI together.

mod app;
mod cache;
mod config;
mod error;
mod github;
mod logging;
mod portfolio;
mod state;
mod ui;

use clap::Parser;
use tracing::{error, info};

use crate::app::App;
use crate::cache::{FileStore, shared};
use crate::config::{Cli, Settings};
use crate::error::Result;
use crate::github::GitHubClient;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::from_cli(Cli::parse())?;
    let _log_guard = logging::init_logging(&settings.data_dir)?;
    info!(data_dir = %settings.data_dir.display(), "starting folio");

    let store = shared(FileStore::open(&settings.store_path()));
    let client = GitHubClient::new(&settings.api_url, settings.token.as_deref())?;

    let mut app = App::new(&settings, store, client);
    let initial_username = app.controller.init(settings.username.as_deref());

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal, initial_username);
    ratatui::restore();

    if let Err(e) = &result {
        error!(error = %e, "terminal loop failed");
    }
    Ok(result?)
}
