// Pinterest board widget state.
// Persists the board URL and keeps the embed sized to the terminal.

use tracing::warn;

use crate::cache::SharedStore;
use crate::error::ValidationError;
use crate::portfolio::{BoardEmbed, sanitize_board_url};

use super::status::StatusMessage;

/// Store key for the persisted board URL.
pub const BOARD_URL_KEY: &str = "pinterestBoardUrl";

pub struct BoardWidget {
    store: SharedStore,
    embed: Option<BoardEmbed>,
    container_width: u32,
    message: Option<StatusMessage>,
}

impl BoardWidget {
    /// Restore the stored board, if any.
    pub fn init(store: SharedStore, container_width: u32) -> Self {
        let mut widget = Self {
            store,
            embed: None,
            container_width,
            message: None,
        };

        if let Some(url) = widget.stored_url() {
            widget.embed = Some(BoardEmbed::for_width(&url, container_width));
            widget.message = Some(StatusMessage::info("Loaded Pinterest board."));
        }
        widget
    }

    pub fn embed(&self) -> Option<&BoardEmbed> {
        self.embed.as_ref()
    }

    pub fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    pub fn stored_url(&self) -> Option<String> {
        let store = self.store.lock().ok()?;
        store
            .get(BOARD_URL_KEY)
            .ok()
            .flatten()
            .filter(|u| !u.is_empty())
    }

    /// Validate, persist, and embed a board URL.
    pub fn save(&mut self, raw: &str) -> Result<String, ValidationError> {
        let raw = raw.trim();
        let result = if raw.is_empty() {
            Err(ValidationError::EmptyBoardUrl)
        } else {
            sanitize_board_url(raw).ok_or(ValidationError::InvalidBoardUrl)
        };

        let url = match result {
            Ok(url) => url,
            Err(e) => {
                self.message = Some(StatusMessage::error(e.to_string()));
                return Err(e);
            }
        };

        self.persist(Some(&url));
        self.embed = Some(BoardEmbed::for_width(&url, self.container_width));
        self.message = Some(StatusMessage::info("Board saved. Rendering..."));
        Ok(url)
    }

    /// Forget the board and drop the embed.
    pub fn clear(&mut self) {
        self.persist(None);
        self.embed = None;
        self.message = Some(StatusMessage::info("Pinterest board cleared."));
    }

    /// Re-size the embed for a new container width.
    pub fn resize(&mut self, container_width: u32) {
        self.container_width = container_width;
        if let Some(embed) = self.embed.as_mut() {
            *embed = BoardEmbed::for_width(&embed.url, container_width);
        }
    }

    fn persist(&self, url: Option<&str>) {
        let Ok(mut store) = self.store.lock() else {
            return;
        };
        let result = match url {
            Some(url) => store.set(BOARD_URL_KEY, url),
            None => store.remove(BOARD_URL_KEY),
        };
        if let Err(e) = result {
            warn!(error = %e, "failed to persist board URL");
        }
    }
}
