// Portfolio pipeline.
// Fetch, classify, pick thumbnails, mine readme images, and build cards.

pub mod board;
pub mod category;
pub mod classify;
pub mod fetcher;
pub mod readme;
pub mod render;
pub mod thumbnail;

pub use board::{BoardEmbed, sanitize_board_url};
pub use category::Category;
pub use classify::classify;
pub use fetcher::RepoFetcher;
pub use readme::ReadmeResolver;
pub use render::{Card, CardSlot, render_card, skeletons};
