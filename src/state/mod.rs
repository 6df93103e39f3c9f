// State management module.
// Controller, board widget, and status messages behind the TUI.

pub mod board;
pub mod controller;
pub mod status;

pub use board::BoardWidget;
pub use controller::{Controller, ImageJob, LoadPhase};
pub use status::StatusMessage;
