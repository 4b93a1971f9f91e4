//! Terminal chat window built on ratatui
//!
//! A transcript pane, a prompt field, the token-limit and temperature
//! fields, and a status bar, driven by a vim-like Normal/Insert mode system.

mod app;
mod field;
mod mode;
mod state;
mod widgets;

pub use app::TuiApp;
pub use field::TextField;
pub use mode::{Focus, InputMode, KeyAction, handle_key};
pub use state::{TuiState, VersionLabel};
