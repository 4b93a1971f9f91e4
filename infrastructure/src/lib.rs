//! Infrastructure layer for orca-chat
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the local GGUF model backend (feature `gguf`), the
//! JSONL conversation logger, and configuration file loading.

pub mod config;
#[cfg(feature = "gguf")]
pub mod gguf;
pub mod logging;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigSource, ConfigValidationError, FileConfig};
#[cfg(feature = "gguf")]
pub use gguf::{GgufChatBackend, GgufConfig, GgufError};
pub use logging::JsonlConversationLogger;
