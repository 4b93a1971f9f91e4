//! Configuration file loading for orca-chat
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. `ORCA_CHAT_*` environment variables
//! 3. Project root: `./orca-chat.toml` or `./.orca-chat.toml`
//! 4. Global: `{config_dir}/orca-chat/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_MODEL_FILE, DEFAULT_TOKENIZER_FILE, FileConfig,
    FileGenerationConfig, FileLoggingConfig, FileModelConfig, FileUiConfig,
};
pub use loader::{ConfigLoader, ConfigSource};
