//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application types
//! once validated.

mod generation;
mod logging;
mod model;
mod ui;

pub use generation::FileGenerationConfig;
pub use logging::FileLoggingConfig;
pub use model::{DEFAULT_MODEL_FILE, DEFAULT_TOKENIZER_FILE, FileModelConfig};
pub use ui::FileUiConfig;

use orca_application::SessionConfig;
use orca_domain::DomainError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("model.file cannot be empty")]
    EmptyModelFile,

    #[error("model.tokenizer cannot be empty")]
    EmptyTokenizerFile,

    #[error("model.context_length ({context_length}) must exceed generation.max_tokens ({max_tokens})")]
    ContextTooSmall {
        context_length: usize,
        max_tokens: u32,
    },

    #[error("ui.tick_millis cannot be 0")]
    InvalidTick,

    #[error("invalid [generation] settings: {0}")]
    InvalidGeneration(#[from] DomainError),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model files and sampling setup
    pub model: FileModelConfig,
    /// Initial generation parameters
    pub generation: FileGenerationConfig,
    /// Interface settings
    pub ui: FileUiConfig,
    /// Conversation log settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.model.file.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelFile);
        }
        if self.model.tokenizer.trim().is_empty() {
            return Err(ConfigValidationError::EmptyTokenizerFile);
        }

        let params = self.generation.to_params()?;
        if self.model.context_length <= params.max_tokens as usize {
            return Err(ConfigValidationError::ContextTooSmall {
                context_length: self.model.context_length,
                max_tokens: params.max_tokens,
            });
        }

        if self.ui.tick_millis == 0 {
            return Err(ConfigValidationError::InvalidTick);
        }

        Ok(())
    }

    /// Build the session settings the chat controller starts from.
    pub fn session_config(&self) -> Result<SessionConfig, ConfigValidationError> {
        let params = self.generation.to_params()?;
        Ok(SessionConfig::default()
            .with_show_timing(self.ui.show_timing)
            .with_initial_params(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orca_domain::GenerationParams;
    use std::path::PathBuf;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[model]
dir = "/opt/models"
file = "openhermes.Q4_K_M.gguf"
tokenizer = "hermes-tokenizer.json"
system_prompt = "You are helpful."
seed = 7
context_length = 2048

[generation]
max_tokens = 512
temperature = 0.2

[ui]
show_timing = false
tick_millis = 100

[logging]
conversation_log = "/tmp/orca.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.model.dir, Some(PathBuf::from("/opt/models")));
        assert_eq!(config.model.file, "openhermes.Q4_K_M.gguf");
        assert_eq!(config.model.tokenizer, "hermes-tokenizer.json");
        assert_eq!(config.model.system_prompt(), Some("You are helpful."));
        assert_eq!(config.model.seed, 7);
        assert_eq!(config.model.context_length, 2048);
        assert_eq!(config.generation.max_tokens, 512);
        assert_eq!(config.generation.temperature, 0.2);
        assert!(!config.ui.show_timing);
        assert_eq!(config.ui.tick_millis, 100);
        assert_eq!(
            config.logging.conversation_log,
            Some(PathBuf::from("/tmp/orca.jsonl"))
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[generation]
max_tokens = 64
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.generation.max_tokens, 64);
        // Defaults should apply
        assert_eq!(config.generation.temperature, 0.7);
        assert_eq!(config.model.file, DEFAULT_MODEL_FILE);
        assert!(config.ui.show_timing);
        assert!(config.logging.conversation_log.is_none());
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert!(config.model.dir.is_none());
        assert_eq!(config.generation.max_tokens, 200);
        assert!(config.ui.show_timing);
        assert_eq!(config.ui.tick_millis, 250);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_model_file() {
        let toml_str = r#"
[model]
file = "  "
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::EmptyModelFile)
        ));
    }

    #[test]
    fn test_validate_zero_tick() {
        let toml_str = r#"
[ui]
tick_millis = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidTick)
        ));
    }

    #[test]
    fn test_validate_negative_temperature() {
        let toml_str = r#"
[generation]
temperature = -0.5
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidGeneration(
                DomainError::InvalidTemperature(_)
            ))
        ));
    }

    #[test]
    fn test_validate_context_smaller_than_generation() {
        let toml_str = r#"
[model]
context_length = 100

[generation]
max_tokens = 100
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::ContextTooSmall { .. })
        ));
    }

    #[test]
    fn test_session_config_carries_file_values() {
        let toml_str = r#"
[generation]
max_tokens = 32
temperature = 0.0

[ui]
show_timing = false
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let session = config.session_config().unwrap();
        assert!(!session.show_timing);
        assert_eq!(
            session.initial_params,
            GenerationParams::try_new(32, 0.0).unwrap()
        );
    }
}
