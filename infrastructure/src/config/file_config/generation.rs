//! Generation configuration from TOML (`[generation]` section)

use orca_domain::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, DomainError, GenerationParams};
use serde::{Deserialize, Serialize};

/// Initial values of the token-limit and temperature fields
///
/// # Example
///
/// ```toml
/// [generation]
/// max_tokens = 400
/// temperature = 0.2
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl FileGenerationConfig {
    /// Convert to validated domain parameters.
    pub fn to_params(&self) -> Result<GenerationParams, DomainError> {
        GenerationParams::try_new(self.max_tokens, self.temperature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_domain() {
        let params = FileGenerationConfig::default().to_params().unwrap();
        assert_eq!(params, GenerationParams::default());
    }

    #[test]
    fn test_negative_temperature_rejected() {
        let config = FileGenerationConfig {
            max_tokens: 10,
            temperature: -1.0,
        };
        assert!(matches!(
            config.to_params(),
            Err(DomainError::InvalidTemperature(_))
        ));
    }
}
