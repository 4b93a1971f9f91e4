//! Generation parameters and the lenient parsing of the numeric fields.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Token limit used when the field is empty or unparseable.
pub const DEFAULT_MAX_TOKENS: u32 = 200;

/// Temperature used when the field is empty or unparseable.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Sampling parameters for a single generation (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Maximum number of tokens to generate
    pub max_tokens: u32,
    /// Sampling temperature; `0.0` means greedy decoding
    pub temperature: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl GenerationParams {
    /// Strict constructor, used for configured initial values.
    pub fn try_new(max_tokens: u32, temperature: f32) -> Result<Self, DomainError> {
        if max_tokens == 0 {
            return Err(DomainError::InvalidTokenLimit(max_tokens.to_string()));
        }
        if !temperature.is_finite() || temperature < 0.0 {
            return Err(DomainError::InvalidTemperature(temperature.to_string()));
        }
        Ok(Self {
            max_tokens,
            temperature,
        })
    }

    /// Build parameters from raw field contents at submit time.
    ///
    /// Never fails: each field that cannot be parsed falls back to its
    /// default independently of the other.
    pub fn from_fields(token_field: &str, temperature_field: &str) -> Self {
        Self {
            max_tokens: parse_token_limit(token_field).unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: parse_temperature(temperature_field).unwrap_or(DEFAULT_TEMPERATURE),
        }
    }
}

/// Parse the token-limit field. `None` on empty, malformed or overflowing input.
pub fn parse_token_limit(field: &str) -> Option<u32> {
    field.trim().parse::<u32>().ok()
}

/// Parse the temperature field. `None` on empty, malformed or non-finite input.
pub fn parse_temperature(field: &str) -> Option<f32> {
    field
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|t| t.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = GenerationParams::default();
        assert_eq!(params.max_tokens, 200);
        assert_eq!(params.temperature, 0.7);
    }

    #[test]
    fn test_from_fields_parses_values() {
        let params = GenerationParams::from_fields("512", "0.2");
        assert_eq!(params.max_tokens, 512);
        assert_eq!(params.temperature, 0.2);
    }

    #[test]
    fn test_from_fields_empty_falls_back() {
        let params = GenerationParams::from_fields("", "");
        assert_eq!(params, GenerationParams::default());
    }

    #[test]
    fn test_from_fields_falls_back_per_field() {
        let params = GenerationParams::from_fields("abc", "1.5");
        assert_eq!(params.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(params.temperature, 1.5);

        let params = GenerationParams::from_fields("64", "0..7");
        assert_eq!(params.max_tokens, 64);
        assert_eq!(params.temperature, DEFAULT_TEMPERATURE);
    }

    #[test]
    fn test_token_limit_overflow_falls_back() {
        assert_eq!(parse_token_limit("99999999999999"), None);
    }

    #[test]
    fn test_token_limit_leading_zeros() {
        assert_eq!(parse_token_limit("007"), Some(7));
    }

    #[test]
    fn test_temperature_rejects_non_finite() {
        assert_eq!(parse_temperature("inf"), None);
        assert_eq!(parse_temperature("NaN"), None);
    }

    #[test]
    fn test_temperature_accepts_partial_decimals() {
        assert_eq!(parse_temperature("1."), Some(1.0));
        assert_eq!(parse_temperature(".5"), Some(0.5));
    }

    #[test]
    fn test_try_new_validation() {
        assert!(GenerationParams::try_new(200, 0.7).is_ok());
        assert!(GenerationParams::try_new(200, 0.0).is_ok());
        assert!(matches!(
            GenerationParams::try_new(0, 0.7),
            Err(DomainError::InvalidTokenLimit(_))
        ));
        assert!(matches!(
            GenerationParams::try_new(200, -0.1),
            Err(DomainError::InvalidTemperature(_))
        ));
        assert!(matches!(
            GenerationParams::try_new(200, f32::NAN),
            Err(DomainError::InvalidTemperature(_))
        ));
    }
}
