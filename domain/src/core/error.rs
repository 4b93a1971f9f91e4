//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Prompt cannot be empty")]
    EmptyPrompt,

    #[error("Invalid token limit: {0}")]
    InvalidTokenLimit(String),

    #[error("Invalid temperature: {0}")]
    InvalidTemperature(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_prompt_display() {
        assert_eq!(DomainError::EmptyPrompt.to_string(), "Prompt cannot be empty");
    }

    #[test]
    fn test_invalid_temperature_display() {
        let error = DomainError::InvalidTemperature("-1".to_string());
        assert_eq!(error.to_string(), "Invalid temperature: -1");
    }
}
