//! Generation request and result

use super::params::GenerationParams;
use crate::core::prompt::Prompt;
use std::time::{Duration, Instant};

/// Immutable snapshot of a submission (Value Object)
///
/// Captured on the interactive thread at submit time and moved into the
/// worker; nothing mutates it afterwards.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    prompt: Prompt,
    params: GenerationParams,
    submitted_at: Instant,
}

impl GenerationRequest {
    pub fn new(prompt: Prompt, params: GenerationParams) -> Self {
        Self::at(prompt, params, Instant::now())
    }

    pub fn at(prompt: Prompt, params: GenerationParams, submitted_at: Instant) -> Self {
        Self {
            prompt,
            params,
            submitted_at,
        }
    }

    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    pub fn params(&self) -> GenerationParams {
        self.params
    }

    pub fn submitted_at(&self) -> Instant {
        self.submitted_at
    }

    /// Wall-clock time since submission
    pub fn elapsed(&self) -> Duration {
        self.submitted_at.elapsed()
    }
}

/// What the backend produced for a request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    pub text: String,
    pub elapsed: Duration,
}

impl GenerationResult {
    pub fn new(text: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            text: text.into(),
            elapsed,
        }
    }

    /// The text with one leading space removed.
    ///
    /// Sentencepiece tokenizers often emit a word-boundary space as the
    /// first character of a reply.
    pub fn cleaned_text(&self) -> &str {
        self.text.strip_prefix(' ').unwrap_or(&self.text)
    }
}
