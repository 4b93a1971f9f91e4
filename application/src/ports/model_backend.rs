//! Model backend port
//!
//! Defines the interface to the local inference engine. The engine is a
//! black box: one synchronous, possibly very slow, `generate` call.

use orca_domain::GenerationParams;
use thiserror::Error;

/// Errors that can occur inside a model backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    #[error("Model not loaded: {0}")]
    NotLoaded(String),

    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Backend panicked: {0}")]
    Panicked(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Local LLM inference engine
///
/// Implementations (adapters) live in the infrastructure layer. All methods
/// are blocking; callers must keep them off the interactive thread.
pub trait ModelBackend: Send + Sync {
    /// Human-readable model identifier (usually the model file name)
    fn model_name(&self) -> &str;

    /// Open a chat scope. Until [`end_chat`](Self::end_chat), each
    /// `generate` call sees the previous exchanges of the scope.
    fn start_chat(&self) -> Result<(), BackendError>;

    /// Generate a reply to `prompt`. Blocks until generation finishes.
    fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, BackendError>;

    /// Close the chat scope and drop its history.
    fn end_chat(&self);
}
