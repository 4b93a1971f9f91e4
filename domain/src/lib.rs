//! Domain layer for orca-chat
//!
//! This crate contains the core value objects and entities of a chat
//! session with a local model. It has no dependencies on infrastructure
//! or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Prompt**: the non-empty text a user submits
//! - **GenerationParams**: token limit and sampling temperature, with the
//!   lenient field parsing used at submit time
//! - **GenerationRequest / GenerationResult**: the immutable snapshot sent to
//!   the backend and what comes back
//! - **Transcript**: the append-only log of user and assistant turns
//! - **Field validation**: per-keystroke predicates for the numeric fields

pub mod core;
pub mod generation;
pub mod transcript;
pub mod util;
pub mod validation;

// Re-export commonly used types
pub use core::{error::DomainError, prompt::Prompt};
pub use generation::{
    params::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, GenerationParams},
    request::{GenerationRequest, GenerationResult},
};
pub use transcript::entities::{Role, Transcript, Turn};
pub use validation::field::{EditKind, NumericField, accept_temperature_edit, accept_token_edit};
