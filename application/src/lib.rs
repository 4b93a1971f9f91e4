//! Application layer for orca-chat
//!
//! This crate contains the chat session use case, the port definitions it
//! talks through, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod model_service;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::SessionConfig;
pub use model_service::ModelService;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    model_backend::{BackendError, ModelBackend},
    session_event::{CompletionReceiver, CompletionSender, GenerationCompleted, completion_channel},
};
pub use use_cases::chat_session::{
    ChatSessionController, GenerationFailed, IgnoreReason, SubmitOutcome,
};
