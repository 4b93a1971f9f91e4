//! Conversation logging to a JSONL file.
//!
//! Provides [`JsonlConversationLogger`], which implements the
//! [`ConversationLogger`](orca_application::ConversationLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlConversationLogger;
