//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement,
//! and the event type the use case hands back to the presentation layer.

pub mod conversation_logger;
pub mod model_backend;
pub mod session_event;
