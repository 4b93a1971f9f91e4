//! Application-level configuration.
//!
//! - [`SessionConfig`]: how a chat session starts out (timing display,
//!   initial generation parameters)

pub mod session_config;

pub use session_config::SessionConfig;
