//! Core domain concepts shared across all subdomains.
//!
//! - [`prompt::Prompt`]: a validated prompt to send to the model
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod prompt;
