//! Generation domain.
//!
//! - [`params::GenerationParams`]: token limit and temperature
//! - [`request::GenerationRequest`]: snapshot captured at submit time
//! - [`request::GenerationResult`]: backend text plus elapsed time

pub mod params;
pub mod request;
