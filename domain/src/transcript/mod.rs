//! Transcript domain.
//!
//! - [`entities::Turn`]: one user or assistant turn
//! - [`entities::Transcript`]: the append-only ordered log of turns

pub mod entities;
