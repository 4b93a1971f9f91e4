//! Completion events posted from the generation worker to the interactive loop.
//!
//! The worker never touches the transcript or any UI state. It sends one
//! [`GenerationCompleted`] and exits; the loop that owns the
//! [`ChatSessionController`](crate::ChatSessionController) applies it.

use crate::ports::model_backend::BackendError;
use orca_domain::{GenerationRequest, GenerationResult};
use tokio::sync::mpsc;

/// Outcome of one backend call, tagged with the request that caused it
#[derive(Debug)]
pub struct GenerationCompleted {
    pub request: GenerationRequest,
    pub outcome: Result<GenerationResult, BackendError>,
}

pub type CompletionSender = mpsc::UnboundedSender<GenerationCompleted>;
pub type CompletionReceiver = mpsc::UnboundedReceiver<GenerationCompleted>;

/// Create the worker → interactive loop channel
pub fn completion_channel() -> (CompletionSender, CompletionReceiver) {
    mpsc::unbounded_channel()
}
