//! How a chat session starts out.

use orca_domain::GenerationParams;
use serde::{Deserialize, Serialize};

/// Startup settings for [`ChatSessionController`](crate::ChatSessionController).
///
/// Populated from the config file at startup; the user can change both
/// values from the chat window afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Append the generation time to each assistant turn
    pub show_timing: bool,
    /// Values the token-limit and temperature fields start with
    pub initial_params: GenerationParams,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            show_timing: true,
            initial_params: GenerationParams::default(),
        }
    }
}

impl SessionConfig {
    pub fn with_show_timing(mut self, show: bool) -> Self {
        self.show_timing = show;
        self
    }

    pub fn with_initial_params(mut self, params: GenerationParams) -> Self {
        self.initial_params = params;
        self
    }
}
