//! Interface configuration from TOML (`[ui]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// # Example
///
/// ```toml
/// [ui]
/// show_timing = false
/// tick_millis = 100
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileUiConfig {
    /// Initial state of the "show generation time" toggle
    pub show_timing: bool,
    /// Redraw tick while idle or generating
    pub tick_millis: u64,
}

impl Default for FileUiConfig {
    fn default() -> Self {
        Self {
            show_timing: true,
            tick_millis: 250,
        }
    }
}

impl FileUiConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }
}
