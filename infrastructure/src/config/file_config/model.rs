//! Model configuration from TOML (`[model]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default GGUF file looked up inside the model directory.
pub const DEFAULT_MODEL_FILE: &str = "mistral-7b-openorca.Q5_K_M.gguf";
/// Default tokenizer file looked up inside the model directory.
pub const DEFAULT_TOKENIZER_FILE: &str = "tokenizer.json";

/// Local model location and sampling setup
///
/// # Example
///
/// ```toml
/// [model]
/// dir = "/opt/models/mistral"
/// file = "mistral-7b-openorca.Q5_K_M.gguf"
/// tokenizer = "tokenizer.json"
/// system_prompt = "You are a terse assistant."
/// seed = 42
/// context_length = 4096
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelConfig {
    /// Directory holding the model files (default: `{data_dir}/orca-chat/models`)
    pub dir: Option<PathBuf>,
    /// GGUF weights file name, relative to `dir`
    pub file: String,
    /// `tokenizer.json` file name, relative to `dir`
    pub tokenizer: String,
    /// Optional ChatML system message prepended to every prompt
    pub system_prompt: Option<String>,
    /// Sampling seed
    pub seed: u64,
    /// Context window in tokens (prompt plus generated tokens)
    pub context_length: usize,
    /// Repeat penalty applied to recent tokens (1.0 disables it)
    pub repeat_penalty: f32,
    /// How many trailing tokens the repeat penalty looks at
    pub repeat_last_n: usize,
    /// Use CUDA when the binary was built with it and a device is present
    pub prefer_gpu: bool,
}

impl Default for FileModelConfig {
    fn default() -> Self {
        Self {
            dir: None,
            file: DEFAULT_MODEL_FILE.to_string(),
            tokenizer: DEFAULT_TOKENIZER_FILE.to_string(),
            system_prompt: None,
            seed: 299_792_458,
            context_length: 4096,
            repeat_penalty: 1.1,
            repeat_last_n: 64,
            prefer_gpu: true,
        }
    }
}

impl FileModelConfig {
    /// Directory the model files are read from.
    pub fn model_dir(&self) -> PathBuf {
        match &self.dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .map(|d| d.join("orca-chat").join("models"))
                .unwrap_or_else(|| PathBuf::from("models")),
        }
    }

    pub fn model_path(&self) -> PathBuf {
        self.model_dir().join(&self.file)
    }

    pub fn tokenizer_path(&self) -> PathBuf {
        self.model_dir().join(&self.tokenizer)
    }

    /// System prompt with blank values treated as absent.
    pub fn system_prompt(&self) -> Option<&str> {
        self.system_prompt
            .as_deref()
            .filter(|prompt| !prompt.trim().is_empty())
    }
}
