//! Backend settings resolved from the `[model]` section

use crate::config::FileModelConfig;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct GgufConfig {
    pub model_path: PathBuf,
    pub tokenizer_path: PathBuf,
    pub system_prompt: Option<String>,
    pub seed: u64,
    pub context_length: usize,
    pub repeat_penalty: f32,
    pub repeat_last_n: usize,
    pub prefer_gpu: bool,
}

impl GgufConfig {
    pub fn from_file_config(model: &FileModelConfig) -> Self {
        Self {
            model_path: model.model_path(),
            tokenizer_path: model.tokenizer_path(),
            system_prompt: model.system_prompt().map(str::to_string),
            seed: model.seed,
            context_length: model.context_length,
            repeat_penalty: model.repeat_penalty,
            repeat_last_n: model.repeat_last_n,
            prefer_gpu: model.prefer_gpu,
        }
    }

    /// Display name for the model: the weights file stem.
    pub fn model_name(&self) -> String {
        self.model_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.model_path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file_config() {
        let file = FileModelConfig {
            dir: Some(PathBuf::from("/models")),
            file: "openorca.Q4.gguf".to_string(),
            system_prompt: Some(" ".to_string()),
            ..Default::default()
        };
        let config = GgufConfig::from_file_config(&file);
        assert_eq!(config.model_path, PathBuf::from("/models/openorca.Q4.gguf"));
        assert_eq!(config.system_prompt, None);
        assert_eq!(config.model_name(), "openorca.Q4");
    }
}
