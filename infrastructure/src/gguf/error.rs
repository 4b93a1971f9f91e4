//! GGUF backend errors

use orca_application::BackendError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GgufError {
    #[error("model file not found: {0}")]
    MissingFile(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("candle error: {0}")]
    Candle(#[from] candle_core::Error),

    #[error("tokenizer error: {0}")]
    Tokenizer(String),
}

impl GgufError {
    pub(crate) fn tokenizer(err: impl std::fmt::Display) -> Self {
        Self::Tokenizer(err.to_string())
    }
}

impl From<GgufError> for BackendError {
    fn from(err: GgufError) -> Self {
        match err {
            GgufError::MissingFile(path) => BackendError::NotLoaded(path.display().to_string()),
            GgufError::Tokenizer(msg) => BackendError::Tokenizer(msg),
            GgufError::Candle(e) => BackendError::Inference(e.to_string()),
            GgufError::Io(e) => BackendError::Other(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_to_backend_error() {
        let err: BackendError = GgufError::MissingFile(PathBuf::from("/m/x.gguf")).into();
        assert_eq!(err, BackendError::NotLoaded("/m/x.gguf".to_string()));

        let err: BackendError = GgufError::tokenizer("bad merges").into();
        assert_eq!(err, BackendError::Tokenizer("bad merges".to_string()));
    }
}
