//! Local GGUF inference backend
//!
//! Implements the [`ModelBackend`](orca_application::ModelBackend) port on top
//! of candle's quantized llama weights. Everything is read from local files:
//! a GGUF weights file plus a HuggingFace `tokenizer.json`.
//!
//! Prompts are rendered with the ChatML template. While a chat scope is open
//! the backend keeps the user/assistant exchanges and replays them in every
//! prompt, dropping the oldest ones when the context window runs out.

mod backend;
mod chat_template;
mod config;
mod device;
mod error;

pub use backend::GgufChatBackend;
pub use chat_template::{ChatHistory, Exchange, IM_END, IM_START};
pub use config::GgufConfig;
pub use device::{device_label, select_device};
pub use error::GgufError;
