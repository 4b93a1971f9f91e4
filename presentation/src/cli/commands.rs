//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for orca-chat
#[derive(Parser, Debug)]
#[command(name = "orca-chat")]
#[command(author, version, about = "Chat with a local GGUF model in your terminal")]
#[command(long_about = r#"
orca-chat loads a quantized GGUF model from disk and opens a terminal chat
window. Nothing is downloaded: the model file and its tokenizer.json must
already be present in the model directory.

Configuration files are loaded from (in priority order):
1. --config <path>                        Explicit config file
2. ORCA_CHAT_* environment variables      e.g. ORCA_CHAT_MODEL__DIR=/models
3. ./orca-chat.toml                       Project-level config
4. ~/.config/orca-chat/config.toml        Global config

Example:
  orca-chat --model-dir ~/models/mistral
  orca-chat --model-file openhermes-2.5-mistral-7b.Q4_K_M.gguf -vv
"#)]
pub struct Cli {
    /// Directory holding the GGUF file and tokenizer.json
    #[arg(long, value_name = "DIR")]
    pub model_dir: Option<PathBuf>,

    /// GGUF file name inside the model directory
    #[arg(long, value_name = "FILE")]
    pub model_file: Option<String>,

    /// Start with generation timing hidden
    #[arg(long)]
    pub no_timing: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Diagnostic log file (defaults to the platform data directory)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
