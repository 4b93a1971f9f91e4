//! CLI entrypoint for orca-chat
//!
//! This is the main binary that wires together all layers:
//! configuration → GGUF backend → model service → chat controller →
//! terminal window.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use orca_application::{
    ChatSessionController, ConversationLogger, ModelBackend, ModelService, completion_channel,
};
use orca_infrastructure::{ConfigLoader, FileConfig, JsonlConversationLogger};
use orca_presentation::{Cli, TuiApp};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    // The TUI owns the terminal, so diagnostics go to a file
    let log_path = cli.log_file.clone().unwrap_or_else(default_log_path);
    let log_guard = init_logging(cli.verbose, &log_path)?;
    info!("Starting orca-chat v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    let session_config = config
        .session_config()
        .context("Invalid [generation] configuration")?;

    // === Dependency Injection ===
    let backend = load_backend(&config).await?;
    let service = ModelService::open(backend).context("Failed to open chat session")?;

    let (completion_tx, completion_rx) = completion_channel();
    let mut controller =
        ChatSessionController::new(service.clone(), session_config, completion_tx);
    if let Some(logger) = conversation_logger(&config) {
        controller = controller.with_conversation_logger(logger);
    }

    let mut app = TuiApp::new(controller, completion_rx).with_tick_rate(config.ui.tick());
    let result = app.run().await;

    // A running generation holds the model; waiting for it would hang the exit
    if app.controller().is_busy() {
        warn!("Quitting with a generation in flight; not waiting for it");
        drop(log_guard);
        if let Err(e) = result {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
        std::process::exit(0);
    }

    service.close();
    info!("orca-chat exited");
    result.context("Terminal UI failed")
}

fn default_log_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("orca-chat").join("orca-chat.log"))
        .unwrap_or_else(|| PathBuf::from("orca-chat.log"))
}

/// Initialize logging based on verbosity level. `RUST_LOG` wins when set.
fn init_logging(verbose: u8, path: &Path) -> Result<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let file_name = path
        .file_name()
        .with_context(|| format!("Log file path {} has no file name", path.display()))?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();

    Ok(guard)
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };

    apply_cli_overrides(&mut config, cli);
    config.validate().context("Invalid configuration")?;

    info!(
        "Model: {} (tokenizer {})",
        config.model.model_path().display(),
        config.model.tokenizer
    );
    Ok(config)
}

/// CLI flags override every config file.
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(dir) = &cli.model_dir {
        config.model.dir = Some(dir.clone());
    }
    if let Some(file) = &cli.model_file {
        config.model.file = file.clone();
    }
    if cli.no_timing {
        config.ui.show_timing = false;
    }
}

#[cfg(feature = "gguf")]
async fn load_backend(config: &FileConfig) -> Result<Arc<dyn ModelBackend>> {
    use indicatif::{ProgressBar, ProgressStyle};
    use orca_infrastructure::{GgufChatBackend, GgufConfig};
    use std::time::Duration;

    let gguf_config = GgufConfig::from_file_config(&config.model);
    let model_path = gguf_config.model_path.clone();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Loading {}", model_path.display()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let loaded = tokio::task::spawn_blocking(move || GgufChatBackend::load(gguf_config))
        .await
        .context("Model loading task failed")?;
    spinner.finish_and_clear();

    let backend = loaded
        .with_context(|| format!("Failed to load model from {}", model_path.display()))?;
    eprintln!(
        "{} {}",
        "✓".green(),
        format!("Loaded {}", backend.model_name()).bold()
    );
    Ok(Arc::new(backend))
}

#[cfg(not(feature = "gguf"))]
async fn load_backend(_config: &FileConfig) -> Result<Arc<dyn ModelBackend>> {
    anyhow::bail!("orca-chat was built without the `gguf` feature; no model backend is available")
}

fn conversation_logger(config: &FileConfig) -> Option<Arc<dyn ConversationLogger>> {
    let path = config.logging.conversation_log.as_ref()?;
    let logger = JsonlConversationLogger::open(path)?;
    info!("Conversation log: {}", logger.path().display());
    Some(Arc::new(logger))
}

fn print_config_sources(explicit: Option<&Path>) {
    println!("{}", "Configuration sources (in priority order):".bold());
    for source in ConfigLoader::config_sources(explicit) {
        let marker = if source.found {
            "[FOUND]".green()
        } else {
            "[     ]".dimmed()
        };
        println!(
            "  {} {:<9} {}",
            marker,
            format!("{}:", source.label),
            source.location
        );
    }
    println!();
    println!("Log file: {}", default_log_path().display());
}
