//! Postcraft CLI
//!
//! Main entry point for the postcraft command-line tool.
//! Drafts LinkedIn posts with a language model and keeps a local history.

mod commands;

use clap::{Parser, Subcommand};
use commands::{DraftCommand, HistoryCommand, PromptCommand, StatsCommand};
use postcraft_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// Postcraft - LinkedIn post drafting assistant
#[derive(Parser, Debug)]
#[command(name = "postcraft")]
#[command(about = "LinkedIn post drafting assistant", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "POSTCRAFT_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "POSTCRAFT_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// LLM provider (openai, ollama)
    #[arg(short, long, global = true, env = "POSTCRAFT_PROVIDER")]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true, env = "POSTCRAFT_MODEL")]
    model: Option<String>,

    /// Path to the post history file
    #[arg(long, global = true, env = "POSTCRAFT_HISTORY")]
    history: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Draft a post interactively
    Draft(DraftCommand),

    /// List saved posts
    History(HistoryCommand),

    /// Show post analytics
    Stats(StatsCommand),

    /// Render a stage prompt without calling the model
    Prompt(PromptCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    // Environment and config.yaml first, flags on top
    let config = AppConfig::load()?.with_overrides(
        cli.workspace,
        cli.config,
        cli.provider,
        cli.model,
        cli.history,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    logging::init_logging(
        config.log_level.as_deref(),
        config.no_color,
        config.log_format(),
    )?;

    tracing::info!("Postcraft CLI starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Model: {}", config.model);

    let command_name = match &cli.command {
        Commands::Draft(_) => "draft",
        Commands::History(_) => "history",
        Commands::Stats(_) => "stats",
        Commands::Prompt(_) => "prompt",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Draft(cmd) => cmd.execute(&config).await,
        Commands::History(cmd) => cmd.execute(&config),
        Commands::Stats(cmd) => cmd.execute(&config),
        Commands::Prompt(cmd) => cmd.execute(&config),
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
