//! # quest-cli
//!
//! Command-line interface for Eternal Quest.
//!
//! Each invocation loads the saved progress, applies one command and saves
//! the result:
//! - `quest add simple|eternal|checklist` — add a goal
//! - `quest record <n>` — record an event for goal number `n`
//! - `quest list` — show every goal and the running total

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use quest_goal::QuestConfig;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or empty.
const DEFAULT_LOG_DIRECTIVES: &str = "quest_goal=info,quest=info";

/// Eternal Quest — track goals and earn points.
#[derive(Parser)]
#[command(name = "quest", version, about)]
struct Cli {
    /// Configuration file.
    #[arg(long, default_value = "quest.toml")]
    config: PathBuf,

    /// Progress file (overrides `storage.progress_file` from the config).
    #[arg(long)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new goal.
    Add {
        #[command(subcommand)]
        command: commands::goal::AddCommands,
    },
    /// Record an event for a goal.
    Record {
        /// Goal number as shown by `quest list`.
        position: usize,
    },
    /// Show all goals and the total score.
    List,
}

/// `RUST_LOG` wins when it parses; otherwise fall back to the defaults.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_DIRECTIVES))
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't mix with command output on stdout.
    let rust_log = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let mut config = QuestConfig::load_or_default(&cli.config);
    if let Some(file) = cli.file {
        config.storage.progress_file = file;
    }
    tracing::debug!(
        progress_file = %config.storage.progress_file.display(),
        "configuration resolved"
    );

    match &cli.command {
        Commands::Add { command } => commands::goal::add(command, &config),
        Commands::Record { position } => commands::goal::record(*position, &config),
        Commands::List => commands::goal::list(&config),
    }
}
