//! Stopmo CLI - stopmo command

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;
mod util;

/// Stopmo - Minimal local version control
#[derive(Parser)]
#[command(name = "stopmo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get and set a username.
    Config {
        /// New username
        name: Option<String>,
    },
    /// Add a file to the index.
    Add {
        /// File to track
        file: Option<String>,
    },
    /// Show commit logs.
    Log,
    /// Save changes.
    Commit {
        /// Commit message
        message: Option<String>,
    },
    /// Restore a file.
    Checkout {
        /// Commit id to restore
        commit: Option<String>,
    },
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Config { name } => cmd::config::run(name.as_deref()),
        Commands::Add { file } => cmd::add::run(file.as_deref()),
        Commands::Log => cmd::log::run(),
        Commands::Commit { message } => cmd::commit::run(message.as_deref()),
        Commands::Checkout { commit } => cmd::checkout::run(commit.as_deref()),
    }
}

// Diagnostics go to stderr; stdout is reserved for command output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
