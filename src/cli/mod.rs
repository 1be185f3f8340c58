//! CLI adapter for Kashidex
//!
//! Provides the operator command-line interface for index builds and
//! search. This module depends on `core/` only; any web-facing
//! presentation layer is a separate collaborator built on the same
//! core.
//!
//! # Architecture
//!
//! ```text
//!              +------------------+
//!              |     core/        |
//!              |  (domain logic)  |
//!              +--------+---------+
//!                       |
//!                       v
//!              +------------------+
//!              |      cli/        |
//!              | (clap adapter)   |
//!              +------------------+
//! ```

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// Kashidex - N-gram Full-Text Search for Song Archives
///
/// Build a character n-gram index over an archived document corpus
/// and search it with keyword queries. Results are stable ID windows
/// ordered by descending document ID.
#[derive(Parser, Debug)]
#[command(name = "kashidex")]
#[command(author = "OOV ARCHIVE TOOLS")]
#[command(version)]
#[command(about = "N-gram full-text search for song archives", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output for scripting
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Human
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rebuild the full-text index from the document corpus
    #[command(name = "build-index")]
    BuildIndex(commands::BuildArgs),

    /// Search the built index
    Search(commands::SearchArgs),

    /// Show index metadata and size
    Info(commands::InfoArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  kashidex completions bash > ~/.local/share/bash-completion/completions/kashidex
    ///   zsh:   kashidex completions zsh > ~/.zfunc/_kashidex
    ///   fish:  kashidex completions fish > ~/.config/fish/completions/kashidex.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::services::Services;
    use crate::core::xdg::XdgDirs;
    use std::sync::Arc;

    // Handle completions command early (doesn't need services)
    if let Commands::Completions(args) = cli.command {
        return commands::completions::execute(args);
    }

    // Initialize XDG directories
    let xdg = XdgDirs::new();
    xdg.ensure_dirs_exist()?;

    // Load configuration
    let config = Config::load_with_xdg(&xdg)?;

    // Create services
    let services = Arc::new(Services::new(config));

    // Execute command
    match cli.command {
        Commands::BuildIndex(args) => commands::build::execute(args, &services, cli.format),
        Commands::Search(args) => commands::search::execute(args, &services, cli.format),
        Commands::Info(args) => commands::info::execute(args, &services, cli.format),
        Commands::ShowConfig(args) => commands::config::execute(args, &services, cli.format),
        Commands::Completions(_) => unreachable!(), // Handled above
    }
}
