//! Kashidex CLI - Command-line interface for the archive search engine
//!
//! # Examples
//!
//! ```bash
//! # Rebuild the index from the configured corpus
//! kashidex build-index
//!
//! # Search (page 0)
//! kashidex search "hello"
//!
//! # Later pages
//! kashidex search "hello" --page 2
//!
//! # Index details
//! kashidex info
//! ```

use clap::Parser;
use kashidex::cli::output::colors;
use kashidex::cli::{run, Cli};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {e}", colors::error("Error:"));
        std::process::exit(1);
    }
}
