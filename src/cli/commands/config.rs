//! Show-config command - print the effective configuration

use crate::cli::output::colors;
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use std::sync::Arc;

/// Arguments for the show-config command
#[derive(Args, Debug)]
pub struct ConfigArgs {}

/// Execute the show-config command
pub fn execute(
    _args: ConfigArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = &services.config;

    match format {
        OutputFormat::Human => {
            println!("{}", colors::label("Indexing"));
            println!("  ngram_size:      {}", config.indexing.ngram_size);
            println!("  batch_size:      {}", config.indexing.batch_size);
            println!();
            println!("{}", colors::label("Storage"));
            println!("  index_dir:       {}", config.storage.index_dir.display());
            println!("  corpus_dir:      {}", config.storage.corpus_dir.display());
            println!();
            println!("{}", colors::label("Search"));
            println!("  page_size:       {}", config.search.page_size);
            println!("  max_query_bytes: {}", config.search.max_query_bytes);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config.as_ref())?);
        }
    }

    Ok(())
}
