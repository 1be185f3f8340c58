//! Info command - show index metadata and size

use crate::cli::output::{self, colors};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the info command
#[derive(Args, Debug)]
pub struct InfoArgs {}

/// Info response
#[derive(Debug, Serialize)]
pub struct InfoOutput {
    pub index_dir: String,
    pub ngram_size: usize,
    pub documents_indexed: usize,
    pub documents_skipped: usize,
    pub built_at: DateTime<Utc>,
    pub build_duration_ms: u64,
    pub schema_version: u32,
    pub index_size_bytes: u64,
}

/// Execute the info command
pub fn execute(
    _args: InfoArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let metadata = services.storage.metadata().map_err(|e| {
        if e.is_not_found() {
            format!(
                "No index found at {}. Run 'kashidex build-index' first.",
                services.storage.root().display()
            )
        } else {
            e.to_string()
        }
    })?;

    let result = InfoOutput {
        index_dir: services.storage.root().display().to_string(),
        ngram_size: metadata.ngram_size,
        documents_indexed: metadata.documents_indexed,
        documents_skipped: metadata.documents_skipped,
        built_at: metadata.built_at,
        build_duration_ms: metadata.build_duration_ms,
        schema_version: metadata.schema_version,
        index_size_bytes: services.storage.index_size_bytes()?,
    };

    match format {
        OutputFormat::Human => {
            println!("{}", colors::label("Index"));
            println!("  Location:  {}", colors::dim(&result.index_dir));
            println!("  Size:      {}", output::format_bytes(result.index_size_bytes));
            println!("  Schema:    v{}", result.schema_version);
            println!();
            println!("{}", colors::label("Last build"));
            println!(
                "  Documents: {} indexed, {} skipped",
                colors::number(&result.documents_indexed.to_string()),
                colors::number(&result.documents_skipped.to_string())
            );
            println!("  N-gram:    {} chars", result.ngram_size);
            println!(
                "  Built:     {} ({})",
                result.built_at.format("%Y-%m-%d %H:%M:%S UTC"),
                output::format_duration(result.build_duration_ms as f64 / 1000.0)
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
