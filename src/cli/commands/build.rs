//! Build command - rebuild the full-text index from the corpus

use crate::cli::output::{self, colors};
use crate::cli::OutputFormat;
use crate::core::corpus::{FsKvStore, SongArchive};
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the build-index command
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Corpus directory (defaults to the configured corpus_dir)
    #[arg(long)]
    pub corpus: Option<PathBuf>,
}

/// Build response
#[derive(Debug, Serialize)]
pub struct BuildOutput {
    pub documents_indexed: usize,
    pub documents_skipped: usize,
    pub batches_committed: usize,
    pub duration_ms: u64,
    pub index_dir: String,
}

/// Execute the build-index command
pub fn execute(
    args: BuildArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let corpus = match args.corpus {
        Some(dir) => SongArchive::new(FsKvStore::open(dir)?),
        None => services.open_corpus()?,
    };

    // Fatal-and-loud: a build error aborts here with the offending
    // document ID and batch range in the message.
    let stats = services.rebuild_index(&corpus)?;

    let result = BuildOutput {
        documents_indexed: stats.documents_indexed,
        documents_skipped: stats.documents_skipped,
        batches_committed: stats.batches_committed,
        duration_ms: stats.duration_ms,
        index_dir: services.storage.root().display().to_string(),
    };

    match format {
        OutputFormat::Human => {
            println!(
                "{} Indexed {} document(s) in {}",
                colors::success("✓"),
                colors::number(&result.documents_indexed.to_string()),
                output::format_duration(result.duration_ms as f64 / 1000.0)
            );
            if result.documents_skipped > 0 {
                println!(
                    "  Skipped {} placeholder document(s)",
                    colors::number(&result.documents_skipped.to_string())
                );
            }
            println!(
                "  {} batch(es) committed to {}",
                colors::number(&result.batches_committed.to_string()),
                colors::dim(&result.index_dir)
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
