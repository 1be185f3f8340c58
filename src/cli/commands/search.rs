//! Search command - query the built index

use crate::cli::output::colors;
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query (empty or over-length queries list all documents)
    pub query: String,

    /// Page number (0-based; out-of-range pages fall back to 0)
    #[arg(long, short = 'p', default_value = "0")]
    pub page: i64,
}

/// Search response
#[derive(Debug, Serialize)]
pub struct SearchOutput {
    pub query: String,
    pub total: usize,
    pub page: usize,
    pub first: usize,
    pub last: usize,
    pub doc_ids: Vec<u32>,
}

/// Execute the search command
pub fn execute(
    args: SearchArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let page = services.search(&args.query, args.page)?;

    let result = SearchOutput {
        query: args.query.clone(),
        total: page.total,
        page: page.page,
        first: page.first,
        last: page.last,
        doc_ids: page.doc_ids,
    };

    match format {
        OutputFormat::Human => {
            if result.total == 0 {
                println!("No matching documents for '{}'", colors::label(&args.query));
            } else {
                println!(
                    "Showing {}-{} of {} matching document(s), page {}:\n",
                    colors::number(&result.first.to_string()),
                    colors::number(&result.last.to_string()),
                    colors::number(&result.total.to_string()),
                    colors::number(&result.page.to_string()),
                );

                for (i, id) in result.doc_ids.iter().enumerate() {
                    println!(
                        "[{}] No.{}",
                        colors::dim(&(result.first + i).to_string()),
                        colors::doc_id(&id.to_string())
                    );
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
