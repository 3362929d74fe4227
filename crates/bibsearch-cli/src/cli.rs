//! CLI argument parsing for the bibsearch smoke-test binary.

use clap::{Parser, Subcommand};

/// Bibliographic search smoke tester
///
/// Drives a bibsearch service against a live engine with a synthetic
/// sample corpus: index lifecycle, per-kind indexing runs, searches.
#[derive(Parser, Debug)]
#[command(name = "bibsearch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Override the engine base URL
    #[arg(long, global = true)]
    pub engine_url: Option<String>,

    /// Override the index name
    #[arg(long, global = true)]
    pub index_name: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Smoke-test commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Probe the engine and print its status
    Status,

    /// Create the index with settings and mappings
    Create,

    /// Delete the index
    Delete,

    /// Delete and recreate the index from scratch
    Reset,

    /// Index the synthetic sample corpus (records, fulltext, collections)
    Index {
        /// Number of sample records to index
        #[arg(long, default_value = "100")]
        count: u64,

        /// Bulk batch size (0 = one batch for everything)
        #[arg(short, long)]
        batch_size: Option<usize>,
    },

    /// Run a search
    Search {
        /// Free-text query
        query: String,

        /// Restrict to a collection (repeatable)
        #[arg(long)]
        collection: Vec<String>,

        /// Filter on field:value (repeatable)
        #[arg(short, long, value_parser = parse_filter)]
        filter: Vec<(String, String)>,

        /// Result page offset
        #[arg(long, default_value = "0")]
        offset: usize,

        /// Result page size
        #[arg(short, long, default_value = "10")]
        size: usize,
    },

    /// Find records similar to the given one
    Similar {
        /// Record identifier
        recid: u64,
    },
}

/// Parse a `field:value` filter argument.
fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once(':') {
        Some((field, value)) if !field.is_empty() && !value.is_empty() => {
            Ok((field.to_string(), value.to_string()))
        }
        _ => Err(format!("expected field:value, got '{}'", raw)),
    }
}
