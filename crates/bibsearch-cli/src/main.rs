//! Bibliographic search smoke tester
//!
//! # Usage
//!
//! ```bash
//! bibsearch reset
//! bibsearch index --count 100 --batch-size 10
//! bibsearch search "higgs boson" --collection Articles
//! bibsearch similar 42
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (--config)
//! 3. Environment variables (BIBSEARCH_*)
//! 4. CLI flags

use anyhow::Result;
use clap::Parser;

use bibsearch_cli::{
    build_service, init_logging, load_config, run_create, run_delete, run_index, run_reset,
    run_search, run_similar, run_status, Cli, Commands,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref())?;
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Status => {
            let service = build_service(config, 0);
            run_status(&service).await?;
        }
        Commands::Create => {
            let service = build_service(config, 0);
            run_create(&service).await?;
        }
        Commands::Delete => {
            let service = build_service(config, 0);
            run_delete(&service).await?;
        }
        Commands::Reset => {
            let service = build_service(config, 0);
            run_reset(&service).await?;
        }
        Commands::Index { count, batch_size } => {
            let service = build_service(config, count);
            run_index(&service, count, batch_size).await?;
        }
        Commands::Search {
            query,
            collection,
            filter,
            offset,
            size,
        } => {
            let service = build_service(config, 0);
            run_search(&service, &query, collection, filter, offset, size).await?;
        }
        Commands::Similar { recid } => {
            let service = build_service(config, 0);
            run_similar(&service, recid).await?;
        }
    }

    Ok(())
}
