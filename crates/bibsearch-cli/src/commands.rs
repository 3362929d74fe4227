//! Command implementations for the smoke-test binary.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use bibsearch_engine::HttpEngine;
use bibsearch_query::SearchParams;
use bibsearch_service::BibSearchService;
use bibsearch_types::{BibSearchConfig, IndexingFailure, RecordId};

use crate::cli::Cli;
use crate::sample::{SampleExtractor, SampleResolver, SampleStore};

/// Initialize logging. `RUST_LOG` wins over the CLI flag.
pub fn init_logging(log_level: Option<&str>) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level.unwrap_or("info"))),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(())
}

/// Load configuration and apply CLI overrides (highest precedence).
pub fn load_config(cli: &Cli) -> Result<BibSearchConfig> {
    let mut config = BibSearchConfig::load(cli.config.as_deref().map(Path::new))
        .context("Failed to load configuration")?;
    if let Some(url) = &cli.engine_url {
        config.engine_url = url.clone();
    }
    if let Some(name) = &cli.index_name {
        config.index_name = name.clone();
    }
    config.validate()?;
    Ok(config)
}

/// Wire a service against the live engine with the sample collaborators.
pub fn build_service(config: BibSearchConfig, max_id: RecordId) -> BibSearchService {
    let engine = Arc::new(HttpEngine::new(&config.engine_url));
    BibSearchService::new(
        engine,
        Arc::new(SampleStore::new(max_id)),
        Arc::new(SampleExtractor),
        Arc::new(SampleResolver::new(max_id)),
        config,
    )
}

pub async fn run_status(service: &BibSearchService) -> Result<()> {
    let status = service.status().await?;
    println!("engine status: {}", status);
    Ok(())
}

pub async fn run_create(service: &BibSearchService) -> Result<()> {
    let outcome = service.create_index().await?;
    println!("create index: {:?}", outcome);
    Ok(())
}

pub async fn run_delete(service: &BibSearchService) -> Result<()> {
    let outcome = service.delete_index().await?;
    println!("delete index: {:?}", outcome);
    Ok(())
}

pub async fn run_reset(service: &BibSearchService) -> Result<()> {
    let outcome = service.recreate_index().await?;
    println!("reset index: {:?}", outcome);
    Ok(())
}

/// Index the full sample corpus: records, then fulltext, then collection
/// memberships against a freshly built context.
pub async fn run_index(
    service: &BibSearchService,
    count: u64,
    batch_size: Option<usize>,
) -> Result<()> {
    let ids: Vec<RecordId> = (1..=count).collect();

    info!(count, "Indexing sample records");
    report("records", &service.index_records(&ids, batch_size).await?);

    info!(count, "Indexing sample fulltext");
    report("fulltext", &service.index_fulltext(&ids, batch_size).await?);

    info!(count, "Indexing sample collection memberships");
    let context = service.rebuild_collections(true).await?;
    report(
        "collections",
        &service.index_collections(&context, &ids, batch_size).await?,
    );

    Ok(())
}

fn report(kind: &str, failures: &[IndexingFailure]) {
    if failures.is_empty() {
        println!("{}: ok", kind);
        return;
    }
    println!("{}: {} failures", kind, failures.len());
    for failure in failures {
        println!("  {}", failure);
    }
}

pub async fn run_search(
    service: &BibSearchService,
    query: &str,
    collections: Vec<String>,
    filters: Vec<(String, String)>,
    offset: usize,
    size: usize,
) -> Result<()> {
    let mut params = SearchParams::new(query).with_page(offset, size);
    for name in collections {
        params = params.with_collection(name);
    }
    for (field, value) in filters {
        params = params.with_filter(field, value);
    }

    let response = service.search(&params).await?;
    let hits = response.hits();
    println!("{} hits", hits.len());

    let highlights = response.highlights();
    for id in hits.iter() {
        match highlights.get(&id) {
            Some(highlight) if highlight.as_object().map_or(false, |o| !o.is_empty()) => {
                println!("  {} {}", id, highlight)
            }
            _ => println!("  {}", id),
        }
    }

    for (name, payload) in response.facets() {
        println!("facet {}: {}", name, payload);
    }
    Ok(())
}

pub async fn run_similar(service: &BibSearchService, recid: RecordId) -> Result<()> {
    let similar = service.find_similar(recid).await?;
    if similar.is_empty() {
        println!("no similar records");
        return Ok(());
    }
    for id in similar {
        println!("  {}", id);
    }
    Ok(())
}
