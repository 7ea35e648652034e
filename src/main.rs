use anyhow::Context;
use clap::Parser;
use std::path::Path;

use sitesearch::cli::{Cli, Commands};
use sitesearch::corpus::read_corpus;
use sitesearch::index::{self, IndexBuilder, IndexConfig, write_shards};
use sitesearch::query::SearchEngine;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    sitesearch::tracing::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Build {
            input,
            output,
            resolution,
            min_prefix_len,
        } => build(&input, &output, resolution, min_prefix_len),
        Commands::Query { text, index, limit } => query(&text, &index, limit).await,
    }
}

fn build(
    input: &Path,
    output: &Path,
    resolution: Option<u32>,
    min_prefix_len: Option<usize>,
) -> anyhow::Result<()> {
    let documents = read_corpus(input)?;

    let mut cfg = IndexConfig::default();
    if let Some(resolution) = resolution {
        cfg.resolution = resolution;
    }
    if let Some(min_prefix_len) = min_prefix_len {
        cfg.min_prefix_len = min_prefix_len;
    }

    let mut builder = IndexBuilder::with_config(cfg);
    for doc in &documents {
        builder.add(doc);
    }
    let search_index = builder.build();

    tracing::info!("Writing shards to {}", output.display());
    let report = write_shards(output, &search_index.export())?;
    tracing::info!(
        "Indexed {} documents into {} shard files ({} empty shards skipped, {} writes failed)",
        documents.len(),
        report.written,
        report.skipped,
        report.failed
    );

    Ok(())
}

async fn query(text: &str, dir: &Path, limit: usize) -> anyhow::Result<()> {
    let loaded = index::load(dir).await.context("search unavailable")?;

    let engine = SearchEngine::with_max_results(loaded, limit);
    let results = engine.search(text).await;

    if results.is_empty() {
        println!("No results for '{text}'");
        return Ok(());
    }
    for (i, result) in results.iter().enumerate() {
        println!("{:2}. {} ({})", i + 1, result.title, result.url);
        if !result.excerpt.is_empty() {
            println!("    {}", result.excerpt);
        }
        for sub in &result.sub_results {
            println!("      > {} ({})", sub.title, sub.url);
        }
    }

    Ok(())
}
