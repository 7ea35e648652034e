use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sitesearch")]
#[command(about = "Build and query sharded search indexes for static sites", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a sharded index from a JSON document corpus.
    Build {
        /// Path to the corpus file (a JSON array of documents).
        #[arg(short, long)]
        input: PathBuf,
        /// Output directory for the shard files. Must not exist yet.
        #[arg(short, long)]
        output: PathBuf,
        /// Ranking precision (bucket count); higher costs memory.
        #[arg(long)]
        resolution: Option<u32>,
        /// Shortest indexed word prefix.
        #[arg(long)]
        min_prefix_len: Option<usize>,
    },
    /// Load a shard set and run one query against it.
    Query {
        text: String,
        /// Directory holding the shard files.
        #[arg(short, long)]
        index: PathBuf,
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },
}
