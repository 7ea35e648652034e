//! Index construction, sharded persistence, and loading.
//!
//! The build half turns a document corpus into a [`SearchIndex`] and exports
//! it as independent shards; the runtime half loads those shards back. Both
//! directions go through the same shard keys, so a build and a load are
//! symmetric.

pub(crate) mod builder;
pub(crate) mod loader;
pub(crate) mod shard;
pub(crate) mod tokenize;

pub use builder::IndexBuilder;
pub use loader::load;
pub use shard::{ExportReport, IndexShard, write_shards};

use crate::types::{DocId, StoredFields};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tunables baked into an index at build time and persisted in the `cfg`
/// shard, so queries run with the same parameters the index was built with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Shortest prefix indexed per word; query words below this are dropped.
    pub min_prefix_len: usize,
    /// Number of relevance buckets. Higher values rank more precisely at the
    /// cost of a larger postings map.
    pub resolution: u32,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            min_prefix_len: tokenize::MIN_PREFIX_LEN,
            resolution: 5,
        }
    }
}

/// An in-memory, queryable search index.
///
/// `map` is the postings table: term hash → one document list per relevance
/// bucket (bucket 0 is best). `reg` and `store` are indexed by the same
/// document ordinal, which is the only document identity the postings know.
/// An ordered map keeps shard serialization byte-for-byte deterministic.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    pub(crate) cfg: IndexConfig,
    pub(crate) reg: Vec<DocId>,
    pub(crate) store: Vec<StoredFields>,
    pub(crate) map: BTreeMap<u64, Vec<Vec<u32>>>,
}

impl SearchIndex {
    /// Bucketed postings for one already-normalized term.
    pub(crate) fn lookup(&self, term: &str) -> Option<&Vec<Vec<u32>>> {
        self.map.get(&tokenize::hash_term(term))
    }

    /// Number of unique indexed terms (prefixes included).
    pub fn term_count(&self) -> usize {
        self.map.len()
    }

    /// Number of indexed documents.
    pub fn document_count(&self) -> usize {
        self.reg.len()
    }

    pub fn config(&self) -> &IndexConfig {
        &self.cfg
    }
}
