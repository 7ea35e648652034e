//! Accumulates documents into a queryable index.

use ahash::AHashMap;
use std::collections::BTreeMap;

use super::tokenize::{forward_prefixes, hash_term, split_words};
use super::{IndexConfig, SearchIndex};
use crate::types::{DocId, Document, StoredFields};

/// Builder for accumulating postings before the index is finalized.
///
/// Each (prefix, document) pair keeps its best relevance bucket: earlier
/// occurrences in a document land in lower (better) buckets.
pub struct IndexBuilder {
    cfg: IndexConfig,
    reg: Vec<DocId>,
    store: Vec<StoredFields>,
    /// Flat map from (term_hash, doc ordinal) → best bucket seen so far.
    postings: AHashMap<(u64, u32), u32>,
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::with_config(IndexConfig::default())
    }
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(cfg: IndexConfig) -> Self {
        Self {
            cfg,
            reg: Vec::new(),
            store: Vec::new(),
            postings: AHashMap::new(),
        }
    }

    /// Index one document. `content` is tokenized into forward prefixes;
    /// `title`, `pagetitle` and `ref` are stored verbatim, never tokenized.
    pub fn add(&mut self, doc: &Document) {
        let ordinal = u32::try_from(self.reg.len()).expect("more than u32::MAX documents");
        self.reg.push(doc.id.clone());
        self.store.push(StoredFields {
            title: doc.title.clone(),
            pagetitle: doc.pagetitle.clone(),
            href: doc.href.clone(),
            text: doc.content.clone(),
        });

        let words = split_words(&doc.content);
        let total = words.len().max(1);

        for (position, word) in words.iter().enumerate() {
            let bucket = self.bucket_for(position, total);
            for prefix in forward_prefixes(word, self.cfg.min_prefix_len) {
                let key = (hash_term(prefix), ordinal);
                self.postings
                    .entry(key)
                    .and_modify(|b| *b = (*b).min(bucket))
                    .or_insert(bucket);
            }
        }
    }

    /// Map a word position to a relevance bucket in `0..resolution`.
    fn bucket_for(&self, position: usize, total: usize) -> u32 {
        let resolution = self.cfg.resolution as usize;
        let bucket = position * resolution / total;
        bucket.min(resolution - 1) as u32
    }

    /// Finalize the postings into a [`SearchIndex`].
    ///
    /// Documents within each bucket are sorted by ordinal so the same corpus
    /// always produces the same index, whatever the hash-map iteration order.
    pub fn build(self) -> SearchIndex {
        let start = std::time::Instant::now();
        let resolution = self.cfg.resolution as usize;
        let pair_count = self.postings.len();

        let mut map: BTreeMap<u64, Vec<Vec<u32>>> = BTreeMap::new();
        for ((term_hash, doc), bucket) in self.postings {
            let buckets = map
                .entry(term_hash)
                .or_insert_with(|| vec![Vec::new(); resolution]);
            buckets[bucket as usize].push(doc);
        }
        for buckets in map.values_mut() {
            for bucket in buckets.iter_mut() {
                bucket.sort_unstable();
            }
        }

        let index = SearchIndex {
            cfg: self.cfg,
            reg: self.reg,
            store: self.store,
            map,
        };

        tracing::info!(
            "Built search index: {} unique terms, {} documents, {} term-document pairs in {:?}",
            index.term_count(),
            index.document_count(),
            pair_count,
            start.elapsed()
        );

        index
    }
}
