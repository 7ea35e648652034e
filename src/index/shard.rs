//! Sharded index persistence.
//!
//! An index is persisted as independent, order-irrelevant shards, one file
//! per key (`<dir>/<key>.json`). A shard whose payload is absent (the `ctx`
//! shard while contextual indexing is disabled) is skipped entirely: no
//! empty file is ever written.

use std::path::{Path, PathBuf};

use super::SearchIndex;
use crate::error::BuildError;

/// Shard holding the index configuration.
pub(crate) const SHARD_CFG: &str = "cfg";
/// Shard holding the document registry (ordinal → document id).
pub(crate) const SHARD_REG: &str = "reg";
/// Shard holding the verbatim stored fields.
pub(crate) const SHARD_STORE: &str = "store";
/// Shard holding the prefix postings map.
pub(crate) const SHARD_MAP: &str = "map";
/// Shard reserved for contextual postings; empty until context indexing exists.
pub(crate) const SHARD_CTX: &str = "ctx";

/// Keys the loader refuses to start without. `ctx` is not one of them.
pub(crate) const REQUIRED_SHARDS: [&str; 4] = [SHARD_CFG, SHARD_REG, SHARD_STORE, SHARD_MAP];

/// One independently-persisted fragment of the index.
#[derive(Debug, Clone)]
pub struct IndexShard {
    pub key: String,
    pub payload: Option<Vec<u8>>,
}

impl IndexShard {
    fn serialized<T: serde::Serialize>(key: &str, value: &T) -> Self {
        Self {
            key: key.to_string(),
            // In-memory maps and vecs of plain data serialize infallibly.
            payload: Some(serde_json::to_vec(value).expect("shard serialization failed")),
        }
    }

    fn empty(key: &str) -> Self {
        Self {
            key: key.to_string(),
            payload: None,
        }
    }

    /// Target file for this shard under `dir`.
    pub fn path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.json", self.key))
    }
}

impl SearchIndex {
    /// Serialize the index into its shard set.
    pub fn export(&self) -> Vec<IndexShard> {
        vec![
            IndexShard::serialized(SHARD_CFG, &self.cfg),
            IndexShard::serialized(SHARD_REG, &self.reg),
            IndexShard::serialized(SHARD_STORE, &self.store),
            IndexShard::serialized(SHARD_MAP, &self.map),
            IndexShard::empty(SHARD_CTX),
        ]
    }
}

/// What an export pass actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExportReport {
    pub written: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Write shards into a fresh directory.
///
/// Refuses to touch a pre-existing `dir`: the build never merges into stale
/// shards. A failed write of one shard is logged and the export moves on,
/// since a partial index is preferable to aborting the whole build.
pub fn write_shards(dir: &Path, shards: &[IndexShard]) -> Result<ExportReport, BuildError> {
    if dir.exists() {
        return Err(BuildError::OutputDirExists {
            path: dir.to_path_buf(),
        });
    }
    std::fs::create_dir_all(dir).map_err(|source| BuildError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut report = ExportReport::default();
    for shard in shards {
        let Some(payload) = &shard.payload else {
            report.skipped += 1;
            continue;
        };
        let path = shard.path(dir);
        match std::fs::write(&path, payload) {
            Ok(()) => {
                tracing::info!("  {}", shard.key);
                report.written += 1;
            }
            Err(e) => {
                tracing::error!("Failed to write shard {}: {}", path.display(), e);
                report.failed += 1;
            }
        }
    }

    Ok(report)
}
