//! Asynchronous shard loading.

use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::path::Path;

use super::shard::{SHARD_CFG, SHARD_MAP, SHARD_REG, SHARD_STORE};
use super::{IndexConfig, SearchIndex};
use crate::error::SearchError;
use crate::types::{DocId, StoredFields};

/// Load a shard set from `dir` into a queryable index.
///
/// Any missing or corrupt required shard fails the load; callers are
/// expected to disable the search surface on error rather than crash. The
/// optional `ctx` shard is never even looked for; it carries no payload
/// while contextual indexing is disabled.
pub async fn load(dir: &Path) -> Result<SearchIndex, SearchError> {
    let start = std::time::Instant::now();

    let cfg: IndexConfig = read_shard(dir, SHARD_CFG).await?;
    let reg: Vec<DocId> = read_shard(dir, SHARD_REG).await?;
    let store: Vec<StoredFields> = read_shard(dir, SHARD_STORE).await?;
    let map: BTreeMap<u64, Vec<Vec<u32>>> = read_shard(dir, SHARD_MAP).await?;

    if reg.len() != store.len() {
        // A registry/store length mismatch means the shard set is torn.
        return Err(SearchError::CorruptShard {
            key: SHARD_STORE.to_string(),
            source: serde::de::Error::custom(format!(
                "store has {} entries but registry has {}",
                store.len(),
                reg.len()
            )),
        });
    }

    let index = SearchIndex {
        cfg,
        reg,
        store,
        map,
    };
    tracing::debug!(
        "Loaded search index from {}: {} terms, {} documents in {:?}",
        dir.display(),
        index.term_count(),
        index.document_count(),
        start.elapsed()
    );
    Ok(index)
}

async fn read_shard<T: DeserializeOwned>(dir: &Path, key: &str) -> Result<T, SearchError> {
    let path = dir.join(format!("{key}.json"));
    let bytes = tokio::fs::read(&path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SearchError::MissingShard {
                key: key.to_string(),
            }
        } else {
            SearchError::Io(e)
        }
    })?;

    serde_json::from_slice(&bytes).map_err(|source| SearchError::CorruptShard {
        key: key.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{IndexBuilder, write_shards};
    use crate::types::Document;
    use assert2::{check, let_assert};

    fn write_small_index(dir: &Path) {
        let mut builder = IndexBuilder::new();
        builder.add(&Document {
            id: DocId::Int(1),
            title: "Install".into(),
            pagetitle: "Manual".into(),
            href: "manual/#install".into(),
            content: "install the package".into(),
        });
        write_shards(dir, &builder.build().export()).unwrap();
    }

    #[tokio::test]
    async fn round_trips_through_the_shard_set() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("search-data");
        write_small_index(&dir);

        let index = load(&dir).await.unwrap();
        check!(index.document_count() == 1);
        check!(index.lookup("install").is_some());
        check!(index.store[0].pagetitle == "Manual");
    }

    #[tokio::test]
    async fn missing_required_shard_is_unavailable() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("search-data");
        write_small_index(&dir);
        std::fs::remove_file(dir.join("map.json")).unwrap();

        let result = load(&dir).await;
        let_assert!(Err(SearchError::MissingShard { key }) = result);
        check!(key == "map");
    }

    #[tokio::test]
    async fn corrupt_shard_is_unavailable() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("search-data");
        write_small_index(&dir);
        std::fs::write(dir.join("reg.json"), b"{torn").unwrap();

        let result = load(&dir).await;
        let_assert!(Err(err) = result);
        check!(err.is_unavailable());
    }

    #[tokio::test]
    async fn absent_ctx_shard_is_fine() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("search-data");
        write_small_index(&dir);
        check!(!dir.join("ctx.json").exists());

        check!(load(&dir).await.is_ok());
    }
}
