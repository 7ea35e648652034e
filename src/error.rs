//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for sitesearch operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods at the binary and I/O seams.
pub type Result<T> = anyhow::Result<T>;

/// Fatal build-stage failures.
///
/// Per-shard write errors are deliberately absent: they are logged and the
/// export continues, since a partial index is still servable.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The output directory pre-exists. The build never merges into stale
    /// shards; the caller must remove the directory and rebuild.
    #[error("output directory already exists: {}", path.display())]
    OutputDirExists { path: PathBuf },

    /// Creating the output directory itself failed.
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Runtime search failures.
///
/// `MissingShard`/`CorruptShard`/`Io` all mean the index is unavailable;
/// callers disable the search surface instead of crashing the host.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("search index unavailable: missing shard '{key}'")]
    MissingShard { key: String },

    #[error("search index unavailable: shard '{key}' is corrupt: {source}")]
    CorruptShard {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("search index unavailable: {0}")]
    Io(#[from] std::io::Error),

    #[error("no document {doc} in store")]
    UnknownDocument { doc: u32 },
}

impl SearchError {
    /// Whether this error means the whole index failed to load, as opposed to
    /// a single query going wrong.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::MissingShard { .. } | Self::CorruptShard { .. } | Self::Io(_)
        )
    }
}
