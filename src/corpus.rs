//! Document corpus input.
//!
//! The site generator emits one JSON array of document records; this module
//! reads it back. Shape errors surface with the offending path attached.

use crate::error::Result;
use crate::types::Document;
use anyhow::Context;
use std::path::Path;

/// Read a JSON document corpus from `path`.
pub fn read_corpus(path: &Path) -> Result<Vec<Document>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read corpus at {}", path.display()))?;

    let documents: Vec<Document> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse corpus at {}", path.display()))?;

    tracing::debug!("Read {} documents from {}", documents.len(), path.display());
    Ok(documents)
}
