//! Shared test fixtures and utilities for integration tests.
//!
//! Each test gets a fresh temporary directory with its own shard set, so
//! suites never see each other's files.

use rstest::fixture;
use sitesearch::index::write_shards;
use sitesearch::{DocId, Document, IndexBuilder};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A small two-page manual plus standalone pages; "install" appears in two
/// documents on different pages.
#[allow(dead_code)] // Used across different integration test crates
pub fn manual_corpus() -> Vec<Document> {
    [
        (
            1,
            "Installation",
            "Manual",
            "manual/#installation",
            "install the package with your package manager",
        ),
        (
            2,
            "Uninstalling",
            "Manual",
            "manual/#uninstalling",
            "to remove the files again run the cleanup script",
        ),
        (
            3,
            "Quick start",
            "Getting Started",
            "start/#quick",
            "install quickly and run the first example",
        ),
        (
            4,
            "Configuration",
            "Getting Started",
            "start/#config",
            "configure settings and options",
        ),
        (5, "FAQ", "FAQ", "faq/", "frequently asked questions about usage"),
    ]
    .into_iter()
    .map(|(id, title, pagetitle, href, content)| Document {
        id: DocId::Int(id),
        title: title.to_string(),
        pagetitle: pagetitle.to_string(),
        href: href.to_string(),
        content: content.to_string(),
    })
    .collect()
}

/// A corpus of `n` single-section pages all matching the word "topic".
#[allow(dead_code)]
pub fn many_pages_corpus(n: usize) -> Vec<Document> {
    (0..n)
        .map(|i| Document {
            id: DocId::Int(i as u64),
            title: format!("Section {i}"),
            pagetitle: format!("Page {i}"),
            href: format!("page-{i}/#section"),
            content: format!("topic number {i} discussed at length"),
        })
        .collect()
}

/// A shard set built from a corpus, on disk in an isolated directory.
pub struct BuiltIndex {
    _temp: TempDir,
    pub shard_dir: PathBuf,
}

#[allow(dead_code)]
impl BuiltIndex {
    pub fn from_corpus(documents: &[Document]) -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let shard_dir = temp.path().join("search-data");

        let mut builder = IndexBuilder::new();
        for doc in documents {
            builder.add(doc);
        }
        write_shards(&shard_dir, &builder.build().export()).expect("Failed to write shards");

        Self {
            _temp: temp,
            shard_dir,
        }
    }

    pub fn shard_path(&self, key: &str) -> PathBuf {
        self.shard_dir.join(format!("{key}.json"))
    }

    /// Root of the temp dir, for tests that need scratch space next to the
    /// shard directory.
    pub fn root(&self) -> &Path {
        self._temp.path()
    }
}

/// Shard set for [`manual_corpus`].
#[fixture]
#[allow(dead_code)] // Not every integration test crate uses the fixture
pub fn built_index() -> BuiltIndex {
    BuiltIndex::from_corpus(&manual_corpus())
}
