//! Core data model shared between the build and runtime halves.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable join key between index entries and documents.
///
/// Corpus files produced by different site generators use either integer or
/// string ids, so both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocId {
    Int(u64),
    Str(String),
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{}", n),
            Self::Str(s) => f.write_str(s),
        }
    }
}

/// One record of the document corpus. Immutable once indexed.
///
/// A document is one linkable section of a page: `title` is the section
/// heading, `pagetitle` the title of the page it lives on, and `href` its URL
/// (usually with a fragment anchor).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub title: String,
    pub pagetitle: String,
    #[serde(rename = "ref")]
    pub href: String,
    pub content: String,
}

/// Verbatim per-document fields kept alongside the index, never tokenized.
///
/// `text` is the raw document content, retained only so excerpts can be
/// produced at query time; it is the sharded analog of a fragment file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFields {
    pub title: String,
    pub pagetitle: String,
    #[serde(rename = "ref")]
    pub href: String,
    pub text: String,
}

/// A ranked match ready for display.
///
/// `excerpt` is an HTML string: escaped document text with matched terms
/// wrapped in `<mark>`. `sub_results` holds further matches on the same page,
/// one nesting level deep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub url: String,
    pub title: String,
    pub excerpt: String,
    pub sub_results: Vec<SearchResult>,
}
