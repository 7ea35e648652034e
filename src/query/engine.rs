//! Query execution: candidate lookup, page grouping, and result hydration.

use ahash::AHashMap;
use std::future::Future;

use super::excerpt::build_excerpt;
use crate::error::SearchError;
use crate::index::SearchIndex;
use crate::index::tokenize::{self, query_terms};
use crate::types::{SearchResult, StoredFields};

/// Default cap on rendered results. One slot is reserved, so at most
/// `MAX_RESULTS - 1` top-level results come out of a query.
pub const MAX_RESULTS: usize = 20;

/// A scored candidate document, before hydration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Document ordinal within the index.
    pub doc: u32,
    /// Combined relevance, higher is better.
    pub score: u32,
    /// Grouping key: the document URL with its fragment stripped. Candidates
    /// sharing a page collapse into one top-level result.
    pub page: String,
}

/// Capability interface over a loaded text-search index.
///
/// The engine and the query controller only ever talk to this trait, so the
/// concrete index implementation stays swappable (and mockable in tests).
pub trait QueryableIndex: Send + Sync {
    /// Scored candidates for a free-text query, best first. An empty query
    /// yields an empty list, not an error.
    fn candidates(&self, query: &str) -> Result<Vec<Candidate>, SearchError>;

    /// Fetch the full stored fields for one candidate document.
    fn fetch(&self, doc: u32) -> impl Future<Output = Result<StoredFields, SearchError>> + Send;

    /// Shortest query word the index can match; shorter words are ignored.
    fn min_term_len(&self) -> usize {
        tokenize::MIN_PREFIX_LEN
    }
}

impl QueryableIndex for SearchIndex {
    fn candidates(&self, query: &str) -> Result<Vec<Candidate>, SearchError> {
        let terms = query_terms(query, self.cfg.min_prefix_len);
        if terms.is_empty() {
            return Ok(vec![]);
        }

        // Combine bucket weights across tokens; documents matching several
        // tokens accumulate score.
        let mut combined: AHashMap<u32, u32> = AHashMap::new();
        for term in &terms {
            if let Some(buckets) = self.lookup(term) {
                for (i, bucket) in buckets.iter().enumerate() {
                    let weight = self.cfg.resolution.saturating_sub(i as u32);
                    if weight == 0 {
                        break;
                    }
                    for &doc in bucket {
                        *combined.entry(doc).or_insert(0) += weight;
                    }
                }
            }
        }

        let mut scored: Vec<(u32, u32)> = combined.into_iter().collect();
        // Descending by score, ordinal as the deterministic tie-break.
        scored.sort_unstable_by(|(da, sa), (db, sb)| sb.cmp(sa).then(da.cmp(db)));

        Ok(scored
            .into_iter()
            .map(|(doc, score)| Candidate {
                doc,
                score,
                page: page_key(&self.store[doc as usize].href).to_string(),
            })
            .collect())
    }

    async fn fetch(&self, doc: u32) -> Result<StoredFields, SearchError> {
        self.store
            .get(doc as usize)
            .cloned()
            .ok_or(SearchError::UnknownDocument { doc })
    }

    fn min_term_len(&self) -> usize {
        self.cfg.min_prefix_len
    }
}

/// The URL a candidate's page lives at, fragment stripped.
fn page_key(href: &str) -> &str {
    href.split('#').next().unwrap_or(href)
}

/// Turns free-text queries into ranked, hydrated [`SearchResult`]s.
pub struct SearchEngine<I> {
    index: I,
    max_results: usize,
}

impl<I: QueryableIndex> SearchEngine<I> {
    /// Wrap a loaded index. Taking the index by value makes initialization a
    /// one-shot affair: there is no second init to guard against.
    pub fn new(index: I) -> Self {
        Self::with_max_results(index, MAX_RESULTS)
    }

    pub fn with_max_results(index: I, max_results: usize) -> Self {
        Self { index, max_results }
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    /// Execute a query. Failures degrade to an empty result set; the host
    /// page never sees an error dialog from here.
    pub async fn search(&self, query: &str) -> Vec<SearchResult> {
        match self.try_search(query).await {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!("Query execution failed, returning no results: {}", e);
                vec![]
            }
        }
    }

    async fn try_search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        let candidates = self.index.candidates(query)?;
        if candidates.is_empty() {
            return Ok(vec![]);
        }
        let terms = query_terms(query, self.index.min_term_len());

        // Group candidates by page, preserving rank order: the first (best)
        // member leads the group, later members become its sub-results.
        let mut order: Vec<String> = vec![];
        let mut groups: AHashMap<String, Vec<Candidate>> = AHashMap::new();
        for candidate in candidates {
            let members = groups.entry(candidate.page.clone()).or_insert_with(|| {
                order.push(candidate.page.clone());
                vec![]
            });
            members.push(candidate);
        }
        order.truncate(self.max_results.saturating_sub(1));

        let picked: Vec<Vec<Candidate>> = order
            .iter()
            .map(|page| groups.remove(page).unwrap_or_default())
            .collect();

        // Hydrate every kept document concurrently.
        let hydrated: Vec<Vec<StoredFields>> =
            futures::future::try_join_all(picked.iter().map(|members| {
                futures::future::try_join_all(members.iter().map(|c| self.index.fetch(c.doc)))
            }))
            .await?;

        Ok(hydrated
            .into_iter()
            .filter_map(|mut fields| {
                if fields.is_empty() {
                    return None;
                }
                let rest = fields.split_off(1);
                let best = fields.remove(0);
                Some(SearchResult {
                    url: best.href.clone(),
                    title: best.pagetitle.clone(),
                    excerpt: build_excerpt(&best.text, &terms),
                    sub_results: rest
                        .into_iter()
                        .map(|f| SearchResult {
                            url: f.href,
                            title: f.title,
                            excerpt: build_excerpt(&f.text, &terms),
                            sub_results: vec![],
                        })
                        .collect(),
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexBuilder;
    use crate::types::{DocId, Document};
    use assert2::check;

    fn doc(id: u64, title: &str, pagetitle: &str, href: &str, content: &str) -> Document {
        Document {
            id: DocId::Int(id),
            title: title.to_string(),
            pagetitle: pagetitle.to_string(),
            href: href.to_string(),
            content: content.to_string(),
        }
    }

    fn engine_over(docs: &[Document]) -> SearchEngine<SearchIndex> {
        let mut builder = IndexBuilder::new();
        for d in docs {
            builder.add(d);
        }
        SearchEngine::new(builder.build())
    }

    #[tokio::test]
    async fn matches_only_documents_containing_the_term() {
        let engine = engine_over(&[
            doc(1, "Install", "Manual", "manual/#install", "how to install things"),
            doc(2, "Usage", "Manual2", "usage/#run", "running the tool"),
            doc(3, "Setup", "Guide", "guide/#setup", "install prerequisites first"),
        ]);

        let results = engine.search("install").await;
        check!(results.len() == 2);
        for result in &results {
            check!(result.sub_results.is_empty());
        }
    }

    #[tokio::test]
    async fn empty_query_returns_no_results() {
        let engine = engine_over(&[doc(1, "t", "p", "a", "something")]);
        check!(engine.search("").await.is_empty());
        check!(engine.search("   ").await.is_empty());
        // Below the minimum term length, nothing reaches the index.
        check!(engine.search("so").await.is_empty());
    }

    #[tokio::test]
    async fn prefix_of_a_word_matches() {
        let engine = engine_over(&[doc(1, "t", "p", "a", "installation guide")]);
        check!(!engine.search("ins").await.is_empty());
        check!(!engine.search("installat").await.is_empty());
        check!(engine.search("xyz").await.is_empty());
    }

    #[tokio::test]
    async fn sections_of_one_page_collapse_into_sub_results() {
        let engine = engine_over(&[
            doc(1, "Install", "Manual", "manual/#install", "install quickly"),
            doc(2, "Uninstall", "Manual", "manual/#uninstall", "later you may install again"),
            doc(3, "Other", "Elsewhere", "other/#x", "install elsewhere"),
        ]);

        let results = engine.search("install").await;
        check!(results.len() == 2);

        let manual = results
            .iter()
            .find(|r| r.title == "Manual")
            .expect("manual page result");
        check!(manual.sub_results.len() == 1);
        check!(manual.sub_results[0].title == "Uninstall");
        check!(manual.sub_results[0].sub_results.is_empty());
    }

    #[tokio::test]
    async fn cap_reserves_one_slot() {
        let docs: Vec<Document> = (0..30)
            .map(|i| {
                doc(
                    i,
                    "Section",
                    "Page",
                    &format!("page-{i}/#s"),
                    "install notes",
                )
            })
            .collect();
        let engine = engine_over(&docs);

        let results = engine.search("install").await;
        check!(results.len() == MAX_RESULTS - 1);
    }

    #[tokio::test]
    async fn results_are_ordered_by_score() {
        let filler = "word ".repeat(40);
        let engine = engine_over(&[
            doc(1, "Late", "Late", "late/", &format!("{filler} install")),
            doc(2, "Early", "Early", "early/", &format!("install {filler}")),
        ]);

        let results = engine.search("install").await;
        check!(results.len() == 2);
        check!(results[0].title == "Early");
        check!(results[1].title == "Late");
    }
}
