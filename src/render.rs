//! Projection of query results into a display-ready, focusable list.

use crate::query::MAX_RESULTS;
use crate::types::SearchResult;

/// Nesting level of a display node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Result,
    SubResult,
}

/// One focusable link node in the rendered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayNode {
    pub kind: NodeKind,
    pub title: String,
    pub url: String,
    /// HTML excerpt, escaped with `<mark>` highlights.
    pub excerpt: String,
}

/// A fully rebuilt result list. Replaces whatever was rendered before; stale
/// nodes never leak across renders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedResults {
    /// The host shows the result container iff this is set.
    pub visible: bool,
    /// Focusable nodes in document order: each top-level result followed by
    /// its sub-results, one nesting level deep.
    pub nodes: Vec<DisplayNode>,
}

impl RenderedResults {
    /// Number of focusable link handles.
    pub fn focusable(&self) -> usize {
        self.nodes.len()
    }

    pub fn top_level_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| n.kind == NodeKind::Result)
            .count()
    }
}

/// Pure projection from results to display nodes; no other side effects.
pub struct ResultRenderer {
    max_results: usize,
}

impl Default for ResultRenderer {
    fn default() -> Self {
        Self::new(MAX_RESULTS)
    }
}

impl ResultRenderer {
    pub fn new(max_results: usize) -> Self {
        Self { max_results }
    }

    pub fn render(&self, results: &[SearchResult]) -> RenderedResults {
        let mut nodes = Vec::new();
        for result in results.iter().take(self.max_results.saturating_sub(1)) {
            nodes.push(DisplayNode {
                kind: NodeKind::Result,
                title: result.title.clone(),
                url: result.url.clone(),
                excerpt: result.excerpt.clone(),
            });
            for sub in &result.sub_results {
                nodes.push(DisplayNode {
                    kind: NodeKind::SubResult,
                    title: sub.title.clone(),
                    url: sub.url.clone(),
                    excerpt: sub.excerpt.clone(),
                });
            }
        }

        RenderedResults {
            visible: !results.is_empty(),
            nodes,
        }
    }
}
