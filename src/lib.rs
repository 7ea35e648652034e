//! Sharded full-text search for multi-document static sites.
//!
//! Two cooperating halves: an offline build turns a JSON document corpus
//! into a prefix-tokenized index persisted as independent shard files, and
//! a runtime [`SearchSession`] loads the shards back, answers debounced
//! free-text queries, and drives keyboard focus over the rendered results.

pub mod cli;
pub mod corpus;
pub mod error;
pub mod index;
pub mod nav;
pub mod query;
pub mod render;
pub mod session;
pub mod tracing;
pub mod types;

pub use error::{BuildError, Result, SearchError};
pub use index::{IndexBuilder, IndexConfig, IndexShard, SearchIndex};
pub use nav::{ArrowKey, Focus, FocusSink, KeyboardNavigator};
pub use query::{QueryController, QueryOutcome, QueryableIndex, SearchEngine};
pub use render::{DisplayNode, RenderedResults, ResultRenderer};
pub use session::SearchSession;
pub use types::{DocId, Document, SearchResult, StoredFields};
