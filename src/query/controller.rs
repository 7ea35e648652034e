//! Debounced, generation-tagged query dispatch.
//!
//! Rapid input events collapse into at most one executed query, timed from
//! the last event. Debounce alone cannot stop a slow, already-executing
//! query from finishing after a newer one; every dispatch therefore carries
//! a generation, and receivers render an outcome only while it is still the
//! newest one issued.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;
use tokio::time::Duration;
use tokio_util::sync::CancellationToken;

use super::engine::{QueryableIndex, SearchEngine};
use crate::types::SearchResult;

/// Default quiet interval before a query executes.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// The outcome of one executed query.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub generation: u64,
    pub query: String,
    pub results: Vec<SearchResult>,
}

/// Owns the pending debounce timer and the generation counter.
pub struct QueryController<I> {
    engine: Arc<SearchEngine<I>>,
    debounce: Duration,
    generation: Arc<AtomicU64>,
    pending: Option<CancellationToken>,
    outcomes: mpsc::UnboundedSender<QueryOutcome>,
}

impl<I: QueryableIndex + 'static> QueryController<I> {
    /// Returns the controller and the receiving end of its outcome stream.
    pub fn new(engine: SearchEngine<I>) -> (Self, mpsc::UnboundedReceiver<QueryOutcome>) {
        Self::with_debounce(engine, DEFAULT_DEBOUNCE)
    }

    pub fn with_debounce(
        engine: SearchEngine<I>,
        debounce: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<QueryOutcome>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                engine: Arc::new(engine),
                debounce,
                generation: Arc::new(AtomicU64::new(0)),
                pending: None,
                outcomes: tx,
            },
            rx,
        )
    }

    /// Handle one input event: cancel any pending (not yet fired) query and
    /// schedule a fresh one a debounce interval from now.
    pub fn input_changed(&mut self, text: &str) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();
        let engine = Arc::clone(&self.engine);
        let outcomes = self.outcomes.clone();
        let query = text.to_string();
        let debounce = self.debounce;

        tokio::spawn(async move {
            tokio::select! {
                () = task_cancel.cancelled() => return,
                () = tokio::time::sleep(debounce) => {}
            }
            // Past this point the query runs to completion. If it gets
            // superseded meanwhile, the receiver discards the outcome by
            // generation instead.
            let results = engine.search(&query).await;
            let _ = outcomes.send(QueryOutcome {
                generation,
                query,
                results,
            });
        });

        self.pending = Some(cancel);
    }

    /// Newest generation handed out so far.
    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Whether an outcome belongs to the newest query. Highest generation
    /// wins; completions of superseded queries must be discarded.
    pub fn is_current(&self, outcome: &QueryOutcome) -> bool {
        outcome.generation == self.latest_generation()
    }

    pub fn engine(&self) -> &SearchEngine<I> {
        &self.engine
    }
}
