//! Wires the query controller, renderer, and navigator into one page-session
//! search surface.
//!
//! Everything here runs on the host's single event loop: input events feed
//! the controller, query outcomes come back over a channel, and only the
//! newest generation's outcome is ever rendered.

use tokio::sync::mpsc;

use crate::nav::{ArrowKey, Focus, FocusSink, KeyboardNavigator};
use crate::query::{QueryController, QueryOutcome, QueryableIndex, SearchEngine};
use crate::render::{RenderedResults, ResultRenderer};

/// A live search session over a loaded index.
///
/// Constructing the session consumes the index, which makes initialization
/// once-per-session by construction.
pub struct SearchSession<I> {
    controller: QueryController<I>,
    renderer: ResultRenderer,
    navigator: KeyboardNavigator,
    outcomes: mpsc::UnboundedReceiver<QueryOutcome>,
    rendered: RenderedResults,
}

impl<I: QueryableIndex + 'static> SearchSession<I> {
    pub fn new(index: I) -> Self {
        Self::with_engine(SearchEngine::new(index))
    }

    pub fn with_engine(engine: SearchEngine<I>) -> Self {
        let (controller, outcomes) = QueryController::new(engine);
        Self {
            controller,
            renderer: ResultRenderer::default(),
            navigator: KeyboardNavigator::new(),
            outcomes,
            rendered: RenderedResults::default(),
        }
    }

    /// Forward one keystroke's worth of input text.
    pub fn input_changed(&mut self, text: &str) {
        self.controller.input_changed(text);
    }

    /// Wait for the next outcome that is still current and render it.
    /// Stale completions are discarded on the way. Returns `None` once the
    /// controller side has shut down.
    pub async fn render_next(&mut self) -> Option<&RenderedResults> {
        loop {
            let outcome = self.outcomes.recv().await?;
            if self.apply(outcome) {
                return Some(&self.rendered);
            }
        }
    }

    /// Render an outcome unless it has been superseded. Returns whether a
    /// render happened.
    pub fn apply(&mut self, outcome: QueryOutcome) -> bool {
        if !self.controller.is_current(&outcome) {
            tracing::debug!(
                "Discarding stale results for '{}' (generation {})",
                outcome.query,
                outcome.generation
            );
            return false;
        }

        self.rendered = self.renderer.render(&outcome.results);
        self.navigator.reset(self.rendered.focusable());
        true
    }

    pub fn handle_arrow(&mut self, key: ArrowKey, sink: &mut impl FocusSink) -> bool {
        self.navigator.handle_arrow(key, sink)
    }

    pub fn handle_shortcut(
        &mut self,
        key: char,
        input_active: bool,
        sink: &mut impl FocusSink,
    ) -> bool {
        self.navigator.handle_shortcut(key, input_active, sink)
    }

    pub fn focus(&self) -> Focus {
        self.navigator.focus()
    }

    pub fn rendered(&self) -> &RenderedResults {
        &self.rendered
    }
}
