//! Query execution and dispatch.
//!
//! [`engine`] turns a query string into ranked, hydrated results over a
//! [`QueryableIndex`]; [`controller`] wraps the engine with debouncing and
//! generation tagging; [`excerpt`] produces the highlighted display text.

pub(crate) mod controller;
pub(crate) mod engine;
pub(crate) mod excerpt;

pub use controller::{DEFAULT_DEBOUNCE, QueryController, QueryOutcome};
pub use engine::{Candidate, MAX_RESULTS, QueryableIndex, SearchEngine};
