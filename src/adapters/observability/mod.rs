//! Observability Adapters.
//!
//! - `EvaluationObserver` - Records streaming runs for offline evaluation

mod evaluation_observer;

pub use evaluation_observer::{EvaluationObserver, FinalAnswer, NodeTransition};
