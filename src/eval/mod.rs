pub mod decision;
pub mod engine;

pub use decision::{DENIED, DENIED_BY_EXISTENCE, Evaluation, Verdict};
pub use engine::RuleEngine;

use crate::error::Result;
use crate::query::Query;

/// Decides access for one query.
///
/// The trail is only produced when `trace` is set; an evaluator may still
/// return `None` for terminal verdicts that have nothing to explain.
pub trait Evaluator {
    fn evaluate(&self, query: &Query, trace: bool) -> Result<Evaluation>;
}
