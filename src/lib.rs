//! refgate: ref-level access queries against a git hosting rule base.
//!
//! Answers "may <user> perform <perm> on <ref> of <repo>?", explains the
//! answer on request, and streams bulk queries. The evaluator returns an
//! opaque verdict (denied iff it contains `DENIED`) and, when tracing, an
//! encoded trail of the rules it considered. The [`trace`] module turns that
//! trail back into configuration file lines.
//!
//! # Architecture
//!
//! - **[`query`]** — Argument normalization: perm/ref defaults, ref qualification, validation.
//! - **[`eval`]** — Evaluator seam, verdict types, and the rule engine over a compiled rule set.
//! - **[`trace`]** — Trail decoding, rule registry scan, config line cache, rendering.
//! - **[`batch`]** — Streaming evaluation of `(repo, user)` pairs from stdin.
//! - **[`present`]** — Verdict printing and exit status.
//! - **[`cli`]** — Argument parsing and the per-invocation driver.
//! - **[`config`]** — Configuration loading: embedded defaults + user overlay merge.
//! - **[`logging`]** — stderr diagnostics and the optional decision log.

/// Streaming bulk queries.
pub mod batch;
/// Argument parsing and invocation driver.
pub mod cli;
/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// Crate error type.
pub mod error;
/// Evaluator trait, verdicts, rule engine.
pub mod eval;
/// Logger setup and decision records.
pub mod logging;
/// Verdict output and exit status.
pub mod present;
/// Query normalization.
pub mod query;
/// Decision trail explanation.
pub mod trace;

pub use error::{Error, Result};
