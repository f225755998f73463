//! Bulk queries: one evaluator call per `(repo, user)` pair read from input.
//!
//! Either argument may be the `%` wildcard. For every input line the fixed
//! argument keeps its value and each wildcard takes the next whitespace field
//! (repo before user). Output is `repo\tuser\tverdict` per input line, flushed
//! as it is produced so slow or interactive input gets answers immediately.

use std::io::{BufRead, Write};

use crate::error::Result;
use crate::eval::Evaluator;
use crate::logging;
use crate::query::Query;

/// Argument value that switches to batch mode.
pub const WILDCARD: &str = "%";

/// A repo or user argument in batch mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    Fixed(String),
    /// Filled from each input line.
    Wild,
}

impl Slot {
    pub fn from_arg(arg: &str) -> Self {
        if arg == WILDCARD {
            Slot::Wild
        } else {
            Slot::Fixed(arg.to_string())
        }
    }

    pub fn is_wild(&self) -> bool {
        matches!(self, Slot::Wild)
    }

    fn fill<'a>(&'a self, fields: &mut impl Iterator<Item = &'a str>) -> &'a str {
        match self {
            Slot::Fixed(value) => value,
            Slot::Wild => fields.next().unwrap_or(""),
        }
    }
}

/// True if either argument is the wildcard.
pub fn is_batch(repo: &str, user: &str) -> bool {
    repo == WILDCARD || user == WILDCARD
}

/// Evaluate every line of `input` with the perm/ref of `template`.
/// Returns the number of lines answered. Evaluator errors abort the run.
pub fn run<E, R, W>(
    evaluator: &E,
    template: &Query,
    repo: &Slot,
    user: &Slot,
    input: R,
    output: &mut W,
) -> Result<usize>
where
    E: Evaluator + ?Sized,
    R: BufRead,
    W: Write,
{
    let mut answered = 0;
    for line in input.lines() {
        let line = line?;
        let mut fields = line.split_whitespace();
        let r = repo.fill(&mut fields);
        let u = user.fill(&mut fields);

        let query = template.with_pair(r, u);
        let evaluation = evaluator.evaluate(&query, false)?;
        logging::log_decision(&query, &evaluation.verdict);

        writeln!(output, "{r}\t{u}\t{}", evaluation.verdict)?;
        output.flush()?;
        answered += 1;
    }
    log::debug!("batch: answered {answered} pair(s)");
    Ok(answered)
}
