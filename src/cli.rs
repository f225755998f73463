//! Command-line surface: `access [-q|-s] <repo> <user> [<perm> [<ref>]]`.

use std::io::{BufRead, Write};

use clap::Parser;

use crate::batch::{self, Slot};
use crate::error::{Error, Result};
use crate::eval::Evaluator;
use crate::logging;
use crate::present;
use crate::query::Query;
use crate::trace::{self, ConfLineCache, ConfSource, RuleRegistry};

/// Is operation <perm> on ref <ref> of <repo> permitted for <user>?
///
/// Exit status is 0 if allowed and 1 if denied. Use `%` for <repo> or <user>
/// to read pairs from standard input, one per line; output is then
/// `repo<TAB>user<TAB>verdict` per line.
#[derive(Debug, Parser)]
#[command(name = "access", version)]
pub struct Args {
    /// Quiet: print nothing, rely on the exit status
    #[arg(short, long, conflicts_with = "show")]
    pub quiet: bool,

    /// Show which rules were considered, and how, on stderr
    #[arg(short, long)]
    pub show: bool,

    /// Repository name, or `%` to read it from stdin
    pub repo: String,

    /// User name, or `%` to read it from stdin
    pub user: String,

    /// One of R W + C D M ^C (default +)
    pub perm: Option<String>,

    /// `any` (default; skips deny rules), a bare branch name, or a full ref
    #[arg(value_name = "REF")]
    pub ref_name: Option<String>,
}

/// What one invocation will do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Single,
    Batch { repo: Slot, user: Slot },
}

impl Args {
    /// Decide single vs. batch mode, rejecting flags batch mode cannot honor.
    /// Touches nothing but the arguments, so callers can run it before any
    /// setup.
    pub fn mode(&self) -> Result<Mode> {
        if !batch::is_batch(&self.repo, &self.user) {
            return Ok(Mode::Single);
        }
        if self.quiet || self.show {
            return Err(Error::Usage(
                "'-q' and '-s' are meaningless when reading pairs from stdin ('%')".into(),
            ));
        }
        Ok(Mode::Batch {
            repo: Slot::from_arg(&self.repo),
            user: Slot::from_arg(&self.user),
        })
    }

    pub fn query(&self) -> Result<Query> {
        Query::normalize(
            self.repo.as_str(),
            self.user.as_str(),
            self.perm.as_deref(),
            self.ref_name.as_deref(),
        )
    }
}

/// Run one invocation and return the process exit status.
pub fn run<E, S, R, O, W>(
    args: &Args,
    evaluator: &E,
    registry: &RuleRegistry,
    cache: &mut ConfLineCache<S>,
    input: R,
    out: &mut O,
    err: &mut W,
) -> Result<u8>
where
    E: Evaluator + ?Sized,
    S: ConfSource,
    R: BufRead,
    O: Write,
    W: Write,
{
    let mode = args.mode()?;
    let query = args.query()?;

    let (repo, user) = match mode {
        Mode::Batch { repo, user } => (repo, user),
        Mode::Single => {
            let evaluation = evaluator.evaluate(&query, args.show)?;
            logging::log_decision(&query, &evaluation.verdict);

            if args.show {
                let Some(trail) = evaluation.trail.as_deref() else {
                    let verdict = &evaluation.verdict;
                    return Err(Error::NoTrace(if verdict.is_denied_by_existence() {
                        format!("{verdict} (repo exists, no rules were consulted)")
                    } else {
                        verdict.to_string()
                    }));
                };
                let lines = trace::explain(trail, registry, cache)?;
                present::write_trace(err, &lines)?;
            }
            present::write_verdict(out, &evaluation.verdict, args.quiet)?;
            return Ok(present::exit_status(&evaluation.verdict));
        }
    };

    batch::run(evaluator, &query, &repo, &user, input, out)?;
    Ok(present::EXIT_ALLOWED)
}
