//! Verdict output and exit status.
//!
//! Exit status follows the question being asked: 0 when access is allowed,
//! 1 when the verdict carries the denial marker, so `if access ...; then`
//! reads as "if allowed".

use std::io::{self, Write};

use crate::eval::Verdict;
use crate::trace;

pub const EXIT_ALLOWED: u8 = 0;
pub const EXIT_DENIED: u8 = 1;

/// Exit status for a verdict. Quiet mode does not change it.
pub fn exit_status(verdict: &Verdict) -> u8 {
    if verdict.is_denied() {
        EXIT_DENIED
    } else {
        EXIT_ALLOWED
    }
}

/// Print the verdict line unless `quiet`.
pub fn write_verdict<W: Write>(out: &mut W, verdict: &Verdict, quiet: bool) -> io::Result<()> {
    if !quiet {
        writeln!(out, "{verdict}")?;
    }
    Ok(())
}

/// Legend, one line per traced event, then a blank line.
pub fn write_trace<W: Write>(out: &mut W, lines: &[String]) -> io::Result<()> {
    for line in trace::legend() {
        writeln!(out, "{line}")?;
    }
    for line in lines {
        writeln!(out, "{line}")?;
    }
    writeln!(out)
}
