//! Logger setup and decision records.
//!
//! Diagnostics go to stderr at the configured level. When a log file is
//! configured, every decision is also appended there as one tab-separated
//! record.

use std::fs::OpenOptions;

use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};

use crate::config::Config;
use crate::eval::Verdict;
use crate::query::Query;

/// Target used for decision records, so they can be told apart in the file.
pub const DECISION_TARGET: &str = "decision";

/// Install the global logger. Best-effort: a bad level falls back to `warn`,
/// an unopenable log file is skipped, and a second call is a no-op.
pub fn init(config: &Config) {
    let level = config
        .settings
        .log_level
        .parse::<LevelFilter>()
        .unwrap_or(LevelFilter::Warn);
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        log_config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    if let Some(path) = config.log_file() {
        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => loggers.push(WriteLogger::new(LevelFilter::Info, log_config, file)),
            Err(e) => eprintln!("refgate: cannot open log file {}: {e}", path.display()),
        }
    }

    let _ = CombinedLogger::init(loggers);
}

/// Single-line record for one decision.
pub fn decision_record(query: &Query, verdict: &Verdict) -> String {
    // one record per line
    let text = verdict.as_str().replace('\n', "; ");
    format!(
        "{}\t{}\t{}\t{}\t{}\t{text}",
        verdict.label(),
        query.repo,
        query.user,
        query.perm,
        query.ref_name
    )
}

/// Log one decision at info level under [`DECISION_TARGET`].
pub fn log_decision(query: &Query, verdict: &Verdict) {
    log::info!(target: DECISION_TARGET, "{}", decision_record(query, verdict));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_is_tab_separated() {
        let q = Query::normalize("foo", "alice", Some("W"), Some("dev")).unwrap();
        let v = Verdict::new("W refs/heads/dev foo alice DENIED by fallthru");
        assert_eq!(
            decision_record(&q, &v),
            "DENY\tfoo\talice\tW\trefs/heads/dev\tW refs/heads/dev foo alice DENIED by fallthru"
        );
    }

    #[test]
    fn record_stays_on_one_line() {
        let q = Query::normalize("foo", "alice", None, None).unwrap();
        let v = Verdict::new("a\nb");
        assert!(!decision_record(&q, &v).contains('\n'));
    }
}
