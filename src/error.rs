//! Error type shared by every component.
//!
//! Usage errors are problems with how the tool was invoked. Everything else
//! means the evaluator output and the on-disk rule base disagree, and nothing
//! downstream can be trusted; those abort the run.

use std::path::PathBuf;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Bad invocation: missing arguments or incompatible flags.
    #[error("{0}")]
    Usage(String),

    /// Permission argument outside `R W + C D M ^C`.
    #[error("invalid perm '{0}'")]
    InvalidPerm(String),

    /// Ref argument that fails the ref-name grammar.
    #[error("invalid ref name '{0}'")]
    InvalidRef(String),

    /// Tracing was requested but the evaluator produced no trail.
    #[error("no trace available: {0}")]
    NoTrace(String),

    /// A trail token that is neither a rule reference nor the fallthrough marker.
    #[error("malformed trace at token {position} ('{token}'): {reason}")]
    MalformedTrace {
        position: usize,
        token: String,
        reason: &'static str,
    },

    /// A registry record that does not split into `<id> <file> <line>`.
    #[error("corrupt rule registry {}: line {line_no}: '{record}'", path.display())]
    Registry {
        path: PathBuf,
        line_no: usize,
        record: String,
    },

    /// The registry points at a line the configuration file does not have.
    #[error("{file} has no line {line}")]
    ConfLine { file: String, line: usize },

    /// The compiled rule set could not be parsed.
    #[error("bad rule set {}: {reason}", path.display())]
    RuleSet { path: PathBuf, reason: String },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failure on stdin/stdout/stderr.
    #[error("stdio: {0}")]
    Stdio(#[from] std::io::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors caused by how the tool was invoked.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Error::Usage(_) | Error::InvalidPerm(_) | Error::InvalidRef(_)
        )
    }

    /// Process exit status for this error. 0 and 1 are reserved for
    /// allowed/denied verdicts.
    pub fn exit_code(&self) -> u8 {
        if self.is_usage() { 2 } else { 3 }
    }
}
