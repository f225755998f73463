use std::fmt;

/// Substring that marks a refused verdict.
pub const DENIED: &str = "DENIED";

/// Denial reason for `^C` against a repo that already exists.
pub const DENIED_BY_EXISTENCE: &str = "DENIED by existence";

/// The evaluator's answer. Opaque text; refused iff it contains `DENIED`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict(String);

impl Verdict {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_denied(&self) -> bool {
        self.0.contains(DENIED)
    }

    /// `^C` on an existing repo. Terminal; there is nothing to trace.
    pub fn is_denied_by_existence(&self) -> bool {
        self.0.contains(DENIED_BY_EXISTENCE)
    }

    pub fn label(&self) -> &'static str {
        if self.is_denied() { "DENY" } else { "ALLOW" }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What one evaluator call produces.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub verdict: Verdict,
    /// Encoded decision trail; only present when tracing was requested.
    pub trail: Option<String>,
}
