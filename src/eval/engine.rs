//! Rule engine over a compiled rule set.
//!
//! The rule set is a TOML file produced by the configuration compiler:
//!
//! ```toml
//! repos = ["gitolite-admin", "testing"]
//!
//! [[rule]]
//! id = 3
//! repo = "testing"
//! users = ["@all"]
//! perm = "RW+"
//! refex = "refs/.*"
//! ```
//!
//! Rules whose repo pattern and user list both match are considered in file
//! order; the first allow or deny that applies decides. A deny rule has perm
//! `-`. When tracing, every considered rule contributes one `<id><code>` token
//! to the trail, followed by `F` if nothing decided.

use std::collections::HashSet;
use std::path::Path;

use regex::Regex;
use serde::Deserialize;

use super::{Evaluation, Evaluator, Verdict};
use crate::error::{Error, Result};
use crate::query::{Perm, Query, refname};
use crate::trace::Outcome;

/// User entry matching every user.
const ALL_USERS: &str = "@all";

/// Refex used by rules that do not name one.
const DEFAULT_REFEX: &str = "refs/.*";

#[derive(Debug, Deserialize)]
struct RuleSetFile {
    #[serde(default)]
    repos: Vec<String>,
    #[serde(default, rename = "rule")]
    rules: Vec<RuleEntry>,
}

#[derive(Debug, Deserialize)]
struct RuleEntry {
    id: u32,
    repo: String,
    users: Vec<String>,
    perm: String,
    #[serde(default)]
    refex: Option<String>,
}

#[derive(Debug)]
struct Rule {
    id: u32,
    repo: Regex,
    users: Vec<String>,
    perm: String,
    refex_src: String,
    refex: Regex,
}

impl Rule {
    fn compile(entry: RuleEntry, path: &Path) -> Result<Self> {
        let bad = |reason: String| Error::RuleSet {
            path: path.to_path_buf(),
            reason: format!("rule {}: {reason}", entry.id),
        };
        let repo = Regex::new(&format!("^(?:{})$", entry.repo)).map_err(|e| bad(e.to_string()))?;
        let refex_src = entry.refex.clone().unwrap_or_else(|| DEFAULT_REFEX.to_string());
        let qualified = if refname::is_qualified(&refex_src) {
            refex_src.clone()
        } else {
            format!("{}{refex_src}", refname::BRANCH_PREFIX)
        };
        let refex = Regex::new(&format!("^(?:{qualified})")).map_err(|e| bad(e.to_string()))?;
        if entry.perm.is_empty() {
            return Err(bad("empty perm".into()));
        }
        Ok(Self {
            id: entry.id,
            repo,
            users: entry.users,
            perm: entry.perm,
            refex_src,
            refex,
        })
    }

    fn is_deny(&self) -> bool {
        self.perm == "-"
    }

    fn applies_to(&self, repo: &str, user: &str) -> bool {
        self.repo.is_match(repo) && self.users.iter().any(|u| u == user || u == ALL_USERS)
    }
}

/// Evaluator backed by a compiled rule set.
#[derive(Debug)]
pub struct RuleEngine {
    existing: HashSet<String>,
    rules: Vec<Rule>,
}

impl RuleEngine {
    /// Load and compile the rule set at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml(&text, path)
    }

    /// Compile a rule set from TOML text. `origin` is only used in errors.
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self> {
        let file: RuleSetFile = toml::from_str(text).map_err(|e| Error::RuleSet {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })?;
        let rules = file
            .rules
            .into_iter()
            .map(|entry| Rule::compile(entry, origin))
            .collect::<Result<Vec<_>>>()?;
        log::debug!("loaded {} rules from {}", rules.len(), origin.display());
        Ok(Self {
            existing: file.repos.into_iter().collect(),
            rules,
        })
    }

    fn denied(query: &Query, by: &str) -> Verdict {
        Verdict::new(format!(
            "{} {} {} {} DENIED by {by}",
            query.perm, query.ref_name, query.repo, query.user
        ))
    }
}

impl Evaluator for RuleEngine {
    fn evaluate(&self, query: &Query, trace: bool) -> Result<Evaluation> {
        if query.perm == Perm::CreateRepo && self.existing.contains(&query.repo) {
            return Ok(Evaluation {
                verdict: Self::denied(query, "existence"),
                trail: None,
            });
        }

        let mut tokens: Vec<String> = Vec::new();
        let mut record = |id: u32, outcome: Outcome| {
            if trace {
                tokens.push(format!("{id}{}", outcome.code()));
            }
        };

        let any = query.ref_is_any();
        let mut verdict = None;
        for rule in self
            .rules
            .iter()
            .filter(|r| r.applies_to(&query.repo, &query.user))
        {
            let refex_hit = !any && rule.refex.is_match(&query.ref_name);
            if rule.is_deny() {
                if any {
                    record(rule.id, Outcome::SkippedDeny);
                } else if refex_hit {
                    record(rule.id, Outcome::Denied);
                    verdict = Some(Self::denied(query, &rule.refex_src));
                    break;
                } else {
                    record(rule.id, Outcome::SkippedRefex);
                }
            } else if !any && !refex_hit {
                record(rule.id, Outcome::SkippedRefex);
            } else if !rule.perm.contains(query.perm.grant_letter()) {
                record(rule.id, Outcome::SkippedPerm);
            } else {
                record(rule.id, Outcome::Allowed);
                verdict = Some(Verdict::new(rule.refex_src.clone()));
                break;
            }
        }

        let verdict = match verdict {
            Some(v) => v,
            None => {
                if trace {
                    tokens.push(Outcome::Fallthrough.code().to_string());
                }
                Self::denied(query, "fallthru")
            }
        };

        Ok(Evaluation {
            verdict,
            trail: trace.then(|| tokens.join(" ")),
        })
    }
}
