//! Ref argument canonicalization and validation.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

/// Sentinel ref that skips deny rules, as the pre-receive check does.
pub const ANY: &str = "any";

/// Prefix given to bare branch names.
pub const BRANCH_PREFIX: &str = "refs/heads/";

/// Namespaces that are already fully qualified.
const QUALIFIED_PREFIXES: &[&str] = &["refs/", "VREF/"];

static REFNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-zA-Z][-0-9a-zA-Z._@/+:,]*$").expect("static pattern"));

/// True if `name` starts with `refs/` or `VREF/`.
pub fn is_qualified(name: &str) -> bool {
    QUALIFIED_PREFIXES.iter().any(|p| name.starts_with(p))
}

/// Fill in the default and qualify bare branch names. Never rewrites twice:
/// the output is either `any` or starts with a qualified prefix.
pub fn canonicalize(raw: Option<&str>) -> String {
    match raw {
        None | Some("") => ANY.to_string(),
        Some(ANY) => ANY.to_string(),
        Some(name) if is_qualified(name) => name.to_string(),
        Some(name) => format!("{BRANCH_PREFIX}{name}"),
    }
}

/// Check a canonical ref against the ref-name grammar.
pub fn validate(name: &str) -> Result<()> {
    let ok = REFNAME.is_match(name)
        && !name.contains("..")
        && !name.contains("//")
        && !name.ends_with('/')
        && !name.ends_with(".lock");
    if ok {
        Ok(())
    } else {
        Err(Error::InvalidRef(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_empty_ref_becomes_any() {
        assert_eq!(canonicalize(None), "any");
        assert_eq!(canonicalize(Some("")), "any");
        assert_eq!(canonicalize(Some("any")), "any");
    }

    #[test]
    fn bare_name_gets_branch_prefix() {
        assert_eq!(canonicalize(Some("master")), "refs/heads/master");
        assert_eq!(canonicalize(Some("feature/x")), "refs/heads/feature/x");
    }

    #[test]
    fn qualified_names_untouched() {
        assert_eq!(canonicalize(Some("refs/tags/v1")), "refs/tags/v1");
        assert_eq!(canonicalize(Some("VREF/NAME/foo")), "VREF/NAME/foo");
    }

    #[test]
    fn canonicalize_is_idempotent() {
        for raw in ["any", "master", "refs/heads/dev", "VREF/COUNT/3", "a/b/c", "refs"] {
            let once = canonicalize(Some(raw));
            assert_eq!(canonicalize(Some(&once)), once, "input {raw}");
        }
    }

    #[test]
    fn branch_named_refs_is_prefixed_once() {
        // "refs" alone lacks the trailing slash of the namespace
        assert_eq!(canonicalize(Some("refs")), "refs/heads/refs");
    }

    #[test]
    fn grammar_accepts_common_refs() {
        for ok in ["any", "refs/heads/master", "refs/tags/v1.2.3", "VREF/NAME/a+b", "refs/heads/u@x"] {
            assert!(validate(ok).is_ok(), "{ok}");
        }
    }

    #[test]
    fn grammar_rejects_bad_refs() {
        for bad in [
            "refs/heads/a b",
            "refs/heads/../x",
            "refs/heads//x",
            "refs/heads/x/",
            "refs/heads/x.lock",
            "-refs/heads/x",
            "refs/heads/x~1",
            "refs/heads/x*",
        ] {
            assert!(matches!(validate(bad), Err(Error::InvalidRef(_))), "{bad}");
        }
    }
}
