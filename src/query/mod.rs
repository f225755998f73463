//! Decision query normalization: defaults, ref canonicalization, validation.

pub mod perm;
pub mod refname;

pub use perm::Perm;

use crate::error::Result;

/// One access question: may `user` perform `perm` on `ref_name` of `repo`?
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub repo: String,
    pub user: String,
    pub perm: Perm,
    /// Either `any` or a qualified ref (`refs/...`, `VREF/...`).
    pub ref_name: String,
}

impl Query {
    /// Build a query from raw positional arguments.
    ///
    /// `perm` defaults to `+` and `ref_name` to `any` when omitted or empty.
    /// Bare ref names are qualified under `refs/heads/`.
    pub fn normalize(
        repo: impl Into<String>,
        user: impl Into<String>,
        perm: Option<&str>,
        ref_name: Option<&str>,
    ) -> Result<Self> {
        let perm = match perm {
            None | Some("") => Perm::DEFAULT,
            Some(p) => p.parse()?,
        };
        let ref_name = refname::canonicalize(ref_name);
        refname::validate(&ref_name)?;
        Ok(Self {
            repo: repo.into(),
            user: user.into(),
            perm,
            ref_name,
        })
    }

    /// True when the ref is the `any` sentinel.
    pub fn ref_is_any(&self) -> bool {
        self.ref_name == refname::ANY
    }

    /// Same perm/ref, different repo/user. Used by batch mode.
    pub fn with_pair(&self, repo: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            user: user.into(),
            perm: self.perm,
            ref_name: self.ref_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn defaults_to_push_on_any() {
        let q = Query::normalize("foo", "alice", None, None).unwrap();
        assert_eq!(q.perm, Perm::Rewind);
        assert_eq!(q.ref_name, "any");
        assert!(q.ref_is_any());
    }

    #[test]
    fn empty_perm_means_default() {
        let q = Query::normalize("foo", "alice", Some(""), Some("master")).unwrap();
        assert_eq!(q.perm, Perm::Rewind);
        assert_eq!(q.ref_name, "refs/heads/master");
    }

    #[test]
    fn invalid_perm_reported_before_ref() {
        let err = Query::normalize("foo", "alice", Some("Z"), Some("a b")).unwrap_err();
        assert!(matches!(err, Error::InvalidPerm(p) if p == "Z"));
    }

    #[test]
    fn invalid_ref_reported_after_rewrite() {
        let err = Query::normalize("foo", "alice", Some("W"), Some("bad name")).unwrap_err();
        assert!(matches!(err, Error::InvalidRef(r) if r == "refs/heads/bad name"));
    }

    #[test]
    fn renormalizing_keeps_the_query() {
        let q = Query::normalize("foo", "alice", Some("W"), Some("dev")).unwrap();
        let again =
            Query::normalize(&q.repo, &q.user, Some(q.perm.as_str()), Some(&q.ref_name)).unwrap();
        assert_eq!(q, again);
    }

    #[test]
    fn with_pair_keeps_perm_and_ref() {
        let q = Query::normalize("%", "alice", Some("R"), Some("refs/tags/v1")).unwrap();
        let pair = q.with_pair("bar", "bob");
        assert_eq!(pair.repo, "bar");
        assert_eq!(pair.user, "bob");
        assert_eq!(pair.perm, Perm::Read);
        assert_eq!(pair.ref_name, "refs/tags/v1");
    }
}
