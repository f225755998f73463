use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Operation being asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Perm {
    /// `R` — read
    Read,
    /// `W` — fast-forward write
    Write,
    /// `+` — rewind / force push
    Rewind,
    /// `C` — create a ref
    Create,
    /// `D` — delete a ref
    Delete,
    /// `M` — push a merge commit
    Merge,
    /// `^C` — create a wild repo
    CreateRepo,
}

impl Perm {
    /// Default when the argument is omitted: a push.
    pub const DEFAULT: Perm = Perm::Rewind;

    pub fn as_str(self) -> &'static str {
        match self {
            Perm::Read => "R",
            Perm::Write => "W",
            Perm::Rewind => "+",
            Perm::Create => "C",
            Perm::Delete => "D",
            Perm::Merge => "M",
            Perm::CreateRepo => "^C",
        }
    }

    /// Letter a rule's permission string must contain to grant this operation.
    pub fn grant_letter(self) -> char {
        match self {
            Perm::Read => 'R',
            Perm::Write => 'W',
            Perm::Rewind => '+',
            Perm::Create | Perm::CreateRepo => 'C',
            Perm::Delete => 'D',
            Perm::Merge => 'M',
        }
    }
}

impl FromStr for Perm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "R" => Perm::Read,
            "W" => Perm::Write,
            "+" => Perm::Rewind,
            "C" => Perm::Create,
            "D" => Perm::Delete,
            "M" => Perm::Merge,
            "^C" => Perm::CreateRepo,
            _ => return Err(Error::InvalidPerm(s.to_string())),
        })
    }
}

impl fmt::Display for Perm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
