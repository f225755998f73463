/// How one rule was disposed of during evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// `d` — deny rule skipped, ref unknown or `any`
    SkippedDeny,
    /// `r` — refex did not match
    SkippedRefex,
    /// `p` — permission did not match
    SkippedPerm,
    /// `D` — explicitly denied
    Denied,
    /// `A` — explicitly allowed
    Allowed,
    /// `F` — fell through to the end (default deny)
    Fallthrough,
}

impl Outcome {
    pub const ALL: [Outcome; 6] = [
        Outcome::SkippedDeny,
        Outcome::SkippedRefex,
        Outcome::SkippedPerm,
        Outcome::Denied,
        Outcome::Allowed,
        Outcome::Fallthrough,
    ];

    pub fn code(self) -> char {
        match self {
            Outcome::SkippedDeny => 'd',
            Outcome::SkippedRefex => 'r',
            Outcome::SkippedPerm => 'p',
            Outcome::Denied => 'D',
            Outcome::Allowed => 'A',
            Outcome::Fallthrough => 'F',
        }
    }

    /// Codes that may follow a rule id. `F` stands alone.
    pub fn from_rule_code(c: char) -> Option<Self> {
        Some(match c {
            'd' => Outcome::SkippedDeny,
            'r' => Outcome::SkippedRefex,
            'p' => Outcome::SkippedPerm,
            'D' => Outcome::Denied,
            'A' => Outcome::Allowed,
            _ => return None,
        })
    }

    pub fn meaning(self) -> &'static str {
        match self {
            Outcome::SkippedDeny => "skipped deny rule due to ref unknown or 'any'",
            Outcome::SkippedRefex => "skipped due to refex not matching",
            Outcome::SkippedPerm => "skipped due to perm (W, +, etc) not matching",
            Outcome::Denied => "explicitly denied",
            Outcome::Allowed => "explicitly allowed",
            Outcome::Fallthrough => "fell thru to the end (default deny)",
        }
    }
}
