//! Outcome of comparing two candidates.

use std::fmt;

/// Which of two candidates is more harmonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preference {
    /// The first candidate is more harmonic.
    First,
    /// The second candidate is more harmonic.
    Second,
    /// Neither candidate is preferred.
    Tie,
    /// Both candidates have the same count on every constraint.
    IdentViolations,
    /// The evidence or a stratum prefers each candidate in turn.
    Conflict,
}

impl Preference {
    /// Returns the preference with the candidates swapped.
    pub fn flip(self) -> Self {
        match self {
            Preference::First => Preference::Second,
            Preference::Second => Preference::First,
            other => other,
        }
    }

    /// Returns true for `First` or `Second`.
    pub fn is_decisive(self) -> bool {
        matches!(self, Preference::First | Preference::Second)
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preference::First => write!(f, "first"),
            Preference::Second => write!(f, "second"),
            Preference::Tie => write!(f, "tie"),
            Preference::IdentViolations => write!(f, "identical violations"),
            Preference::Conflict => write!(f, "conflict"),
        }
    }
}
