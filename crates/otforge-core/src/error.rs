//! Error types for OTForge

use thiserror::Error;

/// Structural errors raised by the ranking engine.
///
/// These indicate a caller passed data that violates a contract of the
/// engine. Inconsistent ranking evidence and tied comparisons are ordinary
/// return values, never errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OtError {
    /// An ERC or candidate was defined over a different constraint set.
    #[error("Constraint set mismatch: {0}")]
    ConstraintSetMismatch(String),

    /// A winner-loser pair or merge was attempted across different inputs.
    #[error("Input mismatch: '{first}' vs '{second}'")]
    InputMismatch { first: String, second: String },

    /// A constraint kind string was not recognized.
    #[error("Unknown constraint kind: {0}")]
    UnknownConstraintKind(String),

    /// A constraint was asked to count violations without an evaluator.
    #[error("Constraint '{0}' has no violation evaluator")]
    MissingEvaluator(String),

    /// A violation count was required but never assigned.
    #[error("Candidate '{candidate}' has no violation count for constraint '{constraint}'")]
    UnassignedViolation {
        candidate: String,
        constraint: String,
    },

    /// Two constraints in one list share a name.
    #[error("Duplicate constraint: {0}")]
    DuplicateConstraint(String),

    /// A constraint name was not found in the constraint list.
    #[error("Unknown constraint: {0}")]
    UnknownConstraint(String),

    /// A competition must contain at least one candidate.
    #[error("Competition has no candidates")]
    EmptyCompetition,

    /// A violation or ERC value vector has the wrong length.
    #[error("Expected {expected} values, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// Candidates with different violation profiles cannot be merged.
    #[error("Cannot merge candidates: {0}")]
    NotMergeable(String),
}

/// Result type alias for OTForge operations
pub type Result<T> = std::result::Result<T, OtError>;
