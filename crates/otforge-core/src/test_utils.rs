//! Test utilities for otforge-core
//!
//! Provides common fixtures used across the crate's test modules.

use std::sync::Arc;

use crate::candidate::Candidate;
use crate::constraint::{Constraint, ConstraintKind, ConstraintList};
use crate::erc::{Erc, ErcValue};

/// Wraps constraints in a shared list.
pub fn list_of(constraints: Vec<Constraint>) -> Arc<ConstraintList> {
    ConstraintList::shared(constraints).unwrap()
}

/// Creates a list of markedness constraints whose short id equals the name.
pub fn markedness_list(names: &[&str]) -> Arc<ConstraintList> {
    list_of(
        names
            .iter()
            .map(|n| Constraint::new(*n, *n, ConstraintKind::Markedness))
            .collect(),
    )
}

/// Creates a list from `(name, kind)` pairs.
pub fn kinded_list(specs: &[(&str, ConstraintKind)]) -> Arc<ConstraintList> {
    list_of(
        specs
            .iter()
            .map(|(n, k)| Constraint::new(*n, *n, *k))
            .collect(),
    )
}

/// Creates a complete candidate.
pub fn cand(list: &Arc<ConstraintList>, input: &str, output: &str, counts: &[u32]) -> Candidate {
    Candidate::with_violations(input, output, Arc::clone(list), counts).unwrap()
}

/// Creates an ERC from a pattern such as `"WLe"`, one letter per constraint.
pub fn erc(list: &Arc<ConstraintList>, pattern: &str) -> Erc {
    let values: Vec<ErcValue> = pattern
        .chars()
        .map(|ch| match ch {
            'W' => ErcValue::W,
            'L' => ErcValue::L,
            _ => ErcValue::E,
        })
        .collect();
    Erc::from_values(Arc::clone(list), &values).unwrap()
}
