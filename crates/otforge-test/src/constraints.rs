//! Constraint list fixtures.
//!
//! # Example
//!
//! ```
//! use otforge_test::constraints::markedness;
//!
//! let list = markedness(&["C1", "C2"]);
//! assert_eq!(list.names(), vec!["C1", "C2"]);
//! ```

use std::sync::Arc;

use otforge_core::{Constraint, ConstraintKind, ConstraintList};

/// Creates a list of markedness constraints whose short id equals the name.
pub fn markedness(names: &[&str]) -> Arc<ConstraintList> {
    kinded(
        &names
            .iter()
            .map(|n| (*n, ConstraintKind::Markedness))
            .collect::<Vec<_>>(),
    )
}

/// Creates a list from `(name, kind)` pairs; short ids equal the names.
pub fn kinded(specs: &[(&str, ConstraintKind)]) -> Arc<ConstraintList> {
    ConstraintList::shared(
        specs
            .iter()
            .map(|(name, kind)| Constraint::new(*name, *name, *kind))
            .collect(),
    )
    .expect("fixture constraint names are unique")
}
