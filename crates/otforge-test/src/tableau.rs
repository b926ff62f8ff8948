//! Candidate, competition and ERC fixtures.
//!
//! # Example
//!
//! ```
//! use otforge_test::constraints::markedness;
//! use otforge_test::tableau::competition;
//!
//! let list = markedness(&["C1", "C2"]);
//! let comp = competition(&list, "in", &[("a", &[1, 0]), ("b", &[0, 1])]);
//! assert_eq!(comp.len(), 2);
//! assert_eq!(comp.input(), "in");
//! ```

use std::sync::Arc;

use otforge_core::{Candidate, Competition, ConstraintList, Erc, ErcValue};

/// Creates a candidate with every violation count assigned.
pub fn candidate(
    list: &Arc<ConstraintList>,
    input: &str,
    output: &str,
    counts: &[u32],
) -> Candidate {
    Candidate::with_violations(input, output, Arc::clone(list), counts)
        .expect("fixture counts match the constraint list")
}

/// Creates a competition from `(output, counts)` rows sharing `input`.
pub fn competition(
    list: &Arc<ConstraintList>,
    input: &str,
    rows: &[(&str, &[u32])],
) -> Competition {
    Competition::new(
        rows.iter()
            .map(|(output, counts)| candidate(list, input, output, counts))
            .collect(),
    )
    .expect("fixture rows form a valid competition")
}

/// Creates an ERC from a pattern such as `"WLe"`, one letter per constraint.
pub fn erc(list: &Arc<ConstraintList>, pattern: &str) -> Erc {
    let values: Vec<ErcValue> = pattern
        .chars()
        .map(|ch| match ch {
            'W' | 'w' => ErcValue::W,
            'L' | 'l' => ErcValue::L,
            _ => ErcValue::E,
        })
        .collect();
    Erc::from_values(Arc::clone(list), &values).expect("pattern length matches the list")
}
