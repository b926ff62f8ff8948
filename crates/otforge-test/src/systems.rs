//! Small grammar systems with known typologies.

use std::sync::Arc;

use otforge_core::{Competition, ConstraintList, ErcList};

use crate::constraints::markedness;
use crate::tableau::{competition, erc};

/// Two competitions over `C1 C2 C3` with exactly three languages.
///
/// - `/a/`: `a1` wins iff C2 >> C1, `a2` wins iff C1 >> C2; `a3` is
///   harmonically bound by `a1`.
/// - `/b/`: `b1` wins iff C2 or C3 dominates C1, `b2` wins iff C1
///   dominates both.
///
/// Choosing `a1` and `b2` together is inconsistent, so the typology is
/// `(a1, b1)`, `(a2, b1)`, `(a2, b2)` in discovery order.
pub fn three_language_system() -> (Arc<ConstraintList>, Vec<Competition>) {
    let list = markedness(&["C1", "C2", "C3"]);
    let competitions = vec![
        competition(
            &list,
            "a",
            &[("a1", &[1, 0, 0]), ("a2", &[0, 1, 0]), ("a3", &[1, 1, 0])],
        ),
        competition(&list, "b", &[("b1", &[1, 0, 0]), ("b2", &[0, 1, 1])]),
    ];
    (list, competitions)
}

/// [`three_language_system`] with `/b/` written over the list `C3 C2 C1`.
///
/// The violation profiles are unchanged, so the typology is the same.
pub fn reordered_three_language_system() -> Vec<Competition> {
    let (_, mut competitions) = three_language_system();
    let reversed = markedness(&["C3", "C2", "C1"]);
    competitions[1] = competition(&reversed, "b", &[("b1", &[0, 0, 1]), ("b2", &[1, 1, 0])]);
    competitions
}

/// A three-way ranking cycle: C1 >> C2, C2 >> C3, C3 >> C1.
pub fn cyclic_ercs(list: &Arc<ConstraintList>) -> ErcList {
    ErcList::from_ercs(
        Arc::clone(list),
        ["WLe", "eWL", "LeW"].iter().map(|p| erc(list, p)),
    )
    .expect("fixture ERCs share the list")
}
