//! Hierarchy-level comparison.

use std::fmt::Debug;

use otforge_core::{same_list, Candidate, Hierarchy};

use crate::stratum::{Ctie, Pool, StratumComparer};
use crate::Preference;

/// Decides which of two candidates is more harmonic under a hierarchy.
pub trait HierarchyComparer: Send + Sync + Debug {
    /// Compares `a` and `b` under `hierarchy`.
    ///
    /// Candidates with identical profiles always yield
    /// [`Preference::IdentViolations`].
    ///
    /// # Panics
    ///
    /// Implementations may panic if `a`, `b` and `hierarchy` do not share one
    /// constraint list; use [`Hierarchy::reindexed`] or
    /// [`Candidate::reindexed`] first.
    fn more_harmonic_on_hierarchy(
        &self,
        a: &Candidate,
        b: &Candidate,
        hierarchy: &Hierarchy,
    ) -> Preference;
}

impl<C: HierarchyComparer + ?Sized> HierarchyComparer for Box<C> {
    fn more_harmonic_on_hierarchy(
        &self,
        a: &Candidate,
        b: &Candidate,
        hierarchy: &Hierarchy,
    ) -> Preference {
        (**self).more_harmonic_on_hierarchy(a, b, hierarchy)
    }
}

/// Applies a [`StratumComparer`] from the top stratum down.
///
/// The first stratum that yields anything other than a tie decides.
///
/// # Example
///
/// ```
/// use otforge_core::Hierarchy;
/// use otforge_eval::{ComparePool, HierarchyComparer, Preference};
/// use otforge_test::{candidate, markedness};
///
/// let list = markedness(&["C1", "C2"]);
/// let hierarchy = Hierarchy::from_names(list.clone(), &[&["C2"], &["C1"]]).unwrap();
/// let a = candidate(&list, "in", "a", &[1, 0]);
/// let b = candidate(&list, "in", "b", &[0, 1]);
///
/// let pref = ComparePool::default().more_harmonic_on_hierarchy(&a, &b, &hierarchy);
/// assert_eq!(pref, Preference::First);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StratifiedComparer<S> {
    stratum: S,
}

impl<S: StratumComparer> StratifiedComparer<S> {
    pub fn new(stratum: S) -> Self {
        Self { stratum }
    }

    pub fn stratum_comparer(&self) -> &S {
        &self.stratum
    }
}

impl<S: StratumComparer> HierarchyComparer for StratifiedComparer<S> {
    fn more_harmonic_on_hierarchy(
        &self,
        a: &Candidate,
        b: &Candidate,
        hierarchy: &Hierarchy,
    ) -> Preference {
        assert!(
            same_list(a.constraints(), hierarchy.constraints())
                && same_list(b.constraints(), hierarchy.constraints()),
            "hierarchy {} and candidates {}, {} index different constraint lists",
            hierarchy,
            a,
            b
        );
        if a.ident_viols(b) {
            return Preference::IdentViolations;
        }
        for stratum in hierarchy {
            match self.stratum.compare_on_stratum(a, b, stratum) {
                Preference::Tie => continue,
                decided => return decided,
            }
        }
        self.stratum.exhausted(a, b)
    }
}

/// Pooled violations per stratum.
pub type ComparePool = StratifiedComparer<Pool>;

/// Conflicts tie per stratum.
pub type CompareCtie = StratifiedComparer<Ctie>;
