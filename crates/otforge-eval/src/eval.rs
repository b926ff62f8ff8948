//! Optimality under a hierarchy.

use otforge_core::{same_list, Candidate, Competition, Hierarchy, OtError, Result};
use tracing::trace;

use crate::hierarchy::HierarchyComparer;
use crate::Preference;

/// Finds the optimal candidates of a competition with an injected comparer.
///
/// # Example
///
/// ```
/// use otforge_core::Hierarchy;
/// use otforge_eval::{CompareCtie, Eval};
/// use otforge_test::{competition, markedness};
///
/// let list = markedness(&["C1", "C2"]);
/// let comp = competition(&list, "in", &[("a", &[1, 0]), ("b", &[0, 1])]);
/// let hierarchy = Hierarchy::from_names(list.clone(), &[&["C1"], &["C2"]]).unwrap();
///
/// let optima = Eval::new(CompareCtie::default()).find_optima(&comp, &hierarchy).unwrap();
/// assert_eq!(optima.len(), 1);
/// assert_eq!(optima[0].output(), "b");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Eval<C> {
    comparer: C,
}

impl<C: HierarchyComparer> Eval<C> {
    pub fn new(comparer: C) -> Self {
        Self { comparer }
    }

    pub fn comparer(&self) -> &C {
        &self.comparer
    }

    /// Returns the candidates of `competition` no other candidate beats.
    ///
    /// Ties and identical profiles keep every tied candidate. A hierarchy
    /// over the same constraints in another order is re-indexed first.
    ///
    /// # Errors
    ///
    /// Returns [`OtError::ConstraintSetMismatch`] if the hierarchy ranks
    /// constraints the competition does not have.
    pub fn find_optima<'c>(
        &self,
        competition: &'c Competition,
        hierarchy: &Hierarchy,
    ) -> Result<Vec<&'c Candidate>> {
        let optima = if same_list(competition.constraints(), hierarchy.constraints()) {
            self.fold_optima(competition, hierarchy)
        } else {
            let local = hierarchy.reindexed(competition.constraints()).map_err(|_| {
                OtError::ConstraintSetMismatch(format!(
                    "hierarchy {} does not rank the constraints of /{}/",
                    hierarchy,
                    competition.input()
                ))
            })?;
            self.fold_optima(competition, &local)
        };
        trace!(
            event = "find_optima",
            input = competition.input(),
            candidates = competition.len() as u64,
            optima = optima.len() as u64,
        );
        Ok(optima)
    }

    fn fold_optima<'c>(
        &self,
        candidates: impl IntoIterator<Item = &'c Candidate>,
        hierarchy: &Hierarchy,
    ) -> Vec<&'c Candidate> {
        let mut optima: Vec<&'c Candidate> = Vec::new();
        for candidate in candidates {
            let mut beaten = false;
            let mut defeated = Vec::new();
            for (idx, kept) in optima.iter().enumerate() {
                match self
                    .comparer
                    .more_harmonic_on_hierarchy(candidate, kept, hierarchy)
                {
                    Preference::First => defeated.push(idx),
                    Preference::Second => {
                        beaten = true;
                        break;
                    }
                    _ => {}
                }
            }
            if beaten {
                continue;
            }
            for idx in defeated.into_iter().rev() {
                optima.remove(idx);
            }
            optima.push(candidate);
        }
        optima
    }
}
