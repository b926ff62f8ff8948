//! Stratified constraint hierarchies.

use std::fmt;
use std::sync::Arc;

use crate::constraint::{same_list, ConstraintId, ConstraintList};
use crate::error::{OtError, Result};

/// A set of constraints ranked together, stored in ascending id order.
pub type Stratum = Vec<ConstraintId>;

/// An ordered sequence of strata, highest-ranked first.
///
/// Each constraint appears in at most one stratum.
///
/// # Example
///
/// ```
/// use otforge_core::{Constraint, ConstraintKind, ConstraintList, Hierarchy};
///
/// let list = ConstraintList::shared(vec![
///     Constraint::new("C1", "C1", ConstraintKind::Markedness),
///     Constraint::new("C2", "C2", ConstraintKind::Markedness),
///     Constraint::new("C3", "C3", ConstraintKind::Faithfulness),
/// ]).unwrap();
///
/// let hierarchy = Hierarchy::from_names(list, &[&["C2"], &["C1", "C3"]]).unwrap();
/// assert_eq!(hierarchy.to_string(), "[[C2] [C1 C3]]");
/// assert_eq!(hierarchy.len(), 2);
/// ```
#[derive(Clone)]
pub struct Hierarchy {
    constraints: Arc<ConstraintList>,
    strata: Vec<Stratum>,
}

impl Hierarchy {
    /// Creates an empty hierarchy.
    pub fn new(constraints: Arc<ConstraintList>) -> Self {
        Self {
            constraints,
            strata: Vec::new(),
        }
    }

    /// Builds a hierarchy from constraint names, top stratum first.
    pub fn from_names(constraints: Arc<ConstraintList>, strata: &[&[&str]]) -> Result<Self> {
        let mut hierarchy = Self::new(Arc::clone(&constraints));
        for names in strata {
            let stratum = names
                .iter()
                .map(|name| constraints.require(name))
                .collect::<Result<Vec<_>>>()?;
            hierarchy.add_stratum(stratum)?;
        }
        Ok(hierarchy)
    }

    /// Builds the total order of the constraint list, one constraint per stratum.
    pub fn total_order(constraints: Arc<ConstraintList>) -> Self {
        let strata = constraints.ids().map(|id| vec![id]).collect();
        Self {
            constraints,
            strata,
        }
    }

    /// Appends a stratum at the bottom.
    ///
    /// # Errors
    ///
    /// Returns [`OtError::DuplicateConstraint`] if a constraint is already ranked
    /// or repeated, and [`OtError::UnknownConstraint`] for an id outside the list.
    pub fn add_stratum(&mut self, mut stratum: Stratum) -> Result<()> {
        stratum.sort_unstable();
        for (idx, id) in stratum.iter().enumerate() {
            let constraint = self
                .constraints
                .get(*id)
                .ok_or_else(|| OtError::UnknownConstraint(format!("#{}", id.index())))?;
            if self.contains(*id) || stratum[..idx].contains(id) {
                return Err(OtError::DuplicateConstraint(constraint.name().to_string()));
            }
        }
        self.strata.push(stratum);
        Ok(())
    }

    /// Appends a stratum the caller guarantees is disjoint from the others.
    pub(crate) fn push_stratum(&mut self, mut stratum: Stratum) {
        stratum.sort_unstable();
        debug_assert!(stratum.iter().all(|id| !self.contains(*id)));
        self.strata.push(stratum);
    }

    pub fn constraints(&self) -> &Arc<ConstraintList> {
        &self.constraints
    }

    pub fn strata(&self) -> &[Stratum] {
        &self.strata
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stratum> {
        self.strata.iter()
    }

    /// Returns the number of strata.
    pub fn len(&self) -> usize {
        self.strata.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strata.is_empty()
    }

    /// Returns the number of ranked constraints.
    pub fn constraint_count(&self) -> usize {
        self.strata.iter().map(Vec::len).sum()
    }

    pub fn contains(&self, id: ConstraintId) -> bool {
        self.stratum_of(id).is_some()
    }

    /// Returns the index of the stratum holding `id`.
    pub fn stratum_of(&self, id: ConstraintId) -> Option<usize> {
        self.strata.iter().position(|s| s.contains(&id))
    }

    /// Returns true if `higher` sits in a strictly higher stratum than `lower`.
    pub fn dominates(&self, higher: ConstraintId, lower: ConstraintId) -> bool {
        match (self.stratum_of(higher), self.stratum_of(lower)) {
            (Some(h), Some(l)) => h < l,
            _ => false,
        }
    }

    /// Returns the same ranking expressed over `target`.
    ///
    /// # Errors
    ///
    /// Returns [`OtError::ConstraintSetMismatch`] if `target` holds different
    /// constraints.
    pub fn reindexed(&self, target: &Arc<ConstraintList>) -> Result<Self> {
        if same_list(&self.constraints, target) {
            return Ok(Self {
                constraints: Arc::clone(target),
                strata: self.strata.clone(),
            });
        }
        let mapping = self.constraints.mapping_to(target)?;
        let mut hierarchy = Self::new(Arc::clone(target));
        for stratum in &self.strata {
            hierarchy.push_stratum(stratum.iter().map(|id| mapping[id.index()]).collect());
        }
        Ok(hierarchy)
    }

    /// Returns the strata as constraint names, for display and assertions.
    pub fn names(&self) -> Vec<Vec<&str>> {
        self.strata
            .iter()
            .map(|s| s.iter().map(|id| self.constraints[*id].name()).collect())
            .collect()
    }
}

impl<'a> IntoIterator for &'a Hierarchy {
    type Item = &'a Stratum;
    type IntoIter = std::slice::Iter<'a, Stratum>;

    fn into_iter(self) -> Self::IntoIter {
        self.strata.iter()
    }
}

impl PartialEq for Hierarchy {
    fn eq(&self, other: &Self) -> bool {
        self.names() == other.names()
    }
}

impl Eq for Hierarchy {}

impl fmt::Debug for Hierarchy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Hierarchy").field(&self.names()).finish()
    }
}

impl fmt::Display for Hierarchy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (idx, stratum) in self.strata.iter().enumerate() {
            if idx > 0 {
                write!(f, " ")?;
            }
            write!(f, "[")?;
            for (pos, id) in stratum.iter().enumerate() {
                if pos > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", self.constraints[*id].id())?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::markedness_list;

    #[test]
    fn test_duplicate_stratum_member_rejected() {
        let list = markedness_list(&["C1", "C2"]);
        let mut hierarchy = Hierarchy::new(list);
        hierarchy.add_stratum(vec![ConstraintId(0)]).unwrap();
        assert!(matches!(
            hierarchy.add_stratum(vec![ConstraintId(0), ConstraintId(1)]),
            Err(OtError::DuplicateConstraint(_))
        ));
        assert!(matches!(
            hierarchy.add_stratum(vec![ConstraintId(1), ConstraintId(1)]),
            Err(OtError::DuplicateConstraint(_))
        ));
        assert!(matches!(
            hierarchy.add_stratum(vec![ConstraintId(7)]),
            Err(OtError::UnknownConstraint(_))
        ));
    }

    #[test]
    fn test_dominates() {
        let list = markedness_list(&["C1", "C2", "C3"]);
        let hierarchy = Hierarchy::from_names(list, &[&["C3"], &["C1", "C2"]]).unwrap();
        assert!(hierarchy.dominates(ConstraintId(2), ConstraintId(0)));
        assert!(!hierarchy.dominates(ConstraintId(0), ConstraintId(1)));
        assert_eq!(hierarchy.stratum_of(ConstraintId(1)), Some(1));
        assert_eq!(hierarchy.constraint_count(), 3);
    }

    #[test]
    fn test_reindexed_keeps_names() {
        let list = markedness_list(&["C1", "C2", "C3"]);
        let reversed = markedness_list(&["C3", "C2", "C1"]);
        let hierarchy = Hierarchy::from_names(list, &[&["C2", "C3"], &["C1"]]).unwrap();

        let moved = hierarchy.reindexed(&reversed).unwrap();
        assert!(Arc::ptr_eq(moved.constraints(), &reversed));
        assert_eq!(moved.names(), vec![vec!["C3", "C2"], vec!["C1"]]);
        assert!(moved.dominates(ConstraintId(0), ConstraintId(2)));

        let foreign = markedness_list(&["C1", "C2", "C9"]);
        assert!(matches!(
            hierarchy.reindexed(&foreign),
            Err(OtError::ConstraintSetMismatch(_))
        ));
    }

    #[test]
    fn test_total_order() {
        let list = markedness_list(&["C1", "C2"]);
        let hierarchy = Hierarchy::total_order(list);
        assert_eq!(hierarchy.names(), vec![vec!["C1"], vec!["C2"]]);
    }
}
