//! Competitions: the candidates GEN produces for one input.

use std::sync::Arc;

use crate::candidate::Candidate;
use crate::constraint::{same_list, ConstraintList};
use crate::error::{OtError, Result};

/// A non-empty set of candidates sharing one input.
///
/// Construction checks that every candidate has the same input, the same
/// constraint list and a fully assigned violation profile, so comparers
/// can read counts without further checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Competition {
    candidates: Vec<Candidate>,
}

impl Competition {
    /// Validates and wraps a list of candidates.
    ///
    /// # Errors
    ///
    /// - [`OtError::EmptyCompetition`] for an empty list
    /// - [`OtError::InputMismatch`] if two inputs differ
    /// - [`OtError::ConstraintSetMismatch`] if two constraint lists differ
    /// - [`OtError::UnassignedViolation`] if a count is missing
    pub fn new(candidates: Vec<Candidate>) -> Result<Self> {
        let first = candidates.first().ok_or(OtError::EmptyCompetition)?;
        for cand in &candidates {
            if cand.input() != first.input() {
                return Err(OtError::InputMismatch {
                    first: first.input().to_string(),
                    second: cand.input().to_string(),
                });
            }
            if !same_list(first.constraints(), cand.constraints()) {
                return Err(OtError::ConstraintSetMismatch(format!(
                    "candidate {} uses a different constraint list",
                    cand
                )));
            }
            for id in cand.constraints().ids() {
                cand.try_count(id)?;
            }
        }
        Ok(Self { candidates })
    }

    pub fn input(&self) -> &str {
        self.candidates[0].input()
    }

    pub fn constraints(&self) -> &Arc<ConstraintList> {
        self.candidates[0].constraints()
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }

    /// Returns the candidates flagged optimal by imported data.
    pub fn labeled_optima(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter().filter(|c| c.is_optimal())
    }

    /// Returns the competition with every candidate re-indexed into `target`.
    ///
    /// # Errors
    ///
    /// Returns [`OtError::ConstraintSetMismatch`] if `target` holds different
    /// constraints.
    pub fn reindexed(&self, target: &Arc<ConstraintList>) -> Result<Competition> {
        let candidates = self
            .candidates
            .iter()
            .map(|c| c.reindexed(target))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { candidates })
    }

    pub fn into_candidates(self) -> Vec<Candidate> {
        self.candidates
    }
}

impl<'a> IntoIterator for &'a Competition {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{cand, markedness_list};

    #[test]
    fn test_empty_rejected() {
        assert_eq!(
            Competition::new(Vec::new()).unwrap_err(),
            OtError::EmptyCompetition
        );
    }

    #[test]
    fn test_input_mismatch_rejected() {
        let list = markedness_list(&["C1"]);
        let result = Competition::new(vec![
            cand(&list, "a", "x", &[0]),
            cand(&list, "b", "y", &[1]),
        ]);
        assert!(matches!(result, Err(OtError::InputMismatch { .. })));
    }

    #[test]
    fn test_incomplete_rejected() {
        let list = markedness_list(&["C1", "C2"]);
        let mut partial = Candidate::new("a", "y", list.clone());
        partial.set_violations(crate::ConstraintId(0), 1);
        let result = Competition::new(vec![cand(&list, "a", "x", &[0, 0]), partial]);
        assert!(matches!(result, Err(OtError::UnassignedViolation { .. })));
    }

    #[test]
    fn test_foreign_list_rejected() {
        let list = markedness_list(&["C1"]);
        let other = markedness_list(&["C9"]);
        let result = Competition::new(vec![
            cand(&list, "a", "x", &[0]),
            cand(&other, "a", "y", &[1]),
        ]);
        assert!(matches!(result, Err(OtError::ConstraintSetMismatch(_))));
    }

    #[test]
    fn test_reindexed_shares_target_list() {
        let ab = markedness_list(&["A", "B"]);
        let ba = markedness_list(&["B", "A"]);
        let comp = Competition::new(vec![
            cand(&ab, "a", "x", &[0, 1]),
            cand(&ab, "a", "y", &[2, 0]),
        ])
        .unwrap();
        let moved = comp.reindexed(&ba).unwrap();
        assert!(Arc::ptr_eq(moved.constraints(), &ba));
        assert!(moved.iter().all(|c| Arc::ptr_eq(c.constraints(), &ba)));
        assert_eq!(moved.candidates()[1].count(crate::ConstraintId(0)), 0);
        assert_eq!(moved.candidates()[1].count(crate::ConstraintId(1)), 2);
    }

    #[test]
    fn test_labeled_optima() {
        let list = markedness_list(&["C1"]);
        let mut winner = cand(&list, "a", "x", &[0]);
        winner.set_optimal(true);
        let comp = Competition::new(vec![winner, cand(&list, "a", "y", &[1])]).unwrap();
        let optima: Vec<_> = comp.labeled_optima().map(|c| c.output()).collect();
        assert_eq!(optima, vec!["x"]);
        assert_eq!(comp.input(), "a");
        assert_eq!(comp.len(), 2);
    }
}
