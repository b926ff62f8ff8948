//! Ordered ERC collections with a memoized consistency verdict.

use std::cell::Cell;
use std::fmt;
use std::sync::Arc;

use super::{Erc, ErcLike};
use crate::constraint::ConstraintList;
use crate::error::Result;
use crate::rcd::Rcd;

/// An ordered list of ERCs over one constraint list.
///
/// Also serves as a comparative tableau when its elements are
/// [`WinnerLoserPair`](super::WinnerLoserPair)s.
///
/// The consistency verdict is computed by RCD on first request and cached
/// until the list changes. The cache uses a [`Cell`], so a list is `Send`
/// but not `Sync`; an in-progress list belongs to one caller.
///
/// # Example
///
/// ```
/// use otforge_core::{Constraint, ConstraintKind, ConstraintList, Erc, ErcList};
///
/// let list = ConstraintList::shared(vec![
///     Constraint::new("C1", "C1", ConstraintKind::Markedness),
///     Constraint::new("C2", "C2", ConstraintKind::Markedness),
/// ]).unwrap();
///
/// let mut ercs = ErcList::new(list.clone());
/// ercs.add(Erc::from_names(list.clone(), &["C2"], &["C1"]).unwrap()).unwrap();
/// assert!(ercs.is_consistent());
///
/// ercs.add(Erc::from_names(list.clone(), &["C1"], &["C2"]).unwrap()).unwrap();
/// assert!(!ercs.is_consistent());
/// ```
#[derive(Clone)]
pub struct ErcList<E = Erc> {
    constraints: Arc<ConstraintList>,
    ercs: Vec<E>,
    consistent: Cell<Option<bool>>,
}

impl<E: ErcLike> ErcList<E> {
    /// Creates an empty list over `constraints`.
    pub fn new(constraints: Arc<ConstraintList>) -> Self {
        Self {
            constraints,
            ercs: Vec::new(),
            consistent: Cell::new(None),
        }
    }

    /// Creates a list from ERCs, adding them in order.
    pub fn from_ercs(
        constraints: Arc<ConstraintList>,
        ercs: impl IntoIterator<Item = E>,
    ) -> Result<Self> {
        let mut list = Self::new(constraints);
        list.extend(ercs)?;
        Ok(list)
    }

    pub fn constraints(&self) -> &Arc<ConstraintList> {
        &self.constraints
    }

    /// Appends an ERC.
    ///
    /// An ERC over the same constraints in a different order is re-indexed
    /// into this list's order.
    ///
    /// # Errors
    ///
    /// Returns [`OtError::ConstraintSetMismatch`](crate::OtError::ConstraintSetMismatch)
    /// if the ERC's constraint set differs in size or membership.
    pub fn add(&mut self, erc: E) -> Result<()> {
        let own = erc.erc().constraints();
        let erc = if Arc::ptr_eq(own, &self.constraints) || own.same_order(&self.constraints) {
            erc
        } else {
            erc.reindexed(&self.constraints)?
        };
        self.ercs.push(erc);
        self.consistent.set(None);
        Ok(())
    }

    /// Appends every ERC, stopping at the first mismatch.
    pub fn extend(&mut self, ercs: impl IntoIterator<Item = E>) -> Result<()> {
        for erc in ercs {
            self.add(erc)?;
        }
        Ok(())
    }

    /// Removes every ERC.
    pub fn clear(&mut self) {
        self.ercs.clear();
        self.consistent.set(None);
    }

    pub fn len(&self) -> usize {
        self.ercs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ercs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&E> {
        self.ercs.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.ercs.iter()
    }

    pub fn as_slice(&self) -> &[E] {
        &self.ercs
    }

    pub fn into_vec(self) -> Vec<E> {
        self.ercs
    }

    /// Returns the labels of the ERCs, skipping unlabeled ones.
    pub fn labels(&self) -> Vec<&str> {
        self.ercs.iter().filter_map(|e| e.erc().label()).collect()
    }

    /// Returns true if some stratified ranking satisfies every ERC.
    pub fn is_consistent(&self) -> bool {
        if let Some(cached) = self.consistent.get() {
            return cached;
        }
        let verdict = Rcd::new(self).is_consistent();
        self.consistent.set(Some(verdict));
        verdict
    }

    /// Returns true if a verdict is cached.
    pub fn has_cached_verdict(&self) -> bool {
        self.consistent.get().is_some()
    }
}

impl<E: ErcLike + Clone> ErcList<E> {
    /// Returns an independent list holding the same ERCs.
    pub fn dup(&self) -> Self {
        self.clone()
    }
}

impl<'a, E> IntoIterator for &'a ErcList<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.ercs.iter()
    }
}

impl<E: PartialEq> PartialEq for ErcList<E> {
    fn eq(&self, other: &Self) -> bool {
        self.ercs == other.ercs
    }
}

impl<E: fmt::Debug> fmt::Debug for ErcList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErcList")
            .field("ercs", &self.ercs)
            .field("consistent", &self.consistent.get())
            .finish()
    }
}

impl<E: ErcLike> fmt::Display for ErcList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, erc) in self.ercs.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", erc.erc())?;
        }
        Ok(())
    }
}
