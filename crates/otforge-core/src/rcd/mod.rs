//! Recursive Constraint Demotion.
//!
//! RCD repeatedly ranks the constraints that prefer no loser in any ERC not
//! yet explained, then sets aside the ERCs the new stratum explains. It ends
//! either with every constraint ranked (consistent) or with a round in which
//! nothing is rankable (inconsistent). Inconsistency is a terminal state, not
//! an error: the remaining ERCs witness the contradiction.

mod bias;


use std::sync::Arc;

use tracing::trace;

use crate::constraint::{ConstraintId, ConstraintList};
use crate::erc::{ConstraintMask, Erc, ErcLike, ErcList};
use crate::error::{OtError, Result};
use crate::hierarchy::Hierarchy;

pub use bias::{
    AllHigh, FaithLow, MarkLow, OneAtATime, RankingBias, RankingBiasKind, RankingContext,
};

/// The outcome of running RCD over a set of ERCs.
///
/// # Example
///
/// ```
/// use otforge_core::{Constraint, ConstraintKind, ConstraintList, Erc, ErcList, Rcd};
///
/// let list = ConstraintList::shared(vec![
///     Constraint::new("C1", "C1", ConstraintKind::Markedness),
///     Constraint::new("C2", "C2", ConstraintKind::Markedness),
/// ]).unwrap();
///
/// let ercs = ErcList::from_ercs(
///     list.clone(),
///     [Erc::from_names(list.clone(), &["C2"], &["C1"]).unwrap()],
/// ).unwrap();
///
/// let rcd = Rcd::new(&ercs);
/// assert!(rcd.is_consistent());
/// assert_eq!(rcd.hierarchy().to_string(), "[[C2] [C1]]");
/// ```
pub struct Rcd<'a, E = Erc> {
    constraints: Arc<ConstraintList>,
    ranked: Hierarchy,
    unranked: Vec<ConstraintId>,
    explained: Vec<Vec<&'a E>>,
    unexplained: Vec<&'a E>,
}

impl<'a, E: ErcLike> Rcd<'a, E> {
    /// Runs RCD with the default [`AllHigh`] bias.
    pub fn new(ercs: &'a ErcList<E>) -> Self {
        Self::with_bias(ercs, &AllHigh)
    }

    /// Runs RCD with the given ranking bias.
    pub fn with_bias(ercs: &'a ErcList<E>, bias: &dyn RankingBias) -> Self {
        Self::run(Arc::clone(ercs.constraints()), ercs.iter().collect(), bias)
    }

    /// Runs RCD over any ERCs indexed by `constraints`.
    ///
    /// # Errors
    ///
    /// Returns [`OtError::ConstraintSetMismatch`] if an ERC is indexed by a
    /// different constraint list. Use an [`ErcList`] to re-index first.
    pub fn from_ercs(
        constraints: Arc<ConstraintList>,
        ercs: impl IntoIterator<Item = &'a E>,
        bias: &dyn RankingBias,
    ) -> Result<Self> {
        let ercs: Vec<&'a E> = ercs.into_iter().collect();
        for erc in &ercs {
            let own = erc.erc().constraints();
            if !Arc::ptr_eq(own, &constraints) && !own.same_order(&constraints) {
                return Err(OtError::ConstraintSetMismatch(format!(
                    "ERC {} is not indexed by the ranked constraint list",
                    erc.erc()
                )));
            }
        }
        Ok(Self::run(constraints, ercs, bias))
    }

    fn run(constraints: Arc<ConstraintList>, ercs: Vec<&'a E>, bias: &dyn RankingBias) -> Self {
        let n = constraints.len();
        let mut unranked = ConstraintMask::full(n);
        let mut ranked = Hierarchy::new(Arc::clone(&constraints));
        let mut explained = Vec::new();
        let mut unexplained = ercs;

        while !unranked.is_empty() {
            let mut rankable = unranked.clone();
            for erc in &unexplained {
                rankable.difference_with(erc.erc().l_mask());
            }
            if rankable.is_empty() {
                break;
            }

            let pending: Vec<&Erc> = unexplained.iter().map(|e| e.erc()).collect();
            let chosen = bias.choose(&rankable, &RankingContext::new(&constraints, &pending));
            assert!(
                !chosen.is_empty() && chosen.is_subset(&rankable),
                "ranking bias {:?} chose {:?}, not a non-empty subset of {:?}",
                bias,
                chosen,
                rankable
            );

            unranked.difference_with(&chosen);
            let (now, rest): (Vec<&'a E>, Vec<&'a E>) = unexplained
                .into_iter()
                .partition(|e| e.erc().w_mask().intersects(&chosen));
            ranked.push_stratum(chosen.iter().collect());
            explained.push(now);
            unexplained = rest;
        }

        trace!(
            event = "rcd",
            strata = ranked.len() as u64,
            consistent = unranked.is_empty(),
            unexplained = unexplained.len() as u64,
        );

        Self {
            constraints,
            ranked,
            unranked: unranked.iter().collect(),
            explained,
            unexplained,
        }
    }

    /// Returns true if every constraint was ranked.
    pub fn is_consistent(&self) -> bool {
        self.unranked.is_empty()
    }

    pub fn constraints(&self) -> &Arc<ConstraintList> {
        &self.constraints
    }

    /// Returns the strata ranked before RCD stopped.
    pub fn ranked(&self) -> &Hierarchy {
        &self.ranked
    }

    /// Returns the constraints left unranked; empty iff consistent.
    pub fn unranked(&self) -> &[ConstraintId] {
        &self.unranked
    }

    /// Returns the ERCs explained by each stratum, parallel to [`ranked`](Self::ranked).
    pub fn explained(&self) -> &[Vec<&'a E>] {
        &self.explained
    }

    /// Returns the ERCs no stratum explained.
    ///
    /// When inconsistent these witness the contradiction. When consistent
    /// only ERCs with no W and no L can remain.
    pub fn unexplained(&self) -> &[&'a E] {
        &self.unexplained
    }

    /// Returns the ranked strata with any unranked constraints appended as
    /// one bottom stratum.
    pub fn hierarchy(&self) -> Hierarchy {
        let mut hierarchy = self.ranked.clone();
        if !self.unranked.is_empty() {
            hierarchy.push_stratum(self.unranked.clone());
        }
        hierarchy
    }
}

impl<E> std::fmt::Debug for Rcd<'_, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rcd")
            .field("ranked", &self.ranked)
            .field("unranked", &self.unranked)
            .field("explained", &self.explained.iter().map(Vec::len).collect::<Vec<_>>())
            .field("unexplained", &self.unexplained.len())
            .finish()
    }
}
