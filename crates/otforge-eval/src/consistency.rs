//! Comparison against partial ranking evidence.
//!
//! Instead of a hierarchy, [`CompareConsistency`] asks which orderings of two
//! candidates the ERC evidence still allows.

use std::iter;
use std::sync::Arc;

use otforge_core::{
    AllHigh, Candidate, Competition, ErcLike, ErcList, Rcd, Result, WinnerLoserPair,
};
use tracing::trace;

use crate::Preference;

/// Compares candidates by testing hypothetical ERCs against evidence.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompareConsistency;

impl CompareConsistency {
    pub fn new() -> Self {
        Self
    }

    /// Compares `a` and `b` given the ranking evidence `ercs`.
    ///
    /// - `First`: only "`a` beats `b`" is consistent with the evidence.
    /// - `Second`: only "`b` beats `a`" is consistent.
    /// - `Tie`: both are consistent.
    /// - `Conflict`: neither is; the evidence itself is inconsistent.
    ///
    /// # Errors
    ///
    /// Fails if the candidates have different inputs, unassigned counts, or
    /// a constraint list incompatible with the evidence.
    pub fn more_harmonic_on_evidence<E: ErcLike>(
        &self,
        a: &Candidate,
        b: &Candidate,
        ercs: &ErcList<E>,
    ) -> Result<Preference> {
        let a_wins = WinnerLoserPair::new(a, b)?;
        if a_wins.erc().is_trivial() {
            return Ok(Preference::IdentViolations);
        }
        let b_wins = WinnerLoserPair::new(b, a)?;

        let a_ok = consistent_with(ercs, &a_wins)?;
        let b_ok = consistent_with(ercs, &b_wins)?;
        let preference = match (a_ok, b_ok) {
            (true, false) => Preference::First,
            (false, true) => Preference::Second,
            (true, true) => Preference::Tie,
            (false, false) => Preference::Conflict,
        };
        trace!(
            event = "compare_evidence",
            first = %a,
            second = %b,
            preference = %preference,
        );
        Ok(preference)
    }

    /// Returns the candidates no other candidate necessarily beats.
    ///
    /// A candidate is excluded when some rival is `First` against it under
    /// the evidence.
    ///
    /// # Errors
    ///
    /// Propagates failures from [`more_harmonic_on_evidence`](Self::more_harmonic_on_evidence).
    pub fn find_possible_optima<'c, E: ErcLike>(
        &self,
        competition: &'c Competition,
        ercs: &ErcList<E>,
    ) -> Result<Vec<&'c Candidate>> {
        let mut optima = Vec::new();
        'candidates: for (idx, candidate) in competition.iter().enumerate() {
            for (other_idx, rival) in competition.iter().enumerate() {
                if idx == other_idx {
                    continue;
                }
                if self.more_harmonic_on_evidence(rival, candidate, ercs)? == Preference::First {
                    continue 'candidates;
                }
            }
            optima.push(candidate);
        }
        Ok(optima)
    }
}

fn consistent_with<E: ErcLike>(ercs: &ErcList<E>, hypothesis: &WinnerLoserPair) -> Result<bool> {
    let hypothesis = hypothesis.erc().reindexed(ercs.constraints())?;
    let rcd = Rcd::from_ercs(
        Arc::clone(ercs.constraints()),
        ercs.iter().map(ErcLike::erc).chain(iter::once(&hypothesis)),
        &AllHigh,
    )?;
    Ok(rcd.is_consistent())
}
