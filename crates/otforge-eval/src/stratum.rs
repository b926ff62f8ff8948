//! Stratum-level comparison criteria.
//!
//! A stratum comparer decides which candidate a single stratum favors. The
//! [`StratifiedComparer`](crate::StratifiedComparer) applies it from the top
//! stratum down until one discriminates.

use std::fmt::Debug;

use otforge_core::{Candidate, ConstraintId};

use crate::Preference;

/// Compares two candidates on one stratum of constraints.
pub trait StratumComparer: Send + Sync + Debug {
    /// Returns `First`, `Second`, `Tie` or `Conflict` for the stratum.
    fn compare_on_stratum(&self, a: &Candidate, b: &Candidate, stratum: &[ConstraintId])
        -> Preference;

    /// Called when no stratum discriminated between non-identical candidates.
    fn exhausted(&self, a: &Candidate, b: &Candidate) -> Preference;
}

/// Sums each candidate's violations within the stratum; fewer wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pool;

impl StratumComparer for Pool {
    fn compare_on_stratum(
        &self,
        a: &Candidate,
        b: &Candidate,
        stratum: &[ConstraintId],
    ) -> Preference {
        let total = |c: &Candidate| stratum.iter().map(|id| u64::from(c.count(*id))).sum::<u64>();
        match total(a).cmp(&total(b)) {
            std::cmp::Ordering::Less => Preference::First,
            std::cmp::Ordering::Greater => Preference::Second,
            std::cmp::Ordering::Equal => Preference::Tie,
        }
    }

    fn exhausted(&self, _a: &Candidate, _b: &Candidate) -> Preference {
        Preference::Tie
    }
}

/// Conflicts tie: a stratum favors a candidate only if no constraint in it
/// favors the other.
///
/// Disagreement within a stratum is a [`Preference::Conflict`], which stops
/// the descent through lower strata.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ctie;

impl StratumComparer for Ctie {
    fn compare_on_stratum(
        &self,
        a: &Candidate,
        b: &Candidate,
        stratum: &[ConstraintId],
    ) -> Preference {
        let mut prefers_a = false;
        let mut prefers_b = false;
        for id in stratum {
            match a.count(*id).cmp(&b.count(*id)) {
                std::cmp::Ordering::Less => prefers_a = true,
                std::cmp::Ordering::Greater => prefers_b = true,
                std::cmp::Ordering::Equal => {}
            }
        }
        match (prefers_a, prefers_b) {
            (true, false) => Preference::First,
            (false, true) => Preference::Second,
            (true, true) => Preference::Conflict,
            (false, false) => Preference::Tie,
        }
    }

    fn exhausted(&self, a: &Candidate, b: &Candidate) -> Preference {
        panic!(
            "ctie found no stratum separating {} and {}; the hierarchy does not rank every constraint",
            a, b
        );
    }
}
