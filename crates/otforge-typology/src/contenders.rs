//! Harmonic-boundedness filtering.
//!
//! A candidate is a contender iff the winner-loser pairs that make it beat
//! every rival in its competition are jointly consistent.

use std::sync::Arc;

use otforge_core::{Candidate, Competition, ErcList, Result, WinnerLoserPair};

use crate::executor::Executor;

/// The contenders of one competition and the candidates filtered out.
#[derive(Debug, Clone)]
pub struct Contenders {
    input: String,
    contenders: Vec<Candidate>,
    bound: Vec<Candidate>,
}

impl Contenders {
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns the candidates some ranking can make optimal.
    pub fn contenders(&self) -> &[Candidate] {
        &self.contenders
    }

    /// Returns the harmonically bound candidates.
    pub fn bound(&self) -> &[Candidate] {
        &self.bound
    }

    pub fn len(&self) -> usize {
        self.contenders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contenders.is_empty()
    }

    /// Keeps every candidate without filtering.
    pub(crate) fn unfiltered(competition: &Competition) -> Self {
        Self {
            input: competition.input().to_string(),
            contenders: competition.candidates().to_vec(),
            bound: Vec::new(),
        }
    }

    /// Collapses contenders with identical violation profiles into merged
    /// candidates, keeping first-occurrence order.
    pub(crate) fn merge_identical(&mut self) -> Result<()> {
        let mut merged: Vec<Candidate> = Vec::with_capacity(self.contenders.len());
        for candidate in self.contenders.drain(..) {
            match merged.iter_mut().find(|kept| kept.ident_viols(&candidate)) {
                Some(kept) => *kept = kept.merge(&candidate)?,
                None => merged.push(candidate),
            }
        }
        self.contenders = merged;
        Ok(())
    }
}

/// Returns true if some ranking makes `competition[index]` optimal.
///
/// # Errors
///
/// Propagates winner-loser pair construction failures.
///
/// # Panics
///
/// Panics if `index` is not a candidate position of `competition`.
pub fn is_contender(competition: &Competition, index: usize) -> Result<bool> {
    let candidates = competition.candidates();
    assert!(
        index < candidates.len(),
        "candidate index {} out of range for /{}/ with {} candidates",
        index,
        competition.input(),
        candidates.len()
    );
    let winner = &candidates[index];
    let pairs = candidates
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != index)
        .map(|(_, loser)| WinnerLoserPair::new(winner, loser))
        .collect::<Result<Vec<_>>>()?;
    let ercs = ErcList::from_ercs(Arc::clone(competition.constraints()), pairs)?;
    Ok(ercs.is_consistent())
}

/// Splits a competition into contenders and harmonically bound candidates.
///
/// # Example
///
/// ```
/// use otforge_test::{competition, markedness};
/// use otforge_typology::find_contenders;
///
/// let list = markedness(&["C1", "C2"]);
/// let comp = competition(&list, "in", &[("a", &[1, 0]), ("b", &[0, 1]), ("c", &[1, 1])]);
///
/// let contenders = find_contenders(&comp).unwrap();
/// assert_eq!(contenders.len(), 2);
/// assert_eq!(contenders.bound()[0].output(), "c");
/// ```
pub fn find_contenders(competition: &Competition) -> Result<Contenders> {
    filter_contenders(competition, &Executor::Sequential)
}

pub(crate) fn filter_contenders(
    competition: &Competition,
    executor: &Executor,
) -> Result<Contenders> {
    let indices: Vec<usize> = (0..competition.len()).collect();
    let verdicts = executor
        .map(&indices, |idx| is_contender(competition, *idx))
        .into_iter()
        .collect::<Result<Vec<bool>>>()?;

    let mut contenders = Vec::new();
    let mut bound = Vec::new();
    for (candidate, contender) in competition.iter().zip(verdicts) {
        if contender {
            contenders.push(candidate.clone());
        } else {
            bound.push(candidate.clone());
        }
    }
    Ok(Contenders {
        input: competition.input().to_string(),
        contenders,
        bound,
    })
}
