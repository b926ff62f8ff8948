//! Languages: one self-consistent choice of winner per competition.

use std::fmt;
use std::sync::Arc;

use otforge_core::{
    AllHigh, Candidate, ConstraintList, ErcList, Hierarchy, RankingBias, Rcd, Result,
    WinnerLoserPair,
};
use tracing::trace;

use crate::contenders::Contenders;

/// A language of a factorial typology.
///
/// Holds the winner chosen in each competition, the winner-loser pairs those
/// choices imply, and the hierarchy RCD derives from them.
pub struct Language {
    label: String,
    winners: Vec<Candidate>,
    ercs: ErcList<WinnerLoserPair>,
    hierarchy: Hierarchy,
}

impl Language {
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the winner of each competition, in competition order.
    pub fn winners(&self) -> &[Candidate] {
        &self.winners
    }

    /// Returns the winner for `input`, if that competition was enumerated.
    pub fn winner_for(&self, input: &str) -> Option<&Candidate> {
        self.winners.iter().find(|w| w.input() == input)
    }

    /// Returns the winner-loser pairs supporting the winners.
    pub fn ercs(&self) -> &ErcList<WinnerLoserPair> {
        &self.ercs
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    /// Returns the winning output of each competition; merged winners list
    /// their outputs separated by `|`.
    pub fn outputs(&self) -> Vec<String> {
        self.winners.iter().map(|w| w.outputs().join("|")).collect()
    }
}

impl fmt::Debug for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Language")
            .field("label", &self.label)
            .field("outputs", &self.outputs())
            .field("hierarchy", &self.hierarchy)
            .finish()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {}", self.label, self.outputs().join(", "), self.hierarchy)
    }
}

/// A language under construction.
///
/// Contenders arrive re-indexed into the typology's constraint list, so
/// every winner, loser and pair shares the final hierarchy's indices.
#[derive(Clone, Default)]
pub(crate) struct PartialLanguage {
    winners: Vec<Candidate>,
    pairs: Vec<WinnerLoserPair>,
}

impl PartialLanguage {
    /// Tries each contender as winner; returns the consistent extensions in
    /// contender order.
    pub(crate) fn extensions(
        &self,
        contenders: &Contenders,
        constraints: &Arc<ConstraintList>,
    ) -> Result<Vec<PartialLanguage>> {
        let candidates = contenders.contenders();
        let mut extended = Vec::new();
        for (idx, winner) in candidates.iter().enumerate() {
            let pairs = candidates
                .iter()
                .enumerate()
                .filter(|(other, _)| *other != idx)
                .map(|(_, loser)| WinnerLoserPair::new(winner, loser))
                .collect::<Result<Vec<_>>>()?;

            let (consistent, unexplained) = {
                let rcd = Rcd::from_ercs(
                    Arc::clone(constraints),
                    self.pairs.iter().chain(pairs.iter()),
                    &AllHigh,
                )?;
                (rcd.is_consistent(), rcd.unexplained().len())
            };
            if consistent {
                trace!(
                    event = "language_kept",
                    input = contenders.input(),
                    winner = %winner,
                    depth = self.winners.len() as u64 + 1,
                );
                let mut next = self.clone();
                next.winners.push(winner.clone());
                next.pairs.extend(pairs);
                extended.push(next);
            } else {
                trace!(
                    event = "language_pruned",
                    input = contenders.input(),
                    winner = %winner,
                    unexplained = unexplained as u64,
                );
            }
        }
        Ok(extended)
    }

    /// Finishes the language with its label and biased hierarchy.
    pub(crate) fn finish(
        self,
        label: String,
        constraints: &Arc<ConstraintList>,
        bias: &dyn RankingBias,
    ) -> Result<Language> {
        let hierarchy = Rcd::from_ercs(Arc::clone(constraints), self.pairs.iter(), bias)?.hierarchy();
        let ercs = ErcList::from_ercs(Arc::clone(constraints), self.pairs)?;
        Ok(Language {
            label,
            winners: self.winners,
            ercs,
            hierarchy,
        })
    }
}
