//! Optimality under ranking evidence.
//!
//! A [`Ranker`] turns ERC evidence into a hierarchy; [`MostHarmonic`] then
//! evaluates competitions with that hierarchy.

use otforge_core::{
    Candidate, Competition, ErcLike, ErcList, Hierarchy, RankingBias, RankingBiasKind, Rcd, Result,
};
use tracing::debug;

use crate::eval::Eval;
use crate::hierarchy::HierarchyComparer;

/// Builds hierarchies from ERC evidence with a ranking bias.
#[derive(Debug)]
pub struct Ranker {
    bias: Box<dyn RankingBias>,
}

impl Ranker {
    pub fn new(bias: Box<dyn RankingBias>) -> Self {
        Self { bias }
    }

    pub fn with_kind(kind: RankingBiasKind) -> Self {
        Self::new(kind.bias())
    }

    /// Runs RCD over `ercs` and returns the hierarchy, with any unranked
    /// constraints as the bottom stratum.
    pub fn rank<E: ErcLike>(&self, ercs: &ErcList<E>) -> Hierarchy {
        let rcd = Rcd::with_bias(ercs, &self.bias);
        if !rcd.is_consistent() {
            debug!(
                event = "rank_inconsistent",
                unranked = rcd.unranked().len() as u64,
                unexplained = rcd.unexplained().len() as u64,
            );
        }
        rcd.hierarchy()
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::with_kind(RankingBiasKind::default())
    }
}

/// Evaluates competitions under the hierarchy a [`Ranker`] derives.
#[derive(Debug)]
pub struct MostHarmonic<C> {
    ranker: Ranker,
    eval: Eval<C>,
}

impl<C: HierarchyComparer> MostHarmonic<C> {
    pub fn new(ranker: Ranker, comparer: C) -> Self {
        Self {
            ranker,
            eval: Eval::new(comparer),
        }
    }

    pub fn ranker(&self) -> &Ranker {
        &self.ranker
    }

    /// Returns the most harmonic candidates of `competition` given `ercs`.
    ///
    /// # Errors
    ///
    /// Fails if the evidence and the competition use different constraint lists.
    pub fn find_optima<'c, E: ErcLike>(
        &self,
        competition: &'c Competition,
        ercs: &ErcList<E>,
    ) -> Result<Vec<&'c Candidate>> {
        let hierarchy = self.ranker.rank(ercs);
        self.eval.find_optima(competition, &hierarchy)
    }
}
