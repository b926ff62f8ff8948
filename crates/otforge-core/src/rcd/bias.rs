//! Ranking biases: which rankable constraints RCD places in the next stratum.
//!
//! Consistency never depends on the bias; only the shape of the resulting
//! hierarchy does.

use std::fmt::{self, Debug};

use crate::constraint::{ConstraintId, ConstraintKind, ConstraintList};
use crate::erc::{ConstraintMask, Erc};

/// The RCD state a bias may inspect when choosing a stratum.
pub struct RankingContext<'a> {
    constraints: &'a ConstraintList,
    unexplained: &'a [&'a Erc],
}

impl<'a> RankingContext<'a> {
    pub fn new(constraints: &'a ConstraintList, unexplained: &'a [&'a Erc]) -> Self {
        Self {
            constraints,
            unexplained,
        }
    }

    pub fn constraints(&self) -> &ConstraintList {
        self.constraints
    }

    /// Returns the ERCs not yet explained by a ranked stratum.
    pub fn unexplained(&self) -> &[&Erc] {
        self.unexplained
    }

    /// Returns true if ranking `id` now would explain some unexplained ERC.
    pub fn explains_any(&self, id: ConstraintId) -> bool {
        self.unexplained.iter().any(|erc| erc.is_w(id))
    }

    fn of_kind(&self, rankable: &ConstraintMask, kind: ConstraintKind) -> ConstraintMask {
        ConstraintMask::from_ids(
            rankable.capacity(),
            rankable
                .iter()
                .filter(|id| self.constraints[*id].kind() == kind),
        )
    }
}

/// Chooses the next stratum from the currently rankable constraints.
///
/// Implementations must return a non-empty subset of `rankable`; RCD
/// panics otherwise.
pub trait RankingBias: Send + Sync + Debug {
    fn choose(&self, rankable: &ConstraintMask, context: &RankingContext<'_>) -> ConstraintMask;
}

impl<B: RankingBias + ?Sized> RankingBias for Box<B> {
    fn choose(&self, rankable: &ConstraintMask, context: &RankingContext<'_>) -> ConstraintMask {
        (**self).choose(rankable, context)
    }
}

impl<B: RankingBias + ?Sized> RankingBias for &B {
    fn choose(&self, rankable: &ConstraintMask, context: &RankingContext<'_>) -> ConstraintMask {
        (**self).choose(rankable, context)
    }
}

/// Ranks every rankable constraint as high as possible.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllHigh;

impl RankingBias for AllHigh {
    fn choose(&self, rankable: &ConstraintMask, _context: &RankingContext<'_>) -> ConstraintMask {
        rankable.clone()
    }
}

/// Ranks a single constraint per round: the first rankable one in list order.
#[derive(Debug, Clone, Copy, Default)]
pub struct OneAtATime;

impl RankingBias for OneAtATime {
    fn choose(&self, rankable: &ConstraintMask, _context: &RankingContext<'_>) -> ConstraintMask {
        ConstraintMask::from_ids(rankable.capacity(), rankable.first())
    }
}

/// Keeps faithfulness low: ranks markedness whenever any is rankable.
///
/// Otherwise ranks only the faithfulness constraints that explain some
/// remaining ERC, or all rankable faithfulness if none does.
#[derive(Debug, Clone, Copy, Default)]
pub struct FaithLow;

impl RankingBias for FaithLow {
    fn choose(&self, rankable: &ConstraintMask, context: &RankingContext<'_>) -> ConstraintMask {
        low_bias(rankable, context, ConstraintKind::Markedness)
    }
}

/// Keeps markedness low; the mirror image of [`FaithLow`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkLow;

impl RankingBias for MarkLow {
    fn choose(&self, rankable: &ConstraintMask, context: &RankingContext<'_>) -> ConstraintMask {
        low_bias(rankable, context, ConstraintKind::Faithfulness)
    }
}

fn low_bias(
    rankable: &ConstraintMask,
    context: &RankingContext<'_>,
    preferred: ConstraintKind,
) -> ConstraintMask {
    let high = context.of_kind(rankable, preferred);
    if !high.is_empty() {
        return high;
    }
    let active = ConstraintMask::from_ids(
        rankable.capacity(),
        rankable.iter().filter(|id| context.explains_any(*id)),
    );
    if active.is_empty() {
        rankable.clone()
    } else {
        active
    }
}

/// Named ranking biases, for configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RankingBiasKind {
    #[default]
    AllHigh,
    OneAtATime,
    FaithLow,
    MarkLow,
}

impl RankingBiasKind {
    /// Returns the bias implementation.
    pub fn bias(self) -> Box<dyn RankingBias> {
        match self {
            RankingBiasKind::AllHigh => Box::new(AllHigh),
            RankingBiasKind::OneAtATime => Box::new(OneAtATime),
            RankingBiasKind::FaithLow => Box::new(FaithLow),
            RankingBiasKind::MarkLow => Box::new(MarkLow),
        }
    }
}

impl fmt::Display for RankingBiasKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankingBiasKind::AllHigh => write!(f, "all_high"),
            RankingBiasKind::OneAtATime => write!(f, "one_at_a_time"),
            RankingBiasKind::FaithLow => write!(f, "faith_low"),
            RankingBiasKind::MarkLow => write!(f, "mark_low"),
        }
    }
}
