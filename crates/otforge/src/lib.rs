//! OTForge - Optimality Theory in Rust
//!
//! Rank constraints from ranking evidence, check consistency, enumerate
//! factorial typologies and evaluate candidates under a hierarchy.
//!
//! # Example
//!
//! ```rust
//! use otforge::prelude::*;
//!
//! let list = ConstraintList::shared(vec![
//!     Constraint::new("NoCoda", "NC", ConstraintKind::Markedness),
//!     Constraint::new("Max", "MX", ConstraintKind::Faithfulness),
//! ]).unwrap();
//!
//! // Winner [pa] violates Max; loser [pat] violates NoCoda.
//! let winner = Candidate::with_violations("pat", "pa", list.clone(), &[0, 1]).unwrap();
//! let loser = Candidate::with_violations("pat", "pat", list.clone(), &[1, 0]).unwrap();
//!
//! let ercs = ErcList::from_ercs(list, [WinnerLoserPair::new(&winner, &loser).unwrap()]).unwrap();
//! let rcd = Rcd::new(&ercs);
//! assert!(rcd.is_consistent());
//! assert_eq!(rcd.hierarchy().to_string(), "[[NC] [MX]]");
//! ```

pub use otforge_core::{
    candidate, competition, constraint, erc, error, hierarchy, rcd, AllHigh, Candidate,
    Competition, Constraint, ConstraintId, ConstraintKind, ConstraintList, Erc, ErcLike, ErcList,
    ErcValue, FaithLow, Hierarchy, MarkLow, OneAtATime, OtError, RankingBias, RankingBiasKind,
    Rcd, Result, WinnerLoserPair,
};

pub use otforge_eval::{
    CompareConsistency, CompareCtie, ComparePool, Ctie, Eval, HierarchyComparer, MostHarmonic,
    Pool, Preference, Ranker, StratifiedComparer, StratumComparer,
};

pub use otforge_typology::{
    find_contenders, Contenders, FactorialTypology, Language, Typology,
};

pub use otforge_config::{ComparerKind, ConfigError, ThreadCount, TypologyConfig};

#[cfg(feature = "console")]
pub use otforge_console as console;

mod typology;
pub use typology::{comparer, evaluator, run_typology, run_typology_with};

pub mod prelude {
    pub use super::{
        Candidate, Competition, Constraint, ConstraintKind, ConstraintList, Erc, ErcList,
        ErcValue, Hierarchy, Rcd, WinnerLoserPair,
    };
    pub use super::{CompareConsistency, Eval, HierarchyComparer, Preference};
    pub use super::{FactorialTypology, Language, Typology, TypologyConfig};
    pub use super::{run_typology, run_typology_with};
}
