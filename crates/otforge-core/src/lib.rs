//! OTForge Core - Ranking evidence and Recursive Constraint Demotion
//!
//! This crate provides the data model and the consistency engine:
//! - Constraints, held in a shared [`ConstraintList`] and referenced by id
//! - Candidates and competitions carrying violation profiles
//! - Elementary Ranking Conditions, winner-loser pairs and [`ErcList`]s
//! - Stratified [`Hierarchy`] rankings
//! - [`Rcd`] with pluggable ranking biases

pub mod candidate;
pub mod competition;
pub mod constraint;
pub mod erc;
pub mod error;
pub mod hierarchy;
pub mod rcd;

#[cfg(test)]
mod test_utils;

pub use candidate::Candidate;
pub use competition::Competition;
pub use constraint::{
    same_list, Constraint, ConstraintId, ConstraintKind, ConstraintList, ViolationFn,
};
pub use erc::{fusion, ConstraintMask, Erc, ErcLike, ErcList, ErcValue, WinnerLoserPair};
pub use error::{OtError, Result};
pub use hierarchy::{Hierarchy, Stratum};
pub use rcd::{
    AllHigh, FaithLow, MarkLow, OneAtATime, RankingBias, RankingBiasKind, RankingContext, Rcd,
};
