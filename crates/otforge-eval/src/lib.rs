//! OTForge Eval - Which candidates win
//!
//! Comparers decide which of two candidates is more harmonic:
//! - [`Pool`] and [`Ctie`] judge a single stratum
//! - [`StratifiedComparer`] descends a [`Hierarchy`](otforge_core::Hierarchy)
//!   with a stratum comparer ([`ComparePool`], [`CompareCtie`])
//! - [`CompareConsistency`] works from ERC evidence instead of a hierarchy
//!
//! [`Eval`] folds a competition into its optimal candidates, and
//! [`MostHarmonic`] ranks ERC evidence with a [`Ranker`] first.

pub mod consistency;
pub mod eval;
pub mod hierarchy;
pub mod most_harmonic;
pub mod preference;
pub mod stratum;

#[cfg(test)]
mod tests;

pub use consistency::CompareConsistency;
pub use eval::Eval;
pub use hierarchy::{CompareCtie, ComparePool, HierarchyComparer, StratifiedComparer};
pub use most_harmonic::{MostHarmonic, Ranker};
pub use preference::Preference;
pub use stratum::{Ctie, Pool, StratumComparer};
