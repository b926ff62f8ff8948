//! OTForge Typology - Every grammar a constraint set allows
//!
//! - [`find_contenders`] removes harmonically bound candidates
//! - [`FactorialTypology`] enumerates the consistent combinations of
//!   winners across competitions as labeled [`Language`]s
//!
//! Contender checks and language extensions can fan out over rayon; results
//! are always collected in input order, so labels are deterministic.

mod contenders;
mod executor;
mod language;
mod typology;


pub use contenders::{find_contenders, is_contender, Contenders};
pub use language::Language;
pub use typology::{FactorialTypology, Typology};
