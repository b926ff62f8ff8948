//! Typology entry points that hide the configuration wiring.

use otforge_config::{ComparerKind, TypologyConfig};
use otforge_core::{Competition, Result};
use otforge_eval::{CompareCtie, ComparePool, Eval, HierarchyComparer};
use otforge_typology::{FactorialTypology, Typology};
use tracing::debug;

/// Computes the factorial typology of `competitions`.
///
/// Reads `typology.toml` from the working directory, falling back to
/// defaults when the file is missing or invalid.
pub fn run_typology(competitions: &[Competition]) -> Result<Typology> {
    let config = TypologyConfig::load("typology.toml").unwrap_or_else(|err| {
        debug!("Using default typology configuration: {}", err);
        TypologyConfig::default()
    });
    run_typology_with(config, competitions)
}

/// Computes the factorial typology of `competitions` with `config`.
///
/// # Example
///
/// ```
/// use otforge::{run_typology_with, TypologyConfig};
/// use otforge_test::three_language_system;
///
/// let (_, competitions) = three_language_system();
/// let typology = run_typology_with(TypologyConfig::default(), &competitions).unwrap();
/// assert_eq!(typology.len(), 3);
/// ```
pub fn run_typology_with(config: TypologyConfig, competitions: &[Competition]) -> Result<Typology> {
    #[cfg(feature = "console")]
    otforge_console::init();

    FactorialTypology::new(config).run(competitions)
}

/// Returns the hierarchy comparer for `kind`.
pub fn comparer(kind: ComparerKind) -> Box<dyn HierarchyComparer> {
    match kind {
        ComparerKind::Pool => Box::new(ComparePool::default()),
        ComparerKind::Ctie => Box::new(CompareCtie::default()),
    }
}

/// Returns an evaluator using the comparer `config` selects.
pub fn evaluator(config: &TypologyConfig) -> Eval<Box<dyn HierarchyComparer>> {
    Eval::new(comparer(config.comparer))
}
