//! Factorial typology enumeration.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use otforge_config::TypologyConfig;
use otforge_core::{Competition, ConstraintList, OtError, Result};
use tracing::{debug, info, warn};

use crate::contenders::{filter_contenders, Contenders};
use crate::executor::Executor;
use crate::language::{Language, PartialLanguage};

/// Enumerates every language a set of competitions admits.
///
/// Runs in two phases:
/// 1. each competition is reduced to its contenders;
/// 2. starting from one empty language, every language is extended by each
///    contender of the next competition, keeping the consistent extensions.
///
/// # Example
///
/// ```
/// use otforge_config::TypologyConfig;
/// use otforge_test::three_language_system;
/// use otforge_typology::FactorialTypology;
///
/// let (_, competitions) = three_language_system();
/// let typology = FactorialTypology::new(TypologyConfig::default())
///     .run(&competitions)
///     .unwrap();
///
/// assert_eq!(typology.len(), 3);
/// assert_eq!(typology.languages()[0].label(), "L1");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FactorialTypology {
    config: TypologyConfig,
}

impl FactorialTypology {
    pub fn new(config: TypologyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TypologyConfig {
        &self.config
    }

    /// Computes the typology of `competitions`.
    ///
    /// Competitions without contenders are logged and skipped. Competitions
    /// over the same constraints in another order are re-indexed into the
    /// first competition's list, which every [`Language`] hierarchy, winner
    /// and contender then shares.
    ///
    /// # Errors
    ///
    /// Returns [`OtError::EmptyCompetition`] if `competitions` is empty and
    /// [`OtError::ConstraintSetMismatch`] if the competitions use
    /// incompatible constraint lists.
    pub fn run(&self, competitions: &[Competition]) -> Result<Typology> {
        let start = Instant::now();
        let constraints = shared_constraints(competitions)?;
        let competitions = competitions
            .iter()
            .map(|c| c.reindexed(&constraints))
            .collect::<Result<Vec<_>>>()?;
        let executor = Executor::from_config(self.config.thread_count);

        info!(
            event = "typology_start",
            competition_count = competitions.len() as u64,
            candidate_count = competitions.iter().map(|c| c.len() as u64).sum::<u64>(),
            constraint_count = constraints.len() as u64,
        );

        let mut contenders = Vec::with_capacity(competitions.len());
        for competition in &competitions {
            let mut found = if self.config.filter_harmonically_bound {
                filter_contenders(competition, &executor)?
            } else {
                Contenders::unfiltered(competition)
            };
            if self.config.merge_identical_contenders {
                found.merge_identical()?;
            }
            debug!(
                event = "contenders",
                input = found.input(),
                candidates = competition.len() as u64,
                contenders = found.len() as u64,
                bound = found.bound().len() as u64,
            );
            contenders.push(found);
        }

        let mut partials = vec![PartialLanguage::default()];
        for (index, found) in contenders.iter().enumerate() {
            if found.is_empty() {
                warn!(
                    event = "competition_skipped",
                    input = found.input(),
                    "competition has no contenders"
                );
                continue;
            }
            partials = executor
                .map(&partials, |partial| partial.extensions(found, &constraints))
                .into_iter()
                .collect::<Result<Vec<_>>>()?
                .into_iter()
                .flatten()
                .collect();
            debug!(
                event = "progress",
                competition = index as u64,
                input = found.input(),
                languages = partials.len() as u64,
            );
        }

        let bias = self.config.ranking_bias.bias();
        let languages = partials
            .into_iter()
            .enumerate()
            .map(|(idx, partial)| partial.finish(self.config.label(idx + 1), &constraints, &bias))
            .collect::<Result<Vec<_>>>()?;

        info!(
            event = "typology_end",
            languages = languages.len() as u64,
            duration_ms = start.elapsed().as_millis() as u64,
        );

        Ok(Typology {
            constraints,
            contenders,
            languages,
        })
    }
}

fn shared_constraints(competitions: &[Competition]) -> Result<Arc<ConstraintList>> {
    let first = competitions.first().ok_or(OtError::EmptyCompetition)?;
    let constraints = Arc::clone(first.constraints());
    for competition in &competitions[1..] {
        if !constraints.is_compatible(competition.constraints()) {
            return Err(OtError::ConstraintSetMismatch(format!(
                "/{}/ and /{}/ use different constraints",
                first.input(),
                competition.input()
            )));
        }
    }
    Ok(constraints)
}

/// The languages of a factorial typology, labeled in discovery order.
pub struct Typology {
    constraints: Arc<ConstraintList>,
    contenders: Vec<Contenders>,
    languages: Vec<Language>,
}

impl Typology {
    pub fn constraints(&self) -> &Arc<ConstraintList> {
        &self.constraints
    }

    /// Returns the contenders of each competition, in competition order.
    pub fn contenders(&self) -> &[Contenders] {
        &self.contenders
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    /// Returns the language with the given label.
    pub fn language(&self, label: &str) -> Option<&Language> {
        self.languages.iter().find(|l| l.label() == label)
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Language> {
        self.languages.iter()
    }
}

impl<'a> IntoIterator for &'a Typology {
    type Item = &'a Language;
    type IntoIter = std::slice::Iter<'a, Language>;

    fn into_iter(self) -> Self::IntoIter {
        self.languages.iter()
    }
}

impl fmt::Debug for Typology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Typology")
            .field("competitions", &self.contenders.len())
            .field("languages", &self.languages)
            .finish()
    }
}

impl fmt::Display for Typology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, language) in self.languages.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", language)?;
        }
        Ok(())
    }
}
