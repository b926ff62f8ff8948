//! Candidates and their violation profiles.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::constraint::{same_list, ConstraintId, ConstraintList};
use crate::error::{OtError, Result};

/// An (input, output) pair with a violation count per constraint.
///
/// Violation counts start unassigned. A candidate produced by [`merge`]
/// stands for several outputs that share one violation profile.
///
/// [`merge`]: Candidate::merge
///
/// # Example
///
/// ```
/// use otforge_core::{Candidate, Constraint, ConstraintKind, ConstraintList};
///
/// let list = ConstraintList::shared(vec![
///     Constraint::new("NoCoda", "NoC", ConstraintKind::Markedness),
///     Constraint::new("Max", "Max", ConstraintKind::Faithfulness),
/// ]).unwrap();
///
/// let a = Candidate::with_violations("pat", "pa", list.clone(), &[0, 1]).unwrap();
/// let b = Candidate::with_violations("pat", "pa.", list.clone(), &[0, 1]).unwrap();
/// assert!(a.ident_viols(&b));
///
/// let merged = a.merge(&b).unwrap();
/// assert!(merged.is_merged());
/// assert_eq!(merged.outputs(), ["pa", "pa."]);
/// ```
#[derive(Clone)]
pub struct Candidate {
    input: String,
    outputs: SmallVec<[String; 1]>,
    constraints: Arc<ConstraintList>,
    violations: Vec<Option<u32>>,
    optimal: bool,
}

impl Candidate {
    /// Creates a candidate with every violation count unassigned.
    pub fn new(
        input: impl Into<String>,
        output: impl Into<String>,
        constraints: Arc<ConstraintList>,
    ) -> Self {
        let n = constraints.len();
        let mut outputs = SmallVec::new();
        outputs.push(output.into());
        Self {
            input: input.into(),
            outputs,
            constraints,
            violations: vec![None; n],
            optimal: false,
        }
    }

    /// Creates a candidate with every violation count assigned, in constraint order.
    ///
    /// # Errors
    ///
    /// Returns [`OtError::LengthMismatch`] if `counts` does not cover the list.
    pub fn with_violations(
        input: impl Into<String>,
        output: impl Into<String>,
        constraints: Arc<ConstraintList>,
        counts: &[u32],
    ) -> Result<Self> {
        if counts.len() != constraints.len() {
            return Err(OtError::LengthMismatch {
                expected: constraints.len(),
                found: counts.len(),
            });
        }
        let mut candidate = Self::new(input, output, constraints);
        candidate.violations = counts.iter().copied().map(Some).collect();
        Ok(candidate)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns the first output; the only one unless the candidate is merged.
    pub fn output(&self) -> &str {
        &self.outputs[0]
    }

    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    pub fn is_merged(&self) -> bool {
        self.outputs.len() > 1
    }

    pub fn constraints(&self) -> &Arc<ConstraintList> {
        &self.constraints
    }

    /// Returns the externally supplied optimality label.
    pub fn is_optimal(&self) -> bool {
        self.optimal
    }

    pub fn set_optimal(&mut self, optimal: bool) {
        self.optimal = optimal;
    }

    /// Returns the violation count for `id`, if assigned.
    pub fn violations(&self, id: ConstraintId) -> Option<u32> {
        self.violations.get(id.index()).copied().flatten()
    }

    /// Returns the violation count for `id`.
    ///
    /// # Panics
    ///
    /// Panics if the count is unassigned. [`Competition`](crate::Competition)
    /// guarantees complete candidates.
    pub fn count(&self, id: ConstraintId) -> u32 {
        match self.violations(id) {
            Some(count) => count,
            None => panic!(
                "candidate {} has no violation count for constraint {}",
                self, self.constraints[id]
            ),
        }
    }

    /// Returns the violation count for `id`, failing if it is unassigned.
    pub fn try_count(&self, id: ConstraintId) -> Result<u32> {
        self.violations(id)
            .ok_or_else(|| OtError::UnassignedViolation {
                candidate: self.to_string(),
                constraint: self.constraints[id].name().to_string(),
            })
    }

    pub fn set_violations(&mut self, id: ConstraintId, count: u32) {
        self.violations[id.index()] = Some(count);
    }

    /// Sets the violation count of the constraint named `name`.
    pub fn set_violations_by_name(&mut self, name: &str, count: u32) -> Result<()> {
        let id = self.constraints.require(name)?;
        self.set_violations(id, count);
        Ok(())
    }

    /// Assigns every violation count by running the constraints' evaluators.
    ///
    /// # Errors
    ///
    /// Returns [`OtError::MissingEvaluator`] for the first constraint lacking
    /// an evaluator; no count is changed in that case.
    pub fn eval_constraints(&mut self) -> Result<()> {
        let counts = self
            .constraints
            .iter()
            .map(|(_, c)| c.eval_candidate(self))
            .collect::<Result<Vec<u32>>>()?;
        self.violations = counts.into_iter().map(Some).collect();
        Ok(())
    }

    /// Returns true if every violation count is assigned.
    pub fn is_complete(&self) -> bool {
        self.violations.iter().all(Option::is_some)
    }

    /// Returns true if both candidates have equal counts on every constraint.
    ///
    /// Counts are matched by constraint, so candidates over reordered lists
    /// compare correctly. Candidates over different constraint sets are never
    /// identical.
    pub fn ident_viols(&self, other: &Candidate) -> bool {
        if same_list(&self.constraints, &other.constraints) {
            return self.violations == other.violations;
        }
        match self.constraints.mapping_to(&other.constraints) {
            Ok(mapping) => mapping
                .iter()
                .enumerate()
                .all(|(from, to)| self.violations[from] == other.violations[to.index()]),
            Err(_) => false,
        }
    }

    /// Returns the same candidate with its counts laid out in `target`'s order.
    ///
    /// # Errors
    ///
    /// Returns [`OtError::ConstraintSetMismatch`] if `target` holds different
    /// constraints.
    pub fn reindexed(&self, target: &Arc<ConstraintList>) -> Result<Candidate> {
        if same_list(&self.constraints, target) {
            return Ok(self.clone());
        }
        let mapping = self.constraints.mapping_to(target)?;
        let mut violations = vec![None; target.len()];
        for (from, to) in mapping.iter().enumerate() {
            violations[to.index()] = self.violations[from];
        }
        Ok(Candidate {
            input: self.input.clone(),
            outputs: self.outputs.clone(),
            constraints: Arc::clone(target),
            violations,
            optimal: self.optimal,
        })
    }

    /// Merges two candidates sharing an input and a violation profile.
    ///
    /// # Errors
    ///
    /// Fails if the inputs differ, the constraint lists differ, or the
    /// violation profiles are not identical.
    pub fn merge(&self, other: &Candidate) -> Result<Candidate> {
        if self.input != other.input {
            return Err(OtError::InputMismatch {
                first: self.input.clone(),
                second: other.input.clone(),
            });
        }
        if !same_list(&self.constraints, &other.constraints) {
            return Err(OtError::ConstraintSetMismatch(format!(
                "cannot merge {} with {}",
                self, other
            )));
        }
        if !self.ident_viols(other) {
            return Err(OtError::NotMergeable(format!(
                "{} and {} have different violation profiles",
                self, other
            )));
        }
        let mut merged = self.clone();
        merged.outputs.extend(other.outputs.iter().cloned());
        merged.optimal = self.optimal || other.optimal;
        Ok(merged)
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.input == other.input
            && self.outputs == other.outputs
            && self.ident_viols(other)
    }
}

impl Eq for Candidate {}

impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("input", &self.input)
            .field("outputs", &self.outputs.as_slice())
            .field("violations", &self.violations)
            .field("optimal", &self.optimal)
            .finish()
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.input, self.outputs.join("|"))
    }
}
