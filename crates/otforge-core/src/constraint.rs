//! Constraint identity and the shared constraint arena.
//!
//! Constraints are created once when a grammar system is bootstrapped and
//! are referenced everywhere else by [`ConstraintId`], an index into a shared
//! [`ConstraintList`].

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Index;
use std::str::FromStr;
use std::sync::Arc;

use crate::candidate::Candidate;
use crate::error::{OtError, Result};

/// Counts the violations a candidate incurs on a constraint.
pub type ViolationFn = Arc<dyn Fn(&Candidate) -> u32 + Send + Sync>;

/// Kind of a constraint.
///
/// # Example
///
/// ```
/// use otforge_core::ConstraintKind;
///
/// let kind: ConstraintKind = "faith".parse().unwrap();
/// assert_eq!(kind, ConstraintKind::Faithfulness);
/// assert!("syntax".parse::<ConstraintKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConstraintKind {
    /// Evaluates outputs only.
    Markedness,
    /// Evaluates the input-output correspondence.
    Faithfulness,
}

impl FromStr for ConstraintKind {
    type Err = OtError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "markedness" | "mark" | "m" => Ok(ConstraintKind::Markedness),
            "faithfulness" | "faith" | "f" => Ok(ConstraintKind::Faithfulness),
            _ => Err(OtError::UnknownConstraintKind(s.to_string())),
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintKind::Markedness => write!(f, "markedness"),
            ConstraintKind::Faithfulness => write!(f, "faithfulness"),
        }
    }
}

/// Position of a constraint within its [`ConstraintList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConstraintId(pub usize);

impl ConstraintId {
    /// Returns the raw index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A violable constraint.
///
/// Equality and hashing use the name only.
#[derive(Clone)]
pub struct Constraint {
    name: String,
    id: String,
    kind: ConstraintKind,
    evaluator: Option<ViolationFn>,
}

impl Constraint {
    /// Creates a constraint without a violation evaluator.
    pub fn new(name: impl Into<String>, id: impl Into<String>, kind: ConstraintKind) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            kind,
            evaluator: None,
        }
    }

    /// Creates a constraint from a kind label such as `"markedness"` or `"faith"`.
    ///
    /// # Errors
    ///
    /// Returns [`OtError::UnknownConstraintKind`] for an unrecognized label.
    pub fn with_kind_str(
        name: impl Into<String>,
        id: impl Into<String>,
        kind: &str,
    ) -> Result<Self> {
        Ok(Self::new(name, id, kind.parse()?))
    }

    /// Attaches a violation evaluator.
    pub fn with_evaluator<F>(mut self, evaluator: F) -> Self
    where
        F: Fn(&Candidate) -> u32 + Send + Sync + 'static,
    {
        self.evaluator = Some(Arc::new(evaluator));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the short id used in compact displays.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ConstraintKind {
        self.kind
    }

    pub fn is_markedness(&self) -> bool {
        self.kind == ConstraintKind::Markedness
    }

    pub fn is_faithfulness(&self) -> bool {
        self.kind == ConstraintKind::Faithfulness
    }

    /// Counts the violations of `candidate`.
    ///
    /// # Errors
    ///
    /// Returns [`OtError::MissingEvaluator`] if no evaluator was attached.
    pub fn eval_candidate(&self, candidate: &Candidate) -> Result<u32> {
        let evaluator = self
            .evaluator
            .as_ref()
            .ok_or_else(|| OtError::MissingEvaluator(self.name.clone()))?;
        Ok(evaluator(candidate))
    }
}

impl PartialEq for Constraint {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Constraint {}

impl Hash for Constraint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraint")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("has_evaluator", &self.evaluator.is_some())
            .finish()
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The constraints of one grammar system.
///
/// Shared by [`Arc`] between candidates, ERCs and hierarchies. Every other
/// structure refers to a constraint by its [`ConstraintId`].
///
/// # Example
///
/// ```
/// use otforge_core::{Constraint, ConstraintKind, ConstraintList};
///
/// let list = ConstraintList::shared(vec![
///     Constraint::new("NoCoda", "NoC", ConstraintKind::Markedness),
///     Constraint::new("Max", "Max", ConstraintKind::Faithfulness),
/// ]).unwrap();
///
/// let max = list.id_of("Max").unwrap();
/// assert_eq!(list[max].id(), "Max");
/// assert_eq!(list.len(), 2);
/// ```
#[derive(Debug)]
pub struct ConstraintList {
    constraints: Vec<Constraint>,
    by_name: HashMap<String, ConstraintId>,
}

impl ConstraintList {
    /// Builds a constraint list.
    ///
    /// # Errors
    ///
    /// Returns [`OtError::DuplicateConstraint`] if two constraints share a name.
    pub fn new(constraints: Vec<Constraint>) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(constraints.len());
        for (idx, constraint) in constraints.iter().enumerate() {
            if by_name
                .insert(constraint.name.clone(), ConstraintId(idx))
                .is_some()
            {
                return Err(OtError::DuplicateConstraint(constraint.name.clone()));
            }
        }
        Ok(Self {
            constraints,
            by_name,
        })
    }

    /// Builds a constraint list wrapped for sharing.
    pub fn shared(constraints: Vec<Constraint>) -> Result<Arc<Self>> {
        Ok(Arc::new(Self::new(constraints)?))
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn get(&self, id: ConstraintId) -> Option<&Constraint> {
        self.constraints.get(id.0)
    }

    /// Looks up a constraint id by name.
    pub fn id_of(&self, name: &str) -> Option<ConstraintId> {
        self.by_name.get(name).copied()
    }

    /// Looks up a constraint id by name, failing if it is absent.
    pub fn require(&self, name: &str) -> Result<ConstraintId> {
        self.id_of(name)
            .ok_or_else(|| OtError::UnknownConstraint(name.to_string()))
    }

    /// Looks up a constraint id by its short id.
    pub fn id_of_short(&self, short: &str) -> Option<ConstraintId> {
        self.constraints
            .iter()
            .position(|c| c.id == short)
            .map(ConstraintId)
    }

    pub fn ids(&self) -> impl Iterator<Item = ConstraintId> + '_ {
        (0..self.constraints.len()).map(ConstraintId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConstraintId, &Constraint)> + '_ {
        self.constraints
            .iter()
            .enumerate()
            .map(|(idx, c)| (ConstraintId(idx), c))
    }

    /// Returns true if both lists hold the same constraints, in any order.
    pub fn is_compatible(&self, other: &ConstraintList) -> bool {
        self.len() == other.len()
            && self
                .constraints
                .iter()
                .all(|c| other.by_name.contains_key(&c.name))
    }

    /// Returns true if both lists hold the same constraints in the same order.
    pub fn same_order(&self, other: &ConstraintList) -> bool {
        self.constraints == other.constraints
    }

    /// Maps each id of this list to the id of the same constraint in `target`.
    ///
    /// # Errors
    ///
    /// Returns [`OtError::ConstraintSetMismatch`] if the lists are not compatible.
    pub fn mapping_to(&self, target: &ConstraintList) -> Result<Vec<ConstraintId>> {
        if !self.is_compatible(target) {
            return Err(OtError::ConstraintSetMismatch(format!(
                "{} constraints [{}] vs {} constraints [{}]",
                self.len(),
                self.names().join(", "),
                target.len(),
                target.names().join(", ")
            )));
        }
        self.constraints
            .iter()
            .map(|c| target.require(&c.name))
            .collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.constraints.iter().map(|c| c.name.as_str()).collect()
    }
}

impl Index<ConstraintId> for ConstraintList {
    type Output = Constraint;

    fn index(&self, id: ConstraintId) -> &Constraint {
        &self.constraints[id.0]
    }
}

/// Returns true if both handles point at interchangeable constraint lists.
pub fn same_list(a: &Arc<ConstraintList>, b: &Arc<ConstraintList>) -> bool {
    Arc::ptr_eq(a, b) || a.same_order(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> ConstraintList {
        ConstraintList::new(vec![
            Constraint::new("NoCoda", "NoC", ConstraintKind::Markedness),
            Constraint::new("Max", "Max", ConstraintKind::Faithfulness),
            Constraint::new("Dep", "Dep", ConstraintKind::Faithfulness),
        ])
        .unwrap()
    }

    #[test]
    fn test_equality_by_name() {
        let a = Constraint::new("NoCoda", "NoC", ConstraintKind::Markedness);
        let b = Constraint::new("NoCoda", "x", ConstraintKind::Faithfulness);
        assert_eq!(a, b);
        assert_ne!(a, Constraint::new("Max", "NoC", ConstraintKind::Markedness));
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!(
            "Markedness".parse::<ConstraintKind>().unwrap(),
            ConstraintKind::Markedness
        );
        assert!(matches!(
            Constraint::with_kind_str("X", "X", "prosodic"),
            Err(OtError::UnknownConstraintKind(_))
        ));
    }

    #[test]
    fn test_missing_evaluator() {
        let list = Arc::new(list());
        let cand = Candidate::new("in", "out", Arc::clone(&list));
        let err = list[ConstraintId(0)].eval_candidate(&cand).unwrap_err();
        assert_eq!(err, OtError::MissingEvaluator("NoCoda".to_string()));
    }

    #[test]
    fn test_duplicate_rejected() {
        let result = ConstraintList::new(vec![
            Constraint::new("Max", "M1", ConstraintKind::Faithfulness),
            Constraint::new("Max", "M2", ConstraintKind::Faithfulness),
        ]);
        assert!(matches!(result, Err(OtError::DuplicateConstraint(_))));
    }

    #[test]
    fn test_lookup() {
        let list = list();
        assert_eq!(list.id_of("Dep"), Some(ConstraintId(2)));
        assert_eq!(list.id_of_short("NoC"), Some(ConstraintId(0)));
        assert!(list.require("Onset").is_err());
        assert!(list[ConstraintId(1)].is_faithfulness());
    }

    #[test]
    fn test_compatibility_and_mapping() {
        let a = list();
        let b = ConstraintList::new(vec![
            Constraint::new("Dep", "Dep", ConstraintKind::Faithfulness),
            Constraint::new("NoCoda", "NoC", ConstraintKind::Markedness),
            Constraint::new("Max", "Max", ConstraintKind::Faithfulness),
        ])
        .unwrap();
        assert!(a.is_compatible(&b));
        assert!(!a.same_order(&b));
        assert_eq!(
            a.mapping_to(&b).unwrap(),
            vec![ConstraintId(1), ConstraintId(2), ConstraintId(0)]
        );

        let c = ConstraintList::new(vec![Constraint::new(
            "Max",
            "Max",
            ConstraintKind::Faithfulness,
        )])
        .unwrap();
        assert!(!a.is_compatible(&c));
        assert!(matches!(
            a.mapping_to(&c),
            Err(OtError::ConstraintSetMismatch(_))
        ));
    }
}
