//! Elementary Ranking Conditions.
//!
//! An ERC records, for every constraint, whether it prefers the winner (W),
//! the loser (L) or neither (e). Internally it is a pair of disjoint
//! [`ConstraintMask`]s, which keeps equality, hashing and the subset tests
//! used by RCD independent of the number of constraints per word.

mod list;
mod mask;
mod winner_loser;


use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::constraint::{ConstraintId, ConstraintList};
use crate::error::{OtError, Result};

pub use list::ErcList;
pub use mask::ConstraintMask;
pub use winner_loser::WinnerLoserPair;

/// Preference of a single constraint within an ERC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErcValue {
    /// Prefers the winner.
    W,
    /// Prefers the loser.
    L,
    /// No preference.
    E,
}

impl fmt::Display for ErcValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErcValue::W => write!(f, "W"),
            ErcValue::L => write!(f, "L"),
            ErcValue::E => write!(f, "e"),
        }
    }
}

/// Anything that carries an ERC: plain ERCs and winner-loser pairs.
pub trait ErcLike {
    /// Returns the underlying ERC.
    fn erc(&self) -> &Erc;

    /// Returns a copy whose ERC is indexed by `target` instead of its own list.
    fn reindexed(&self, target: &Arc<ConstraintList>) -> Result<Self>
    where
        Self: Sized;
}

/// An Elementary Ranking Condition over a constraint list.
///
/// Equality ignores labels: two ERCs are equal iff their W-sets and L-sets
/// are equal.
///
/// # Example
///
/// ```
/// use otforge_core::{Constraint, ConstraintKind, ConstraintList, Erc, ErcValue};
///
/// let list = ConstraintList::shared(vec![
///     Constraint::new("C1", "C1", ConstraintKind::Markedness),
///     Constraint::new("C2", "C2", ConstraintKind::Markedness),
/// ]).unwrap();
///
/// let mut erc = Erc::new(list.clone());
/// let c1 = list.id_of("C1").unwrap();
/// erc.set_w(c1);
/// erc.set_l(c1);
/// assert_eq!(erc.value(c1), ErcValue::L);
/// assert_eq!(erc.to_string(), "[C1:L C2:e]");
/// ```
#[derive(Clone)]
pub struct Erc {
    constraints: Arc<ConstraintList>,
    w: ConstraintMask,
    l: ConstraintMask,
    label: Option<String>,
}

impl Erc {
    /// Creates an ERC with every constraint at `e`.
    pub fn new(constraints: Arc<ConstraintList>) -> Self {
        let n = constraints.len();
        Self {
            constraints,
            w: ConstraintMask::new(n),
            l: ConstraintMask::new(n),
            label: None,
        }
    }

    /// Creates an ERC from one value per constraint, in list order.
    ///
    /// # Errors
    ///
    /// Returns [`OtError::LengthMismatch`] if `values` does not cover the list.
    pub fn from_values(constraints: Arc<ConstraintList>, values: &[ErcValue]) -> Result<Self> {
        if values.len() != constraints.len() {
            return Err(OtError::LengthMismatch {
                expected: constraints.len(),
                found: values.len(),
            });
        }
        let mut erc = Self::new(constraints);
        for (idx, value) in values.iter().enumerate() {
            erc.set(ConstraintId(idx), *value);
        }
        Ok(erc)
    }

    /// Creates an ERC from W and L constraint names; the rest are `e`.
    pub fn from_names(
        constraints: Arc<ConstraintList>,
        winners: &[&str],
        losers: &[&str],
    ) -> Result<Self> {
        let mut erc = Self::new(Arc::clone(&constraints));
        for name in winners {
            erc.set_w(constraints.require(name)?);
        }
        for name in losers {
            erc.set_l(constraints.require(name)?);
        }
        Ok(erc)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = Some(label.into());
    }

    pub fn constraints(&self) -> &Arc<ConstraintList> {
        &self.constraints
    }

    /// Marks `id` as preferring the winner.
    pub fn set_w(&mut self, id: ConstraintId) {
        self.l.remove(id);
        self.w.insert(id);
    }

    /// Marks `id` as preferring the loser.
    pub fn set_l(&mut self, id: ConstraintId) {
        self.w.remove(id);
        self.l.insert(id);
    }

    /// Marks `id` as having no preference.
    pub fn set_e(&mut self, id: ConstraintId) {
        self.w.remove(id);
        self.l.remove(id);
    }

    pub fn set(&mut self, id: ConstraintId, value: ErcValue) {
        match value {
            ErcValue::W => self.set_w(id),
            ErcValue::L => self.set_l(id),
            ErcValue::E => self.set_e(id),
        }
    }

    pub fn value(&self, id: ConstraintId) -> ErcValue {
        if self.w.contains(id) {
            ErcValue::W
        } else if self.l.contains(id) {
            ErcValue::L
        } else {
            ErcValue::E
        }
    }

    pub fn values(&self) -> Vec<ErcValue> {
        self.constraints.ids().map(|id| self.value(id)).collect()
    }

    pub fn w_mask(&self) -> &ConstraintMask {
        &self.w
    }

    pub fn l_mask(&self) -> &ConstraintMask {
        &self.l
    }

    pub fn is_w(&self, id: ConstraintId) -> bool {
        self.w.contains(id)
    }

    pub fn is_l(&self, id: ConstraintId) -> bool {
        self.l.contains(id)
    }

    /// Returns true if no constraint has a preference.
    pub fn is_trivial(&self) -> bool {
        self.w.is_empty() && self.l.is_empty()
    }

    /// Returns true if some ranking satisfies this ERC on its own:
    /// either it has no L, or it has at least one W.
    pub fn is_satisfiable(&self) -> bool {
        self.l.is_empty() || !self.w.is_empty()
    }

    fn without_label(mut self) -> Self {
        self.label = None;
        self
    }

    /// Fuses two ERCs: L wherever either has L, otherwise W wherever either
    /// has W.
    ///
    /// # Errors
    ///
    /// Returns [`OtError::ConstraintSetMismatch`] for incompatible lists.
    pub fn fuse(&self, other: &Erc) -> Result<Erc> {
        let other = other.reindexed(&self.constraints)?;
        let mut l = self.l.clone();
        l.union_with(&other.l);
        let mut w = self.w.clone();
        w.union_with(&other.w);
        w.difference_with(&l);
        Ok(Erc {
            constraints: Arc::clone(&self.constraints),
            w,
            l,
            label: None,
        })
    }
}

impl ErcLike for Erc {
    fn erc(&self) -> &Erc {
        self
    }

    fn reindexed(&self, target: &Arc<ConstraintList>) -> Result<Self> {
        if Arc::ptr_eq(&self.constraints, target) || self.constraints.same_order(target) {
            let mut erc = self.clone();
            erc.constraints = Arc::clone(target);
            return Ok(erc);
        }
        let mapping = self.constraints.mapping_to(target)?;
        let mut erc = Erc::new(Arc::clone(target));
        for id in self.w.iter() {
            erc.set_w(mapping[id.index()]);
        }
        for id in self.l.iter() {
            erc.set_l(mapping[id.index()]);
        }
        erc.label = self.label.clone();
        Ok(erc)
    }
}

/// Fuses a collection of ERCs; `None` for an empty collection.
pub fn fusion<'a, E, I>(ercs: I) -> Result<Option<Erc>>
where
    E: ErcLike + 'a,
    I: IntoIterator<Item = &'a E>,
{
    let mut fused: Option<Erc> = None;
    for erc in ercs {
        fused = Some(match fused {
            None => erc.erc().clone().without_label(),
            Some(acc) => acc.fuse(erc.erc())?,
        });
    }
    Ok(fused)
}

impl PartialEq for Erc {
    fn eq(&self, other: &Self) -> bool {
        self.w == other.w && self.l == other.l
    }
}

impl Eq for Erc {}

impl Hash for Erc {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.w.hash(state);
        self.l.hash(state);
    }
}

impl fmt::Debug for Erc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Erc")
            .field("label", &self.label)
            .field("w", &self.w)
            .field("l", &self.l)
            .finish()
    }
}

impl fmt::Display for Erc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(label) = &self.label {
            write!(f, "{} ", label)?;
        }
        write!(f, "[")?;
        for (idx, (id, constraint)) in self.constraints.iter().enumerate() {
            if idx > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}:{}", constraint.id(), self.value(id))?;
        }
        write!(f, "]")
    }
}
