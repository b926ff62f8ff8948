//! Fixed-size constraint bit masks.

use std::fmt;

use smallvec::SmallVec;

use crate::constraint::ConstraintId;

const WORD_BITS: usize = 64;

/// A set of constraints of one [`ConstraintList`](crate::ConstraintList),
/// stored as bits indexed by [`ConstraintId`].
///
/// Two masks are only meaningful to compare when they were created for the
/// same list length.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct ConstraintMask {
    words: SmallVec<[u64; 2]>,
    len: usize,
}

impl ConstraintMask {
    /// Creates an empty mask for `len` constraints.
    pub fn new(len: usize) -> Self {
        let words = SmallVec::from_elem(0, len.div_ceil(WORD_BITS));
        Self { words, len }
    }

    /// Creates a mask holding all `len` constraints.
    pub fn full(len: usize) -> Self {
        let mut mask = Self::new(len);
        for idx in 0..len {
            mask.insert(ConstraintId(idx));
        }
        mask
    }

    /// Creates a mask from the given ids.
    pub fn from_ids(len: usize, ids: impl IntoIterator<Item = ConstraintId>) -> Self {
        let mut mask = Self::new(len);
        for id in ids {
            mask.insert(id);
        }
        mask
    }

    /// Returns the number of constraints the mask ranges over.
    pub fn capacity(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn insert(&mut self, id: ConstraintId) {
        assert!(id.index() < self.len, "constraint {:?} out of range", id);
        self.words[id.index() / WORD_BITS] |= 1 << (id.index() % WORD_BITS);
    }

    #[inline]
    pub fn remove(&mut self, id: ConstraintId) {
        if id.index() < self.len {
            self.words[id.index() / WORD_BITS] &= !(1 << (id.index() % WORD_BITS));
        }
    }

    #[inline]
    pub fn contains(&self, id: ConstraintId) -> bool {
        id.index() < self.len
            && self.words[id.index() / WORD_BITS] & (1 << (id.index() % WORD_BITS)) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns true if the masks share a constraint.
    pub fn intersects(&self, other: &ConstraintMask) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .any(|(a, b)| a & b != 0)
    }

    /// Returns true if every constraint of `self` is in `other`.
    pub fn is_subset(&self, other: &ConstraintMask) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .all(|(a, b)| a & !b == 0)
    }

    pub fn union_with(&mut self, other: &ConstraintMask) {
        for (a, b) in self.words.iter_mut().zip(other.words.iter()) {
            *a |= b;
        }
    }

    pub fn intersect_with(&mut self, other: &ConstraintMask) {
        for (a, b) in self.words.iter_mut().zip(other.words.iter()) {
            *a &= b;
        }
    }

    pub fn difference_with(&mut self, other: &ConstraintMask) {
        for (a, b) in self.words.iter_mut().zip(other.words.iter()) {
            *a &= !b;
        }
    }

    /// Iterates over the ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = ConstraintId> + '_ {
        (0..self.len)
            .map(ConstraintId)
            .filter(move |id| self.contains(*id))
    }

    /// Returns the lowest id in the mask.
    pub fn first(&self) -> Option<ConstraintId> {
        self.iter().next()
    }
}

impl fmt::Debug for ConstraintMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(|id| id.index())).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_remove() {
        let mut mask = ConstraintMask::new(70);
        assert!(mask.is_empty());
        mask.insert(ConstraintId(3));
        mask.insert(ConstraintId(65));
        assert!(mask.contains(ConstraintId(65)));
        assert_eq!(mask.count(), 2);
        mask.remove(ConstraintId(3));
        assert!(!mask.contains(ConstraintId(3)));
        assert_eq!(mask.iter().collect::<Vec<_>>(), vec![ConstraintId(65)]);
    }

    #[test]
    fn test_set_operations() {
        let a = ConstraintMask::from_ids(5, [ConstraintId(0), ConstraintId(2)]);
        let b = ConstraintMask::from_ids(5, [ConstraintId(2), ConstraintId(4)]);
        assert!(a.intersects(&b));

        let mut diff = a.clone();
        diff.difference_with(&b);
        assert_eq!(diff, ConstraintMask::from_ids(5, [ConstraintId(0)]));
        assert!(diff.is_subset(&a));
        assert!(!a.is_subset(&diff));

        let mut union = a.clone();
        union.union_with(&b);
        assert_eq!(union.count(), 3);

        let mut inter = a;
        inter.intersect_with(&b);
        assert_eq!(inter.first(), Some(ConstraintId(2)));
    }

    #[test]
    fn test_full() {
        let mask = ConstraintMask::full(3);
        assert_eq!(mask.count(), 3);
        assert_eq!(mask.capacity(), 3);
        assert!(ConstraintMask::new(3).is_subset(&mask));
    }
}
