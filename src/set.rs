use std::{cmp::Ordering, fmt::Debug, iter::FusedIterator, ops::RangeBounds};

use crate::{
    compare::{Comparator, Natural},
    iter::{Cursor, IntoIter, Iter, Range},
    tree::RbTree,
};

/// An ordered set backed by a red-black tree.
///
/// ```
/// use redblack::RbSet;
///
/// let mut s = [5, 1, 3].into_iter().collect::<RbSet<_>>();
///
/// assert!(!s.insert(3));
/// assert!(s.insert(7));
/// assert_eq!(s.lower_bound(&4), Some(&5));
/// assert_eq!(s.iter().rev().copied().collect::<Vec<_>>(), [7, 5, 3, 1]);
/// ```
#[derive(Clone)]
pub struct RbSet<T, C = Natural> {
    tree: RbTree<T, (), C>,
    len: usize,
}

impl<T, C> Default for RbSet<T, C>
where
    C: Default,
{
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T> RbSet<T> {
    pub fn new() -> Self
    where
        T: Ord,
    {
        Self::default()
    }
}

impl<T, C> RbSet<T, C> {
    /// Construct an empty set ordered by `cmp`.
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            tree: RbTree::with_comparator(cmp),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.tree.clear();
        self.len = 0;
    }

    /// Returns the smallest value in the set.
    pub fn first(&self) -> Option<&T> {
        self.tree.min().and_then(|v| self.tree.key(v))
    }

    /// Returns the largest value in the set.
    pub fn last(&self) -> Option<&T> {
        self.tree.max().and_then(|v| self.tree.key(v))
    }

    /// Returns an iterator over the values of the set, in order.
    pub fn iter(&self) -> SetIter<'_, T, C> {
        SetIter(self.tree.iter())
    }

    /// Returns a [`Cursor`] at the smallest value.
    pub fn cursor_front(&self) -> Cursor<'_, T, (), C> {
        self.tree.cursor_front()
    }

    /// Returns a [`Cursor`] at the largest value.
    pub fn cursor_back(&self) -> Cursor<'_, T, (), C> {
        self.tree.cursor_back()
    }

    /// Returns the underlying tree.
    pub fn as_tree(&self) -> &RbTree<T, (), C> {
        &self.tree
    }
}

impl<T, C> RbSet<T, C>
where
    C: Comparator<T>,
{
    /// Add `value` to the set, returning false if an equal value was already
    /// present (in which case the set is unchanged).
    pub fn insert(&mut self, value: T) -> bool {
        let (_, inserted) = self.tree.insert(value, ());
        self.len += usize::from(inserted);
        inserted
    }

    pub fn contains(&self, value: &T) -> bool {
        self.tree.find(value).is_some()
    }

    /// Returns the stored value equal to `value`, if any.
    pub fn get(&self, value: &T) -> Option<&T> {
        self.tree.find(value).and_then(|v| self.tree.key(v))
    }

    /// Remove `value` from the set, returning true if it was present.
    pub fn remove(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Remove and return the stored value equal to `value`, if any.
    pub fn take(&mut self, value: &T) -> Option<T> {
        let (v, ()) = self.tree.remove_key(value)?;
        self.len -= 1;
        Some(v)
    }

    /// Returns the first value not less than `value`.
    pub fn lower_bound(&self, value: &T) -> Option<&T> {
        self.tree.lower_bound(value).and_then(|v| self.tree.key(v))
    }

    /// Returns the first value strictly greater than `value`.
    pub fn upper_bound(&self, value: &T) -> Option<&T> {
        self.tree.upper_bound(value).and_then(|v| self.tree.key(v))
    }

    /// Returns a [`Cursor`] at the first value not less than `value`.
    pub fn cursor_lower_bound(&self, value: &T) -> Cursor<'_, T, (), C> {
        self.tree.cursor_lower_bound(value)
    }

    /// Returns a [`Cursor`] at the first value strictly greater than `value`.
    pub fn cursor_upper_bound(&self, value: &T) -> Cursor<'_, T, (), C> {
        self.tree.cursor_upper_bound(value)
    }

    /// Returns an iterator over the values within `range`, in order.
    ///
    /// ```
    /// use redblack::RbSet;
    ///
    /// let s = [8, 2, 6, 4].into_iter().collect::<RbSet<_>>();
    ///
    /// assert_eq!(s.range(3..).copied().collect::<Vec<_>>(), [4, 6, 8]);
    /// assert_eq!(s.range(..=4).next_back(), Some(&4));
    /// ```
    pub fn range<R>(&self, range: R) -> SetRange<'_, T, C>
    where
        R: RangeBounds<T>,
    {
        SetRange(self.tree.range(range))
    }

    /// Returns an iterator over the stored value equal to `value`, if any.
    pub fn equal_range(&self, value: &T) -> SetRange<'_, T, C> {
        SetRange(self.tree.equal_range(value))
    }

    /// Remove every value within `range`, returning the number removed.
    pub fn remove_range<R>(&mut self, range: R) -> usize
    where
        R: RangeBounds<T>,
    {
        let n = self.tree.remove_range(range);
        self.len -= n;
        n
    }
}

/// An in-order iterator over the values of an [`RbSet`].
#[derive(Debug)]
pub struct SetIter<'a, T, C>(Iter<'a, T, (), C>);

impl<T, C> Clone for SetIter<'_, T, C> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<'a, T, C> Iterator for SetIter<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<T, C> DoubleEndedIterator for SetIter<'_, T, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|(k, _)| k)
    }
}

impl<T, C> ExactSizeIterator for SetIter<'_, T, C> {}

impl<T, C> FusedIterator for SetIter<'_, T, C> {}

/// An in-order iterator over the values of an [`RbSet`] within a range.
///
/// Created by [`RbSet::range()`] and [`RbSet::equal_range()`].
#[derive(Debug)]
pub struct SetRange<'a, T, C>(Range<'a, T, (), C>);

impl<T, C> Clone for SetRange<'_, T, C> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<'a, T, C> Iterator for SetRange<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, _)| k)
    }
}

impl<T, C> DoubleEndedIterator for SetRange<'_, T, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|(k, _)| k)
    }
}

impl<T, C> FusedIterator for SetRange<'_, T, C> {}

/// An owned iterator over the values of an [`RbSet`].
#[derive(Debug)]
pub struct SetIntoIter<T>(IntoIter<T, ()>);

impl<T> Iterator for SetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, ())| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<T> ExactSizeIterator for SetIntoIter<T> {}

impl<T> FusedIterator for SetIntoIter<T> {}

impl<T, C> Debug for RbSet<T, C>
where
    T: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C> PartialEq for RbSet<T, C>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T, C> Eq for RbSet<T, C> where T: Eq {}

/// Sets are ordered lexicographically by their values, in order.
impl<T, C> PartialOrd for RbSet<T, C>
where
    T: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T, C> Ord for RbSet<T, C>
where
    T: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T, C> Extend<T> for RbSet<T, C>
where
    C: Comparator<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.insert(v);
        }
    }
}

impl<T, C> FromIterator<T> for RbSet<T, C>
where
    C: Comparator<T> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut this = Self::default();
        this.extend(iter);
        this
    }
}

impl<T, C> IntoIterator for RbSet<T, C> {
    type Item = T;
    type IntoIter = SetIntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        SetIntoIter(self.tree.into_iter())
    }
}

impl<'a, T, C> IntoIterator for &'a RbSet<T, C> {
    type Item = &'a T;
    type IntoIter = SetIter<'a, T, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
