use std::{cmp::Ordering, fmt::Debug, ops::RangeBounds};

use crate::{
    compare::{Comparator, Natural},
    entry::Entry,
    iter::{Cursor, IntoIter, Iter, Range},
    node::{NodeId, Side},
    tree::RbTree,
};

/// An ordered map backed by a red-black tree.
///
/// Keys are unique and ordered by the comparator `C`, which defaults to the
/// key's [`Ord`] implementation.
///
/// ```
/// use redblack::RbMap;
///
/// let mut m = RbMap::new();
/// m.insert(3, "c");
/// m.insert(1, "a");
/// m.insert(2, "b");
///
/// assert_eq!(m.len(), 3);
/// assert_eq!(m.lower_bound(&2), Some((&2, &"b")));
/// assert_eq!(m.upper_bound(&2), Some((&3, &"c")));
/// assert_eq!(m.values().copied().collect::<String>(), "abc");
/// ```
#[derive(Clone)]
pub struct RbMap<K, V, C = Natural> {
    tree: RbTree<K, V, C>,
    len: usize,
}

impl<K, V, C> Default for RbMap<K, V, C>
where
    C: Default,
{
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K, V> RbMap<K, V> {
    pub fn new() -> Self
    where
        K: Ord,
    {
        Self::default()
    }
}

impl<K, V, C> RbMap<K, V, C> {
    /// Construct an empty map ordered by `cmp`.
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

    /// Returns the entry with the smallest key.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.tree.min().and_then(|v| self.tree.get(v))
    }

    /// Returns the entry with the largest key.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.tree.max().and_then(|v| self.tree.get(v))
    }

    /// Returns an iterator over the entries of the map, in key order.
    pub fn iter(&self) -> Iter<'_, K, V, C> {
        self.tree.iter()
    }

    /// Returns an iterator over the keys of the map, in order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.tree.iter().map(|(k, _)| k)
    }

    /// Returns an iterator over the values of the map, in key order.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.tree.iter().map(|(_, v)| v)
    }

    /// Returns a [`Cursor`] at the entry with the smallest key.
    pub fn cursor_front(&self) -> Cursor<'_, K, V, C> {
        self.tree.cursor_front()
    }

    /// Returns a [`Cursor`] at the entry with the largest key.
    pub fn cursor_back(&self) -> Cursor<'_, K, V, C> {
        self.tree.cursor_back()
    }

    /// Returns the underlying tree.
    pub fn as_tree(&self) -> &RbTree<K, V, C> {
        &self.tree
    }

    pub(crate) fn tree_mut(&mut self) -> &mut RbTree<K, V, C> {
        &mut self.tree
    }

    /// Link `key` at the vacant position `at` found by searching for it.
    pub(crate) fn insert_vacant(&mut self, key: K, value: V, at: Option<(usize, Side)>) -> NodeId {
        let slot = self.tree.attach(key, value, at);
        self.len += 1;
        self.tree.id_of(slot)
    }

    pub(crate) fn remove_node(&mut self, id: NodeId) -> Option<(K, V)> {
        let v = self.tree.remove(id)?;
        self.len -= 1;
        Some(v)
    }
}

impl<K, V, C> RbMap<K, V, C>
where
    C: Comparator<K>,
{
    /// Insert `value` at `key`, returning the value it replaced, if any.
    ///
    /// When the key already exists the stored key is kept and only the
    /// value is replaced.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.entry(key) {
            Entry::Occupied(mut entry) => Some(entry.insert(value)),
            Entry::Vacant(entry) => {
                entry.insert(value);
                None
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.tree.find(key).and_then(|v| self.tree.value(v))
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = self.tree.find(key)?;
        self.tree.value_mut(id)
    }

    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.tree.find(key).and_then(|v| self.tree.get(v))
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.find(key).is_some()
    }

    /// Remove `key` from the map, returning the value it held.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Remove `key` from the map, returning the stored key and value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let v = self.tree.remove_key(key)?;
        self.len -= 1;
        Some(v)
    }

    /// Returns the first entry whose key is not less than `key`.
    pub fn lower_bound(&self, key: &K) -> Option<(&K, &V)> {
        self.tree.lower_bound(key).and_then(|v| self.tree.get(v))
    }

    /// Returns the first entry whose key is strictly greater than `key`.
    pub fn upper_bound(&self, key: &K) -> Option<(&K, &V)> {
        self.tree.upper_bound(key).and_then(|v| self.tree.get(v))
    }

    /// Returns a [`Cursor`] at the first entry whose key is not less than
    /// `key`.
    pub fn cursor_lower_bound(&self, key: &K) -> Cursor<'_, K, V, C> {
        self.tree.cursor_lower_bound(key)
    }

    /// Returns a [`Cursor`] at the first entry whose key is strictly greater
    /// than `key`.
    pub fn cursor_upper_bound(&self, key: &K) -> Cursor<'_, K, V, C> {
        self.tree.cursor_upper_bound(key)
    }

    /// Returns an iterator over the entries whose keys fall within `range`,
    /// in key order.
    ///
    /// ```
    /// use redblack::RbMap;
    ///
    /// let m = (1..=9).map(|v| (v, v * 10)).collect::<RbMap<_, _>>();
    ///
    /// let got = m.range(3..6).map(|(_, v)| *v).collect::<Vec<_>>();
    /// assert_eq!(got, [30, 40, 50]);
    /// ```
    pub fn range<R>(&self, range: R) -> Range<'_, K, V, C>
    where
        R: RangeBounds<K>,
    {
        self.tree.range(range)
    }

    /// Returns an iterator over the entry whose key is equal to `key`, if
    /// any.
    pub fn equal_range(&self, key: &K) -> Range<'_, K, V, C> {
        self.tree.equal_range(key)
    }

    /// Remove every entry whose key falls within `range`, returning the
    /// number of entries removed.
    pub fn remove_range<R>(&mut self, range: R) -> usize
    where
        R: RangeBounds<K>,
    {
        let n = self.tree.remove_range(range);
        self.len -= n;
        n
    }

    /// Gets the given key's corresponding entry in the map for in-place
    /// manipulation.
    ///
    /// ```
    /// use redblack::RbMap;
    ///
    /// let mut counts = RbMap::new();
    /// for word in ["a", "b", "a"] {
    ///     *counts.entry(word).or_insert(0) += 1;
    /// }
    ///
    /// assert_eq!(counts.get(&"a"), Some(&2));
    /// assert_eq!(counts.get(&"b"), Some(&1));
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V, C> {
        Entry::new(key, self)
    }
}

impl<K, V, C> Debug for RbMap<K, V, C>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C> PartialEq for RbMap<K, V, C>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K, V, C> Eq for RbMap<K, V, C>
where
    K: Eq,
    V: Eq,
{
}

/// Maps are ordered lexicographically by their entries, in key order.
impl<K, V, C> PartialOrd for RbMap<K, V, C>
where
    K: PartialOrd,
    V: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K, V, C> Ord for RbMap<K, V, C>
where
    K: Ord,
    V: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K, V, C> Extend<(K, V)> for RbMap<K, V, C>
where
    C: Comparator<K>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, C> FromIterator<(K, V)> for RbMap<K, V, C>
where
    C: Comparator<K> + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut this = Self::default();
        this.extend(iter);
        this
    }
}

impl<K, V, C> IntoIterator for RbMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a RbMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
