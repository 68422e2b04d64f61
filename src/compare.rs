use std::cmp::Ordering;

/// A total order over keys of type `K`, supplied when a tree is constructed.
///
/// The order must be consistent: irreflexive, transitive and stable across
/// calls. An inconsistent comparator does not cause memory unsafety, but the
/// tree may then fail to find keys it contains.
///
/// Any `Fn(&K, &K) -> Ordering` closure is a [`Comparator`]:
///
/// ```
/// use redblack::RbMap;
///
/// let mut m = RbMap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
/// m.insert(1, "one");
/// m.insert(2, "two");
///
/// assert_eq!(m.keys().copied().collect::<Vec<_>>(), [2, 1]);
/// ```
pub trait Comparator<K: ?Sized> {
    /// Compare `a` against `b`.
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// Orders keys by their [`Ord`] implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<K> Comparator<K> for Natural
where
    K: Ord + ?Sized,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

impl<K, F> Comparator<K> for F
where
    K: ?Sized,
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}
