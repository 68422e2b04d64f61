use std::{
    cmp::Ordering,
    ops::{Bound, RangeBounds},
};

use crate::{
    compare::Comparator,
    iter::{Cursor, Range},
    node::NodeId,
    tree::RbTree,
};

impl<K, V, C> RbTree<K, V, C> {
    /// Returns the node holding the smallest key, or [`None`] if the tree is
    /// empty.
    pub fn min(&self) -> Option<NodeId> {
        self.root.map(|v| self.id_of(self.min_from(v)))
    }

    /// Returns the node holding the largest key, or [`None`] if the tree is
    /// empty.
    pub fn max(&self) -> Option<NodeId> {
        self.root.map(|v| self.id_of(self.max_from(v)))
    }

    /// Returns the node holding the smallest key in the subtree rooted at
    /// `id`.
    pub fn subtree_min(&self, id: NodeId) -> Option<NodeId> {
        self.resolve(id).map(|v| self.id_of(self.min_from(v)))
    }

    /// Returns the node holding the largest key in the subtree rooted at
    /// `id`.
    pub fn subtree_max(&self, id: NodeId) -> Option<NodeId> {
        self.resolve(id).map(|v| self.id_of(self.max_from(v)))
    }

    /// Returns the in-order successor of `id`, or [`None`] if `id` holds the
    /// largest key (or is stale).
    pub fn successor(&self, id: NodeId) -> Option<NodeId> {
        let slot = self.resolve(id)?;
        self.successor_slot(slot).map(|v| self.id_of(v))
    }

    /// Returns the in-order predecessor of `id`, or [`None`] if `id` holds the
    /// smallest key (or is stale).
    pub fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        let slot = self.resolve(id)?;
        self.predecessor_slot(slot).map(|v| self.id_of(v))
    }

    /// Follow the left links from `slot` to the minimum of its subtree.
    pub(crate) fn min_from(&self, mut slot: usize) -> usize {
        while let Some(v) = self.nodes[slot].left {
            slot = v;
        }
        slot
    }

    /// Follow the right links from `slot` to the maximum of its subtree.
    pub(crate) fn max_from(&self, mut slot: usize) -> usize {
        while let Some(v) = self.nodes[slot].right {
            slot = v;
        }
        slot
    }

    pub(crate) fn successor_slot(&self, slot: usize) -> Option<usize> {
        // The successor is the minimum of the right subtree, if any.
        if let Some(right) = self.nodes[slot].right {
            return Some(self.min_from(right));
        }

        // Otherwise it is the first ancestor reached from a left child.
        //
        // ```text
        //          8  <- successor of 7
        //         /
        //        4
        //         \
        //          6
        //           \
        //            7
        // ```
        //
        // Running out of ancestors means `slot` is the maximum.
        let mut child = slot;
        let mut parent = self.nodes[slot].parent;
        while let Some(p) = parent {
            if self.nodes[p].left == Some(child) {
                break;
            }
            child = p;
            parent = self.nodes[p].parent;
        }
        parent
    }

    pub(crate) fn predecessor_slot(&self, slot: usize) -> Option<usize> {
        if let Some(left) = self.nodes[slot].left {
            return Some(self.max_from(left));
        }

        let mut child = slot;
        let mut parent = self.nodes[slot].parent;
        while let Some(p) = parent {
            if self.nodes[p].right == Some(child) {
                break;
            }
            child = p;
            parent = self.nodes[p].parent;
        }
        parent
    }
}

impl<K, V, C> RbTree<K, V, C>
where
    C: Comparator<K>,
{
    /// Returns the first node whose key is not less than `key`.
    pub fn lower_bound(&self, key: &K) -> Option<NodeId> {
        self.lower_bound_slot(key).map(|v| self.id_of(v))
    }

    /// Returns the first node whose key is strictly greater than `key`.
    pub fn upper_bound(&self, key: &K) -> Option<NodeId> {
        self.upper_bound_slot(key).map(|v| self.id_of(v))
    }

    /// Returns a [`Cursor`] at the first node whose key is not less than
    /// `key`, or past-the-end if there is none.
    pub fn cursor_lower_bound(&self, key: &K) -> Cursor<'_, K, V, C> {
        Cursor::new(self, self.lower_bound_slot(key))
    }

    /// Returns a [`Cursor`] at the first node whose key is strictly greater
    /// than `key`, or past-the-end if there is none.
    pub fn cursor_upper_bound(&self, key: &K) -> Cursor<'_, K, V, C> {
        Cursor::new(self, self.upper_bound_slot(key))
    }

    /// Returns an in-order iterator over the nodes whose keys fall within
    /// `range`.
    ///
    /// A range whose start lies after its end is empty.
    ///
    /// ```
    /// use redblack::RbTree;
    ///
    /// let mut t = RbTree::new();
    /// for v in [1, 3, 5, 7, 9] {
    ///     t.insert(v, ());
    /// }
    ///
    /// let keys = t.range(2..=7).map(|(k, _)| *k).collect::<Vec<_>>();
    /// assert_eq!(keys, [3, 5, 7]);
    /// ```
    pub fn range<R>(&self, range: R) -> Range<'_, K, V, C>
    where
        R: RangeBounds<K>,
    {
        Range::new(self, self.range_span(&range))
    }

    /// Returns an iterator over the nodes whose keys are equal to `key`,
    /// which yields at most one pair.
    pub fn equal_range(&self, key: &K) -> Range<'_, K, V, C> {
        let span = self.find_slot(key).map(|v| (v, v));
        Range::new(self, span)
    }

    /// Returns the first and last slots within `range`, or [`None`] if no key
    /// falls within it.
    pub(crate) fn range_span<R>(&self, range: &R) -> Option<(usize, usize)>
    where
        R: RangeBounds<K>,
    {
        let front = match range.start_bound() {
            Bound::Included(k) => self.lower_bound_slot(k),
            Bound::Excluded(k) => self.upper_bound_slot(k),
            Bound::Unbounded => self.root.map(|v| self.min_from(v)),
        }?;

        // The last node in range is the one preceding the first node past
        // its end, or the maximum if no node lies past the end.
        let past_end = match range.end_bound() {
            Bound::Included(k) => self.upper_bound_slot(k),
            Bound::Excluded(k) => self.lower_bound_slot(k),
            Bound::Unbounded => None,
        };
        let back = match past_end {
            Some(v) => self.predecessor_slot(v)?,
            None => self.max_from(self.root?),
        };

        if self.cmp.compare(&self.nodes[front].key, &self.nodes[back].key) == Ordering::Greater {
            return None;
        }

        Some((front, back))
    }

    pub(crate) fn lower_bound_slot(&self, key: &K) -> Option<usize> {
        self.bound_slot(|node_key| self.cmp.compare(node_key, key) != Ordering::Less)
    }

    pub(crate) fn upper_bound_slot(&self, key: &K) -> Option<usize> {
        self.bound_slot(|node_key| self.cmp.compare(node_key, key) == Ordering::Greater)
    }

    /// Returns the first node in key order satisfying `pred`, where `pred`
    /// is false for a prefix of the keys and true for the remainder.
    fn bound_slot<F>(&self, pred: F) -> Option<usize>
    where
        F: Fn(&K) -> bool,
    {
        // Descend the tree, remembering the last node that satisfied the
        // predicate: every node that does is a candidate, and only smaller
        // candidates can exist in its left subtree.
        let mut best = None;
        let mut ptr = self.root;
        while let Some(v) = ptr {
            let n = &self.nodes[v];
            if pred(&n.key) {
                best = Some(v);
                ptr = n.left;
            } else {
                ptr = n.right;
            }
        }
        best
    }
}
