use std::{cmp::Ordering, fmt::Debug};

use log::debug;
use slab::Slab;

use crate::{
    compare::{Comparator, Natural},
    iter::{Cursor, IntoIter, Iter},
    node::{Color, Node, NodeId, Side},
};

/// A red-black tree mapping unique keys of type `K` to values of type `V`,
/// ordered by the comparator `C`.
///
/// Nodes live in an arena and link to each other by slot index, so a node's
/// parent link is a plain index rather than an owning pointer. Callers refer
/// to nodes through stamped [`NodeId`] handles.
///
/// The tree does not count its entries; [`RbMap`] and [`RbSet`] layer a
/// logical size on top.
///
/// [`RbMap`]: crate::RbMap
/// [`RbSet`]: crate::RbSet
#[derive(Clone)]
pub struct RbTree<K, V, C = Natural> {
    pub(crate) nodes: Slab<Node<K, V>>,
    pub(crate) root: Option<usize>,
    pub(crate) cmp: C,

    /// The stamp given to the next allocated node.
    ///
    /// Never reset, including by [`RbTree::clear()`], so a handle can never
    /// resolve to a node allocated after its own was freed.
    next_stamp: u64,
}

impl<K, V, C> Default for RbTree<K, V, C>
where
    C: Default,
{
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K, V> RbTree<K, V> {
    /// Construct an empty tree ordered by `K`'s [`Ord`] implementation.
    pub fn new() -> Self
    where
        K: Ord,
    {
        Self::default()
    }

    /// Construct an empty tree with room for `capacity` nodes before
    /// reallocating.
    pub fn with_capacity(capacity: usize) -> Self
    where
        K: Ord,
    {
        Self::with_capacity_and_comparator(capacity, Natural)
    }
}

impl<K, V, C> RbTree<K, V, C> {
    /// Construct an empty tree ordered by `cmp`.
    pub fn with_comparator(cmp: C) -> Self {
        Self::with_capacity_and_comparator(0, cmp)
    }

    /// Construct an empty tree ordered by `cmp`, with room for `capacity`
    /// nodes before reallocating.
    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> Self {
        Self {
            nodes: Slab::with_capacity(capacity),
            root: None,
            cmp,
            next_stamp: 0,
        }
    }

    /// Returns true if the tree holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the comparator ordering this tree.
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Returns true while `id` refers to a node in this tree.
    pub fn contains(&self, id: NodeId) -> bool {
        self.resolve(id).is_some()
    }

    pub fn key(&self, id: NodeId) -> Option<&K> {
        self.resolve(id).map(|v| &self.nodes[v].key)
    }

    pub fn value(&self, id: NodeId) -> Option<&V> {
        self.resolve(id).map(|v| &self.nodes[v].value)
    }

    /// Returns a mutable reference to the value of `id`.
    ///
    /// Keys are immutable once inserted; only the value can be changed.
    pub fn value_mut(&mut self, id: NodeId) -> Option<&mut V> {
        let slot = self.resolve(id)?;
        Some(&mut self.nodes[slot].value)
    }

    /// Returns the key and value of `id`.
    pub fn get(&self, id: NodeId) -> Option<(&K, &V)> {
        self.resolve(id).map(|v| self.pair(v))
    }

    pub fn color(&self, id: NodeId) -> Option<Color> {
        self.resolve(id).map(|v| self.nodes[v].color)
    }

    /// Returns the root node, if any.
    pub fn root(&self) -> Option<NodeId> {
        self.root.map(|v| self.id_of(v))
    }

    /// Remove every node from the tree.
    ///
    /// All outstanding [`NodeId`] handles become invalid.
    pub fn clear(&mut self) {
        debug!("clearing tree of {} nodes", self.nodes.len());
        self.nodes.clear();
        self.root = None;
    }

    /// Returns an in-order iterator over the key/value pairs of the tree.
    pub fn iter(&self) -> Iter<'_, K, V, C> {
        Iter::new(self)
    }

    /// Returns a [`Cursor`] positioned at the minimum node, or past-the-end
    /// if the tree is empty.
    pub fn cursor_front(&self) -> Cursor<'_, K, V, C> {
        Cursor::new(self, self.root.map(|v| self.min_from(v)))
    }

    /// Returns a [`Cursor`] positioned at the maximum node, or past-the-end
    /// if the tree is empty.
    pub fn cursor_back(&self) -> Cursor<'_, K, V, C> {
        Cursor::new(self, self.root.map(|v| self.max_from(v)))
    }

    /// Returns a [`Cursor`] positioned at `id`, or [`None`] if `id` is stale.
    pub fn cursor_at(&self, id: NodeId) -> Option<Cursor<'_, K, V, C>> {
        self.resolve(id).map(|v| Cursor::new(self, Some(v)))
    }

    /// Map a handle to its arena slot, rejecting handles to removed nodes.
    pub(crate) fn resolve(&self, id: NodeId) -> Option<usize> {
        self.nodes
            .get(id.slot)
            .filter(|v| v.stamp == id.stamp)
            .map(|_| id.slot)
    }

    pub(crate) fn id_of(&self, slot: usize) -> NodeId {
        NodeId {
            slot,
            stamp: self.nodes[slot].stamp,
        }
    }

    pub(crate) fn pair(&self, slot: usize) -> (&K, &V) {
        let n = &self.nodes[slot];
        (&n.key, &n.value)
    }

    /// Allocate an unlinked red node holding `key` and `value`.
    pub(crate) fn alloc(&mut self, key: K, value: V) -> usize {
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        self.nodes.insert(Node::new(key, value, stamp))
    }

    /// Returns true if `slot` is a red node. Absent children are black.
    pub(crate) fn is_red(&self, slot: Option<usize>) -> bool {
        slot.map(|v| self.nodes[v].is_red()).unwrap_or_default()
    }

    pub(crate) fn set_color(&mut self, slot: usize, color: Color) {
        self.nodes[slot].color = color;
    }

    /// Returns which child of `parent` the node `child` is.
    pub(crate) fn side_of(&self, child: usize, parent: usize) -> Side {
        if self.nodes[parent].left == Some(child) {
            Side::Left
        } else {
            debug_assert_eq!(self.nodes[parent].right, Some(child));
            Side::Right
        }
    }

    /// Link `new` in place of `old` under `parent`, or as the root if `old`
    /// has no parent.
    ///
    /// The parent link of `new` is not modified.
    fn replace_child(&mut self, parent: Option<usize>, old: usize, new: Option<usize>) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let side = self.side_of(old, p);
                *self.nodes[p].child_mut(side) = new;
            }
        }
    }

    /// Replace the subtree rooted at `old` with the subtree rooted at `new`
    /// (which may be empty).
    ///
    /// The children of `old` are left untouched.
    pub(crate) fn transplant(&mut self, old: usize, new: Option<usize>) {
        let parent = self.nodes[old].parent;
        self.replace_child(parent, old, new);
        if let Some(new) = new {
            self.nodes[new].parent = parent;
        }
    }

    /// Rotate the subtree rooted at `x` towards `side` around the pivot
    /// point `P`, the child of `x` on the opposite side.
    ///
    /// Rotating left:
    ///
    /// ```text
    ///
    ///      x
    ///     / \                               P
    ///    1   P         Rotate Left        /   \
    ///       / \      --------------->    x     y
    ///      2   y                        / \   / \
    ///         / \                      1   2 3   4
    ///        3   4
    /// ```
    ///
    /// Rotating right is the mirror image. The parent links of `x`, `P` and
    /// the re-homed inner subtree (`2` above) are updated, as is the root
    /// slot when `x` was the root.
    ///
    /// # Panics
    ///
    /// Panics if `x` has no child opposite `side` (cannot be rotated).
    pub(crate) fn rotate(&mut self, x: usize, side: Side) {
        let p = self.nodes[x]
            .child(side.opposite())
            .expect("rotation requires a pivot child");

        // The inner subtree of the pivot moves across to x.
        let inner = self.nodes[p].child(side);
        *self.nodes[x].child_mut(side.opposite()) = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(x);
        }

        // The pivot takes the place of x under x's parent.
        let parent = self.nodes[x].parent;
        self.nodes[p].parent = parent;
        self.replace_child(parent, x, Some(p));

        // And x becomes the child of the pivot.
        *self.nodes[p].child_mut(side) = Some(x);
        self.nodes[x].parent = Some(p);
    }
}

impl<K, V, C> RbTree<K, V, C>
where
    C: Comparator<K>,
{
    /// Returns the node holding a key equal to `key`, if any.
    pub fn find(&self, key: &K) -> Option<NodeId> {
        self.find_slot(key).map(|v| self.id_of(v))
    }

    pub(crate) fn find_slot(&self, key: &K) -> Option<usize> {
        let mut ptr = self.root;
        while let Some(v) = ptr {
            let n = &self.nodes[v];
            ptr = match self.cmp.compare(key, &n.key) {
                Ordering::Less => n.left,
                Ordering::Equal => return Some(v),
                Ordering::Greater => n.right,
            };
        }
        None
    }
}

impl<K, V, C> Debug for RbTree<K, V, C>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C> IntoIterator for RbTree<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.nodes, self.root)
    }
}

impl<'a, K, V, C> IntoIterator for &'a RbTree<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
