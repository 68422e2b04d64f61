use std::iter::FusedIterator;

use crate::tree::RbTree;

/// A double-ended walk over the nodes between two positions of a tree,
/// stepping with the successor/predecessor links.
#[derive(Debug)]
struct Walk<'a, K, V, C> {
    tree: &'a RbTree<K, V, C>,

    /// The next node to yield from the front and back respectively.
    ///
    /// Both are [`None`] once the two ends have met.
    front: Option<usize>,
    back: Option<usize>,
}

impl<K, V, C> Clone for Walk<'_, K, V, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
        }
    }
}

impl<'a, K, V, C> Walk<'a, K, V, C> {
    /// Walk the inclusive span `front..=back`, which must either both be
    /// [`None`] or name nodes in ascending order.
    fn new(tree: &'a RbTree<K, V, C>, front: Option<usize>, back: Option<usize>) -> Self {
        debug_assert_eq!(front.is_none(), back.is_none());
        Self { tree, front, back }
    }

    /// Take `v` out of the walk, exhausting it if it was the last node
    /// between the two ends.
    fn exhausted_at(&mut self, v: usize) -> bool {
        if self.front == self.back {
            debug_assert_eq!(self.front, Some(v));
            self.front = None;
            self.back = None;
            return true;
        }
        false
    }

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        let v = self.front?;

        if !self.exhausted_at(v) {
            self.front = self.tree.successor_slot(v);
        }

        Some(self.tree.pair(v))
    }

    fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        let v = self.back?;

        if !self.exhausted_at(v) {
            self.back = self.tree.predecessor_slot(v);
        }

        Some(self.tree.pair(v))
    }
}

/// An in-order iterator over the key/value pairs of an [`RbTree`].
///
/// Steps with the tree's successor/predecessor links, so it needs no stack
/// and can be driven from both ends.
#[derive(Debug)]
pub struct Iter<'a, K, V, C> {
    walk: Walk<'a, K, V, C>,

    /// The number of pairs not yet yielded from either end.
    remaining: usize,
}

impl<'a, K, V, C> Iter<'a, K, V, C> {
    pub(crate) fn new(tree: &'a RbTree<K, V, C>) -> Self {
        Self {
            walk: Walk::new(
                tree,
                tree.root.map(|v| tree.min_from(v)),
                tree.root.map(|v| tree.max_from(v)),
            ),
            // Every node in the arena is linked into the tree.
            remaining: tree.nodes.len(),
        }
    }
}

impl<K, V, C> Clone for Iter<'_, K, V, C> {
    fn clone(&self) -> Self {
        Self {
            walk: self.walk.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V, C> Iterator for Iter<'a, K, V, C> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let v = self.walk.next()?;
        self.remaining -= 1;
        Some(v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, C> DoubleEndedIterator for Iter<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let v = self.walk.next_back()?;
        self.remaining -= 1;
        Some(v)
    }
}

impl<K, V, C> ExactSizeIterator for Iter<'_, K, V, C> {}

impl<K, V, C> FusedIterator for Iter<'_, K, V, C> {}

/// An in-order iterator over the key/value pairs of an [`RbTree`] whose keys
/// fall within a range.
///
/// Created by [`RbTree::range()`].
#[derive(Debug)]
pub struct Range<'a, K, V, C> {
    walk: Walk<'a, K, V, C>,
}

impl<'a, K, V, C> Range<'a, K, V, C> {
    pub(crate) fn new(tree: &'a RbTree<K, V, C>, span: Option<(usize, usize)>) -> Self {
        Self {
            walk: Walk::new(tree, span.map(|v| v.0), span.map(|v| v.1)),
        }
    }
}

impl<K, V, C> Clone for Range<'_, K, V, C> {
    fn clone(&self) -> Self {
        Self {
            walk: self.walk.clone(),
        }
    }
}

impl<'a, K, V, C> Iterator for Range<'a, K, V, C> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.walk.next()
    }
}

impl<K, V, C> DoubleEndedIterator for Range<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.walk.next_back()
    }
}

impl<K, V, C> FusedIterator for Range<'_, K, V, C> {}
