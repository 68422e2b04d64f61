use std::cmp::Ordering;

use log::trace;

use crate::{
    compare::Comparator,
    node::{Color, NodeId, Side},
    tree::RbTree,
};

/// The outcome of descending the tree for a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Search {
    /// The node in this slot holds an equal key.
    Found(usize),

    /// No equal key exists. A new node would be linked as the given child
    /// of the given parent, or as the root when [`None`].
    Vacant(Option<(usize, Side)>),
}

impl<K, V, C> RbTree<K, V, C>
where
    C: Comparator<K>,
{
    /// Insert `key` and `value` into the tree.
    ///
    /// Returns the handle of the node holding `key` and true if it was newly
    /// inserted. If an equal key already exists, the tree is left unchanged,
    /// `key` and `value` are dropped, and the existing node is returned with
    /// false.
    pub fn insert(&mut self, key: K, value: V) -> (NodeId, bool) {
        match self.search(&key) {
            Search::Found(v) => (self.id_of(v), false),
            Search::Vacant(at) => {
                let slot = self.attach(key, value, at);
                (self.id_of(slot), true)
            }
        }
    }

    /// Descend to the node holding `key`, or to the terminal node the key
    /// would hang off.
    pub(crate) fn search(&self, key: &K) -> Search {
        let mut parent = None;
        let mut ptr = self.root;
        while let Some(v) = ptr {
            let n = &self.nodes[v];
            let side = match self.cmp.compare(key, &n.key) {
                Ordering::Less => Side::Left,
                Ordering::Equal => return Search::Found(v),
                Ordering::Greater => Side::Right,
            };
            parent = Some((v, side));
            ptr = n.child(side);
        }
        Search::Vacant(parent)
    }
}

impl<K, V, C> RbTree<K, V, C> {
    /// Link a new node at the vacant position `at` returned by
    /// [`RbTree::search()`], and rebalance.
    ///
    /// `at` must not be stale: the tree must not have been modified since
    /// the search.
    pub(crate) fn attach(&mut self, key: K, value: V, at: Option<(usize, Side)>) -> usize {
        let slot = self.alloc(key, value);

        match at {
            None => {
                // The first node is the root, and the root is always black.
                debug_assert!(self.root.is_none());
                self.set_color(slot, Color::Black);
                self.root = Some(slot);
            }
            Some((p, side)) => {
                debug_assert!(self.nodes[p].child(side).is_none());

                *self.nodes[p].child_mut(side) = Some(slot);
                self.nodes[slot].parent = Some(p);

                // The new node is red, which preserves the black-height of
                // every path but may place it under a red parent.
                self.insert_rebalance(slot);
            }
        }

        debug_assert!(!self.is_red(self.root));
        slot
    }

    /// Restore the red-black properties after linking the red node `n`.
    ///
    /// The only property that can be violated is a red node with a red
    /// child, at `n` and its parent. Each iteration either resolves it or
    /// moves it two levels towards the root.
    fn insert_rebalance(&mut self, mut n: usize) {
        while let Some(parent) = self.nodes[n].parent {
            if !self.nodes[parent].is_red() {
                break;
            }

            // A red parent is never the root, so the grandparent exists in a
            // well-formed tree. If it does not, the parent is the root and
            // recolouring it below fixes the violation.
            let Some(grand) = self.nodes[parent].parent else {
                break;
            };

            let parent_side = self.side_of(parent, grand);
            let uncle = self.nodes[grand].child(parent_side.opposite());

            if self.is_red(uncle) {
                // Red uncle: push the redness up to the grandparent, which
                // may now conflict with its own parent.
                //
                // ```text
                //        g(B)               g(R)
                //       /    \             /    \
                //     p(R)   u(R)   ->   p(B)   u(B)
                //     /                  /
                //   n(R)               n(R)
                // ```
                self.set_color(parent, Color::Black);
                if let Some(uncle) = uncle {
                    self.set_color(uncle, Color::Black);
                }
                self.set_color(grand, Color::Red);
                n = grand;
                continue;
            }

            if self.side_of(n, parent) != parent_side {
                // Black uncle, n is the inner grandchild: rotate it into the
                // outer position, swapping the roles of n and its parent.
                //
                // ```text
                //      g                g
                //     /                /
                //    p       ->       n
                //     \              /
                //      n            p
                // ```
                self.rotate(parent, parent_side);
                n = parent;
                continue;
            }

            // Black uncle, n is the outer grandchild: rotate the grandparent
            // away, leaving the black parent at the top of the subtree.
            //
            // ```text
            //        g(B)            p(B)
            //       /               /    \
            //     p(R)     ->     n(R)   g(R)
            //     /
            //   n(R)
            // ```
            self.set_color(parent, Color::Black);
            self.set_color(grand, Color::Red);
            self.rotate(grand, parent_side.opposite());
            break;
        }

        if let Some(root) = self.root {
            if self.nodes[root].is_red() {
                trace!("insert rebalance recoloured the root");
            }
            self.set_color(root, Color::Black);
        }
    }
}
