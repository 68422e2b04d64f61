use std::ops::RangeBounds;

use log::{debug, trace};

use crate::{
    compare::Comparator,
    node::{Color, NodeId, Side},
    tree::RbTree,
};

/// The position holding a black-height deficit during deletion rebalancing.
///
/// When the node spliced out of the tree has no child to take its place, the
/// deficit sits on an empty child link. Rather than linking a placeholder
/// node there, the position is described by its parent and side: an empty
/// link is an implicit black leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deficient {
    /// A real node carries the deficit.
    Node(usize),

    /// The empty `side` child link of `parent` carries the deficit.
    Vacant { parent: usize, side: Side },
}

impl<K, V, C> RbTree<K, V, C> {
    /// Remove the node identified by `id`.
    ///
    /// Returns false if `id` does not refer to a node in this tree (it was
    /// already removed, or the tree was cleared).
    pub fn delete(&mut self, id: NodeId) -> bool {
        self.remove(id).is_some()
    }

    /// Remove the node identified by `id`, returning the key and value it
    /// held.
    ///
    /// Returns [`None`] if `id` does not refer to a node in this tree.
    pub fn remove(&mut self, id: NodeId) -> Option<(K, V)> {
        let Some(slot) = self.resolve(id) else {
            trace!("ignoring removal of stale node handle {id:?}");
            return None;
        };

        Some(self.remove_slot(slot))
    }

    /// Unlink the node in `slot`, rebalance, and free it.
    pub(crate) fn remove_slot(&mut self, z: usize) -> (K, V) {
        // The target node may have 0, 1 or 2 children:
        //
        //                          +----------+
        //                          |  parent  |
        //                          +----------+
        //                                |
        //                                v
        //                          +----------+
        //                     +----|    z     |----+
        //                     |    +----------+    |
        //                     |                    |
        //                     v                    v
        //               +-----------+       +------------+
        //               |  z.left   |       |  z.right   |
        //               +-----------+       +------------+
        //
        // With at most one child, that child (or nothing) takes the place of
        // z, and z's own position is the one that structurally disappears.
        //
        // With two children, the in-order successor y (the minimum of the
        // right subtree, which has no left child) moves into z's place and
        // takes z's color. It is then y's old position that disappears, so
        // y's original color decides whether the tree lost a black node.
        let (left, right) = (self.nodes[z].left, self.nodes[z].right);

        let (removed_color, deficient) = match (left, right) {
            (None, child) | (child, None) => {
                let deficient = self.deficient_position(child, z);
                self.transplant(z, child);
                (self.nodes[z].color, deficient)
            }
            (Some(left), Some(right)) => {
                let y = self.min_from(right);
                let removed_color = self.nodes[y].color;
                let y_right = self.nodes[y].right;

                let deficient = if y == right {
                    // y stays the parent of its own right subtree.
                    Some(match y_right {
                        Some(v) => Deficient::Node(v),
                        None => Deficient::Vacant {
                            parent: y,
                            side: Side::Right,
                        },
                    })
                } else {
                    // Lift y out of the right subtree, re-homing its right
                    // child to y's old place as the left child of its parent.
                    let deficient = self.deficient_position(y_right, y);
                    self.transplant(y, y_right);

                    self.nodes[y].right = Some(right);
                    self.nodes[right].parent = Some(y);
                    deficient
                };

                self.transplant(z, Some(y));
                self.nodes[y].left = Some(left);
                self.nodes[left].parent = Some(y);
                self.nodes[y].color = self.nodes[z].color;

                (removed_color, deficient)
            }
        };

        // Removing a red node never changes any black-height.
        if removed_color == Color::Black {
            if let Some(deficient) = deficient {
                self.delete_rebalance(deficient);
            }
        }

        let n = self.nodes.remove(z);
        debug_assert!(!self.is_red(self.root));
        debug_assert!(self.root.map_or(true, |v| self.nodes[v].parent.is_none()));
        n.into_tuple()
    }

    /// Describe the position `child` will occupy once it replaces `old`.
    ///
    /// Returns [`None`] only when the tree becomes empty.
    fn deficient_position(&self, child: Option<usize>, old: usize) -> Option<Deficient> {
        if let Some(child) = child {
            return Some(Deficient::Node(child));
        }

        let parent = self.nodes[old].parent?;
        Some(Deficient::Vacant {
            parent,
            side: self.side_of(old, parent),
        })
    }

    /// Repair the black-height deficit of one on every path through `x`.
    fn delete_rebalance(&mut self, mut x: Deficient) {
        let last = loop {
            // Resolve the parent and side of the deficient position. A red or
            // root node absorbs the deficit by being coloured black below.
            let (parent, side) = match x {
                Deficient::Node(n) if self.nodes[n].is_red() => break Some(n),
                Deficient::Node(n) => match self.nodes[n].parent {
                    Some(p) => (p, self.side_of(n, p)),
                    None => break Some(n),
                },
                Deficient::Vacant { parent, side } => (parent, side),
            };

            let far = side.opposite();
            let mut sibling = self.sibling(parent, side);

            if self.nodes[sibling].is_red() {
                // Red sibling: rotate it above the parent so the deficient
                // position gains a black sibling, then carry on with the
                // cases below.
                //
                // ```text
                //       p(B)                  s(B)
                //      /    \                /    \
                //     x     s(R)    ->     p(R)    d
                //          /    \         /    \
                //         c      d       x      c
                // ```
                self.set_color(sibling, Color::Black);
                self.set_color(parent, Color::Red);
                self.rotate(parent, side);
                sibling = self.sibling(parent, side);
            }

            let near_child = self.nodes[sibling].child(side);
            let far_child = self.nodes[sibling].child(far);

            if !self.is_red(near_child) && !self.is_red(far_child) {
                // Black sibling with black children: remove one black from
                // the sibling's side too, and move the deficit up to the
                // parent.
                trace!("delete rebalance moving deficit to parent");
                self.set_color(sibling, Color::Red);
                x = Deficient::Node(parent);
                continue;
            }

            if !self.is_red(far_child) {
                // Black far nephew, red near nephew: rotate the near nephew
                // above the sibling so the red is on the far side.
                //
                // ```text
                //     p                 p
                //    / \               / \
                //   x   s(B)    ->    x   c(B)
                //      /                   \
                //    c(R)                  s(R)
                // ```
                if let Some(near_child) = near_child {
                    self.set_color(near_child, Color::Black);
                }
                self.set_color(sibling, Color::Red);
                self.rotate(sibling, far);
                sibling = self.sibling(parent, side);
            }

            // Red far nephew: rotate the sibling above the parent, adding a
            // black node to the deficient side while keeping the far side's
            // black-height through the recoloured far nephew.
            //
            // ```text
            //      p(?)                  s(?)
            //     /    \                /    \
            //    x     s(B)    ->     p(B)   d(B)
            //         /    \         /    \
            //        c     d(R)     x      c
            // ```
            self.set_color(sibling, self.nodes[parent].color);
            self.set_color(parent, Color::Black);
            if let Some(far_child) = self.nodes[sibling].child(far) {
                self.set_color(far_child, Color::Black);
            }
            self.rotate(parent, side);
            break self.root;
        };

        if let Some(last) = last {
            self.set_color(last, Color::Black);
        }
    }

    /// Returns the sibling of the deficient `side` child of `parent`.
    ///
    /// # Panics
    ///
    /// A position with a black-height deficit always has a sibling subtree
    /// containing at least one black node; this panics if it does not.
    fn sibling(&self, parent: usize, side: Side) -> usize {
        self.nodes[parent]
            .child(side.opposite())
            .expect("a black-height deficit implies a sibling")
    }
}

impl<K, V, C> RbTree<K, V, C>
where
    C: Comparator<K>,
{
    /// Remove the node holding a key equal to `key`, returning the key and
    /// value it held.
    pub fn remove_key(&mut self, key: &K) -> Option<(K, V)> {
        let slot = self.find_slot(key)?;
        Some(self.remove_slot(slot))
    }

    /// Remove every node whose key falls within `range`, returning the
    /// number of nodes removed.
    ///
    /// Handles to nodes outside `range` remain valid.
    pub fn remove_range<R>(&mut self, range: R) -> usize
    where
        R: RangeBounds<K>,
    {
        let Some((mut v, back)) = self.range_span(&range) else {
            return 0;
        };

        // Removal never moves a surviving node to a different slot, so the
        // successor found before unlinking `v` is still valid after it.
        let mut removed = 0;
        loop {
            let next = if v == back {
                None
            } else {
                self.successor_slot(v)
            };

            self.remove_slot(v);
            removed += 1;

            match next {
                Some(n) => v = n,
                None => break,
            }
        }

        debug!("removed {removed} nodes in range");
        removed
    }
}
